//! Orders a unit can carry into resolution.
//!
//! - `error`: [`ActionError`], shared by planning and resolution
//! - `rules`: board legality checks reused by both phases
//! - `planning`: the writers that fill a unit's pending-action slot

mod error;
pub mod planning;
pub mod rules;

pub use error::ActionError;
pub use planning::{queue_attack, queue_move, queue_skill};
pub use rules::{AttackTarget, Passage};

use crate::skill::ActiveSkillKind;

/// Which part of a unit's pending action an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSlot {
    Move,
    Attack,
    Skill(ActiveSkillKind),
}
