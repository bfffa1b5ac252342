//! Action validation errors.
//!
//! The same enum serves both phases: planning writers return it to reject an
//! order outright, and the engine records it in
//! [`crate::ResolvedEvent::ActionSkipped`] when a queued order went stale.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("unit not found or dead")]
    UnitMissing,

    #[error("unit does not belong to the active player")]
    NotYourTurn,

    #[error("the match is already decided")]
    MatchOver,

    #[error("unit is held captive")]
    Trapped,

    #[error("echoes may only attack")]
    EchoRestricted,

    #[error("position out of bounds")]
    OutOfBounds,

    #[error("out of range")]
    OutOfRange,

    #[error("destination is impassable")]
    Impassable,

    #[error("destination is occupied")]
    Occupied,

    #[error("path is blocked")]
    PathBlocked,

    #[error("no line of sight")]
    NoLineOfSight,

    #[error("nothing to target there")]
    NoTarget,

    #[error("target is friendly")]
    FriendlyTarget,

    #[error("target is inside a protection zone")]
    Protected,

    #[error("skill is on cooldown")]
    OnCooldown,

    #[error("no such skill slot")]
    UnknownSkill,

    #[error("invalid target for this skill")]
    InvalidTarget,

    #[error("attack and skill cannot both be queued")]
    ActionConflict,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            UnitMissing | Trapped | Impassable | Occupied | PathBlocked | NoLineOfSight
            | NoTarget | Protected | OutOfRange => ErrorSeverity::Recoverable,
            NotYourTurn | MatchOver | EchoRestricted | OutOfBounds | FriendlyTarget
            | OnCooldown | UnknownSkill | InvalidTarget | ActionConflict => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnitMissing => "ACTION_UNIT_MISSING",
            NotYourTurn => "ACTION_NOT_YOUR_TURN",
            MatchOver => "ACTION_MATCH_OVER",
            Trapped => "ACTION_TRAPPED",
            EchoRestricted => "ACTION_ECHO_RESTRICTED",
            OutOfBounds => "ACTION_OUT_OF_BOUNDS",
            OutOfRange => "ACTION_OUT_OF_RANGE",
            Impassable => "ACTION_IMPASSABLE",
            Occupied => "ACTION_OCCUPIED",
            PathBlocked => "ACTION_PATH_BLOCKED",
            NoLineOfSight => "ACTION_NO_LINE_OF_SIGHT",
            NoTarget => "ACTION_NO_TARGET",
            FriendlyTarget => "ACTION_FRIENDLY_TARGET",
            Protected => "ACTION_PROTECTED",
            OnCooldown => "ACTION_ON_COOLDOWN",
            UnknownSkill => "ACTION_UNKNOWN_SKILL",
            InvalidTarget => "ACTION_INVALID_TARGET",
            ActionConflict => "ACTION_CONFLICT",
        }
    }
}
