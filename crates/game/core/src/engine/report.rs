use crate::action::{ActionError, ActionSlot};
use crate::hazard::{HazardKind, VaporKind};
use crate::skill::{ActiveSkillKind, PassiveKind};
use crate::state::{Player, Position, UnitId};
use crate::status::StatusKind;

/// Why HP was lost. Doubles as the cause recorded when a unit dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCause {
    Attack,
    Skill(ActiveSkillKind),
    Trap,
    Hazard(VaporKind),
    EchoExplosion,
    EchoExpired,
    Autoclave,
    WretchedDecension,
}

/// One observable step of a resolution pass, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedEvent {
    Moved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    ActionSkipped {
        unit: UnitId,
        slot: ActionSlot,
        reason: ActionError,
    },
    Attacked {
        attacker: UnitId,
        target: Position,
    },
    WallDamaged {
        attacker: UnitId,
        position: Position,
        remaining: u32,
    },
    WallDestroyed {
        position: Position,
    },
    SkillUsed {
        unit: UnitId,
        skill: ActiveSkillKind,
        target: Position,
    },
    Damaged {
        source: Option<UnitId>,
        target: UnitId,
        amount: u32,
        hp_after: u32,
        cause: DamageCause,
    },
    Healed {
        unit: UnitId,
        amount: u32,
        hp_after: u32,
    },
    Displaced {
        unit: UnitId,
        from: Position,
        to: Position,
        distance: u32,
    },
    Teleported {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    Captured {
        captor: UnitId,
        captive: UnitId,
    },
    CaptiveReleased {
        captor: UnitId,
        captive: UnitId,
    },
    EffectApplied {
        unit: UnitId,
        kind: StatusKind,
        duration: u32,
    },
    EffectResisted {
        unit: UnitId,
        kind: StatusKind,
    },
    EffectExpired {
        unit: UnitId,
        kind: StatusKind,
    },
    EchoCreated {
        echo: UnitId,
        original: UnitId,
        position: Position,
    },
    HazardCreated {
        owner: UnitId,
        hazard: HazardKind,
        center: Position,
    },
    HazardExpired {
        owner: UnitId,
        hazard: HazardKind,
        center: Position,
    },
    PassiveTriggered {
        unit: UnitId,
        passive: PassiveKind,
    },
    SkillUpgraded {
        unit: UnitId,
        skill: ActiveSkillKind,
    },
    LevelUp {
        unit: UnitId,
        level: u8,
    },
    UnitDied {
        unit: UnitId,
        killer: Option<UnitId>,
        cause: DamageCause,
    },
    TurnEnded {
        ended: Player,
        next: Player,
        turn: u32,
    },
    Victory {
        winner: Player,
    },
}

/// Everything one `execute_turn` call did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub winner: Option<Player>,
    pub events: Vec<ResolvedEvent>,
}

impl TurnReport {
    pub fn deaths(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.events.iter().filter_map(|event| match event {
            ResolvedEvent::UnitDied { unit, .. } => Some(*unit),
            _ => None,
        })
    }
}

/// Optional observer for animation. Resolution never depends on it.
pub trait PresentationSink {
    fn on_event(&mut self, event: &ResolvedEvent);
}
