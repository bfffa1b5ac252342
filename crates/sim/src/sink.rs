//! Text rendering of resolved events.

use tactics_core::{HazardKind, PresentationSink, ResolvedEvent};
use tracing::debug;

/// Mirrors every event to the `debug` log as it resolves.
#[derive(Debug, Default)]
pub struct LogSink {
    seen: usize,
}

impl LogSink {
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl PresentationSink for LogSink {
    fn on_event(&mut self, event: &ResolvedEvent) {
        self.seen += 1;
        debug!(seq = self.seen, "{}", describe(event));
    }
}

fn hazard_name(hazard: HazardKind) -> String {
    match hazard {
        HazardKind::Dike => "marrow dike".to_string(),
        HazardKind::Vapor(kind) => format!("{} vapor", kind),
        HazardKind::Anchor => "market anchor".to_string(),
    }
}

/// One-line description of `event`.
pub fn describe(event: &ResolvedEvent) -> String {
    use ResolvedEvent as E;

    match event {
        E::Moved { unit, from, to } => format!("{} moves {} -> {}", unit, from, to),
        E::ActionSkipped { unit, slot, reason } => {
            format!("{} skips {:?}: {}", unit, slot, reason)
        }
        E::Attacked { attacker, target } => format!("{} attacks {}", attacker, target),
        E::WallDamaged {
            attacker,
            position,
            remaining,
        } => format!("{} hits the wall at {} ({} left)", attacker, position, remaining),
        E::WallDestroyed { position } => format!("wall at {} collapses", position),
        E::SkillUsed {
            unit,
            skill,
            target,
        } => format!("{} uses {} on {}", unit, skill.info().name, target),
        E::Damaged {
            source,
            target,
            amount,
            hp_after,
            cause,
        } => match source {
            Some(source) => format!(
                "{} takes {} from {} ({:?}), {} HP left",
                target, amount, source, cause, hp_after
            ),
            None => format!("{} takes {} ({:?}), {} HP left", target, amount, cause, hp_after),
        },
        E::Healed {
            unit,
            amount,
            hp_after,
        } => format!("{} recovers {}, now {} HP", unit, amount, hp_after),
        E::Displaced {
            unit,
            from,
            to,
            distance,
        } => format!("{} is knocked {} -> {} ({} tiles)", unit, from, to, distance),
        E::Teleported { unit, from, to } => format!("{} blinks {} -> {}", unit, from, to),
        E::Captured { captor, captive } => format!("{} seizes {}", captor, captive),
        E::CaptiveReleased { captor, captive } => format!("{} lets go of {}", captor, captive),
        E::EffectApplied {
            unit,
            kind,
            duration,
        } => format!("{} gains {} for {} turns", unit, kind, duration),
        E::EffectResisted { unit, kind } => format!("{} shrugs off {}", unit, kind),
        E::EffectExpired { unit, kind } => format!("{} loses {}", unit, kind),
        E::EchoCreated {
            echo,
            original,
            position,
        } => format!("{} leaves echo {} at {}", original, echo, position),
        E::HazardCreated {
            owner,
            hazard,
            center,
        } => format!("{} raises a {} at {}", owner, hazard_name(*hazard), center),
        E::HazardExpired {
            owner,
            hazard,
            center,
        } => format!("{}'s {} at {} dissipates", owner, hazard_name(*hazard), center),
        E::PassiveTriggered { unit, passive } => {
            format!("{} triggers {}", unit, <&'static str>::from(*passive))
        }
        E::SkillUpgraded { unit, skill } => {
            format!("{} upgrades {}", unit, skill.info().name)
        }
        E::LevelUp { unit, level } => format!("{} reaches level {}", unit, level),
        E::UnitDied {
            unit,
            killer,
            cause,
        } => match killer {
            Some(killer) => format!("{} is slain by {} ({:?})", unit, killer, cause),
            None => format!("{} perishes ({:?})", unit, cause),
        },
        E::TurnEnded { ended, next, turn } => {
            format!("{} ends the turn; {} to act on turn {}", ended, next, turn)
        }
        E::Victory { winner } => format!("{} wins", winner),
    }
}
