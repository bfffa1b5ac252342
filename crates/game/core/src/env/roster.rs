use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::skill::{ActiveSkillKind, PassiveKind};
use crate::state::{BaseStats, SetupError, UnitType};

/// Stats and skill kit for one unit type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub kind: UnitType,
    pub stats: BaseStats,
    pub passive: PassiveKind,
    pub actives: Vec<ActiveSkillKind>,
}

/// Source of archetypes consulted when units are spawned.
pub trait RosterOracle {
    fn archetype(&self, kind: UnitType) -> Option<&Archetype>;
}

/// Archetype table, either built in or loaded from content files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    archetypes: Vec<Archetype>,
}

const fn stats(max_hp: u32, attack: i32, defense: i32, move_range: i32, attack_range: i32) -> BaseStats {
    BaseStats {
        max_hp,
        attack,
        defense,
        move_range,
        attack_range,
    }
}

impl Roster {
    pub fn new(archetypes: Vec<Archetype>) -> Self {
        Self { archetypes }
    }

    /// The stock seven-unit roster.
    pub fn standard() -> Self {
        use ActiveSkillKind as A;

        let entry = |kind, stats, passive, actives: [ActiveSkillKind; 3]| Archetype {
            kind,
            stats,
            passive,
            actives: actives.to_vec(),
        };

        Self::new(vec![
            entry(
                UnitType::Glaiveman,
                stats(22, 4, 1, 2, 2),
                PassiveKind::Autoclave,
                [A::Pry, A::Vault, A::Judgement],
            ),
            entry(
                UnitType::MandibleForeman,
                stats(22, 3, 1, 2, 1),
                PassiveKind::Viseroy,
                [A::Expedite, A::SiteInspection, A::Jawline],
            ),
            entry(
                UnitType::Grayman,
                stats(18, 3, 0, 2, 5),
                PassiveKind::Stasiality,
                [A::DeltaConfig, A::Estrange, A::GraeExchange],
            ),
            entry(
                UnitType::MarrowCondenser,
                stats(20, 4, 2, 2, 1),
                PassiveKind::Dominion,
                [A::Ossify, A::MarrowDike, A::BoneTithe],
            ),
            entry(
                UnitType::FowlContrivance,
                stats(18, 5, 0, 4, 2),
                PassiveKind::WretchedDecension,
                [A::MurmurationDusk, A::Flap, A::EmeticFlange],
            ),
            entry(
                UnitType::GasMachinist,
                stats(18, 2, 1, 3, 2),
                PassiveKind::EffluviumLathe,
                [A::BroachingGas, A::SaftEGas, A::Diverge],
            ),
            entry(
                UnitType::DelphicAppraiser,
                stats(20, 3, 0, 3, 2),
                PassiveKind::ValuationOracle,
                [A::MarketFutures, A::AuctionCurse, A::DivineDepreciation],
            ),
        ])
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Checks that every unit type maps to exactly one usable kit.
    pub fn validate(&self) -> Result<(), SetupError> {
        for kind in UnitType::iter() {
            let mut matches = self.archetypes.iter().filter(|a| a.kind == kind);
            let archetype = matches.next().ok_or(SetupError::MissingArchetype(kind))?;
            if matches.next().is_some() {
                return Err(SetupError::DuplicateArchetype(kind));
            }
            if archetype.actives.is_empty() || archetype.actives.len() > GameConfig::MAX_ACTIVE_SKILLS {
                return Err(SetupError::InvalidKit {
                    kind,
                    actives: archetype.actives.len(),
                });
            }
            if archetype.stats.max_hp == 0 {
                return Err(SetupError::InvalidStats(kind));
            }
        }
        Ok(())
    }
}

impl RosterOracle for Roster {
    fn archetype(&self, kind: UnitType) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| archetype.kind == kind)
    }
}
