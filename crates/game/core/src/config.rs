/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Board width in columns.
    pub board_width: u32,
    /// Board height in rows.
    pub board_height: u32,
    /// HP at or below this percentage of max HP counts as critical health.
    pub critical_health_percent: u32,
    /// HP restored at the end of a turn to units that queued nothing and had no enemy adjacent.
    pub rest_heal: u32,
    /// Experience granted for landing a killing blow.
    pub kill_xp: u32,
    /// Placement cap per side. Echoes are not counted.
    pub max_units_per_player: usize,
    /// Cumulative experience needed for levels 2, 3, ...
    pub xp_thresholds: Vec<u32>,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIVE_SKILLS: usize = 3;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_WIDTH: u32 = 20;
    pub const DEFAULT_BOARD_HEIGHT: u32 = 10;
    pub const DEFAULT_CRITICAL_HEALTH_PERCENT: u32 = 30;
    pub const DEFAULT_REST_HEAL: u32 = 1;
    pub const DEFAULT_KILL_XP: u32 = 5;
    pub const DEFAULT_MAX_UNITS_PER_PLAYER: usize = 3;
    pub const DEFAULT_XP_THRESHOLDS: [u32; 4] = [10, 25, 45, 70];

    pub fn new() -> Self {
        Self {
            board_width: Self::DEFAULT_BOARD_WIDTH,
            board_height: Self::DEFAULT_BOARD_HEIGHT,
            critical_health_percent: Self::DEFAULT_CRITICAL_HEALTH_PERCENT,
            rest_heal: Self::DEFAULT_REST_HEAL,
            kill_xp: Self::DEFAULT_KILL_XP,
            max_units_per_player: Self::DEFAULT_MAX_UNITS_PER_PLAYER,
            xp_thresholds: Self::DEFAULT_XP_THRESHOLDS.to_vec(),
        }
    }

    /// True when `hp` is alive but at or below the critical threshold.
    pub fn is_critical(&self, hp: u32, max_hp: u32) -> bool {
        hp > 0 && u64::from(hp) * 100 <= u64::from(max_hp) * u64::from(self.critical_health_percent)
    }

    /// Level reached with `xp` cumulative experience. Levels start at 1.
    pub fn level_for(&self, xp: u32) -> u8 {
        let reached = self.xp_thresholds.iter().filter(|&&need| xp >= need).count();
        u8::try_from(reached + 1).unwrap_or(u8::MAX)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
