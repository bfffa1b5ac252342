use super::Player;

/// Whose turn it is and the counters that make resolution reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub current_player: Player,

    /// Global turn counter, bumped when play wraps back to player one.
    pub turn_number: u32,

    /// Source of `action_timestamp` values. Incremented on every successful queue.
    pub action_counter: u64,

    /// Resolution pass counter. Incremented once per `execute_turn` and mixed
    /// into every random draw of that pass.
    pub nonce: u64,

    /// Set once a side has been wiped out; no further turns switch after that.
    pub winner: Option<Player>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            current_player: Player::One,
            turn_number: 1,
            action_counter: 0,
            nonce: 0,
            winner: None,
        }
    }

    pub fn next_timestamp(&mut self) -> u64 {
        self.action_counter += 1;
        self.action_counter
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
