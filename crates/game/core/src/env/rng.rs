//! Seeded randomness for tie-breaks and trigger-chance rolls.
//!
//! Randomness is the only non-deterministic input to turn resolution, so it is
//! isolated behind [`RngOracle`]. Every draw is keyed by a seed derived from the
//! match seed plus the draw's coordinates ([`compute_seed`]); two instances fed
//! the same board, orders and match seed therefore draw identical values
//! regardless of how many other draws happened elsewhere.

/// Deterministic random source.
pub trait RngOracle {
    /// Random u32 for the given derived seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// Stateless PCG-XSH-RR generator.
///
/// Each call performs one LCG step from the provided seed and permutes the
/// result, so output depends on the seed alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Context tags keeping independent draw streams apart.
pub mod context {
    /// Ordering draw for a resolution entry.
    pub const TIE_BREAK: u32 = 0;
    /// Base for chance rolls; the per-turn roll counter is added on top.
    pub const TRIGGER_CHANCE: u32 = 0x100;
    /// Cosmic value of an unpinned furniture tile. Drawn with nonce 0 so a
    /// tile keeps its value for the whole match.
    pub const COSMIC_VALUE: u32 = 0x200;
}

/// Derive a per-draw seed.
///
/// * `game_seed` - match seed fixed at setup
/// * `nonce` - resolution pass counter (one per `execute_turn`)
/// * `subject` - arena index of the unit the draw is about
/// * `context` - stream tag from [`context`]
pub fn compute_seed(game_seed: u64, nonce: u64, subject: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(subject).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
