/// Demo-mode input source: nudges the ship around at random so the sweep
/// can be watched without a player.

use rand::Rng;

/// Chance per decision that the autopilot presses a key at all.
const PRESS_PROBABILITY: f64 = 0.6;

/// Decisions a direction is kept before a new one is rolled.
const MAX_HOLD: u32 = 12;

#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    current: Option<&'static str>,
    remaining: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key to press for this decision, or `None` to stay put.  All randomness
    /// comes through `rng` so callers control determinism.
    pub fn next_key(&mut self, rng: &mut impl Rng) -> Option<&'static str> {
        if self.remaining == 0 {
            self.current = if rng.gen_bool(PRESS_PROBABILITY) {
                Some(if rng.gen_bool(0.5) { "ArrowLeft" } else { "ArrowRight" })
            } else {
                None
            };
            self.remaining = rng.gen_range(1..=MAX_HOLD);
        }
        self.remaining -= 1;
        self.current
    }
}
