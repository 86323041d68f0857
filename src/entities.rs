/// All game entity types. Data only; transitions live in `compute`.

use crate::config::ConfigError;

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Fixed horizontal bounds shared by the ship and the formation.
///
/// Positions are the left edge of an actor, so the right bound is the width
/// minus the actor size.  Only `Playfield::new` can build one, which keeps
/// `left_bound() <= right_bound()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield {
    width: i32,
    actor_size: i32,
}

impl Playfield {
    pub fn new(width: i32, actor_size: i32) -> Result<Self, ConfigError> {
        if width <= 0 {
            return Err(ConfigError::InvalidWidth { width });
        }
        if actor_size < 0 || actor_size > width {
            return Err(ConfigError::InvalidActorSize { actor_size, width });
        }
        Ok(Self { width, actor_size })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn actor_size(&self) -> i32 {
        self.actor_size
    }

    pub fn left_bound(&self) -> i32 {
        0
    }

    pub fn right_bound(&self) -> i32 {
        self.width - self.actor_size
    }

    /// Centre of the track, rounded down.
    pub fn ship_start(&self) -> i32 {
        (self.width - self.actor_size) / 2
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

/// Shared sweep direction of the whole formation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepDirection {
    Left,
    #[default]
    Right,
}

impl SweepDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepDirection::Left => "left",
            SweepDirection::Right => "right",
        }
    }
}

/// A directional input for the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipInput {
    Left,
    Right,
}

impl ShipInput {
    /// Maps a host key name onto a ship input.  Anything other than the two
    /// arrow keys is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(ShipInput::Left),
            "ArrowRight" => Some(ShipInput::Right),
            _ => None,
        }
    }
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ship {
    /// Horizontal offset of the left edge; the vertical position is fixed.
    pub position: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub left: i32,
    pub top: i32,
}

/// The enemy formation: ordered positions moved as one rigid body, plus the
/// direction of the current sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    pub direction: SweepDirection,
}

impl Formation {
    /// `(leftmost, rightmost)` left edges, or `None` for an empty formation.
    pub fn extremes(&self) -> Option<(i32, i32)> {
        let leftmost = self.enemies.iter().map(|e| e.left).min()?;
        let rightmost = self.enemies.iter().map(|e| e.left).max()?;
        Some((leftmost, rightmost))
    }
}
