/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state and
/// returns a brand-new value.  Nothing here owns a timer or touches I/O.

use crate::config::{FormationLayout, MAX_ENEMIES};
use crate::entities::{Enemy, Formation, Playfield, Ship, ShipInput, SweepDirection};

// ── Playfield ────────────────────────────────────────────────────────────────

/// Bound `position` to `[left_bound, right_bound]`.
pub fn clamp(playfield: &Playfield, position: i32) -> i32 {
    position.clamp(playfield.left_bound(), playfield.right_bound())
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_ship(playfield: &Playfield) -> Ship {
    Ship {
        position: playfield.ship_start(),
    }
}

/// Lay the formation out row-major on its grid, sweeping right.
///
/// Expects a layout accepted by `FormationLayout::validate`; coordinates of
/// an unchecked layout saturate instead of wrapping.
pub fn init_formation(layout: &FormationLayout) -> Formation {
    let capacity = layout.enemy_count().unwrap_or(MAX_ENEMIES).min(MAX_ENEMIES);
    let mut enemies = Vec::with_capacity(capacity);
    for row in 0..layout.rows {
        for column in 0..layout.per_row {
            enemies.push(Enemy {
                left: grid_coord(layout.origin_x, column, layout.spacing_x),
                top: grid_coord(layout.origin_y, row, layout.spacing_y),
            });
        }
    }
    Formation {
        enemies,
        direction: SweepDirection::Right,
    }
}

fn grid_coord(origin: i32, index: usize, spacing: i32) -> i32 {
    let index = i32::try_from(index).unwrap_or(i32::MAX);
    index.saturating_mul(spacing).saturating_add(origin)
}

// ── Input-driven state transitions ──────────────────────────────────────────

pub fn move_ship(ship: &Ship, playfield: &Playfield, input: ShipInput, distance: u16) -> Ship {
    let distance = i32::from(distance);
    let target = match input {
        ShipInput::Left => ship.position.saturating_sub(distance),
        ShipInput::Right => ship.position.saturating_add(distance),
    };
    Ship {
        position: clamp(playfield, target),
    }
}

// ── Per-tick formation update ───────────────────────────────────────────────

/// Direction for the coming tick, decided from pre-tick extremes.
///
/// The right bound is checked first, so it wins if both bounds are touched.
pub fn next_direction(formation: &Formation, playfield: &Playfield) -> SweepDirection {
    match formation.extremes() {
        Some((_, rightmost)) if rightmost >= playfield.right_bound() => SweepDirection::Left,
        Some((leftmost, _)) if leftmost <= playfield.left_bound() => SweepDirection::Right,
        _ => formation.direction,
    }
}

/// Advance the formation by one tick.
///
/// A flip takes effect on the same tick that detects the bound.  Positions
/// are not clamped: the formation may end a tick up to `step` past a bound
/// and is pulled back on the next one.  A zero step is a no-op.
pub fn advance(formation: &Formation, playfield: &Playfield, step: u16) -> Formation {
    if step == 0 || formation.enemies.is_empty() {
        return formation.clone();
    }

    let direction = next_direction(formation, playfield);
    let step = i32::from(step);
    let signed_step = match direction {
        SweepDirection::Right => step,
        SweepDirection::Left => -step,
    };

    let enemies = formation
        .enemies
        .iter()
        .map(|e| Enemy {
            left: e.left.saturating_add(signed_step),
            ..*e
        })
        .collect();

    Formation { enemies, direction }
}
