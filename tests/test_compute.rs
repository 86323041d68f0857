use sweep_shooter::compute::*;
use sweep_shooter::entities::*;
use sweep_shooter::FormationLayout;

use proptest::prelude::*;

fn playfield() -> Playfield {
    Playfield::new(600, 32).unwrap() // right bound 568
}

fn formation_at(lefts: &[i32], direction: SweepDirection) -> Formation {
    Formation {
        enemies: lefts.iter().map(|&left| Enemy { left, top: 50 }).collect(),
        direction,
    }
}

fn rightmost(f: &Formation) -> i32 {
    f.extremes().unwrap().1
}

// ── clamp ─────────────────────────────────────────────────────────────────────

#[test]
fn clamp_keeps_in_range_values() {
    assert_eq!(clamp(&playfield(), 0), 0);
    assert_eq!(clamp(&playfield(), 300), 300);
    assert_eq!(clamp(&playfield(), 568), 568);
}

#[test]
fn clamp_pulls_out_of_range_values_to_bounds() {
    assert_eq!(clamp(&playfield(), -7), 0);
    assert_eq!(clamp(&playfield(), 569), 568);
    assert_eq!(clamp(&playfield(), i32::MAX), 568);
}

// ── init_formation ────────────────────────────────────────────────────────────

#[test]
fn reference_layout_has_sixteen_enemies() {
    let f = init_formation(&FormationLayout::default());
    assert_eq!(f.enemies.len(), 16);
    assert_eq!(f.enemies[0], Enemy { left: 50, top: 50 });
    assert_eq!(f.enemies[15], Enemy { left: 470, top: 100 });
    assert_eq!(f.direction, SweepDirection::Right);
}

#[test]
fn formation_is_row_major() {
    let f = init_formation(&FormationLayout::default());
    // Second enemy sits beside the first, ninth starts the second row.
    assert_eq!(f.enemies[1], Enemy { left: 110, top: 50 });
    assert_eq!(f.enemies[7], Enemy { left: 470, top: 50 });
    assert_eq!(f.enemies[8], Enemy { left: 50, top: 100 });
}

#[test]
fn init_formation_is_deterministic() {
    let layout = FormationLayout::default();
    assert_eq!(init_formation(&layout), init_formation(&layout));
}

#[test]
fn empty_layout_gives_empty_formation() {
    let layout = FormationLayout { rows: 0, ..FormationLayout::default() };
    assert!(init_formation(&layout).enemies.is_empty());
}

// ── init_ship / move_ship ─────────────────────────────────────────────────────

#[test]
fn ship_starts_centred() {
    assert_eq!(init_ship(&playfield()).position, 284);
}

#[test]
fn left_then_right_returns_to_start() {
    let pf = playfield();
    let ship = init_ship(&pf);
    let left = move_ship(&ship, &pf, ShipInput::Left, 10);
    assert_eq!(left.position, 274);
    let back = move_ship(&left, &pf, ShipInput::Right, 10);
    assert_eq!(back.position, 284);
}

#[test]
fn move_left_clamps_at_left_bound() {
    let pf = playfield();
    let s = move_ship(&Ship { position: 4 }, &pf, ShipInput::Left, 10);
    assert_eq!(s.position, 0);
}

#[test]
fn move_right_clamps_at_right_bound() {
    let pf = playfield();
    let s = move_ship(&Ship { position: 565 }, &pf, ShipInput::Right, 10);
    assert_eq!(s.position, 568);
}

#[test]
fn move_does_not_mutate_original() {
    let pf = playfield();
    let ship = Ship { position: 100 };
    let _ = move_ship(&ship, &pf, ShipInput::Right, 10);
    assert_eq!(ship.position, 100);
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_right_by_step() {
    let f = init_formation(&FormationLayout::default());
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Right);
    for (before, after) in f.enemies.iter().zip(&f2.enemies) {
        assert_eq!(after.left, before.left + 2);
        assert_eq!(after.top, before.top);
    }
}

#[test]
fn flip_at_right_bound_takes_effect_same_tick() {
    let f = formation_at(&[100, 568], SweepDirection::Right);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Left);
    assert_eq!(rightmost(&f2), 566);
}

#[test]
fn overshoot_past_right_bound_is_not_clamped() {
    let f = formation_at(&[567], SweepDirection::Right);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Right);
    assert_eq!(rightmost(&f2), 569);

    let f3 = advance(&f2, &playfield(), 2);
    assert_eq!(f3.direction, SweepDirection::Left);
    assert_eq!(rightmost(&f3), 567);
}

#[test]
fn flip_at_left_bound() {
    let f = formation_at(&[0, 300], SweepDirection::Left);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Right);
    assert_eq!(f2.enemies[0].left, 2);
}

#[test]
fn overshoot_past_left_bound_is_pulled_back() {
    let f = formation_at(&[-1, 200], SweepDirection::Left);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Right);
    assert_eq!(f2.enemies[0].left, 1);
}

#[test]
fn right_bound_wins_when_both_are_touched() {
    let f = formation_at(&[0, 568], SweepDirection::Right);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Left);
    assert_eq!(f2.enemies[0].left, -2);
}

#[test]
fn direction_kept_between_bounds() {
    let f = formation_at(&[200, 300], SweepDirection::Left);
    assert_eq!(next_direction(&f, &playfield()), SweepDirection::Left);
    let f2 = advance(&f, &playfield(), 3);
    assert_eq!(f2.direction, SweepDirection::Left);
    assert_eq!(f2.enemies[0].left, 197);
}

#[test]
fn advance_saturates_at_coordinate_limits() {
    // Right bound wins, so the whole formation steps left past i32::MIN.
    let f = formation_at(&[i32::MIN, 568], SweepDirection::Right);
    let f2 = advance(&f, &playfield(), 2);
    assert_eq!(f2.direction, SweepDirection::Left);
    assert_eq!(f2.enemies[0].left, i32::MIN);
    assert_eq!(f2.enemies[1].left, 566);
}

#[test]
fn unchecked_layout_saturates_instead_of_wrapping() {
    let layout = FormationLayout { origin_x: i32::MAX - 10, ..FormationLayout::default() };
    let f = init_formation(&layout);
    assert_eq!(f.enemies.len(), 16);
    assert_eq!(f.enemies[0].left, i32::MAX - 10);
    assert_eq!(f.enemies[7].left, i32::MAX);
}

#[test]
fn zero_step_is_a_no_op() {
    let f = formation_at(&[100, 568], SweepDirection::Right);
    assert_eq!(advance(&f, &playfield(), 0), f);
}

#[test]
fn empty_formation_stays_empty() {
    let f = Formation::default();
    let f2 = advance(&f, &playfield(), 2);
    assert!(f2.enemies.is_empty());
    assert_eq!(f2.direction, SweepDirection::Right);
}

#[test]
fn reference_formation_reverses_after_forty_nine_ticks() {
    // Rightmost starts at 470 and reaches 568 after 49 steps of 2.
    let pf = playfield();
    let mut f = init_formation(&FormationLayout::default());
    for _ in 0..49 {
        f = advance(&f, &pf, 2);
        assert_eq!(f.direction, SweepDirection::Right);
    }
    assert_eq!(rightmost(&f), 568);
    f = advance(&f, &pf, 2);
    assert_eq!(f.direction, SweepDirection::Left);
    assert_eq!(rightmost(&f), 566);
}

#[test]
fn full_sweep_round_trip() {
    // Leftmost starts at 50: right to 568 (49 ticks), back to 0 (then flip).
    let pf = playfield();
    let mut f = init_formation(&FormationLayout::default());
    let mut flips = 0;
    let mut last = f.direction;
    for _ in 0..400 {
        f = advance(&f, &pf, 2);
        if f.direction != last {
            flips += 1;
            last = f.direction;
        }
        let (leftmost, rightmost) = f.extremes().unwrap();
        assert!(leftmost >= -2);
        assert!(rightmost <= 570);
    }
    assert!(flips >= 2);
}

// ── properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn repeated_left_never_below_left_bound(start in 0i32..=568, presses in 1usize..100, distance in 0u16..200) {
        let pf = playfield();
        let mut ship = Ship { position: start };
        for _ in 0..presses {
            ship = move_ship(&ship, &pf, ShipInput::Left, distance);
            prop_assert!(ship.position >= pf.left_bound());
        }
    }

    #[test]
    fn repeated_right_never_above_right_bound(start in 0i32..=568, presses in 1usize..100, distance in 0u16..200) {
        let pf = playfield();
        let mut ship = Ship { position: start };
        for _ in 0..presses {
            ship = move_ship(&ship, &pf, ShipInput::Right, distance);
            prop_assert!(ship.position <= pf.right_bound());
        }
    }

    #[test]
    fn zero_step_leaves_any_formation_unchanged(
        lefts in proptest::collection::vec(-10i32..700, 0..20),
        going_left in any::<bool>(),
    ) {
        let direction = if going_left { SweepDirection::Left } else { SweepDirection::Right };
        let f = formation_at(&lefts, direction);
        prop_assert_eq!(advance(&f, &playfield(), 0), f);
    }
}
