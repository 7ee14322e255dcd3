use item_catcher::compute::*;
use item_catcher::entities::*;
use item_catcher::input::{Key, KeyState};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn screen() -> Screen {
    Screen {
        width: 800.0,
        height: 600.0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── collides ──────────────────────────────────────────────────────────────────

#[test]
fn overlapping_bodies_collide() {
    let player = Body::new(400.0, 300.0, PLAYER_SIZE);
    let item = Body::new(420.0, 310.0, ITEM_SIZE);
    assert!(collides(&player, &item));
}

#[test]
fn touching_bodies_do_not_collide() {
    // 25 + 20 = 45 apart exactly
    let player = Body::new(400.0, 300.0, PLAYER_SIZE);
    let enemy = Body::new(400.0, 345.0, ENEMY_SIZE);
    assert!(!collides(&player, &enemy));
}

#[test]
fn collision_uses_half_width_only() {
    // A tall, thin body still uses its width for the radius
    let player = Body::new(0.0, 0.0, PLAYER_SIZE);
    let tall = Body {
        x: 0.0,
        y: 40.0,
        width: 10.0,
        height: 200.0,
    };
    assert!(!collides(&player, &tall));
}

#[test]
fn collision_is_symmetric() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let a = Body::new(
            rng.gen_range(0.0..800.0),
            rng.gen_range(0.0..600.0),
            rng.gen_range(10.0..60.0),
        );
        let b = Body::new(
            rng.gen_range(0.0..800.0),
            rng.gen_range(0.0..600.0),
            rng.gen_range(10.0..60.0),
        );
        assert_eq!(collides(&a, &b), collides(&b, &a));
    }
}

// ── apply_movement ────────────────────────────────────────────────────────────

#[test]
fn no_keys_no_movement() {
    let body = Body::new(100.0, 100.0, PLAYER_SIZE);
    assert_eq!(apply_movement(&body, &KeyState::new(), 5.0), body);
}

#[test]
fn each_arrow_moves_along_its_axis() {
    let body = Body::new(100.0, 100.0, PLAYER_SIZE);
    let cases = [
        (Key::ArrowUp, (100.0, 95.0)),
        (Key::ArrowDown, (100.0, 105.0)),
        (Key::ArrowLeft, (95.0, 100.0)),
        (Key::ArrowRight, (105.0, 100.0)),
    ];
    for (key, expected) in cases {
        let mut keys = KeyState::new();
        keys.key_down(key);
        let moved = apply_movement(&body, &keys, 5.0);
        assert_eq!((moved.x, moved.y), expected, "{key}");
    }
}

#[test]
fn opposite_arrows_cancel() {
    let body = Body::new(100.0, 100.0, PLAYER_SIZE);
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowLeft);
    keys.key_down(Key::ArrowRight);
    assert_eq!(apply_movement(&body, &keys, 5.0), body);
}

#[test]
fn movement_does_not_mutate_original() {
    let body = Body::new(100.0, 100.0, PLAYER_SIZE);
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowUp);
    let _moved = apply_movement(&body, &keys, 5.0);
    assert_eq!(body.y, 100.0);
}

// ── clamp_to_screen ───────────────────────────────────────────────────────────

#[test]
fn clamp_keeps_inside_point() {
    let body = Body::new(400.0, 300.0, PLAYER_SIZE);
    assert_eq!(clamp_to_screen(&body, screen()), body);
}

#[test]
fn clamp_pulls_body_fully_on_screen() {
    let low = clamp_to_screen(&Body::new(-50.0, 10.0, PLAYER_SIZE), screen());
    assert_eq!((low.x, low.y), (25.0, 25.0));

    let high = clamp_to_screen(&Body::new(1000.0, 599.0, PLAYER_SIZE), screen());
    assert_eq!((high.x, high.y), (775.0, 575.0));
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn roll_extremes() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert!(!roll(&mut rng, 0.0));
        assert!(roll(&mut rng, 1.0));
    }
}

#[test]
fn roll_rate_is_roughly_the_chance() {
    let mut rng = seeded_rng();
    let hits = (0..100_000).filter(|_| roll(&mut rng, 0.02)).count();
    assert!((1500..2500).contains(&hits), "hits = {hits}");
}

#[test]
fn items_spawn_fully_on_screen() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let (x, y) = random_item_position(&mut rng, screen());
        assert!((15.0..=785.0).contains(&x));
        assert!((15.0..=585.0).contains(&y));
    }
}

#[test]
fn enemies_spawn_above_the_top_edge() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let spawn = random_enemy_spawn(&mut rng, screen());
        assert!((20.0..=780.0).contains(&spawn.x));
        assert_eq!(spawn.y, ENEMY_SPAWN_Y);
        assert!((ENEMY_MIN_SPEED..ENEMY_MAX_SPEED).contains(&spawn.speed));
    }
}

#[test]
fn spawns_are_deterministic_for_a_seed() {
    let a = random_enemy_spawn(&mut seeded_rng(), screen());
    let b = random_enemy_spawn(&mut seeded_rng(), screen());
    assert_eq!(a, b);
}

// ── compact ───────────────────────────────────────────────────────────────────

#[test]
fn compact_drops_marked_indices() {
    let kept = compact(vec!['a', 'b', 'c', 'd', 'e'], &[3, 0]);
    assert_eq!(kept, vec!['b', 'c', 'e']);
}

#[test]
fn compact_without_marks_keeps_everything() {
    let kept = compact(vec![1, 2, 3], &[]);
    assert_eq!(kept, vec![1, 2, 3]);
}
