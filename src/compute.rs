//! Pure game-logic helpers.
//!
//! Nothing here touches the scene graph or audio: functions take the current
//! values and return new ones. Randomness always comes through an injected
//! `Rng`, so callers control determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::entities::{
    Body, Screen, ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_SIZE, ENEMY_SPAWN_Y, ITEM_SIZE,
};
use crate::input::{Key, KeyState};

/// Where and how fast a new enemy starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Bounding-circle test with radius = half the width; height is ignored.
pub fn collides(a: &Body, b: &Body) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let distance = (dx * dx + dy * dy).sqrt();
    distance < a.width / 2.0 + b.width / 2.0
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Move `speed` units along each held arrow's axis. Diagonals are not
/// normalised.
pub fn apply_movement(body: &Body, keys: &KeyState, speed: f32) -> Body {
    let mut moved = *body;
    if keys.is_held(Key::ArrowUp) {
        moved.y -= speed;
    }
    if keys.is_held(Key::ArrowDown) {
        moved.y += speed;
    }
    if keys.is_held(Key::ArrowLeft) {
        moved.x -= speed;
    }
    if keys.is_held(Key::ArrowRight) {
        moved.x += speed;
    }
    moved
}

/// Keep the whole body on screen.
pub fn clamp_to_screen(body: &Body, screen: Screen) -> Body {
    let half_w = body.width / 2.0;
    let half_h = body.height / 2.0;
    Body {
        x: body.x.max(half_w).min(screen.width - half_w),
        y: body.y.max(half_h).min(screen.height - half_h),
        ..*body
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// `true` with probability `chance`, which must lie in [0, 1].
pub fn roll(rng: &mut impl Rng, chance: f64) -> bool {
    rng.gen_bool(chance)
}

/// Uniform position with the whole item on screen.
pub fn random_item_position(rng: &mut impl Rng, screen: Screen) -> (f32, f32) {
    let half = ITEM_SIZE / 2.0;
    (
        rng.gen_range(half..screen.width - half),
        rng.gen_range(half..screen.height - half),
    )
}

pub fn random_enemy_spawn(rng: &mut impl Rng, screen: Screen) -> EnemySpawn {
    let half = ENEMY_SIZE / 2.0;
    EnemySpawn {
        x: rng.gen_range(half..screen.width - half),
        y: ENEMY_SPAWN_Y,
        speed: rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED),
    }
}

// ── Removal ──────────────────────────────────────────────────────────────────

/// Drop the entries whose indices were marked during a pass.
pub fn compact<T>(entities: Vec<T>, removed: &[usize]) -> Vec<T> {
    if removed.is_empty() {
        return entities;
    }
    entities
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, e)| e)
        .collect()
}
