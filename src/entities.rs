//! All game entity types — pure data, no logic.

use crate::scene::NodeId;

// ── Fixed sizes & tuning ──────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const ITEM_SIZE: f32 = 30.0;
pub const ENEMY_SIZE: f32 = 40.0;

/// Enemies enter just above the top edge.
pub const ENEMY_SPAWN_Y: f32 = -20.0;
/// An enemy is discarded once it is this far below the bottom edge.
pub const ENEMY_EXIT_MARGIN: f32 = 20.0;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
pub const ENEMY_MAX_SPEED: f32 = 4.0;

pub const ITEM_SCORE: u32 = 10;
pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Logical size of the play area, independent of the host's resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Centre-anchored box shared by every sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
        }
    }
}

// ── Player, items & enemies ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub node: NodeId,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub body: Body,
    pub node: NodeId,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    /// Downward distance travelled per frame.
    pub speed: f32,
    pub node: NodeId,
}
