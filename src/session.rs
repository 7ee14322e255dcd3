//! The game session: player, entities, score, lives and the per-frame update.
//!
//! The session owns its scene graph and audio collaborators and keeps the
//! entity collections in step with the graph: an entity is removed from the
//! graph in the same step that marks it for removal from its collection.

use rand::Rng;
use thiserror::Error;

use crate::assets::{AssetError, Assets, Sound, Texture};
use crate::audio::AudioPlayer;
use crate::compute::{self, collides};
use crate::config::GameConfig;
use crate::entities::{
    Body, Enemy, GameStatus, Item, Player, Screen, ENEMY_EXIT_MARGIN, ENEMY_SIZE, ITEM_SCORE,
    ITEM_SIZE, PLAYER_SIZE, STARTING_LIVES,
};
use crate::input::{Key, KeyState};
use crate::scene::{ElementId, Node, NodeId, SceneGraph, FINAL_SCORE_ELEMENT, GAME_OVER_ELEMENT};
use crate::ticker::Ticker;

pub const PLAYER_ALIAS: &str = "player";
pub const ITEM_ALIAS: &str = "item";
pub const ENEMY_ALIAS: &str = "enemy";
pub const COLLECT_SOUND_ALIAS: &str = "collectSound";
pub const GAME_OVER_SOUND_ALIAS: &str = "gameOverSound";

const SCORE_TEXT_POS: (f32, f32) = (10.0, 10.0);
const LIVES_TEXT_POS: (f32, f32) = (10.0, 40.0);

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("host element '{0}' not found")]
    MissingElement(&'static str),
}

pub struct GameSession<S: SceneGraph, A: AudioPlayer> {
    stage: S,
    audio: A,
    ticker: Ticker,
    keys: KeyState,

    screen: Screen,
    player_speed: f32,
    item_spawn_chance: f64,
    enemy_spawn_chance: f64,

    item_texture: Texture,
    enemy_texture: Texture,
    collect_sound: Sound,
    game_over_sound: Sound,

    player: Player,
    items: Vec<Item>,
    enemies: Vec<Enemy>,
    score: u32,
    lives: u32,
    status: GameStatus,

    score_text: NodeId,
    lives_text: NodeId,
    game_over_screen: ElementId,
    final_score_text: ElementId,
}

impl<S: SceneGraph, A: AudioPlayer> GameSession<S, A> {
    /// Build the HUD and the player, resolve the host's game-over elements and
    /// start ticking. Fails before touching `stage` if an asset is missing.
    pub fn setup(
        config: &GameConfig,
        assets: &Assets,
        mut stage: S,
        audio: A,
    ) -> Result<Self, SetupError> {
        let player_texture = assets.texture(PLAYER_ALIAS)?.clone();
        let item_texture = assets.texture(ITEM_ALIAS)?.clone();
        let enemy_texture = assets.texture(ENEMY_ALIAS)?.clone();
        let collect_sound = assets.sound(COLLECT_SOUND_ALIAS)?.clone();
        let game_over_sound = assets.sound(GAME_OVER_SOUND_ALIAS)?.clone();

        let game_over_screen = stage
            .element(GAME_OVER_ELEMENT)
            .ok_or(SetupError::MissingElement(GAME_OVER_ELEMENT))?;
        let final_score_text = stage
            .element(FINAL_SCORE_ELEMENT)
            .ok_or(SetupError::MissingElement(FINAL_SCORE_ELEMENT))?;

        let score_text = stage.add_child(Node::Text {
            text: score_label(0),
            x: SCORE_TEXT_POS.0,
            y: SCORE_TEXT_POS.1,
        });
        let lives_text = stage.add_child(Node::Text {
            text: lives_label(STARTING_LIVES),
            x: LIVES_TEXT_POS.0,
            y: LIVES_TEXT_POS.1,
        });

        let screen = config.screen();
        let (cx, cy) = screen.center();
        let body = Body::new(cx, cy, PLAYER_SIZE);
        let node = stage.add_child(sprite(&player_texture, &body));

        let mut ticker = Ticker::new(config.frame_interval());
        ticker.start();

        log::info!(
            "session started on a {}x{} screen",
            screen.width,
            screen.height
        );

        Ok(Self {
            stage,
            audio,
            ticker,
            keys: KeyState::new(),
            screen,
            player_speed: config.player_speed,
            item_spawn_chance: config.item_spawn_chance,
            enemy_spawn_chance: config.enemy_spawn_chance,
            item_texture,
            enemy_texture,
            collect_sound,
            game_over_sound,
            player: Player { body, node },
            items: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            status: GameStatus::Playing,
            score_text,
            lives_text,
            game_over_screen,
            final_score_text,
        })
    }

    // ── Host key listeners ───────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.key_up(key);
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advance one frame. Does nothing once the game is over.
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        if !self.is_active() {
            return;
        }

        self.move_player();

        if compute::roll(rng, self.item_spawn_chance) {
            let (x, y) = compute::random_item_position(rng, self.screen);
            self.spawn_item(x, y);
        }
        if compute::roll(rng, self.enemy_spawn_chance) {
            let spawn = compute::random_enemy_spawn(rng, self.screen);
            self.spawn_enemy(spawn.x, spawn.y, spawn.speed);
        }

        self.collect_items();
        self.advance_enemies();
    }

    fn move_player(&mut self) {
        let moved = compute::apply_movement(&self.player.body, &self.keys, self.player_speed);
        let body = compute::clamp_to_screen(&moved, self.screen);
        if body != self.player.body {
            self.player.body = body;
            self.stage.set_position(self.player.node, body.x, body.y);
        }
    }

    pub fn spawn_item(&mut self, x: f32, y: f32) {
        let body = Body::new(x, y, ITEM_SIZE);
        let node = self.stage.add_child(sprite(&self.item_texture, &body));
        log::trace!("item spawned at ({x:.0}, {y:.0})");
        self.items.push(Item { body, node });
    }

    pub fn spawn_enemy(&mut self, x: f32, y: f32, speed: f32) {
        let body = Body::new(x, y, ENEMY_SIZE);
        let node = self.stage.add_child(sprite(&self.enemy_texture, &body));
        log::trace!("enemy spawned at ({x:.0}, {y:.0}) speed {speed:.2}");
        self.enemies.push(Enemy { body, speed, node });
    }

    fn collect_items(&mut self) {
        let mut collected = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if collides(&self.player.body, &item.body) {
                self.stage.remove_child(item.node);
                collected.push(i);
                self.score += ITEM_SCORE;
                self.stage.set_text(self.score_text, &score_label(self.score));
                submit(&mut self.audio, &self.collect_sound);
            }
        }
        if !collected.is_empty() {
            log::debug!("collected {} item(s), score {}", collected.len(), self.score);
            self.items = compute::compact(std::mem::take(&mut self.items), &collected);
        }
    }

    /// Newest enemies first, so when the last life goes the older enemies
    /// still on screen are left untouched.
    fn advance_enemies(&mut self) {
        let exit_y = self.screen.height + ENEMY_EXIT_MARGIN;
        let mut removed = Vec::new();

        for i in (0..self.enemies.len()).rev() {
            if !self.is_active() {
                break;
            }
            let enemy = &mut self.enemies[i];
            enemy.body.y += enemy.speed;
            let (node, body) = (enemy.node, enemy.body);

            if body.y > exit_y {
                self.stage.remove_child(node);
                removed.push(i);
                continue;
            }
            self.stage.set_position(node, body.x, body.y);

            if collides(&self.player.body, &body) {
                self.stage.remove_child(node);
                removed.push(i);
                self.lives = self.lives.saturating_sub(1);
                self.stage.set_text(self.lives_text, &lives_label(self.lives));
                log::debug!("enemy hit, {} lives left", self.lives);
                if self.lives == 0 {
                    self.end_game();
                }
            }
        }

        self.enemies = compute::compact(std::mem::take(&mut self.enemies), &removed);
    }

    /// Stop ticking and show the game-over overlay with the final score.
    /// Only the first call has any effect.
    pub fn end_game(&mut self) {
        if !self.is_active() {
            return;
        }
        self.status = GameStatus::GameOver;
        self.ticker.stop();
        self.stage
            .set_element_text(self.final_score_text, &self.score.to_string());
        self.stage.set_element_visible(self.game_over_screen, true);
        submit(&mut self.audio, &self.game_over_sound);
        log::info!("game over, final score {}", self.score);
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_label(lives: u32) -> String {
    format!("Lives: {lives}")
}

fn sprite(texture: &Texture, body: &Body) -> Node {
    Node::Sprite {
        texture: texture.clone(),
        x: body.x,
        y: body.y,
        width: body.width,
        height: body.height,
    }
}

/// Playback failures are logged and never interrupt the frame.
fn submit<A: AudioPlayer>(audio: &mut A, sound: &Sound) {
    if let Err(err) = audio.play(sound) {
        log::warn!("failed to play '{}': {err}", sound.alias);
    }
}
