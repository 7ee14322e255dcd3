#![allow(dead_code)]

use item_catcher::assets::{Assets, Sound};
use item_catcher::audio::{AudioError, AudioPlayer};
use item_catcher::config::GameConfig;
use item_catcher::scene::{Stage, FINAL_SCORE_ELEMENT, GAME_OVER_ELEMENT};
use item_catcher::session::GameSession;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Remembers every sound alias it was asked to play.
#[derive(Default)]
pub struct RecordingAudio {
    pub played: Vec<String>,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        self.played.push(sound.alias.clone());
        Ok(())
    }
}

/// Every request fails, as with a missing output device.
pub struct BrokenAudio;

impl AudioPlayer for BrokenAudio {
    fn play(&mut self, _sound: &Sound) -> Result<(), AudioError> {
        Err(AudioError::Bell(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "no output",
        )))
    }
}

pub fn test_assets() -> Assets {
    Assets::default()
        .with_texture("player", "(@)")
        .with_texture("item", "$")
        .with_texture("enemy", "<V>")
        .with_sound("collectSound", vec![1u8, 2, 3])
        .with_sound("gameOverSound", vec![4u8, 5, 6])
}

pub fn host_stage() -> Stage {
    Stage::new()
        .with_element(GAME_OVER_ELEMENT)
        .with_element(FINAL_SCORE_ELEMENT)
}

/// Default rules with random spawning switched off.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        item_spawn_chance: 0.0,
        enemy_spawn_chance: 0.0,
        ..GameConfig::default()
    }
}

pub fn quiet_session() -> GameSession<Stage, RecordingAudio> {
    GameSession::setup(
        &quiet_config(),
        &test_assets(),
        host_stage(),
        RecordingAudio::default(),
    )
    .expect("setup with complete assets")
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
