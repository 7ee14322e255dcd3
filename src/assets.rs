//! Asset manifest and loaded resources.
//!
//! The manifest maps short aliases to files relative to the manifest's own
//! directory:
//!
//! ```toml
//! [images]
//! player = "player.txt"
//!
//! [sounds]
//! collectSound = "collect.wav"
//! ```
//!
//! Images are text sprites: the first non-empty line is the glyph the
//! terminal draws. Sounds are kept as raw bytes for the audio player.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest '{path}': {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("sprite '{alias}' ({path}) has no glyph")]
    EmptySprite { alias: String, path: PathBuf },
    #[error("no image asset named '{0}'")]
    UnknownImage(String),
    #[error("no sound asset named '{0}'")]
    UnknownSound(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetManifest {
    pub images: BTreeMap<String, PathBuf>,
    pub sounds: BTreeMap<String, PathBuf>,
}

impl AssetManifest {
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| AssetError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub alias: String,
    pub glyph: String,
}

/// Shares its bytes, so clones are cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct Sound {
    pub alias: String,
    pub data: Arc<[u8]>,
}

#[derive(Clone, Debug, Default)]
pub struct Assets {
    textures: HashMap<String, Texture>,
    sounds: HashMap<String, Sound>,
}

impl Assets {
    /// Read the manifest at `path` and load every asset it lists. Any
    /// unreadable file fails the whole batch.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let manifest = AssetManifest::from_file(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_manifest(&manifest, base)
    }

    pub fn from_manifest(manifest: &AssetManifest, base: &Path) -> Result<Self, AssetError> {
        let mut assets = Self::default();

        for (alias, rel) in &manifest.images {
            let path = base.join(rel);
            let text = std::fs::read_to_string(&path).map_err(|source| AssetError::Read {
                path: path.clone(),
                source,
            })?;
            let glyph = text
                .lines()
                .map(str::trim_end)
                .find(|line| !line.trim().is_empty())
                .ok_or_else(|| AssetError::EmptySprite {
                    alias: alias.clone(),
                    path: path.clone(),
                })?;
            assets = assets.with_texture(alias, glyph);
        }

        for (alias, rel) in &manifest.sounds {
            let path = base.join(rel);
            let data = std::fs::read(&path).map_err(|source| AssetError::Read { path, source })?;
            assets = assets.with_sound(alias, data);
        }

        log::info!(
            "loaded {} images and {} sounds",
            assets.textures.len(),
            assets.sounds.len()
        );
        Ok(assets)
    }

    pub fn with_texture(mut self, alias: &str, glyph: &str) -> Self {
        self.textures.insert(
            alias.to_string(),
            Texture {
                alias: alias.to_string(),
                glyph: glyph.to_string(),
            },
        );
        self
    }

    pub fn with_sound(mut self, alias: &str, data: impl Into<Arc<[u8]>>) -> Self {
        self.sounds.insert(
            alias.to_string(),
            Sound {
                alias: alias.to_string(),
                data: data.into(),
            },
        );
        self
    }

    pub fn texture(&self, alias: &str) -> Result<&Texture, AssetError> {
        self.textures
            .get(alias)
            .ok_or_else(|| AssetError::UnknownImage(alias.to_string()))
    }

    pub fn sound(&self, alias: &str) -> Result<&Sound, AssetError> {
        self.sounds
            .get(alias)
            .ok_or_else(|| AssetError::UnknownSound(alias.to_string()))
    }
}
