//! Fire-and-forget sound playback.
//!
//! `play` submits a request and returns. No handle is kept, so playback can be
//! neither cancelled nor awaited, and overlapping requests simply overlap.

use std::io::Write;

use thiserror::Error;

use crate::assets::Sound;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("terminal bell failed: {0}")]
    Bell(#[from] std::io::Error),
    #[cfg(feature = "audio")]
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[cfg(feature = "audio")]
    #[error("failed to decode '{alias}': {source}")]
    Decode {
        alias: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[cfg(feature = "audio")]
    #[error("playback failed: {0}")]
    Play(#[from] rodio::PlayError),
}

pub trait AudioPlayer {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError>;
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for Box<T> {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        (**self).play(sound)
    }
}

/// Rings the terminal bell for every sound; the sound data is not decoded.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        log::trace!("bell for '{}'", sound.alias);
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Decodes sounds and mixes them on the default output device.
#[cfg(feature = "audio")]
pub struct DevicePlayer {
    // Dropping the stream silences every sound still playing.
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(feature = "audio")]
impl DevicePlayer {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = rodio::OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

#[cfg(feature = "audio")]
impl AudioPlayer for DevicePlayer {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        use rodio::Source;

        let cursor = std::io::Cursor::new(sound.data.clone());
        let source = rodio::Decoder::new(cursor).map_err(|source| AudioError::Decode {
            alias: sound.alias.clone(),
            source,
        })?;
        self.handle.play_raw(source.convert_samples())?;
        Ok(())
    }
}

/// The device player when built with the `audio` feature and a device is
/// available, the terminal bell otherwise.
pub fn default_player() -> Box<dyn AudioPlayer> {
    #[cfg(feature = "audio")]
    {
        match DevicePlayer::new() {
            Ok(player) => return Box::new(player),
            Err(err) => log::warn!("falling back to terminal bell: {err}"),
        }
    }
    Box::new(TerminalBell::new(std::io::stdout()))
}
