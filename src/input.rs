//! Key-state map written by the host's key listeners and read once per frame,
//! plus release emulation for hosts that never report key-up.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// The only keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Standard key-code identifier, e.g. `"ArrowUp"`.
    pub fn code(&self) -> &'static str {
        match self {
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    keys: HashMap<Key, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.insert(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.insert(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }
}

/// A key pressed once is kept until the OS key-repeat delay has passed.
pub const INITIAL_REPEAT_WINDOW: Duration = Duration::from_millis(600);
/// Once repeats arrive, a key is released after this much silence.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
struct LastSeen {
    at: Instant,
    repeating: bool,
}

/// Tracks held keys on hosts without key-release events, where a held key
/// shows up as one press followed, after the OS delay, by a stream of
/// repeats. Hosts that do report releases never expire anything.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    emulate_release: bool,
    last_seen: HashMap<Key, LastSeen>,
}

impl HeldKeys {
    pub fn new(host_reports_release: bool) -> Self {
        Self {
            emulate_release: !host_reports_release,
            last_seen: HashMap::new(),
        }
    }

    /// Press or repeat.
    pub fn pressed(&mut self, key: Key, now: Instant) {
        let repeating = self.last_seen.contains_key(&key);
        self.last_seen.insert(key, LastSeen { at: now, repeating });
    }

    pub fn released(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Keys that went silent for longer than their window; they are
    /// forgotten and should be released.
    pub fn expire(&mut self, now: Instant) -> Vec<Key> {
        if !self.emulate_release {
            return Vec::new();
        }
        let mut expired = Vec::new();
        self.last_seen.retain(|key, seen| {
            let window = if seen.repeating {
                REPEAT_WINDOW
            } else {
                INITIAL_REPEAT_WINDOW
            };
            let fresh = now.saturating_duration_since(seen.at) <= window;
            if !fresh {
                log::trace!("{key} released after {window:?} of silence");
                expired.push(*key);
            }
            fresh
        });
        expired
    }
}
