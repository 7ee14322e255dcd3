use std::time::{Duration, Instant};

use item_catcher::assets::Sound;
use item_catcher::audio::{AudioPlayer, TerminalBell};
use item_catcher::input::{HeldKeys, Key, KeyState, INITIAL_REPEAT_WINDOW, REPEAT_WINDOW};
use item_catcher::ticker::Ticker;

// ── key state ─────────────────────────────────────────────────────────────────

#[test]
fn keys_start_released() {
    let keys = KeyState::new();
    assert!(!keys.is_held(Key::ArrowUp));
    assert!(!keys.is_held(Key::ArrowRight));
}

#[test]
fn key_down_then_up() {
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowLeft);
    assert!(keys.is_held(Key::ArrowLeft));
    assert!(!keys.is_held(Key::ArrowRight));

    // Repeats are harmless
    keys.key_down(Key::ArrowLeft);
    keys.key_up(Key::ArrowLeft);
    assert!(!keys.is_held(Key::ArrowLeft));
}

#[test]
fn keys_display_as_their_codes() {
    assert_eq!(Key::ArrowUp.code(), "ArrowUp");
    assert_eq!(Key::ArrowDown.code(), "ArrowDown");
    assert_eq!(Key::ArrowLeft.to_string(), "ArrowLeft");
    assert_eq!(Key::ArrowRight.to_string(), "ArrowRight");
}

// ── release emulation ─────────────────────────────────────────────────────────

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn host_with_release_events_never_expires() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(true);
    held.pressed(Key::ArrowLeft, t0);
    assert!(held.expire(t0 + ms(10_000)).is_empty());
}

#[test]
fn single_press_outlives_the_repeat_delay() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(false);
    held.pressed(Key::ArrowLeft, t0);

    // Longer than several 16 ms frames but inside the OS repeat delay.
    assert!(held.expire(t0 + ms(500)).is_empty());
    assert!(held.expire(t0 + INITIAL_REPEAT_WINDOW).is_empty());
    assert_eq!(
        held.expire(t0 + INITIAL_REPEAT_WINDOW + ms(1)),
        vec![Key::ArrowLeft]
    );
    // Forgotten once expired
    assert!(held.expire(t0 + ms(5_000)).is_empty());
}

#[test]
fn repeating_key_expires_after_short_silence() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(false);
    held.pressed(Key::ArrowUp, t0);
    held.pressed(Key::ArrowUp, t0 + ms(500));
    held.pressed(Key::ArrowUp, t0 + ms(530));

    assert!(held.expire(t0 + ms(530) + REPEAT_WINDOW).is_empty());
    assert_eq!(
        held.expire(t0 + ms(531) + REPEAT_WINDOW),
        vec![Key::ArrowUp]
    );
}

#[test]
fn keys_expire_independently() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(false);
    held.pressed(Key::ArrowUp, t0);
    held.pressed(Key::ArrowRight, t0 + ms(400));

    assert_eq!(held.expire(t0 + ms(700)), vec![Key::ArrowUp]);
    assert_eq!(held.expire(t0 + ms(1_100)), vec![Key::ArrowRight]);
}

#[test]
fn released_key_is_forgotten() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(false);
    held.pressed(Key::ArrowDown, t0);
    held.released(Key::ArrowDown);
    assert!(held.expire(t0 + ms(10_000)).is_empty());

    // A fresh press after a release starts with the long window again.
    held.pressed(Key::ArrowDown, t0 + ms(20_000));
    assert!(held.expire(t0 + ms(20_500)).is_empty());
}

// ── ticker ────────────────────────────────────────────────────────────────────

#[test]
fn ticker_starts_stopped() {
    let mut ticker = Ticker::new(Duration::from_millis(16));
    assert!(!ticker.is_started());
    ticker.start();
    assert!(ticker.is_started());
    ticker.stop();
    ticker.stop();
    assert!(!ticker.is_started());
}

#[test]
fn ticker_waits_out_the_frame() {
    let ticker = Ticker::new(Duration::from_millis(10));
    let frame_start = Instant::now();
    ticker.wait_for_next_frame(frame_start);
    assert!(frame_start.elapsed() >= Duration::from_millis(10));
}

#[test]
fn late_frame_does_not_wait() {
    let ticker = Ticker::new(Duration::from_millis(10));
    let frame_start = Instant::now() - Duration::from_millis(50);
    let before = Instant::now();
    ticker.wait_for_next_frame(frame_start);
    assert!(before.elapsed() < Duration::from_millis(10));
}

// ── terminal bell ─────────────────────────────────────────────────────────────

#[test]
fn bell_rings_once_per_sound() {
    let sound = Sound {
        alias: "collectSound".into(),
        data: vec![1u8, 2, 3].into(),
    };
    let mut out = Vec::new();
    {
        let mut bell = TerminalBell::new(&mut out);
        bell.play(&sound).unwrap();
        bell.play(&sound).unwrap();
    }
    assert_eq!(out, b"\x07\x07");
}
