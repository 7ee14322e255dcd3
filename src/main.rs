mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use item_catcher::assets::Assets;
use item_catcher::audio::{self, AudioPlayer};
use item_catcher::config::GameConfig;
use item_catcher::input::{HeldKeys, Key};
use item_catcher::scene::{Stage, FINAL_SCORE_ELEMENT, GAME_OVER_ELEMENT};
use item_catcher::session::GameSession;

fn arrow_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to a
/// file instead of stderr. Filter with `RUST_LOG`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: press/repeat events set the key in the session's key-state
/// map; release events clear it. On terminals without release events
/// `HeldKeys` clears a key once its repeats stop arriving.
fn game_loop<W: Write, A: AudioPlayer>(
    out: &mut W,
    session: &mut GameSession<Stage, A>,
    rx: &mpsc::Receiver<Event>,
    held: &mut HeldKeys,
    background: u32,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    while session.ticker().is_started() {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if kind != KeyEventKind::Release && is_quit(&code, modifiers) {
                return Ok(());
            }
            let Some(key) = arrow_key(&code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    held.pressed(key, Instant::now());
                    session.key_down(key);
                }
                KeyEventKind::Release => {
                    held.released(key);
                    session.key_up(key);
                }
            }
        }

        // ── Expire keys whose repeats stopped arriving ────────────────────────
        for key in held.expire(Instant::now()) {
            session.key_up(key);
        }

        session.update(&mut rng);
        display::render(out, session.stage(), session.screen(), background)?;

        session.ticker().wait_for_next_frame(frame_start);
    }

    // Ticking has stopped: the overlay stays up until the player quits
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            })) if kind != KeyEventKind::Release && is_quit(&code, modifiers) => {
                return Ok(())
            }
            Ok(Event::Resize(..)) => {
                display::render(out, session.stage(), session.screen(), background)?;
            }
            Ok(_) => {}
            Err(_) => return Ok(()),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load(config_path.as_deref()).context("failed to load config")?;
    init_logging(&config.log_file)?;

    // Everything that can fail at setup does so before the terminal is taken over
    let assets = Assets::load(&config.manifest).with_context(|| {
        format!("failed to load assets from '{}'", config.manifest.display())
    })?;
    let stage = Stage::new()
        .with_element(GAME_OVER_ELEMENT)
        .with_element(FINAL_SCORE_ELEMENT);
    let mut session = GameSession::setup(&config, &assets, stage, audio::default_player())
        .context("failed to set up game session")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to `HeldKeys`
    // release emulation.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::error!("terminal event read failed: {err}");
                break;
            }
        }
    });

    let mut held = HeldKeys::new(keyboard_enhanced);
    let result = game_loop(&mut out, &mut session, &rx, &mut held, config.background);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("exiting with score {}", session.score());
    Ok(result?)
}
