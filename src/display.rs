//! Rendering layer — all terminal I/O lives here.
//!
//! The stage is drawn as-is: logical coordinates are scaled onto the
//! terminal's cell grid, so the 800×600 play area fills whatever window the
//! game runs in. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use item_catcher::assets::Texture;
use item_catcher::entities::Screen;
use item_catcher::scene::{Node, Stage, FINAL_SCORE_ELEMENT, GAME_OVER_ELEMENT};
use item_catcher::session::{ENEMY_ALIAS, ITEM_ALIAS, PLAYER_ALIAS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ITEM: Color = Color::Yellow;
const C_ENEMY: Color = Color::Red;
const C_SPRITE: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::Red;
const C_FINAL_SCORE: Color = Color::Yellow;

/// Logical → cell mapping for one frame.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn fit(cols: u16, rows: u16, screen: Screen) -> Self {
        Self {
            cols,
            rows,
            sx: cols as f32 / screen.width,
            sy: rows as f32 / screen.height,
        }
    }

    /// `None` when the point falls outside the grid.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.sx).floor();
        let row = (y * self.sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    stage: &Stage,
    screen: Screen,
    background: u32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    // Last row is reserved for the controls hint
    let view = Viewport::fit(cols, rows.saturating_sub(1), screen);
    let bg = rgb(background);

    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_background(out, &view, bg)?;

    out.queue(style::SetBackgroundColor(bg))?;
    for (_, node) in stage.nodes() {
        match node {
            Node::Sprite { texture, x, y, .. } => draw_sprite(out, &view, texture, *x, *y)?,
            Node::Text { text, x, y } => draw_text(out, &view, text, *x, *y)?,
        }
    }
    out.queue(style::ResetColor)?;

    draw_controls_hint(out, rows)?;

    if stage
        .element_named(GAME_OVER_ELEMENT)
        .is_some_and(|e| e.visible)
    {
        let final_score = stage
            .element_named(FINAL_SCORE_ELEMENT)
            .map(|e| e.text.as_str())
            .unwrap_or_default();
        draw_game_over(out, cols, rows, final_score)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn rgb(colour: u32) -> Color {
    Color::Rgb {
        r: (colour >> 16) as u8,
        g: (colour >> 8) as u8,
        b: colour as u8,
    }
}

fn draw_background<W: Write>(out: &mut W, view: &Viewport, bg: Color) -> std::io::Result<()> {
    let blank = " ".repeat(view.cols as usize);
    out.queue(style::SetBackgroundColor(bg))?;
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

// ── Nodes ─────────────────────────────────────────────────────────────────────

fn sprite_colour(texture: &Texture) -> Color {
    match texture.alias.as_str() {
        PLAYER_ALIAS => C_PLAYER,
        ITEM_ALIAS => C_ITEM,
        ENEMY_ALIAS => C_ENEMY,
        _ => C_SPRITE,
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    texture: &Texture,
    x: f32,
    y: f32,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(x, y) else {
        return Ok(());
    };
    // Centre the glyph on the anchor and clip at the right edge
    let width = texture.glyph.chars().count() as u16;
    let left = col.saturating_sub(width / 2);
    let visible: String = texture
        .glyph
        .chars()
        .take(view.cols.saturating_sub(left) as usize)
        .collect();

    out.queue(cursor::MoveTo(left, row))?;
    out.queue(style::SetForegroundColor(sprite_colour(texture)))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn draw_text<W: Write>(
    out: &mut W,
    view: &Viewport,
    text: &str,
    x: f32,
    y: f32,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(x, y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ → ↓ : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    final_score: &str,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_OVERLAY),
        ("║    GAME  OVER      ║", C_OVERLAY),
        ("╚════════════════════╝", C_OVERLAY),
    ];
    let score_line = format!("Final Score: {:>6}", final_score);
    let hint = "Q - Quit";

    let cx = cols / 2;
    let total_rows = lines.len() + 2; // box + score + hint
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(C_FINAL_SCORE))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
