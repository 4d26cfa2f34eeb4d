/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates the
/// 480×720 game space into terminal cells and commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_game::entities::{Adversary, Phase, Session, Shot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STARS: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ADVERSARY: Color = Color::Green;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_ADVERSARY: Color = Color::Magenta;
const C_HEALTH_HIGH: Color = Color::DarkGreen;
const C_HEALTH_MID: Color = Color::Yellow;
const C_HEALTH_LOW: Color = Color::DarkRed;
const C_TEXT: Color = Color::Yellow;
const C_CAPTION: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Stars scattered over one field height of scroll texture.
const STAR_COUNT: u32 = 64;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: starfield, entities, HUD, caption.
pub fn render<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols == 0 || rows == 0 {
        return Ok(());
    }

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, state, cols, rows)?;

    for adversary in &state.adversaries {
        draw_adversary(out, state, adversary, cols, rows)?;
    }
    for shot in &state.player_shots {
        draw_shot(out, state, shot, "║", C_SHOT_PLAYER, cols, rows)?;
    }
    for shot in &state.adversary_shots {
        draw_shot(out, state, shot, "↓", C_SHOT_ADVERSARY, cols, rows)?;
    }
    draw_player(out, state, cols, rows)?;

    if state.phase != Phase::Title {
        draw_hud(out, state, cols)?;
    }

    match state.phase {
        Phase::Title => draw_caption(out, "Space Game", cols, rows)?,
        Phase::GameOver => draw_caption(out, "Game Over", cols, rows)?,
        Phase::Running => {}
    }

    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

fn cell(state: &Session, cols: u16, rows: u16, x: f64, y: f64) -> (u16, u16) {
    let cx = (x / state.width * cols as f64) as i32;
    let cy = (y / state.height * rows as f64) as i32;
    (
        cx.clamp(0, cols as i32 - 1) as u16,
        cy.clamp(0, rows as i32 - 1) as u16,
    )
}

// ── Background ────────────────────────────────────────────────────────────────

/// Stable pseudo-random star position, as fractions of the field.
fn star(i: u32) -> (f64, f64) {
    let mut s = i.wrapping_mul(0x9E37_79B1).wrapping_add(0x85EB_CA6B);
    s ^= s >> 15;
    s = s.wrapping_mul(0x2C1B_3C6D);
    s ^= s >> 12;
    let fx = (s % 4096) as f64 / 4096.0;
    let fy = ((s >> 12) % 4096) as f64 / 4096.0;
    (fx, fy)
}

/// The star texture is drawn twice, two field heights apart, so the
/// downward drift scrolls without a seam.
fn draw_background<W: Write>(
    out: &mut W,
    state: &Session,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let h = state.height;
    let drift = state.background.sprite.y;
    let band_a = (drift - h / 2.0) % (h * 2.0) - h;
    let band_b = (drift + h / 2.0) % (h * 2.0) - h;

    out.queue(style::SetForegroundColor(C_STARS))?;
    for i in 0..STAR_COUNT {
        let (fx, fy) = star(i);
        let wx = fx * state.width;
        let wy = fy * h;
        for band in [band_a, band_b] {
            let sy = wy + band;
            if sy >= 0.0 && sy < h {
                let (cx, cy) = cell(state, cols, rows, wx, sy);
                out.queue(cursor::MoveTo(cx, cy))?;
                out.queue(Print(if i % 7 == 0 { "✦" } else { "·" }))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &Session,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let p = &state.player.sprite;
    let (cx, cy) = cell(state, cols, rows, p.x, p.y);

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print("▲"))?;
    if cy + 1 < rows {
        out.queue(cursor::MoveTo(cx.saturating_sub(1), cy + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_adversary<W: Write>(
    out: &mut W,
    state: &Session,
    adversary: &Adversary,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (cx, cy) = cell(state, cols, rows, adversary.sprite.x, adversary.sprite.y);

    out.queue(style::SetForegroundColor(C_ADVERSARY))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(1), cy))?;
    out.queue(Print("«▼»"))?;
    if cy + 1 < rows {
        out.queue(cursor::MoveTo(cx.saturating_sub(1), cy + 1))?;
        out.queue(Print("╚═╝"))?;
    }
    Ok(())
}

fn draw_shot<W: Write>(
    out: &mut W,
    state: &Session,
    shot: &Shot,
    glyph: &str,
    color: Color,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (cx, cy) = cell(state, cols, rows, shot.sprite.x, shot.sprite.y);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── HUD (rows 0–1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &Session, cols: u16) -> std::io::Result<()> {
    let health = state.player.health;

    // Health bar — colour drops with the thresholds 50 and 10.  The drawn
    // length floors at zero even when the death tick took health below it.
    let bar_color = if health > 50 {
        C_HEALTH_HIGH
    } else if health > 10 {
        C_HEALTH_MID
    } else {
        C_HEALTH_LOW
    };
    let bar_max = cols.saturating_sub(2) as i32;
    let bar_len = (health.clamp(0, 100) * bar_max / 100).max(0) as usize;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print("━".repeat(bar_len)))?;

    // Score left, high score right
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(Print(format!("score: {}", state.player.score)))?;

    let hs = format!("hiscore: {}", state.player.hiscore);
    let col = cols.saturating_sub(hs.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 1))?;
    out.queue(Print(hs))?;

    Ok(())
}

// ── Captions & hint ───────────────────────────────────────────────────────────

fn draw_caption<W: Write>(out: &mut W, caption: &str, cols: u16, rows: u16) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(caption.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, rows / 2))?;
    out.queue(style::SetForegroundColor(C_CAPTION))?;
    out.queue(Print(caption))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ W SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
