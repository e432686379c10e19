/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only projects the
/// logical 800×600 playfield onto the terminal and translates state into
/// terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;

use humble_galaga::compute::{FIELD_HEIGHT, FIELD_WIDTH};
use humble_galaga::entities::{Enemy, GameSession, Phase, Projectile};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_TIME_LOW: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_PROJECTILE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_WIN: Color = Color::Green;
const C_LOSE: Color = Color::Red;

/// Time left at which the HUD clock turns red.
const LOW_TIME: i32 = 5;

// ── Background starfield ──────────────────────────────────────────────────────

/// Static backdrop scattered once at startup (the stand-in for the original's
/// gradient background).
pub struct Starfield {
    stars: Vec<(u16, u16)>,
}

impl Starfield {
    /// One star for roughly every 24 play-area cells.
    pub fn scatter(rng: &mut impl Rng, width: u16, height: u16) -> Self {
        let mut stars = Vec::new();
        if width > 2 && height > 4 {
            let count = (width as usize * height as usize) / 24;
            for _ in 0..count {
                let col = rng.gen_range(1..width - 1);
                let row = rng.gen_range(2..height - 2);
                stars.push((col, row));
            }
        }
        Starfield { stars }
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Map a logical playfield coordinate onto a terminal cell inside the border
/// (columns 1..width−1, rows 2..height−2).  Coordinates outside the field —
/// a shot that has crossed the top, an enemy mid-bounce past the edge —
/// simply don't get drawn.
fn project(x: i32, y: i32, width: u16, height: u16) -> Option<(u16, u16)> {
    if x < 0 || y < 0 || x >= FIELD_WIDTH || y >= FIELD_HEIGHT {
        return None;
    }
    let inner_w = width.saturating_sub(2) as i32;
    let inner_h = height.saturating_sub(4) as i32;
    if inner_w <= 0 || inner_h <= 0 {
        return None;
    }
    let col = 1 + x * inner_w / FIELD_WIDTH;
    let row = 2 + y * inner_h / FIELD_HEIGHT;
    Some((col as u16, row as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever phase the session is in.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameSession,
    stars: &Starfield,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.phase {
        Phase::Menu => draw_menu(out, width, height)?,
        Phase::Playing => draw_playfield(out, state, stars, width, height)?,
        Phase::Won | Phase::Lost => draw_end_screen(out, state, width, height)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu screen ───────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  HUMBLE  GALAGA  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    let prompt = "Press ENTER to start";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(prompt))?;

    let goal = "Clear all 24 invaders before the clock runs out";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(goal.chars().count() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(goal))?;

    let hint = "← → : Move   SPACE : Fire   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 3,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}

// ── Playing screen ────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(
    out: &mut W,
    state: &GameSession,
    stars: &Starfield,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    draw_border(out, width, height)?;
    draw_starfield(out, stars, width, height)?;
    draw_hud(out, state, width)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, width, height)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, width, height)?;
    }

    draw_player(out, state, width, height)?;
    draw_controls_hint(out, height)?;

    Ok(())
}

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_starfield<W: Write>(
    out: &mut W,
    stars: &Starfield,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for &(col, row) in &stars.stars {
        // Stars generated for a larger terminal are skipped after a shrink
        if col < width.saturating_sub(1) && row < height.saturating_sub(2) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, width: u16) -> std::io::Result<()> {
    // Remaining time — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(if state.time_left <= LOW_TIME {
        C_HUD_TIME_LOW
    } else {
        C_HUD_TIME
    }))?;
    out.queue(Print(format!("Time:{:>3}s", state.time_left)))?;

    // Score — right
    let score_str = format!("Score:{:>6}", state.score);
    let rx = width.saturating_sub(score_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // Ship sprite (2 rows, 3 cols):
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &state.player;
    if let Some((col, row)) = project(p.x, p.y, width, height) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▲"))?;

        let wing_row = row + 1;
        if wing_row < height.saturating_sub(2) {
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_row))?;
            out.queue(Print("/█\\"))?;
        }
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // The rotation accumulator picks the sprite frame: an eighth of a turn
    // swaps the square for a diamond, so the invaders visibly spin.
    let spin = (enemy.rotation / std::f32::consts::FRAC_PI_4) as usize % 2;
    let sprite = if spin == 0 { "«■»" } else { "‹◆›" };

    // Project the centre of the 40×40 box
    if let Some((col, row)) = project(enemy.x + 20, enemy.y + 20, width, height) {
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(Print(sprite))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // Shots fly as a narrow strip offset into the sprite; draw its centre
    if let Some((col, row)) = project(projectile.x + 20, projectile.y, width, height) {
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── End screens ───────────────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let won = state.phase == Phase::Won;
    let banner: &[&str] = if won {
        &[
            "╔════════════════════╗",
            "║     YOU  WIN!      ║",
            "╚════════════════════╝",
        ]
    } else {
        &[
            "╔════════════════════╗",
            "║     TIME'S UP      ║",
            "╚════════════════════╝",
        ]
    };
    let color = if won { C_WIN } else { C_LOSE };

    let score_line = format!("Final Score: {:>6}", state.score);
    let hint = "ESC - Menu   Q - Quit";

    let cx = width / 2;
    let total_rows = banner.len() + 2; // banner + score + hint
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, msg) in banner.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + banner.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_line))?;

    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
