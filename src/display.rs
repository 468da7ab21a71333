/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world coordinates into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;

use arcade_shooter::compute::difficulty_level;
use arcade_shooter::config::EffectsConfig;
use arcade_shooter::entities::{Aabb, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_HP: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

// ── Hit pulse ─────────────────────────────────────────────────────────────────

/// Short flash + shake played when the player takes damage.  Purely visual;
/// the simulation never reads it.
#[derive(Clone, Debug, Default)]
pub struct HitPulse {
    flash_ms: f32,
    shake_ms: f32,
}

impl HitPulse {
    pub fn trigger(&mut self, effects: &EffectsConfig) {
        self.flash_ms = effects.hit_flash_duration_ms;
        self.shake_ms = effects.hit_shake_duration_ms;
    }

    pub fn advance(&mut self, delta_ms: f32) {
        self.flash_ms = (self.flash_ms - delta_ms).max(0.0);
        self.shake_ms = (self.shake_ms - delta_ms).max(0.0);
    }

    pub fn flashing(&self) -> bool {
        self.flash_ms > 0.0
    }

    /// Horizontal playfield offset in columns for this frame.
    pub fn shake_offset(&self, effects: &EffectsConfig, cols: u16, rng: &mut impl Rng) -> i32 {
        if self.shake_ms <= 0.0 {
            return 0;
        }
        let amplitude = ((cols as f32 * effects.hit_shake_intensity).round() as i32).max(1);
        rng.gen_range(-amplitude..=amplitude)
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Play area is the box inside the border: columns 1..width-1, rows 2..height-2.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
    shake: i32,
}

impl Viewport {
    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Cell rectangle `(col, row, w, h)` covering `aabb`, clipped to the play
    /// area.  `None` when nothing of it is visible.
    fn cells(&self, aabb: &Aabb) -> Option<(u16, u16, u16, u16)> {
        let sx = self.inner_cols() / self.world_w;
        let sy = self.inner_rows() / self.world_h;

        let left = (aabb.left() * sx).floor() as i32 + 1;
        let right = ((aabb.right() * sx).ceil() as i32).max(left) + self.shake;
        let left = left + self.shake;
        let top = (aabb.top() * sy).floor() as i32 + 2;
        let bottom = ((aabb.bottom() * sy).ceil() as i32 + 1).max(top);

        let min_col = 1;
        let max_col = self.cols as i32 - 2;
        let min_row = 2;
        let max_row = self.rows as i32 - 3;

        let l = left.max(min_col);
        let r = right.min(max_col);
        let t = top.max(min_row);
        let b = bottom.min(max_row);
        if l > r || t > b {
            return None;
        }
        Some((l as u16, t as u16, (r - l + 1) as u16, (b - t + 1) as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    pulse: &HitPulse,
    shake: i32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport {
        cols,
        rows,
        world_w: state.config.screen.width,
        world_h: state.config.screen.height,
        shake,
    };

    out.queue(style::SetBackgroundColor(rgb(state.config.screen.background_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let border = if pulse.flashing() {
        rgb(state.config.effects.hit_flash_color)
    } else {
        C_BORDER
    };
    draw_border(out, cols, rows, border)?;
    draw_hud(out, state, cols)?;

    let enemy_color = rgb(state.config.enemy.color);
    for (_, enemy) in state.enemies.iter() {
        draw_box(out, &view, &enemy.bounds(), '█', enemy_color)?;
    }
    let bullet_color = rgb(state.config.weapon.bullet_color);
    for (_, bullet) in state.bullets.iter() {
        draw_box(out, &view, &bullet.bounds(), '║', bullet_color)?;
    }
    draw_box(out, &view, &state.player.bounds(), '▀', rgb(state.config.player.color))?;

    draw_controls_hint(out, rows)?;

    if state.run.status == GameStatus::GameOver {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16, color: Color) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(color))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.run.score)))?;

    let level_str = format!("Level: {}", difficulty_level(&state.config, state.run.score));
    let lx = (cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let max_hp = state.config.player.max_hp as usize;
    let hp = (state.player.hp as usize).min(max_hp);
    let hp_str = format!("HP:{}{}", "♥".repeat(hp), "·".repeat(max_hp - hp));
    let rx = cols.saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(&hp_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_box<W: Write>(
    out: &mut W,
    view: &Viewport,
    aabb: &Aabb,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = view.cells(aabb) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..h {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   (auto-fire)   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", state.run.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = cols / 2;
    let total_rows = lines.len() + 2;
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
