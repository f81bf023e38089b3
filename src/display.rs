//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Snapshot`. World
//! coordinates (pixels) are scaled onto whatever terminal grid is available;
//! no game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use pixel_shooter::entities::{AdversaryKind, GameStatus, PowerUpKind, ProjectileBody, Rgb};
use pixel_shooter::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_WAVE: Color = Color::Cyan;
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_EMPTY: Color = Color::DarkRed;
const C_PLAYER: Color = Color::Rgb { r: 50, g: 100, b: 255 };
const C_SHIELD: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── World → screen mapping ────────────────────────────────────────────────────

/// Playfield occupies rows 2..height-2 and columns 1..width-1.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(snapshot: &Snapshot, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            world_w: snapshot.arena.width,
            world_h: snapshot.arena.height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// `None` when the point is outside the visible arena.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x > self.world_w || y > self.world_h {
            return None;
        }
        let col = ((x / self.world_w) * (self.inner_cols() - 1.0)).round() as u16 + 1;
        let row = ((y / self.world_h) * (self.inner_rows() - 1.0)).round() as u16 + 2;
        Some((col, row))
    }

    fn row_of(&self, y: f32) -> u16 {
        let y = y.clamp(0.0, self.world_h);
        ((y / self.world_h) * (self.inner_rows() - 1.0)).round() as u16 + 2
    }
}

fn put<W: Write>(out: &mut W, view: &Viewport, x: f32, y: f32, color: Color, glyph: &str) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(snapshot, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cols, rows)?;
    draw_hud(out, snapshot, cols)?;

    for particle in &snapshot.particles {
        let glyph = if particle.size >= 3.0 { "*" } else { "." };
        put(out, &view, particle.x, particle.y, rgb(particle.color), glyph)?;
    }
    for power_up in &snapshot.power_ups {
        let glyph = match power_up.kind {
            PowerUpKind::Health => "+",
            PowerUpKind::Shotgun => "S",
            PowerUpKind::Laser => "L",
        };
        put(out, &view, power_up.x, power_up.y, rgb(power_up.color), glyph)?;
    }
    for adversary in &snapshot.adversaries {
        let glyph = match adversary.kind {
            AdversaryKind::Basic => "[#]",
            AdversaryKind::Fast => "\\v/",
            AdversaryKind::Tank => "(O)",
        };
        put(out, &view, adversary.x - adversary.width / 2.0, adversary.y, rgb(adversary.color), glyph)?;
        for shot in &adversary.projectiles {
            put(out, &view, shot.x, shot.y, rgb(shot.color), "o")?;
        }
    }
    for projectile in &snapshot.projectiles {
        match &projectile.body {
            ProjectileBody::Bullet { .. } => {
                put(out, &view, projectile.x, projectile.y, rgb(projectile.color), "|")?;
            }
            ProjectileBody::Beam { height, .. } => {
                draw_beam(out, &view, projectile.x, projectile.y, *height, rgb(projectile.color))?;
            }
        }
    }

    draw_player(out, &view, snapshot)?;
    draw_controls_hint(out, rows)?;

    if snapshot.status == GameStatus::GameOver {
        draw_game_over(out, snapshot, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>7}", snapshot.score)))?;

    let wave_text = format!("Wave: {}", snapshot.wave);
    let wx = (cols / 2).saturating_sub(wave_text.len() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_text))?;

    // Health bar, right-aligned
    let player = &snapshot.player;
    let slots = 10usize;
    let filled = (player.health.max(0) as usize * slots) / player.max_health.max(1) as usize;
    let bar_x = cols.saturating_sub(slots as u16 + 12);
    out.queue(cursor::MoveTo(bar_x, 0))?;
    out.queue(style::SetForegroundColor(C_HEALTH_FULL))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
    out.queue(Print("░".repeat(slots - filled)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!(" {:>3}/{}", player.health, player.max_health)))?;

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_beam<W: Write>(out: &mut W, view: &Viewport, x: f32, y: f32, height: f32, color: Color) -> std::io::Result<()> {
    let Some((col, top)) = view.cell(x, y) else {
        return Ok(());
    };
    let bottom = view.row_of(y + height);
    out.queue(style::SetForegroundColor(color))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, snapshot: &Snapshot) -> std::io::Result<()> {
    let player = &snapshot.player;
    let color = if player.invincible > 0 { C_SHIELD } else { C_PLAYER };
    put(out, view, player.x - player.width / 2.0, player.y, color, "/^\\")?;

    // Weapon label under the ship
    let label = match player.power_up_timer {
        0 => player.weapon.name().to_string(),
        frames => format!("{} {}s", player.weapon.name(), frames.div_ceil(snapshot.arena.fps)),
    };
    if let Some((col, row)) = view.cell(player.x, player.y) {
        out.queue(cursor::MoveTo(col.saturating_sub(label.len() as u16 / 2), row + 1))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(&label))?;
    }
    Ok(())
}

// ── Controls hint (last row) ─────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, snapshot: &Snapshot, cols: u16, rows: u16) -> std::io::Result<()> {
    let cx = cols / 2;
    let cy = rows / 2;

    let lines: [(String, Color); 3] = [
        ("G A M E   O V E R".to_string(), Color::Red),
        (format!("Final Score: {}   Wave: {}", snapshot.score, snapshot.wave), Color::White),
        ("R : Restart   Q : Quit".to_string(), Color::Green),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(2) + (i as u16) * 2;
        out.queue(cursor::MoveTo(cx.saturating_sub(text.chars().count() as u16 / 2), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}
