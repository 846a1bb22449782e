//! Rendering layer: all terminal I/O lives here.
//!
//! `render` receives a writer and an immutable view of the game state and
//! turns it into terminal commands. The 800×600 world is scaled onto
//! whatever grid the terminal offers; no game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use flappy_game::constants::{
    BIRD_HEIGHT, BIRD_WIDTH, FPS, GROUND_Y, PIPE_CAP_HEIGHT, PIPE_CAP_OVERHANG, PIPE_WIDTH,
    POWER_UP_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use flappy_game::effects::ParticleKind;
use flappy_game::entities::{Bird, GameState, Pipe, PowerUp, PowerUpKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CLOUD: Color = Color::White;
const C_PIPE: Color = Color::Green;
const C_PIPE_CAP: Color = Color::DarkGreen;
const C_GROUND: Color = Color::DarkYellow;
const C_GRASS: Color = Color::Green;
const C_BIRD: Color = Color::Yellow;
const C_SHIELD: Color = Color::Cyan;
const C_STAR: Color = Color::Yellow;
const C_DEBRIS: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::White;
const C_MAGNET: Color = Color::Magenta;
const C_DOUBLE: Color = Color::Yellow;
const C_SLOW: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Playfield occupies rows 1..height-1; row 0 is the HUD and the last row
/// holds the controls hint.
#[derive(Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn field_rows(&self) -> u16 {
        self.height.saturating_sub(2).max(1)
    }

    fn col(&self, x: f32) -> i32 {
        (x / SCREEN_WIDTH * self.width as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        1 + (y / SCREEN_HEIGHT * self.field_rows() as f32).floor() as i32
    }

    /// World y at the vertical centre of a playfield row.
    fn world_y(&self, row: u16) -> f32 {
        (row.saturating_sub(1) as f32 + 0.5) / self.field_rows() as f32 * SCREEN_HEIGHT
    }
}

/// The part of `text` starting at `col` that lands inside `0..width`, with
/// its on-screen start column. `None` when nothing is visible.
fn clip(text: &str, col: i32, width: u16) -> Option<(u16, String)> {
    let skip = (-col).max(0) as usize;
    let start = col.max(0);
    let room = (width as i32 - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        None
    } else {
        Some((start as u16, visible))
    }
}

fn put<W: Write>(
    out: &mut W,
    view: Viewport,
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row < 1 || row > view.field_rows() as i32 {
        return Ok(());
    }
    let Some((start, visible)) = clip(text, col, view.width) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(start, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_clouds(out, view, state)?;
    draw_ground(out, view)?;

    if state.is_over() {
        draw_particles(out, view, state)?;
        draw_game_over(out, view, state)?;
    } else {
        for pipe in &state.pipes {
            draw_pipe(out, view, pipe)?;
        }
        for pu in &state.power_ups {
            draw_power_up(out, view, pu)?;
        }
        draw_particles(out, view, state)?;
        draw_bird(out, view, &state.bird)?;
    }

    draw_hud(out, view, state)?;
    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_clouds<W: Write>(out: &mut W, view: Viewport, state: &GameState) -> std::io::Result<()> {
    for cloud in &state.effects.clouds {
        let col = view.col(cloud.x - 40.0);
        let row = view.row(cloud.y);
        let puff = if cloud.z > 1.2 { "░░▒▒░░" } else { "░░░" };
        put(out, view, col, row, puff, C_CLOUD)?;
    }
    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let first = view.row(GROUND_Y).max(1);
    let line = "▒".repeat(view.width as usize);
    for row in first..=view.field_rows() as i32 {
        let color = if row == first { C_GRASS } else { C_GROUND };
        put(out, view, 0, row, &line, color)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Pipes are drawn row by row: body columns where the row's world y is
/// solid, and the wider cap columns in the lip rows next to the gap.
fn draw_pipe<W: Write>(out: &mut W, view: Viewport, pipe: &Pipe) -> std::io::Result<()> {
    let body_l = view.col(pipe.x);
    let body_r = view.col(pipe.right_edge()).max(body_l + 1);
    let cap_l = view.col(pipe.x - PIPE_CAP_OVERHANG);
    let cap_r = view.col(pipe.x + PIPE_WIDTH + PIPE_CAP_OVERHANG).max(cap_l + 1);

    for row in 1..=view.field_rows() {
        let y = view.world_y(row);
        if y >= GROUND_Y {
            break;
        }
        let top_cap = y >= pipe.top_height - PIPE_CAP_HEIGHT && y < pipe.top_height;
        let bottom_cap = y >= pipe.bottom_y && y < pipe.bottom_y + PIPE_CAP_HEIGHT;
        if top_cap || bottom_cap {
            let cap = "▓".repeat((cap_r - cap_l) as usize);
            put(out, view, cap_l, row as i32, &cap, C_PIPE_CAP)?;
        } else if y < pipe.top_height || y > pipe.bottom_y {
            let body = "█".repeat((body_r - body_l) as usize);
            put(out, view, body_l, row as i32, &body, C_PIPE)?;
        }
    }
    Ok(())
}

fn power_up_style(kind: PowerUpKind) -> (&'static str, Color) {
    match kind {
        PowerUpKind::Shield => ("S", C_SHIELD),
        PowerUpKind::Magnet => ("M", C_MAGNET),
        PowerUpKind::DoublePoints => ("2", C_DOUBLE),
        PowerUpKind::SlowMotion => ("~", C_SLOW),
    }
}

fn draw_power_up<W: Write>(out: &mut W, view: Viewport, pu: &PowerUp) -> std::io::Result<()> {
    let (glyph, color) = power_up_style(pu.kind);
    let col = view.col(pu.x + POWER_UP_SIZE / 2.0);
    let row = view.row(pu.y + POWER_UP_SIZE / 2.0);
    // Pulse between a bracketed and a bare glyph.
    if pu.animation.sin() > 0.0 {
        put(out, view, col - 1, row, &format!("({glyph})"), color)
    } else {
        put(out, view, col, row, glyph, color)
    }
}

fn draw_particles<W: Write>(out: &mut W, view: Viewport, state: &GameState) -> std::io::Result<()> {
    for p in &state.effects.particles {
        let (glyph, color) = match p.kind {
            ParticleKind::Star => (if p.fade() > 0.5 { "*" } else { "·" }, C_STAR),
            ParticleKind::Debris => (if p.fade() > 0.5 { "x" } else { "." }, C_DEBRIS),
        };
        put(out, view, view.col(p.x), view.row(p.y), glyph, color)?;
    }
    for glow in &state.effects.glows {
        if glow.current_radius() > 25.0 {
            put(out, view, view.col(glow.x), view.row(glow.y), "✦", C_STAR)?;
        }
    }
    Ok(())
}

fn draw_bird<W: Write>(out: &mut W, view: Viewport, bird: &Bird) -> std::io::Result<()> {
    // Nose follows the tilt: climbing, level, diving.
    let sprite = if bird.angle > 15.0 {
        "(o/"
    } else if bird.angle < -15.0 {
        "(o\\"
    } else {
        "(o>"
    };
    let col = view.col(bird.x + BIRD_WIDTH / 2.0) - 1;
    let row = view.row(bird.y + BIRD_HEIGHT / 2.0);
    if bird.shield.active {
        put(out, view, col - 1, row, "[", C_SHIELD)?;
        put(out, view, col + 3, row, "]", C_SHIELD)?;
    }
    put(out, view, col, row, sprite, C_BIRD)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>4}", state.score)))?;

    let bird = &state.bird;
    let timers = [
        (bird.shield, "SHIELD", C_SHIELD),
        (bird.magnet, "MAGNET", C_MAGNET),
        (bird.double_points, "2X POINTS", C_DOUBLE),
        (bird.slow_motion, "SLOW", C_SLOW),
    ];
    for (timer, label, color) in timers.iter().filter(|(t, _, _)| t.active) {
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("  {label} {}s", timer.seconds_left(FPS))))?;
    }

    let best = format!("Best: {}", state.high_score);
    let col = view.width.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(best))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ / click : Flap   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: Viewport, state: &GameState) -> std::io::Result<()> {
    let (shake_x, shake_y) = state.effects.shake_offset();
    let dx = view.col(shake_x as f32);
    let dy = view.row(shake_y as f32) - 1;

    let score_line = format!("Score: {}", state.score);
    let best_line = format!("Best: {}", state.high_score);
    let mut lines: Vec<(&str, Color)> = vec![
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), Color::Yellow),
    ];
    if state.new_record {
        lines.push(("★ NEW RECORD! ★", Color::Yellow));
    }
    lines.push(("Press SPACE to restart", Color::White));

    let cx = (view.width / 2) as i32 + dx;
    let start_row = (view.height / 2) as i32 - lines.len() as i32 / 2 + dy;

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx - msg.chars().count() as i32 / 2;
        put(out, view, col, start_row + i as i32, msg, *color)?;
    }
    Ok(())
}
