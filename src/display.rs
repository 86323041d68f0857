/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only scales playfield
/// pixels onto terminal cells and emits terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sweep_shooter::entities::{Enemy, SweepDirection};
use sweep_shooter::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_SHIP: Color = Color::Green;
const C_ENEMY: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_STOPPED: Color = Color::Red;

/// Terminal area the playfield is drawn into (inside the border).
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn from_terminal(width: u16, height: u16) -> Self {
        // Row 0 is the HUD, row 1 / h-2 are the border, h-1 is the hint.
        Self {
            width: width.saturating_sub(2).max(1),
            height: height.saturating_sub(4).max(1),
        }
    }

    /// Playfield pixels → column.  The arena is square, so the same pixel
    /// extent is used for both axes.
    fn col(&self, px: i32, extent: i32) -> u16 {
        1 + scale(px, extent, self.width)
    }

    fn row(&self, px: i32, extent: i32) -> u16 {
        2 + scale(px, extent, self.height)
    }
}

fn scale(px: i32, extent: i32, cells: u16) -> u16 {
    let last = i64::from(cells.saturating_sub(1));
    let cell = i64::from(px.max(0)) * i64::from(cells) / i64::from(extent.max(1));
    cell.clamp(0, last) as u16
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::from_terminal(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, session, width)?;

    let extent = session.playfield().width();
    for enemy in session.enemy_positions() {
        draw_enemy(out, &view, enemy, extent)?;
    }
    draw_ship(out, &view, session.ship_position(), extent, height)?;
    draw_controls_hint(out, height)?;

    if !session.is_active() {
        draw_stopped(out, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Tick: {:>8}", session.tick_count())))?;

    let arrow = match session.direction() {
        SweepDirection::Left => "◀ sweep",
        SweepDirection::Right => "sweep ▶",
    };
    let cx = (width / 2).saturating_sub(arrow.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(Print(arrow))?;

    let ship_text = format!("Ship: {:>4}", session.ship_position());
    let rx = width.saturating_sub(ship_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(&ship_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(
    out: &mut W,
    view: &Viewport,
    position: i32,
    extent: i32,
    height: u16,
) -> std::io::Result<()> {
    // Bottom row of the play area, one above the border.
    let row = height.saturating_sub(3).max(2);
    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(cursor::MoveTo(view.col(position, extent), row))?;
    out.queue(Print("▲"))?;
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    view: &Viewport,
    enemy: &Enemy,
    extent: i32,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(
        view.col(enemy.left, extent),
        view.row(enemy.top, extent),
    ))?;
    out.queue(Print("●"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Stopped overlay ───────────────────────────────────────────────────────────

fn draw_stopped<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let msg = "SESSION STOPPED  (R to restart)";
    let col = (width / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, height / 2))?;
    out.queue(style::SetForegroundColor(C_STOPPED))?;
    out.queue(Print(msg))?;
    Ok(())
}
