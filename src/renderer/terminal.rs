//! Terminal renderer
//!
//! Scales the playfield onto the terminal grid. Row 0 is the HUD; the field
//! occupies the rows below it. Entities outside the field are not drawn.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::IVec2;

use crate::error::SessionError;
use crate::session::Renderer;
use crate::settings::Config;
use crate::sim::{Enemy, GameState, Movement};

const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::Blue;
const C_PICKUP: Color = Color::Yellow;
const C_PAUSED: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Draws each frame as terminal commands into `out`
pub struct TerminalRenderer<W: Write> {
    out: W,
    field: IVec2,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: &Config, cols: u16, rows: u16) -> Self {
        Self {
            out,
            field: IVec2::new(config.field_width, config.field_height),
            cols: cols.max(1),
            rows: rows.max(2),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Map a field position to a terminal cell, if it lies on the field
    fn to_cell(&self, pos: IVec2) -> Option<(u16, u16)> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.field.x || pos.y >= self.field.y {
            return None;
        }
        let field_rows = (self.rows - 1) as i64;
        let col = pos.x as i64 * self.cols as i64 / self.field.x as i64;
        let row = 1 + pos.y as i64 * field_rows / self.field.y as i64;
        Some((col as u16, row as u16))
    }

    fn draw_glyph(&mut self, pos: IVec2, glyph: &str, color: Color) -> std::io::Result<()> {
        if let Some((col, row)) = self.to_cell(pos) {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(glyph))?;
        }
        Ok(())
    }

    fn draw_enemy(&mut self, enemy: &Enemy) -> std::io::Result<()> {
        let (glyph, color) = enemy_style(enemy.movement);
        self.draw_glyph(enemy.pos, glyph, color)
    }

    fn draw_hud(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD))?;
        self.out.queue(Print(format!("Score: {}", state.score)))?;

        let hint = "Arrows: Move  P: Pause  Q: Quit";
        let hx = self.cols.saturating_sub(hint.len() as u16 + 1);
        self.out.queue(cursor::MoveTo(hx, 0))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }

    fn draw_paused(&mut self) -> std::io::Result<()> {
        let label = "PAUSED";
        let x = (self.cols / 2).saturating_sub(label.len() as u16 / 2);
        self.out.queue(cursor::MoveTo(x, self.rows / 2))?;
        self.out.queue(style::SetForegroundColor(C_PAUSED))?;
        self.out.queue(Print(label))?;
        Ok(())
    }

    fn draw_frame(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for pickup in &state.registry.pickups {
            self.draw_glyph(pickup.pos, "$", C_PICKUP)?;
        }
        for enemy in &state.registry.enemies {
            self.draw_enemy(enemy)?;
        }
        self.draw_glyph(state.player.pos, "@", C_PLAYER)?;
        self.draw_hud(state)?;

        if state.is_paused() {
            self.draw_paused()?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}

fn enemy_style(movement: Movement) -> (&'static str, Color) {
    match movement {
        Movement::Random => ("x", Color::Magenta),
        Movement::Chase => ("X", Color::Red),
        Movement::Patterned(_) => ("%", Color::DarkRed),
        Movement::Zigzag => ("z", Color::DarkMagenta),
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &GameState) -> Result<(), SessionError> {
        self.draw_frame(state).map_err(SessionError::Render)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(2);
    }
}
