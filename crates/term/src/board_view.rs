//! BoardView: maps a game session into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The session's grid already holds
//! the falling piece between ticks, so the view only reads the board.

use crate::core::{Board, GameSession, PieceSource};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Draws the board, a status panel, and the game over overlay.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into<S: PieceSource>(
        &self,
        session: &GameSession<S>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let board = session.board();
        let well_w = board.width() as u16 * self.cell_w;
        let well_h = board.height() as u16;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(140, 140, 150), WELL_BG);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        self.draw_cells(board, fb, start_x + 1, start_y + 1);

        draw_status(
            fb,
            start_x + frame_w + 2,
            start_y + 1,
            session.lines_cleared(),
            session.pieces_locked(),
        );

        if session.is_game_over() {
            let mid_y = start_y + frame_h / 2;
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(120, 20, 20)).bold();
            draw_centered(fb, start_x, frame_w, mid_y.saturating_sub(1), " GAME OVER ", style);
            draw_centered(fb, start_x, frame_w, mid_y + 1, " R: restart ", style);
        }
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render<S: PieceSource>(&self, session: &GameSession<S>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    fn draw_cells(&self, board: &Board, fb: &mut FrameBuffer, left: u16, top: u16) {
        let bounds = board.bounds();
        for (row, y) in (bounds.y_min()..bounds.y_max()).rev().enumerate() {
            for (col, x) in (bounds.x_min()..bounds.x_max()).enumerate() {
                let (fill, rest, style) = match board.get((x, y)).flatten() {
                    Some(kind) => ('█', '█', CellStyle::new(kind_color(kind), WELL_BG)),
                    None => ('·', ' ', CellStyle::new(Rgb::new(70, 70, 80), WELL_BG)),
                };
                let sx = left + col as u16 * self.cell_w;
                fb.put_char(sx, top + row as u16, fill, style);
                for dx in 1..self.cell_w {
                    fb.put_char(sx + dx, top + row as u16, rest, style);
                }
            }
        }
    }
}

const PANEL_W: u16 = 12;

/// Fill color for a locked or falling cell.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

fn draw_status(fb: &mut FrameBuffer, x: u16, y: u16, lines: u32, pieces: u32) {
    let label = CellStyle::new(Rgb::new(150, 150, 160), Rgb::new(0, 0, 0));
    let value = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(0, 0, 0)).bold();

    fb.put_str(x, y, "LINES", label);
    fb.put_u32(x, y + 1, lines, value);
    fb.put_str(x, y + 3, "PIECES", label);
    fb.put_u32(x, y + 4, pieces, value);
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let len = text.chars().count() as u16;
    let tx = x + w.saturating_sub(len) / 2;
    fb.put_str(tx, y, text, style);
}
