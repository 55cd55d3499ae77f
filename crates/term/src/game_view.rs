//! GameView: maps a game snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::activity::{format_elapsed, format_km, format_pace, format_start, Activity};
use crate::core::{GameSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Columns reserved for the side panel
const PANEL_W: u16 = 26;
/// Gap between the board frame and the panel
const PANEL_GAP: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Board frame placement inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub board_x: u16,
    pub board_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Left column of the side panel, if it fits
    pub panel_x: Option<u16>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    /// Smallest viewport that shows the whole board and the panel
    pub fn preferred_viewport(&self) -> Viewport {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        Viewport::new(frame_w + PANEL_GAP + PANEL_W, frame_h)
    }

    /// Board and panel centered together; the panel is dropped when it
    /// would be narrower than 12 columns.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;

        let board_x = viewport.width.saturating_sub(total_w) / 2;
        let board_y = viewport.height.saturating_sub(frame_h) / 2;
        let px = board_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        let panel_x = (viewport.width.saturating_sub(px) >= 12).then_some(px);

        Layout {
            board_x,
            board_y,
            frame_w,
            frame_h,
            panel_x,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot<Activity>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(
            layout.board_x + 1,
            layout.board_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(fb, layout.board_x, layout.board_y, layout.frame_w, layout.frame_h, border);

        // Locked cells.
        for y in 0..snap.board.height() as i8 {
            for x in 0..snap.board.width() as i8 {
                match snap.board.get(x, y) {
                    Some(Some(color)) => self.draw_block(fb, &layout, x, y, color, false),
                    _ => self.draw_empty_cell(fb, &layout, x, y),
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (dx, dy) in active.piece.shape.cells() {
                let x = active.position.x + dx;
                let y = active.position.y + dy;
                self.draw_block(fb, &layout, x, y, active.piece.color, true);
            }
        }

        if let Some(panel_x) = layout.panel_x {
            draw_side_panel(fb, snap, viewport, panel_x, layout.board_y);
        }

        match snap.phase {
            Phase::Idle => self.draw_overlay_text(fb, &layout, &["PRESS ENTER", "TO START"]),
            Phase::Paused => self.draw_overlay_text(fb, &layout, &["PAUSED"]),
            Phase::GameOver => {
                self.draw_overlay_text(fb, &layout, &["GAME OVER", "ENTER TO RESTART"])
            }
            Phase::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot<Activity>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, color: Color, bold: bool) {
        let mut style = CellStyle::new(Rgb::from(color), BOARD_BG);
        style.bold = bold;
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: i8,
        cell_y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if cell_x < 0 || cell_x >= BOARD_WIDTH as i8 || cell_y < 0 || cell_y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = layout.board_x + 1 + cell_x as u16 * self.cell_w;
        let py = layout.board_y + 1 + cell_y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = layout.board_y.saturating_add(layout.frame_h / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout
                .board_x
                .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Score block, the run behind the current piece, and key help.
fn draw_side_panel(
    fb: &mut FrameBuffer,
    snap: &GameSnapshot<Activity>,
    viewport: Viewport,
    panel_x: u16,
    start_y: u16,
) {
    let panel_w = viewport.width.saturating_sub(panel_x).min(PANEL_W);
    let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    let muted = value.dim();

    let mut y = start_y;
    for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
        fb.put_str(panel_x, y, name, label);
        fb.put_u32(panel_x, y + 1, v, value);
        y = y.saturating_add(3);
    }

    fb.put_str(panel_x, y, "PIECE SIZE", label);
    match snap.piece_size {
        Some(n) => {
            fb.put_u32(panel_x, y + 1, n, value);
            if let Some(active) = snap.active {
                let swatch = CellStyle::new(Rgb::from(active.piece.color), SCREEN_BG);
                fb.put_str(panel_x + 4, y + 1, "██", swatch);
            }
        }
        None => fb.put_str(panel_x, y + 1, "-", value),
    }
    y = y.saturating_add(3);

    fb.put_str(panel_x, y, "RUN", label);
    y = y.saturating_add(1);
    match &snap.token {
        Some(run) => {
            let lines = [
                run.name.clone(),
                format_start(run),
                format_km(run.distance),
                format_pace(run.moving_time, run.distance),
                format_elapsed(run.elapsed_time),
            ];
            for (i, text) in lines.iter().enumerate() {
                let style = if i == 0 { value.bold() } else { value };
                fb.put_str_clipped(panel_x, y, text, panel_w, style);
                y = y.saturating_add(1);
            }
        }
        None => {
            fb.put_str_clipped(panel_x, y, "random piece", panel_w, muted);
            y = y.saturating_add(1);
        }
    }
    y = y.saturating_add(1);

    fb.put_str(panel_x, y, "CONTROLS", label);
    y = y.saturating_add(1);
    for help in [
        "←/→   move",
        "↑     rotate",
        "↓     soft drop",
        "space hard drop",
        "p     pause",
        "enter start",
        "q     quit",
    ] {
        if y >= viewport.height {
            break;
        }
        fb.put_str_clipped(panel_x, y, help, panel_w, muted);
        y = y.saturating_add(1);
    }
}
