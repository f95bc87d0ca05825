//! A [`Canvas`] that rasterizes sprite blits onto a grid of terminal cells.
//!
//! Each sprite sheet gets a glyph and a colour; a blit fills the cells its
//! destination rectangle covers. Score digits and the game-over text are
//! decoded back into characters from their sprite-sheet coordinates.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::constants::{Dimensions, DIGIT_WIDTH, HORIZON_LINE_WIDTH};
use crate::render::{Blit, Canvas, Sprite};

const GAME_OVER_TEXT: &str = "G A M E   O V E R";
const RESTART_TEXT: &str = "[↻]";

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

pub struct CellCanvas {
    pub cols: u16,
    pub rows: u16,
    /// Logical canvas the blits are expressed in.
    pub logical: Dimensions,
    /// Logical width that is visible; blits right of it are clipped.
    pub viewport_width: f64,
    cells: Vec<Vec<Cell>>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, logical: Dimensions) -> Self {
        Self {
            cols,
            rows,
            logical,
            viewport_width: logical.width,
            cells: vec![vec![Cell::default(); cols as usize]; rows as usize],
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    fn x_scale(&self) -> f64 {
        self.cols as f64 / self.logical.width
    }

    fn y_scale(&self) -> f64 {
        self.rows as f64 / self.logical.height
    }

    fn visible_cols(&self) -> usize {
        ((self.viewport_width * self.x_scale()).ceil().max(0.0) as usize).min(self.cols as usize)
    }

    fn put(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col as usize >= self.visible_cols() {
            return;
        }
        if let Some(slot) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = cell;
        }
    }

    /// Fill every cell the logical rectangle touches.
    fn fill(&mut self, x: f64, y: f64, width: f64, height: f64, ch: char, fg: Color) {
        let col0 = (x * self.x_scale()).floor() as i64;
        let col1 = ((x + width) * self.x_scale()).ceil() as i64;
        let row0 = (y * self.y_scale()).floor() as i64;
        let row1 = ((y + height) * self.y_scale()).ceil() as i64;
        for row in row0..row1.max(row0 + 1) {
            for col in col0..col1.max(col0 + 1) {
                self.put(col, row, Cell { ch, fg, bg: Color::Reset });
            }
        }
    }

    /// Write a string centred on a logical rectangle.
    fn text(&mut self, x: f64, y: f64, width: f64, height: f64, text: &str, fg: Color) {
        let center_col = ((x + width / 2.0) * self.x_scale()).round() as i64;
        let row = ((y + height / 2.0) * self.y_scale()).floor() as i64;
        let start = center_col - text.chars().count() as i64 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i64, row, Cell { ch, fg, bg: Color::Reset });
        }
    }

    /// Render the buffer row by row, merging runs of equal style.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.cells.iter().enumerate().take(area.height as usize) {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter().take(area.width as usize) {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width.min(self.cols), 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

/// Digit sheet glyph for a sprite-sheet column.
fn glyph_char(index: u32) -> char {
    match index {
        0..=9 => char::from_digit(index, 10).unwrap_or('?'),
        10 => 'H',
        11 => 'I',
        _ => ' ',
    }
}

impl Canvas for CellCanvas {
    fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Cell::default());
        }
    }

    fn draw(&mut self, blit: Blit) {
        let d = blit.dest;
        if d.width <= 0.0 || d.height <= 0.0 {
            return;
        }
        // Source rects are doubled on high-DPI sheets
        let source_scale = blit.source.width / d.width;
        let faded = blit.alpha < 1.0;

        match blit.sprite {
            Sprite::Trex => {
                // The crashed frame sits at x 220 of the sheet
                let crashed = blit.source.x / source_scale >= 220.0;
                let fg = if crashed { Color::Red } else { Color::LightYellow };
                self.fill(d.x, d.y, d.width, d.height, '█', fg);
            }
            Sprite::CactusSmall => self.fill(d.x, d.y, d.width, d.height, '|', Color::Green),
            Sprite::CactusLarge => {
                self.fill(d.x, d.y, d.width, d.height, '#', Color::Rgb(50, 130, 50))
            }
            Sprite::Cloud => self.fill(d.x, d.y, d.width, d.height, '~', Color::DarkGray),
            Sprite::Horizon => {
                let bumpy = blit.source.x / source_scale >= HORIZON_LINE_WIDTH;
                let ch = if bumpy { '▂' } else { '▁' };
                // Only the ground line itself, not the sprite padding
                self.fill(d.x, d.y, d.width, 1.0, ch, Color::Rgb(90, 70, 50));
            }
            Sprite::Text => {
                let fg = if faded { Color::DarkGray } else { Color::White };
                if blit.source.y > 0.0 {
                    self.text(d.x, d.y, d.width, d.height, GAME_OVER_TEXT, Color::White);
                } else {
                    let glyph = (blit.source.x / source_scale / DIGIT_WIDTH).round() as u32;
                    let col = (d.x * self.x_scale()).round() as i64;
                    let row = (d.y * self.y_scale()).floor() as i64;
                    self.put(col, row, Cell { ch: glyph_char(glyph), fg, bg: Color::Reset });
                }
            }
            Sprite::Restart => {
                self.text(d.x, d.y, d.width, d.height, RESTART_TEXT, Color::White)
            }
        }
    }
}
