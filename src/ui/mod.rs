pub mod cell_canvas;
pub mod event_log;
pub mod game_common;
pub mod runner_scene;

use crate::core::runner::Runner;
use event_log::EventLog;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal the runner screen is drawn in.
pub const MIN_COLS: u16 = 50;
pub const MIN_ROWS: u16 = 12;

/// Main UI drawing function
pub fn draw_ui<R: Rng>(frame: &mut Frame, runner: &Runner<R>, log: &EventLog) {
    let size = frame.size();
    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(frame, size);
        return;
    }
    runner_scene::render_runner_scene(frame, size, runner, log);
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}x{}), need {}x{}",
        area.width, area.height, MIN_COLS, MIN_ROWS
    );
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        Rect {
            y,
            height: 1.min(area.height),
            ..area
        },
    );
}
