//! The runner screen: play field, status bar and the stats/event panel.

use super::cell_canvas::CellCanvas;
use super::event_log::EventLog;
use super::game_common::{create_game_layout, render_panel_frame, render_status_bar};
use crate::core::constants::DEFAULT_WIDTH;
use crate::core::runner::Runner;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rand::Rng;

pub const INFO_PANEL_WIDTH: u16 = 28;

/// Logical pixels per terminal column at full size.
const PIXELS_PER_COLUMN: f64 = 10.0;

/// Logical canvas width for a terminal `cols` wide: the play field's
/// columns at ten pixels each, capped at the default width.
pub fn logical_width_for(cols: u16) -> f64 {
    let field_cols = cols.saturating_sub(2 + INFO_PANEL_WIDTH).max(1);
    (field_cols as f64 * PIXELS_PER_COLUMN).min(DEFAULT_WIDTH)
}

/// Which phase the runner is in, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Waiting,
    Intro,
    Running,
    Paused,
    Crashed,
}

impl RunPhase {
    pub fn of<R: Rng>(runner: &Runner<R>) -> Self {
        if runner.crashed {
            Self::Crashed
        } else if runner.paused {
            Self::Paused
        } else if runner.playing_intro {
            Self::Intro
        } else if runner.started {
            Self::Running
        } else {
            Self::Waiting
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "Press Space to start",
            Self::Intro => "Get ready...",
            Self::Running => "Run!",
            Self::Paused => "Paused",
            Self::Crashed => "Game over",
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Crashed => Color::LightRed,
            Self::Paused => Color::Yellow,
            _ => Color::LightYellow,
        }
    }
}

pub fn render_runner_scene<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    runner: &Runner<R>,
    log: &EventLog,
) {
    let layout = create_game_layout(
        frame,
        area,
        " T-Rex Runner ",
        Color::White,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.content, runner);
    render_status(frame, layout.status_bar, runner);
    render_info_panel(frame, layout.info_panel, runner, log);
}

fn render_play_field<R: Rng>(frame: &mut Frame, area: Rect, runner: &Runner<R>) {
    if area.width < 10 || area.height < 3 {
        return;
    }
    let mut canvas = CellCanvas::new(area.width, area.height, runner.dimensions);
    canvas.viewport_width = runner.viewport_width();
    runner.draw(&mut canvas);
    canvas.render(frame, area);
}

fn render_status<R: Rng>(frame: &mut Frame, area: Rect, runner: &Runner<R>) {
    let phase = RunPhase::of(runner);
    let controls: &[(&str, &str)] = match phase {
        RunPhase::Crashed => &[("[Enter]", "Restart"), ("[Space]", "Retry"), ("[q]", "Quit")],
        RunPhase::Paused => &[("[Space]", "Resume"), ("[q]", "Quit")],
        _ => &[("[Space/Up]", "Jump"), ("[Down]", "Drop"), ("[q]", "Quit")],
    };
    render_status_bar(frame, area, phase.label(), phase.color(), controls);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, runner: &Runner<R>, log: &EventLog) {
    let stats_height = 7;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(stats_height), Constraint::Min(3)])
        .split(area);

    let inner = render_panel_frame(frame, sections[0], " Info ");
    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:05}", runner.distance()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("High", format!("{:05}", runner.high_score())),
        stat_line("Speed", format!("{:.2}", runner.current_speed)),
        stat_line("Runs", runner.play_count.to_string()),
        stat_line("Obstacles", runner.horizon.obstacles.len().to_string()),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let inner = render_panel_frame(frame, sections[1], " Log ");
    let visible = inner.height as usize;
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log
        .entries()
        .skip(skip)
        .map(|entry| {
            let style = if entry.is_highlight {
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.message.clone(), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RunnerConfig;
    use crate::core::constants::Dimensions;
    use crate::core::events::InputEvent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_logical_width_caps_at_default() {
        assert_eq!(logical_width_for(200), DEFAULT_WIDTH);
        assert_eq!(logical_width_for(70), 400.0);
        assert_eq!(logical_width_for(10), 10.0);
    }

    #[test]
    fn test_phase_follows_runner() {
        let mut runner = Runner::with_rng(
            RunnerConfig::default(),
            Dimensions::default(),
            ChaCha8Rng::seed_from_u64(1),
        );
        assert_eq!(RunPhase::of(&runner), RunPhase::Waiting);

        runner.handle_input(InputEvent::JumpPressed, 0.0);
        for _ in 0..120 {
            runner.tick(16.0);
            if runner.playing_intro {
                assert_eq!(RunPhase::of(&runner), RunPhase::Intro);
            }
        }
        assert_eq!(RunPhase::of(&runner), RunPhase::Running);

        runner.set_visibility(false, runner.time());
        assert_eq!(RunPhase::of(&runner), RunPhase::Paused);
    }
}
