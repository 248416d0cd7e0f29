use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::surface::PixelBuffer;
use crate::game::{Grid, Session};
use crate::metrics::GameMetrics;

/// The fixed message shown once the snake dies.
const DEATH_MESSAGE: &str = "You died!";

/// Terminal presentation: blits the session's pixel buffer into the grid
/// area, one buffer cell per grid cell, with stats above and controls below.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(&self, frame: &mut Frame, session: &Session<R>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.is_game_over() {
            let game_over = self.render_game_over(game_area, session);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(session.surface(), session.grid());
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// One terminal character pair per grid cell, colored by sampling the
    /// pixel buffer at the cell's center.
    fn render_grid(&self, surface: &PixelBuffer, grid: &Grid) -> Paragraph<'_> {
        let cell = grid.cell_size();
        let mut lines = Vec::with_capacity(grid.rows() as usize);

        for row in 0..grid.rows() as u32 {
            let mut spans = Vec::with_capacity(grid.cols() as usize);

            for col in 0..grid.cols() as u32 {
                let rgb = surface.pixel(col * cell + cell / 2, row * cell + cell / 2);
                spans.push(Span::styled(
                    "██",
                    Style::default().fg(Color::Rgb(rgb.r, rgb.g, rgb.b)),
                ));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" snek "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<R: Rng>(&self, session: &Session<R>, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.apples().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.snake().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.most_apples.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over<R: Rng>(&self, _area: Rect, session: &Session<R>) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                DEATH_MESSAGE,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Apples eaten: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.apples().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
