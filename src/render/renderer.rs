use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::autopilot::axis_path;
use crate::game::{Axis, Cell, Mode, Snapshot};
use crate::metrics::GameMetrics;

/// Draws two orthographic views of the grid (looking down z, looking down y)
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        match snapshot.mode {
            Mode::GameOver => {
                frame.render_widget(self.render_game_over(snapshot), chunks[1]);
            }
            Mode::Settings { .. } => {
                frame.render_widget(self.render_settings(snapshot), chunks[1]);
            }
            Mode::Playing | Mode::Paused => {
                let views = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[1]);

                let paused = snapshot.mode == Mode::Paused;
                let top = self.render_projection(snapshot, Axis::Y, " Top (x/y) ", paused);
                let side = self.render_projection(snapshot, Axis::Z, " Side (x/z) ", paused);
                frame.render_widget(top, views[0]);
                frame.render_widget(side, views[1]);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Project the grid onto the x axis and `vertical`, flattening the third axis
    fn render_projection(
        &self,
        snapshot: &Snapshot,
        vertical: Axis,
        title: &'static str,
        paused: bool,
    ) -> Paragraph<'static> {
        let h = (snapshot.grid_size / 2) as i32;
        let head = snapshot.snake[0];
        let flat = |cell: Cell| (cell.x, cell.component(vertical));

        let path: Vec<(i32, i32)> = match (snapshot.path_overlay, snapshot.food) {
            (true, Some(food)) => path_cells(&axis_path(head, food))
                .into_iter()
                .map(flat)
                .collect(),
            _ => Vec::new(),
        };
        let body: Vec<(i32, i32)> = snapshot.snake[1..].iter().copied().map(flat).collect();

        let mut lines = Vec::new();
        for v in (-h..=h).rev() {
            let mut spans = Vec::new();
            for x in -h..=h {
                let here = (x, v);
                let cell = if here == flat(head) {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.food.map(flat) == Some(here) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&here) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if path.contains(&here) {
                    Span::styled("· ", Style::default().fg(Color::Yellow))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };
                spans.push(cell);
            }
            lines.push(Line::from(spans));
        }

        let title = if paused { " Paused " } else { title };
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let head = snapshot.snake[0];
        let food = snapshot
            .food
            .map(|f| format!("({}, {}, {})", f.x, f.y, f.z))
            .unwrap_or_else(|| "…".to_string());

        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let text = vec![Line::from(vec![
            label("Score: "),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            label("Length: "),
            value(snapshot.snake.len().to_string()),
            Span::raw("    "),
            label("Head: "),
            value(format!("({}, {}, {})", head.x, head.y, head.z)),
            Span::raw("    "),
            label("Food: "),
            value(food),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("Best: "),
            value(metrics.high_score.to_string()),
            Span::raw(if snapshot.autopilot { "    [autopilot]" } else { "" }),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_settings(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let key = |text: &'static str| {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SETTINGS",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Grid size: "),
                Span::styled(snapshot.grid_size.to_string(), Style::default().fg(Color::White)),
                Span::raw("   "),
                key("["),
                Span::raw(" / "),
                key("]"),
            ]),
            Line::from(vec![
                Span::raw("Speed: "),
                Span::styled(
                    format!("{:.1} moves/s", snapshot.speed),
                    Style::default().fg(Color::White),
                ),
                Span::raw("   "),
                key("-"),
                Span::raw(" / "),
                key("="),
            ]),
            Line::from(""),
            Line::from(vec![
                key("Tab"),
                Span::raw(" or "),
                key("Esc"),
                Span::raw(" to close"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if snapshot.new_high_score {
            text.push(Line::from(vec![Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "X",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));

        let text = vec![Line::from(vec![
            key("WASD"),
            Span::raw("/"),
            key("↑↓←→"),
            Span::raw(" x/y | "),
            key("Q/E"),
            Span::raw(" z | "),
            key("P"),
            Span::raw(" pause | "),
            key("Tab"),
            Span::raw(" settings | "),
            key("T"),
            Span::raw(" autopilot | "),
            key("F"),
            Span::raw(" path | "),
            Span::styled("X", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Every cell covered by the straight legs between consecutive corner points
fn path_cells(corners: &[Cell]) -> Vec<Cell> {
    let mut cells = Vec::new();
    for leg in corners.chunks(2) {
        let [from, to] = leg else { continue };
        let step = Cell::new(
            (to.x - from.x).signum(),
            (to.y - from.y).signum(),
            (to.z - from.z).signum(),
        );
        let mut current = *from;
        while current != *to {
            current = current + step;
            cells.push(current);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_cells_follow_legs() {
        let corners = axis_path(Cell::ORIGIN, Cell::new(2, 0, -1));
        assert_eq!(
            path_cells(&corners),
            vec![Cell::new(1, 0, 0), Cell::new(2, 0, 0), Cell::new(2, 0, -1)]
        );
        assert!(path_cells(&[]).is_empty());
    }
}
