use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::dashboard::Dashboard;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct DashboardView {
    pub(in crate::tui_shell) data: Dashboard,
    pub(in crate::tui_shell) loaded_at: String,
}

impl View for DashboardView {
    fn mode(&self) -> UiMode {
        UiMode::Dashboard
    }

    fn title(&self) -> &str {
        "Dashboard"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx<'_>) {
        let inner = render_view_chrome(frame, self.title(), &self.loaded_at, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.data.message.as_str())
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::BOTTOM)),
            parts[0],
        );

        let cards = self.data.stats.cards();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(4)])
            .split(parts[1]);
        for (r, chunk) in cards.chunks(3).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(rows[r]);
            for (c, (title, value)) in chunk.iter().enumerate() {
                let color = match *title {
                    "Running Executions" => Color::Yellow,
                    "Successful Executions" => Color::Green,
                    "Failed Executions" => Color::Red,
                    _ => Color::Cyan,
                };
                let body = Line::from(Span::styled(
                    value.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
                frame.render_widget(
                    Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(*title)),
                    cols[c],
                );
            }
        }
    }
}
