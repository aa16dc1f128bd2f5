use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::listing::{PageRequest, instance_label, paginate};
use crate::model::{Execution, ExecutionStatus, PublicInstance};

use super::super::view::{fmt_since, step_down};
use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::{header_style, selected_style};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct ExecutionsView {
    pub(in crate::tui_shell) request: PageRequest,
    pub(in crate::tui_shell) items: Vec<Execution>,
    pub(in crate::tui_shell) instances: Vec<PublicInstance>,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) loaded_at: String,
}

fn status_color(ex: &Execution) -> Color {
    match ex.classify() {
        ExecutionStatus::Running => Color::Yellow,
        ExecutionStatus::Success => Color::Green,
        ExecutionStatus::Failed => Color::Red,
        ExecutionStatus::Other => Color::Gray,
    }
}

impl View for ExecutionsView {
    fn mode(&self) -> UiMode {
        UiMode::Executions
    }

    fn title(&self) -> &str {
        "Executions"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, _ctx: &RenderCtx<'_>) {
        let len = paginate(&self.items, &self.request).rows.len();
        self.selected = step_down(self.selected, len);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let inner = render_view_chrome(frame, self.title(), &self.loaded_at, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let page = paginate(&self.items, &self.request);

        let known = self
            .instances
            .iter()
            .map(|i| format!("{}={}", i.prefix, i.display_name()))
            .collect::<Vec<_>>()
            .join(" ");
        let filters = vec![
            Line::from(vec![
                Span::styled("search: ", header_style()),
                Span::raw(format!("{:?}", self.request.query())),
                Span::styled("  instance: ", header_style()),
                Span::raw(self.request.instance().label().to_string()),
                Span::styled("  size: ", header_style()),
                Span::raw(self.request.size().to_string()),
            ]),
            Line::from(Span::styled(
                format!("instances: all {}", known),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(filters), parts[0]);

        let mut rows = Vec::new();
        for (i, ex) in page.rows.iter().enumerate() {
            let started = ex
                .started_at
                .as_deref()
                .map(|ts| fmt_since(ts, ctx.now))
                .unwrap_or_default();
            let wf = ex
                .workflow_id
                .as_ref()
                .map(|w| w.as_str())
                .unwrap_or("-");
            let row = Line::from(vec![
                Span::raw(format!(
                    "{:>4}  {:<18}  {:<18}  {:<14}  ",
                    page.first_row + i,
                    ex.id,
                    wf,
                    instance_label(ex.id.instance_prefix(), &self.instances),
                )),
                Span::styled(
                    format!("{:<10}", ex.display_status()),
                    Style::default().fg(status_color(ex)),
                ),
                Span::raw(format!("  {}", started)),
            ]);
            rows.push(ListItem::new(row));
        }
        if rows.is_empty() {
            rows.push(ListItem::new("(no executions)"));
        }

        let mut state = ListState::default();
        if !page.is_empty() {
            state.select(Some(self.selected.min(page.rows.len() - 1)));
        }
        let header = format!(
            "{:>4}  {:<18}  {:<18}  {:<14}  {:<10}  {}",
            "#", "id", "workflow", "instance", "status", "started"
        );
        let list = List::new(rows)
            .block(Block::default().borders(Borders::TOP).title(header))
            .highlight_style(selected_style());
        frame.render_stateful_widget(list, parts[1], &mut state);

        frame.render_widget(
            Paragraph::new(Span::styled(page.summary(), Style::default().fg(Color::Gray))),
            parts[2],
        );
    }
}
