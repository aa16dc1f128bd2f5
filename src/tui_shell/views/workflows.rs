use std::collections::BTreeMap;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::listing::{EMPTY_HINT, PageRequest, instance_label, instance_options, paginate};
use crate::model::{PublicInstance, Workflow, WorkflowId};

use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::{header_style, selected_style};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct WorkflowsView {
    pub(in crate::tui_shell) request: PageRequest,
    pub(in crate::tui_shell) items: Vec<Workflow>,
    pub(in crate::tui_shell) execution_counts: BTreeMap<WorkflowId, usize>,
    pub(in crate::tui_shell) instances: Vec<PublicInstance>,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) loaded_at: String,
}

impl View for WorkflowsView {
    fn mode(&self) -> UiMode {
        UiMode::Workflows
    }

    fn title(&self) -> &str {
        "Workflows"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, _ctx: &RenderCtx<'_>) {
        let len = paginate(&self.items, &self.request).rows.len();
        self.selected = super::super::view::step_down(self.selected, len);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx<'_>) {
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

        let options = instance_options(&self.items, &self.instances)
            .into_iter()
            .map(|(p, name)| if p == name { p } else { format!("{}={}", p, name) })
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
                format!("instances on page: all {}", options),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(filters), parts[0]);

        if page.is_empty() {
            frame.render_widget(
                Paragraph::new(EMPTY_HINT).wrap(Wrap { trim: true }),
                parts[1],
            );
        } else {
            let mut rows = Vec::new();
            for (i, wf) in page.rows.iter().enumerate() {
                let prefix = wf.id.instance_prefix();
                let count = self.execution_counts.get(&wf.id).copied().unwrap_or(0);
                let active = if wf.active { "Active" } else { "Inactive" };
                let name = if wf.name().is_empty() {
                    wf.id.as_str()
                } else {
                    wf.name()
                };
                let row = format!(
                    "{:>4}  {:<32}  {:<18}  {:<14}  {:<8}  {}",
                    page.first_row + i,
                    name,
                    wf.id,
                    instance_label(prefix, &self.instances),
                    active,
                    count
                );
                let style = if wf.active {
                    Style::default()
                } else {
                    Style::default().fg(Color::Gray)
                };
                rows.push(ListItem::new(row).style(style));
            }
            let mut state = ListState::default();
            state.select(Some(self.selected.min(rows.len().saturating_sub(1))));
            let header = format!(
                "{:>4}  {:<32}  {:<18}  {:<14}  {:<8}  {}",
                "#", "name", "id", "instance", "state", "executions"
            );
            let list = List::new(rows)
                .block(Block::default().borders(Borders::TOP).title(header))
                .highlight_style(selected_style());
            frame.render_stateful_widget(list, parts[1], &mut state);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(page.summary(), Style::default().fg(Color::Gray))),
            parts[2],
        );
    }
}
