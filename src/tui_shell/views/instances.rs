use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::model::Instance;
use crate::snapshot::AdminSnapshot;

use super::super::view::step_down;
use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::selected_style;

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct InstancesView {
    pub(in crate::tui_shell) selected: usize,
}

impl InstancesView {
    pub(in crate::tui_shell) fn selected_instance<'a>(&self, snapshot: &'a AdminSnapshot) -> Option<&'a Instance> {
        let n = snapshot.instances.len();
        snapshot.instances.get(self.selected.min(n.saturating_sub(1)))
    }
}

impl View for InstancesView {
    fn mode(&self) -> UiMode {
        UiMode::Instances
    }

    fn title(&self) -> &str {
        "Instances"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, ctx: &RenderCtx<'_>) {
        self.selected = step_down(self.selected, ctx.snapshot.instances.len());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let inner = render_view_chrome(frame, self.title(), "", area);
        let instances = &ctx.snapshot.instances;
        let mut rows: Vec<ListItem> = instances
            .iter()
            .map(|i| {
                let (state, color) = if i.active {
                    ("active", Color::Green)
                } else {
                    ("inactive", Color::Red)
                };
                ListItem::new(format!(
                    "{:<10}  {:<24}  {:<40}  {}",
                    i.identifier.as_deref().unwrap_or("-"),
                    i.name,
                    i.base_url,
                    state
                ))
                .style(Style::default().fg(color))
            })
            .collect();
        if rows.is_empty() {
            rows.push(ListItem::new("(no instances)"));
        }
        let mut state = ListState::default();
        if !instances.is_empty() {
            state.select(Some(self.selected.min(instances.len() - 1)));
        }
        frame.render_stateful_widget(
            List::new(rows)
                .block(Block::default().borders(Borders::TOP).title("prefix / name / base url / state"))
                .highlight_style(selected_style()),
            inner,
            &mut state,
        );
    }
}
