use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::model::ActionLog;
use crate::snapshot::AdminSnapshot;

use super::super::view::{fmt_since, step_down};
use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::selected_style;

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct LogsView {
    pub(in crate::tui_shell) query: String,
    pub(in crate::tui_shell) selected: usize,
}

fn visible<'a>(snapshot: &'a AdminSnapshot, query: &str) -> Vec<&'a ActionLog> {
    let q = query.trim().to_lowercase();
    snapshot
        .logs
        .iter()
        .filter(|l| {
            q.is_empty()
                || l.action.to_lowercase().contains(&q)
                || snapshot
                    .user_email(&l.user_id)
                    .unwrap_or(&l.user_id)
                    .to_lowercase()
                    .contains(&q)
        })
        .collect()
}

impl View for LogsView {
    fn mode(&self) -> UiMode {
        UiMode::Logs
    }

    fn title(&self) -> &str {
        "Action log"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, ctx: &RenderCtx<'_>) {
        self.selected = step_down(self.selected, visible(ctx.snapshot, &self.query).len());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let inner = render_view_chrome(frame, self.title(), &self.query, area);
        let logs = visible(ctx.snapshot, &self.query);
        let mut rows: Vec<ListItem> = logs
            .iter()
            .map(|l| {
                let who = ctx.snapshot.user_email(&l.user_id).unwrap_or(&l.user_id);
                let when = l
                    .timestamp
                    .as_deref()
                    .map(|ts| fmt_since(ts, ctx.now))
                    .unwrap_or_default();
                ListItem::new(format!("{:<12}  {:<32}  {}", when, who, l.action))
            })
            .collect();
        if rows.is_empty() {
            rows.push(ListItem::new("(no actions logged)"));
        }
        let mut state = ListState::default();
        if !logs.is_empty() {
            state.select(Some(self.selected.min(logs.len() - 1)));
        }
        frame.render_stateful_widget(
            List::new(rows)
                .block(Block::default().borders(Borders::TOP).title("when / user / action"))
                .highlight_style(selected_style()),
            inner,
            &mut state,
        );
    }
}
