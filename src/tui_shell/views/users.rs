use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::access::filter_users;
use crate::model::User;
use crate::snapshot::AdminSnapshot;

use super::super::view::step_down;
use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::selected_style;

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct UsersView {
    pub(in crate::tui_shell) query: String,
    pub(in crate::tui_shell) selected: usize,
}

impl UsersView {
    pub(in crate::tui_shell) fn selected_user<'a>(&self, snapshot: &'a AdminSnapshot) -> Option<&'a User> {
        let users = filter_users(&snapshot.users, &self.query);
        users
            .get(self.selected.min(users.len().saturating_sub(1)))
            .copied()
    }
}

impl View for UsersView {
    fn mode(&self) -> UiMode {
        UiMode::Users
    }

    fn title(&self) -> &str {
        "Users"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, ctx: &RenderCtx<'_>) {
        let len = filter_users(&ctx.snapshot.users, &self.query).len();
        self.selected = step_down(self.selected, len);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let note = format!("{} users", ctx.snapshot.users.len());
        let inner = render_view_chrome(frame, self.title(), &note, area);
        let me = ctx.snapshot.current_user.as_ref().map(|u| u.id.as_str());

        let users = filter_users(&ctx.snapshot.users, &self.query);
        let mut rows = Vec::new();
        for u in &users {
            let mut row = format!("{:<36}  {:<32}  {:<10}", u.id, u.email, u.role);
            if me == Some(u.id.as_str()) {
                row.push_str("  (you)");
                if u.is_superadmin() {
                    row.push_str(" Cannot downgrade yourself");
                }
            }
            let style = if u.is_superadmin() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            rows.push(ListItem::new(row).style(style));
        }
        if rows.is_empty() {
            rows.push(ListItem::new("(no users)"));
        }

        let mut state = ListState::default();
        if !users.is_empty() {
            state.select(Some(self.selected.min(users.len() - 1)));
        }
        let title = if self.query.is_empty() {
            "id / email / role".to_string()
        } else {
            format!("find={:?}", self.query)
        };
        frame.render_stateful_widget(
            List::new(rows)
                .block(Block::default().borders(Borders::TOP).title(title))
                .highlight_style(selected_style()),
            inner,
            &mut state,
        );
    }
}
