use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::access::{AccessMatrix, AccessSelection};
use crate::model::{Workflow, WorkflowId};
use crate::snapshot::AdminSnapshot;

use super::super::view::step_down;
use super::super::{RenderCtx, UiMode, View, render_view_chrome};
use super::{header_style, selected_style};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct AccessView {
    pub(in crate::tui_shell) selection: AccessSelection,
    pub(in crate::tui_shell) cursor: usize,
}

/// Filtered workflows in on-screen order (grouped by category).
fn display_order<'a>(m: &AccessMatrix<'a>) -> Vec<&'a Workflow> {
    m.groups().into_iter().flat_map(|(_, wfs)| wfs).collect()
}

impl AccessView {
    pub(in crate::tui_shell) fn matrix<'a>(&self, snapshot: &'a AdminSnapshot) -> AccessMatrix<'a> {
        AccessMatrix::derive(snapshot, &self.selection)
    }

    pub(in crate::tui_shell) fn selected_workflow(&self, snapshot: &AdminSnapshot) -> Option<WorkflowId> {
        let m = self.matrix(snapshot);
        let order = display_order(&m);
        order
            .get(self.cursor.min(order.len().saturating_sub(1)))
            .map(|w| w.id.clone())
    }

    /// Moves the user selection by `delta` within the filtered user list.
    pub(in crate::tui_shell) fn cycle_user(&mut self, snapshot: &AdminSnapshot, delta: isize) {
        let m = self.matrix(snapshot);
        if m.users.is_empty() {
            return;
        }
        let n = m.users.len() as isize;
        let cur = m
            .selected_id()
            .and_then(|id| m.users.iter().position(|u| u.id == id))
            .map_or(-1, |i| i as isize);
        let next = if cur < 0 {
            0
        } else {
            (cur + delta).rem_euclid(n)
        };
        self.selection.user_id = Some(m.users[next as usize].id.clone());
        self.cursor = 0;
    }
}

impl View for AccessView {
    fn mode(&self) -> UiMode {
        UiMode::Access
    }

    fn title(&self) -> &str {
        "Workflow access"
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self, ctx: &RenderCtx<'_>) {
        let len = self.matrix(ctx.snapshot).workflows.len();
        self.cursor = step_down(self.cursor, len);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let m = self.matrix(ctx.snapshot);
        let note = if ctx.busy { "updating..." } else { "" };
        let inner = render_view_chrome(frame, self.title(), note, area);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(inner);

        // Users
        let mut users = Vec::new();
        let mut user_state = ListState::default();
        for (i, u) in m.users.iter().enumerate() {
            let is_sel = m.selected_id() == Some(u.id.as_str());
            if is_sel {
                user_state.select(Some(i));
            }
            let mut label = format!("{} [{}]", u.email, u.role);
            if m.show_grant_counts() {
                label.push_str(&format!(" ({})", m.grant_count(&u.id)));
            }
            users.push(ListItem::new(label));
        }
        if users.is_empty() {
            users.push(ListItem::new("(no users)"));
        }
        let user_title = if self.selection.user_query.is_empty() {
            "users (PgUp/PgDn: select)".to_string()
        } else {
            format!("users who={:?}", self.selection.user_query)
        };
        frame.render_stateful_widget(
            List::new(users)
                .block(Block::default().borders(Borders::RIGHT).title(user_title))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            cols[0],
            &mut user_state,
        );

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(cols[1]);

        let Some(selected) = m.selected else {
            frame.render_widget(Paragraph::new("Select a user to manage access."), cols[1]);
            return;
        };
        if m.workflow_panel_hidden() {
            frame.render_widget(
                Paragraph::new(format!(
                    "{} is a superadmin and can access every workflow.",
                    selected.email
                ))
                .wrap(Wrap { trim: true }),
                cols[1],
            );
            return;
        }

        let f = &self.selection.filter;
        let controls = vec![
            Line::from(vec![
                Span::styled("user: ", header_style()),
                Span::raw(selected.email.clone()),
            ]),
            Line::from(vec![
                Span::styled("search: ", header_style()),
                Span::raw(format!("{:?}", f.text)),
                Span::styled("  category: ", header_style()),
                Span::raw(f.category.label().to_string()),
                Span::styled("  show: ", header_style()),
                Span::raw(f.access.to_string()),
            ]),
            Line::from(Span::styled(
                format!(
                    "[{}] select all {} filtered   categories: {}",
                    if m.all_filtered_granted() { "x" } else { " " },
                    m.workflows.len(),
                    m.categories.join(", ")
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(controls), right[0]);

        let mut rows = Vec::new();
        let mut state = ListState::default();
        let cursor = self.cursor.min(m.workflows.len().saturating_sub(1));
        let mut n = 0usize;
        for (category, wfs) in m.groups() {
            rows.push(ListItem::new(Line::from(Span::styled(
                format!("{} ({})", category, wfs.len()),
                header_style(),
            ))));
            for wf in wfs {
                if n == cursor {
                    state.select(Some(rows.len()));
                }
                let has = m.has_access(&wf.id);
                let style = if ctx.busy {
                    Style::default().fg(Color::DarkGray)
                } else if has {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                rows.push(
                    ListItem::new(format!(
                        "  [{}] {} ({}) {}",
                        if has { "x" } else { " " },
                        wf.name(),
                        wf.id,
                        if has { "Has access" } else { "No access" }
                    ))
                    .style(style),
                );
                n += 1;
            }
        }
        if rows.is_empty() {
            rows.push(ListItem::new("(no workflows match)"));
        }
        frame.render_stateful_widget(
            List::new(rows)
                .block(Block::default().borders(Borders::TOP).title("Space: toggle  all: toggle filtered"))
                .highlight_style(selected_style()),
            right[1],
            &mut state,
        );
    }
}
