use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent};

/// Action deferred until the operator confirms it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PendingAction {
    DeleteInstance { id: String, name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum ModalKind {
    Viewer,
    Confirm(PendingAction),
}

#[derive(Clone, Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) scroll: usize,
    pub(super) kind: ModalKind,
}

impl Modal {
    pub(super) fn viewer(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
            scroll: 0,
            kind: ModalKind::Viewer,
        }
    }

    pub(super) fn confirm(action: PendingAction) -> Self {
        let lines = match &action {
            PendingAction::DeleteInstance { id, name } => vec![
                format!("Delete instance {} ({})?", name, id),
                String::new(),
                "y: delete   n/Esc: cancel".to_string(),
            ],
        };
        Self {
            title: "Are you sure you want to delete this instance?".to_string(),
            lines,
            scroll: 0,
            kind: ModalKind::Confirm(action),
        }
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);
    let h = area.height.saturating_sub(6).clamp(8, 22);
    let box_area = ratatui::layout::Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    };
    frame.render_widget(Clear, box_area);

    let border = match modal.kind {
        ModalKind::Viewer => Color::White,
        ModalKind::Confirm(_) => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(modal.title.as_str());
    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        box_area,
    );
}

/// What the app should do after a key press inside a modal.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ModalOutcome {
    Stay,
    Close,
    Confirmed(PendingAction),
}

pub(super) fn handle_modal_key(modal: &mut Modal, key: KeyEvent) -> ModalOutcome {
    let last = modal.lines.len().saturating_sub(1);
    match (&modal.kind, key.code) {
        (ModalKind::Confirm(action), KeyCode::Char('y' | 'Y')) => {
            ModalOutcome::Confirmed(action.clone())
        }
        (ModalKind::Confirm(_), KeyCode::Char('n' | 'N') | KeyCode::Esc) => ModalOutcome::Close,
        (ModalKind::Viewer, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) => {
            ModalOutcome::Close
        }
        (ModalKind::Viewer, KeyCode::Up) => {
            modal.scroll = modal.scroll.saturating_sub(1);
            ModalOutcome::Stay
        }
        (ModalKind::Viewer, KeyCode::Down) => {
            modal.scroll = (modal.scroll + 1).min(last);
            ModalOutcome::Stay
        }
        (ModalKind::Viewer, KeyCode::PageUp) => {
            modal.scroll = modal.scroll.saturating_sub(10);
            ModalOutcome::Stay
        }
        (ModalKind::Viewer, KeyCode::PageDown) => {
            modal.scroll = (modal.scroll + 10).min(last);
            ModalOutcome::Stay
        }
        _ => ModalOutcome::Stay,
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/modal_tests.rs"]
mod tests;
