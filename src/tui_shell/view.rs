use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

use crate::snapshot::AdminSnapshot;

#[derive(Clone, Copy)]
pub(super) struct RenderCtx<'a> {
    pub(super) now: OffsetDateTime,
    pub(super) snapshot: &'a AdminSnapshot,
    /// A bulk access update is outstanding.
    pub(super) busy: bool,
}

pub(super) trait View {
    fn mode(&self) -> super::UiMode;
    fn title(&self) -> &str;

    fn move_up(&mut self) {}
    fn move_down(&mut self, _ctx: &RenderCtx<'_>) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    note: &str,
    area: Rect,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(note.to_string(), Style::default().fg(Color::Gray)),
    ]);
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

/// Index into a list of `len` rows after moving down one.
pub(super) fn step_down(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (selected + 1).min(len - 1)
}

pub(super) fn fmt_ts_ui(ts: &str) -> String {
    use time::format_description::well_known::Rfc3339;
    let Ok(dt) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    let dt = dt.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}Z",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute()
    )
}

/// "just now", "5m ago", ... falling back to the absolute form.
pub(super) fn fmt_since(ts: &str, now: OffsetDateTime) -> String {
    use time::format_description::well_known::Rfc3339;
    let Ok(dt) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    let secs = (now - dt).whole_seconds();
    if secs < 0 {
        return fmt_ts_ui(ts);
    }
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;
    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 48 {
        format!("{}h ago", hours)
    } else if days < 14 {
        format!("{}d ago", days)
    } else {
        fmt_ts_ui(ts)
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/view_tests.rs"]
mod tests;
