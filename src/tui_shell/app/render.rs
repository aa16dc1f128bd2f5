use super::*;

use super::super::modal::draw_modal;
use super::super::view::fmt_ts_ui;

fn tab_bar(active: UiMode) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for m in UiMode::ALL {
        let style = if m == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", m.label()), style));
    }
    spans
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(if app.suggestions.is_empty() { 0 } else { 9 }),
            Constraint::Length(3),
        ])
        .split(area);

    // Header
    let mut spans = vec![
        Span::styled(
            "Flowgate",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw(" "),
    ];
    spans.extend(tab_bar(app.mode));
    spans.push(Span::raw("  "));
    match app.snapshot.current_user.as_ref() {
        Some(me) => spans.push(Span::styled(
            format!("{} [{}]", me.email, me.role),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(
            "(not signed in)",
            Style::default().fg(Color::Red),
        )),
    }
    if let Some(note) = app.sync_note.as_deref() {
        let color = if note == "live" { Color::Green } else { Color::Yellow };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("sync: {}", note), Style::default().fg(color)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    let ctx = app.render_ctx();
    app.view().render(frame, chunks[1], &ctx);

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(cmd) = &app.last_command {
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::raw(cmd.as_str()),
            ]));
        }
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_ts_ui(&r.ts)),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Suggestions
    if !app.suggestions.is_empty() {
        let mut s_lines = Vec::new();
        let total = app.suggestions.len();
        let sel_idx = app.suggestion_selected.min(total.saturating_sub(1));
        s_lines.push(Line::from(Span::styled(
            format!("Suggestions {}/{}", sel_idx + 1, total),
            Style::default().fg(Color::Gray),
        )));

        // Window the list so the selection stays visible.
        let inner_h = chunks[3].height.saturating_sub(2) as usize;
        let max_items = inner_h.saturating_sub(1).max(1);
        let mut start = 0usize;
        if total > max_items {
            if sel_idx >= max_items {
                start = sel_idx + 1 - max_items;
            }
            start = start.min(total.saturating_sub(max_items));
        }
        let end = (start + max_items).min(total);

        for (i, s) in app.suggestions.iter().enumerate().take(end).skip(start) {
            let style = if i == sel_idx {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            s_lines.push(Line::from(vec![
                Span::styled(format!("{: <12}", s.name), style.fg(Color::Yellow)),
                Span::styled(format!("{: <40}", s.usage), style.fg(Color::Gray)),
                Span::styled(s.help, style.fg(Color::White)),
            ]));
        }
        let sugg =
            Paragraph::new(s_lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
        frame.render_widget(sugg, chunks[3]);
    }

    // Input
    let prompt = app.prompt();
    let buf = &app.input.buf;
    let mut input_spans = vec![
        Span::styled(prompt.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(buf.as_str()),
    ];
    if buf.is_empty() {
        input_spans.push(Span::styled(
            app.input_hint(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    let input = Paragraph::new(Line::from(input_spans)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(input, chunks[4]);

    if let Some(m) = &app.modal {
        draw_modal(frame, m);
        return;
    }

    let before_cursor: String = buf.chars().take(app.input.cursor).collect();
    let x = chunks[4].x + (prompt.chars().count() + 1 + before_cursor.chars().count()) as u16;
    let y = chunks[4].y + 1;
    frame.set_cursor_position((x.min(chunks[4].right().saturating_sub(1)), y));
}
