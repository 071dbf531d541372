//! Chat logs screen: past threads on the left, the selected transcript on
//! the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;
use crate::ui::helpers::{format_timestamp, message_lines, truncate_to_width};
use crate::ui::layout::LayoutContext;
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_HEADER, COLOR_SELECTED_BG,
};

pub fn render_logs<H: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    app: &App<H>,
    ctx: &LayoutContext,
) {
    let [list_area, transcript_area] = Layout::horizontal([
        Constraint::Length(ctx.logs_sidebar_width()),
        Constraint::Min(10),
    ])
    .areas(area);

    let list_block = Block::default()
        .title(Span::styled(
            format!(" Threads ({}) ", app.logs.threads().len()),
            Style::default().fg(COLOR_HEADER),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER_FOCUSED));
    let list_inner = list_block.inner(list_area);
    frame.render_widget(list_block, list_area);
    frame.render_widget(
        Paragraph::new(thread_rows(app, list_inner.width as usize, list_inner.height as usize)),
        list_inner,
    );

    let transcript_block = Block::default()
        .title(Span::styled(" Transcript ", Style::default().fg(COLOR_HEADER)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let lines: Vec<Line<'static>> = match app.logs.selected() {
        Some(thread) if !thread.messages.is_empty() => {
            thread.messages.iter().flat_map(message_lines).collect()
        }
        Some(_) => vec![dim_line("This thread has no messages.")],
        None => vec![],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(transcript_block)
            .wrap(Wrap { trim: false })
            .scroll((app.logs.scroll(), 0)),
        transcript_area,
    );
}

fn dim_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))
}

fn thread_rows<H: HttpClient + 'static>(
    app: &App<H>,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let threads = app.logs.threads();
    if threads.is_empty() {
        return vec![if app.logs.is_loading() {
            dim_line("Loading…")
        } else {
            dim_line("No conversations yet.")
        }];
    }

    // Two rows per thread
    let visible = (height / 2).max(1);
    let selected = app.logs.selected_index();
    let first = selected.saturating_sub(visible - 1);
    let mut lines = Vec::new();
    for (i, thread) in threads.iter().enumerate().skip(first).take(visible) {
        let is_selected = i == selected;
        let style = if is_selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
                .bg(COLOR_SELECTED_BG)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        let preview = thread
            .messages
            .iter()
            .find(|m| m.is_user())
            .map(|m| m.content.as_str())
            .unwrap_or("(empty)");
        lines.push(Line::from(Span::styled(
            truncate_to_width(preview, width),
            style,
        )));
        let when = thread
            .last_activity()
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("{} · {} msgs", when, thread.messages.len()), width),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines
}
