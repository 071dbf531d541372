//! Helper functions for UI rendering
//!
//! Truncation, wrapped-height estimates and message formatting shared by the
//! chat and logs screens.

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::{Message, MessageRole};
use crate::ui::theme::{COLOR_ACCENT, COLOR_ASSISTANT, COLOR_DIM, COLOR_PENDING, COLOR_USER};

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// Truncate to at most `max_width` display columns, ending in "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pad with spaces to exactly `width` columns (truncating if longer).
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = out.width();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Rows `lines` take once wrapped to `viewport_width` columns.
pub fn estimate_wrapped_line_count(lines: &[Line], viewport_width: usize) -> usize {
    if viewport_width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
            width.div_ceil(viewport_width).max(1)
        })
        .sum()
}

/// Scroll offset that keeps the last rows of the content in view.
pub fn bottom_scroll(content_rows: usize, viewport_rows: u16) -> u16 {
    content_rows
        .saturating_sub(viewport_rows as usize)
        .min(u16::MAX as usize) as u16
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Lines for one chat message: a role label, the content, then a blank line.
///
/// Temporary messages are dimmed and marked as sending.
pub fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let (label, color) = match message.role {
        MessageRole::User => ("You", COLOR_USER),
        MessageRole::Assistant => ("Bot", COLOR_ASSISTANT),
    };
    let mut header = vec![Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if message.temporary {
        header.push(Span::styled(" sending…", Style::default().fg(COLOR_DIM)));
    } else {
        header.push(Span::styled(
            format!("  {}", message.timestamp.with_timezone(&Local).format("%H:%M")),
            Style::default().fg(COLOR_DIM),
        ));
    }

    let body_style = if message.temporary {
        Style::default()
            .fg(COLOR_PENDING)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };

    let mut lines = vec![Line::from(header)];
    lines.extend(
        message
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body_style))),
    );
    lines.push(Line::default());
    lines
}
