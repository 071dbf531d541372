//! Chatbot list screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;
use crate::ui::helpers::{pad_to_width, truncate_to_width};
use crate::ui::layout::LayoutContext;
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_SELECTED_BG,
};

const NAME_WIDTH: usize = 24;
const TYPE_WIDTH: usize = 16;

pub fn render_chatbot_list<H: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    app: &App<H>,
    ctx: &LayoutContext,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Chatbots ({}) ", app.directory.chatbots().len()),
            Style::default().fg(COLOR_HEADER),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = build_rows(app, ctx, inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn build_rows<H: HttpClient + 'static>(
    app: &App<H>,
    ctx: &LayoutContext,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let chatbots = app.directory.chatbots();
    if chatbots.is_empty() {
        let text = if app.directory.is_loading() {
            "Loading chatbots…"
        } else {
            "No chatbots yet. Press n to create one."
        };
        return vec![Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))];
    }

    let header_style = Style::default()
        .fg(COLOR_DIM)
        .add_modifier(Modifier::BOLD);
    let mut header = vec![
        Span::styled(format!("  {}", pad_to_width("NAME", NAME_WIDTH)), header_style),
        Span::styled(pad_to_width("TYPE", TYPE_WIDTH), header_style),
    ];
    if ctx.show_descriptions() {
        header.push(Span::styled("DESCRIPTION", header_style));
    }
    let mut lines = vec![Line::from(header)];

    // Keep the selected row on screen
    let visible = height.saturating_sub(1).max(1);
    let selected = app.directory.selected_index();
    let first = selected.saturating_sub(visible - 1);
    let active_id = app.chat.chatbot().map(|c| c.id.as_str());
    let desc_width = width.saturating_sub(2 + NAME_WIDTH + TYPE_WIDTH);

    for (i, chatbot) in chatbots.iter().enumerate().skip(first).take(visible) {
        let is_selected = i == selected;
        let marker = if Some(chatbot.id.as_str()) == active_id {
            Span::styled("● ", Style::default().fg(COLOR_ACTIVE))
        } else if is_selected {
            Span::styled("› ", Style::default().fg(COLOR_ACCENT))
        } else {
            Span::raw("  ")
        };
        let name_style = if is_selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        let mut spans = vec![
            marker,
            Span::styled(pad_to_width(&chatbot.name, NAME_WIDTH), name_style),
            Span::styled(
                pad_to_width(app.directory.type_name(&chatbot.chatbot_type), TYPE_WIDTH),
                Style::default().fg(COLOR_DIM),
            ),
        ];
        if ctx.show_descriptions() && desc_width > 0 {
            spans.push(Span::styled(
                truncate_to_width(&chatbot.desc, desc_width),
                Style::default().fg(COLOR_DIM),
            ));
        }
        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(COLOR_SELECTED_BG));
        }
        lines.push(line);
    }
    lines
}
