//! Chat screen: the active thread's messages above an input box.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;
use crate::ui::components::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
use crate::ui::helpers::{bottom_scroll, estimate_wrapped_line_count, message_lines};
use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

pub fn render_chat<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let [messages_area, input_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(INPUT_FIELD_HEIGHT),
    ])
    .areas(area);

    render_messages(frame, messages_area, app);

    let placeholder = input_placeholder(app);
    let config = InputFieldConfig::new("Message", app.chat.input())
        .focused(app.chat.can_send() || app.chat.thread().is_some())
        .placeholder(placeholder);
    render_input_field(frame, input_area, &config);
}

fn title<H: HttpClient + 'static>(app: &App<H>) -> String {
    match (app.chat.chatbot(), app.chat.thread()) {
        (Some(bot), Some(thread)) => format!(" {} · thread {} ", bot.name, thread.id),
        (Some(bot), None) => format!(" {} ", bot.name),
        (None, _) => " Chat ".to_string(),
    }
}

fn input_placeholder<H: HttpClient + 'static>(app: &App<H>) -> &'static str {
    if app.chat.chatbot().is_none() {
        "Pick a chatbot from the list"
    } else if app.chat.is_creating_thread() {
        "Starting a new thread…"
    } else if app.chat.thread().is_none() {
        "No thread. Ctrl+N to try again"
    } else if app.chat.is_sending() {
        "Waiting for reply…"
    } else {
        "Type a message, Enter to send"
    }
}

fn render_messages<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let block = Block::default()
        .title(Span::styled(title(app), Style::default().fg(COLOR_HEADER)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let messages = app.chat.session().messages();
    let lines: Vec<Line<'static>> = if messages.is_empty() {
        let hint = if app.chat.thread().is_some() {
            "Say hello."
        } else {
            ""
        };
        vec![Line::from(Span::styled(hint, Style::default().fg(COLOR_DIM)))]
    } else {
        messages.iter().flat_map(message_lines).collect()
    };

    // Stick to the newest message
    let rows = estimate_wrapped_line_count(&lines, inner.width as usize);
    let scroll = bottom_scroll(rows, inner.height);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}
