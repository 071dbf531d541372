//! Input Field Component
//!
//! A labelled single-line input with focus styling.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM};

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    /// Shown in the top border
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    /// Shown dimmed while the value is empty
    pub placeholder: Option<&'a str>,
}

impl<'a> InputFieldConfig<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            placeholder: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Rows an input field occupies (border + content + border).
pub const INPUT_FIELD_HEIGHT: u16 = 3;

pub(crate) fn input_line(config: &InputFieldConfig) -> Line<'static> {
    let mut spans = Vec::new();
    if config.value.is_empty() {
        if let Some(placeholder) = config.placeholder {
            spans.push(Span::styled(
                placeholder.to_string(),
                Style::default().fg(COLOR_DIM),
            ));
        }
    } else {
        spans.push(Span::styled(
            config.value.to_string(),
            Style::default().fg(COLOR_ACCENT),
        ));
    }
    if config.focused {
        spans.push(Span::styled(
            "▏",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) {
    let (border, label) = if config.focused {
        (COLOR_BORDER_FOCUSED, Style::default().fg(COLOR_ACCENT))
    } else {
        (COLOR_BORDER, Style::default().fg(COLOR_DIM))
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", config.label), label))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(input_line(config)).block(block), area);
}
