//! Status Indicator Component
//!
//! One-line spinner, success and error indicators for the status bar.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::{COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS};

/// Spinner animation frames
const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Ticks per spinner frame (the loop ticks every 16ms)
const TICKS_PER_FRAME: u64 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusIndicator {
    Spinner { message: String, tick: u64 },
    Success(String),
    Error(String),
}

impl StatusIndicator {
    pub fn spinner(message: impl Into<String>, tick: u64) -> Self {
        Self::Spinner {
            message: message.into(),
            tick,
        }
    }

    pub fn to_line(&self) -> Line<'static> {
        match self {
            StatusIndicator::Spinner { message, tick } => {
                let frame = SPINNER_FRAMES[((tick / TICKS_PER_FRAME) % 4) as usize];
                Line::from(vec![
                    Span::styled(format!("{} ", frame), Style::default().fg(COLOR_DIM)),
                    Span::styled(message.clone(), Style::default().fg(COLOR_DIM)),
                ])
            }
            StatusIndicator::Success(message) => Line::from(vec![
                Span::styled("✓ ", Style::default().fg(COLOR_SUCCESS)),
                Span::styled(message.clone(), Style::default().fg(COLOR_SUCCESS)),
            ]),
            StatusIndicator::Error(message) => Line::from(vec![
                Span::styled(
                    "✗ ",
                    Style::default()
                        .fg(COLOR_ERROR)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(message.clone(), Style::default().fg(COLOR_ERROR)),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_spinner_cycles_frames() {
        assert_eq!(text(&StatusIndicator::spinner("Loading", 0).to_line()), "◐ Loading");
        assert_eq!(text(&StatusIndicator::spinner("Loading", 6).to_line()), "◓ Loading");
        assert_eq!(text(&StatusIndicator::spinner("Loading", 24).to_line()), "◐ Loading");
    }

    #[test]
    fn test_error_and_success() {
        assert_eq!(
            text(&StatusIndicator::Error("Not found".into()).to_line()),
            "✗ Not found"
        );
        assert_eq!(text(&StatusIndicator::Success("Saved".into()).to_line()), "✓ Saved");
    }
}
