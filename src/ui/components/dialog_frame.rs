//! Dialog Frame Component
//!
//! A centered dialog with rounded borders used by the create form, the
//! delete confirmations and the help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_BORDER_FOCUSED, COLOR_DIALOG_BG, COLOR_HEADER};

/// Configuration for rendering a dialog frame
#[derive(Debug, Clone)]
pub struct DialogFrameConfig<'a> {
    /// Title displayed in the border
    pub title: &'a str,
    /// Content height (not including borders)
    pub content_height: u16,
    pub min_width: u16,
    pub max_width: u16,
}

impl<'a> DialogFrameConfig<'a> {
    pub fn new(title: &'a str, content_height: u16) -> Self {
        Self {
            title,
            content_height,
            min_width: 30,
            max_width: 60,
        }
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }
}

fn dialog_width(ctx: &LayoutContext, config: &DialogFrameConfig, area_width: u16) -> u16 {
    let width = if ctx.is_extra_small() {
        area_width.saturating_sub(4).min(config.max_width)
    } else if ctx.is_narrow() {
        ctx.bounded_width(80, config.min_width, config.max_width)
    } else {
        ctx.bounded_width(50, config.min_width, config.max_width)
    };
    width.min(area_width)
}

/// Clear a centered box, draw its border and return the inner area.
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    config: &DialogFrameConfig,
) -> Rect {
    let width = dialog_width(ctx, config, area.width);
    let height = (config.content_height + 2).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER_FOCUSED))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DialogFrameConfig::new("New chatbot", 7)
            .min_width(40)
            .max_width(70);
        assert_eq!(config.title, "New chatbot");
        assert_eq!(config.content_height, 7);
        assert_eq!(config.min_width, 40);
        assert_eq!(config.max_width, 70);
    }

    #[test]
    fn test_width_by_terminal_size() {
        let config = DialogFrameConfig::new("x", 3);
        // Wide: 50% within [30, 60]
        assert_eq!(dialog_width(&LayoutContext::new(100, 40), &config, 100), 50);
        // Narrow: 80% within [30, 60]
        assert_eq!(dialog_width(&LayoutContext::new(70, 40), &config, 70), 56);
        // Extra small: leave a 2-column margin on each side
        assert_eq!(dialog_width(&LayoutContext::new(40, 12), &config, 40), 36);
    }
}
