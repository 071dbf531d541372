//! Responsive layout helpers.
//!
//! `LayoutContext` wraps the terminal size and answers the sizing questions
//! the screens ask: how wide a dialog should be, whether the chatbot list
//! has room for descriptions, how wide the logs sidebar is.

use ratatui::layout::Rect;

/// Terminal size breakpoints
pub mod breakpoints {
    /// Extra small terminal (< 60 columns)
    pub const XS_WIDTH: u16 = 60;
    /// Small terminal (< 80 columns)
    pub const SM_WIDTH: u16 = 80;

    /// Extra small terminal height (< 16 rows)
    pub const XS_HEIGHT: u16 = 16;
    /// Small terminal height (< 24 rows)
    pub const SM_HEIGHT: u16 = 24;
}

/// Terminal dimensions for sizing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    /// Width as a percentage of the terminal, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage as u32) / 100).max(1) as u16
    }

    /// Proportional width clamped to `[min, max]`.
    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_width(percentage).clamp(min, max)
    }

    /// Less than 80 columns.
    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::SM_WIDTH
    }

    /// Less than 24 rows.
    pub fn is_short(&self) -> bool {
        self.height < breakpoints::SM_HEIGHT
    }

    pub fn is_extra_small(&self) -> bool {
        self.width < breakpoints::XS_WIDTH || self.height < breakpoints::XS_HEIGHT
    }

    /// Whether the chatbot list shows the description column.
    pub fn show_descriptions(&self) -> bool {
        !self.is_narrow()
    }

    /// Width of the thread list on the logs screen.
    pub fn logs_sidebar_width(&self) -> u16 {
        if self.is_extra_small() {
            self.bounded_width(40, 16, 24)
        } else {
            self.bounded_width(30, 24, 40)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let ctx = LayoutContext::default();
        assert_eq!(ctx.width, 80);
        assert_eq!(ctx.height, 24);
        assert!(!ctx.is_narrow());
        assert!(!ctx.is_short());
    }

    #[test]
    fn test_percent_width() {
        let ctx = LayoutContext::new(100, 40);
        assert_eq!(ctx.percent_width(50), 50);
        assert_eq!(ctx.percent_width(0), 1); // Minimum of 1
    }

    #[test]
    fn test_bounded_width() {
        let ctx = LayoutContext::new(200, 40);
        assert_eq!(ctx.bounded_width(30, 20, 50), 50);
        assert_eq!(ctx.bounded_width(10, 25, 50), 25);
        assert_eq!(ctx.bounded_width(20, 20, 50), 40);
    }

    #[test]
    fn test_descriptions_hidden_when_narrow() {
        assert!(LayoutContext::new(120, 40).show_descriptions());
        assert!(!LayoutContext::new(70, 40).show_descriptions());
    }

    #[test]
    fn test_logs_sidebar_width() {
        assert_eq!(LayoutContext::new(200, 50).logs_sidebar_width(), 40);
        assert_eq!(LayoutContext::new(100, 30).logs_sidebar_width(), 30);
        assert_eq!(LayoutContext::new(50, 30).logs_sidebar_width(), 20);
    }

    #[test]
    fn test_extra_small() {
        assert!(LayoutContext::new(50, 30).is_extra_small());
        assert!(LayoutContext::new(100, 10).is_extra_small());
        assert!(!LayoutContext::new(100, 30).is_extra_small());
    }
}
