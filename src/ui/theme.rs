//! Color theme constants for the Mochi UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused panel
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::Rgb(255, 183, 197); // mochi pink

/// Active/running elements - bright green
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Selected row background
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 40, 60);

// ============================================================================
// Chat Colors
// ============================================================================

/// User message label
pub const COLOR_USER: Color = Color::Cyan;

/// Assistant message label
pub const COLOR_ASSISTANT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Unconfirmed (in flight) message text
pub const COLOR_PENDING: Color = Color::Gray;

// ============================================================================
// Status Colors
// ============================================================================

pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

/// Edited but unsaved settings
pub const COLOR_DIRTY: Color = Color::Yellow;

// ============================================================================
// Setting Widget Colors
// ============================================================================

/// Slider fill
pub const COLOR_SLIDER_FILL: Color = Color::White;

/// Slider track
pub const COLOR_SLIDER_TRACK: Color = Color::DarkGray;

/// Background for dialog boxes (create chatbot, confirm delete)
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
