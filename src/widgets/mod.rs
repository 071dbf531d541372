//! Custom widgets.
//!
//! - [`setting_widgets`]: per-type editors for the settings screen

pub mod setting_widgets;

pub use setting_widgets::{SettingWidget, WidgetContext, WidgetInput, WidgetTable};
