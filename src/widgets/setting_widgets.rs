//! Editors for individual settings, looked up by type tag.
//!
//! [`WidgetTable`] maps a setting's type tag to a [`SettingWidget`]: a set of
//! pure functions that render the value, validate typed input and apply a
//! key press. New types are added with [`WidgetTable::register`]; tags with
//! no entry fall back to the free-text editor.

use std::collections::HashMap;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::DEFAULT_NUMBER_STEP;
use crate::models::{Setting, SettingType, SettingValue};
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_DIM, COLOR_SLIDER_FILL, COLOR_SLIDER_TRACK,
};

/// Width of the slider bar in cells.
const SLIDER_WIDTH: usize = 20;

/// Values shared by every widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetContext {
    /// Slider step for number settings that don't carry their own
    pub number_step: f64,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self {
            number_step: DEFAULT_NUMBER_STEP,
        }
    }
}

/// A key press routed to the focused setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetInput {
    Decrease,
    Increase,
    Toggle,
    Char(char),
    Backspace,
}

pub type RenderFn = fn(&Setting, &WidgetContext, bool) -> Line<'static>;
pub type ValidateFn = fn(&Setting, &str) -> Result<SettingValue, String>;
pub type AdjustFn = fn(&Setting, &WidgetContext, WidgetInput) -> Option<SettingValue>;

/// Behaviour of one setting type.
#[derive(Clone, Copy)]
pub struct SettingWidget {
    pub name: &'static str,
    /// Draw the value; the flag is whether the row is focused.
    pub render: RenderFn,
    /// Turn typed text into a value of this type.
    pub validate: ValidateFn,
    /// The value after a key press, or None if the key does nothing.
    pub adjust: AdjustFn,
}

impl std::fmt::Debug for SettingWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingWidget")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Type tag → widget.
#[derive(Debug, Clone)]
pub struct WidgetTable {
    widgets: HashMap<String, SettingWidget>,
    fallback: SettingWidget,
}

impl Default for WidgetTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WidgetTable {
    /// Slider for `number`, toggle for `boolean`, choice for `select`, text
    /// for `string` and anything unknown.
    pub fn standard() -> Self {
        let mut table = Self {
            widgets: HashMap::new(),
            fallback: TEXT,
        };
        table.register(SettingType::Number.as_str(), SLIDER);
        table.register(SettingType::Boolean.as_str(), TOGGLE);
        table.register(SettingType::Select.as_str(), CHOICE);
        table.register(SettingType::String.as_str(), TEXT);
        table
    }

    /// Add or replace the widget for a type tag.
    pub fn register(&mut self, tag: impl Into<String>, widget: SettingWidget) {
        self.widgets.insert(tag.into(), widget);
    }

    pub fn widget_for(&self, setting_type: &SettingType) -> &SettingWidget {
        self.widgets
            .get(setting_type.as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn render(&self, setting: &Setting, ctx: &WidgetContext, focused: bool) -> Line<'static> {
        (self.widget_for(&setting.setting_type).render)(setting, ctx, focused)
    }

    pub fn validate(&self, setting: &Setting, raw: &str) -> Result<SettingValue, String> {
        (self.widget_for(&setting.setting_type).validate)(setting, raw)
    }

    pub fn adjust(
        &self,
        setting: &Setting,
        ctx: &WidgetContext,
        input: WidgetInput,
    ) -> Option<SettingValue> {
        (self.widget_for(&setting.setting_type).adjust)(setting, ctx, input)
    }
}

// ============================================================================
// Number slider
// ============================================================================

pub const SLIDER: SettingWidget = SettingWidget {
    name: "slider",
    render: render_slider,
    validate: validate_number,
    adjust: adjust_slider,
};

fn number_of(setting: &Setting) -> f64 {
    let (min, _) = setting.bounds();
    match &setting.value {
        SettingValue::Number(n) => *n,
        SettingValue::Text(s) => s.trim().parse().unwrap_or(min),
        SettingValue::Bool(_) => min,
    }
}

fn step_of(setting: &Setting, ctx: &WidgetContext) -> f64 {
    setting
        .step
        .filter(|s| *s > 0.0)
        .unwrap_or(ctx.number_step)
}

/// Snap to the step grid anchored at `min` and clamp into bounds.
fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let steps = ((value - min) / step).round();
    let snapped = min + steps * step;
    // Trim float noise such as 0.30000000000000004
    let rounded = (snapped * 1e9).round() / 1e9;
    rounded.clamp(min, max)
}

fn render_slider(setting: &Setting, _ctx: &WidgetContext, focused: bool) -> Line<'static> {
    let (min, max) = setting.bounds();
    let value = number_of(setting);
    let ratio = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * SLIDER_WIDTH as f64).round() as usize;

    let mut spans = vec![
        Span::styled("[", Style::default().fg(COLOR_DIM)),
        Span::styled("━".repeat(filled), Style::default().fg(COLOR_SLIDER_FILL)),
        Span::styled(
            "─".repeat(SLIDER_WIDTH - filled),
            Style::default().fg(COLOR_SLIDER_TRACK),
        ),
        Span::styled("] ", Style::default().fg(COLOR_DIM)),
        Span::styled(format!("{:.2}", value), value_style(focused)),
    ];
    if focused {
        spans.push(Span::styled("  ←/→", Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

fn validate_number(setting: &Setting, raw: &str) -> Result<SettingValue, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw.trim()))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a number", raw.trim()));
    }
    let (min, max) = setting.bounds();
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}", setting.label(), min, max));
    }
    Ok(SettingValue::Number(value))
}

fn adjust_slider(setting: &Setting, ctx: &WidgetContext, input: WidgetInput) -> Option<SettingValue> {
    let (min, max) = setting.bounds();
    let step = step_of(setting, ctx);
    let current = number_of(setting);
    let next = match input {
        WidgetInput::Decrease => current - step,
        WidgetInput::Increase => current + step,
        _ => return None,
    };
    Some(SettingValue::Number(snap(next, min, max, step)))
}

// ============================================================================
// Boolean toggle
// ============================================================================

pub const TOGGLE: SettingWidget = SettingWidget {
    name: "toggle",
    render: render_toggle,
    validate: validate_bool,
    adjust: adjust_toggle,
};

fn bool_of(setting: &Setting) -> bool {
    match &setting.value {
        SettingValue::Bool(b) => *b,
        SettingValue::Number(n) => *n != 0.0,
        SettingValue::Text(s) => parse_bool(s).unwrap_or(false),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn render_toggle(setting: &Setting, _ctx: &WidgetContext, focused: bool) -> Line<'static> {
    let on = bool_of(setting);
    let (mark, label) = if on { ("[●]", "on") } else { ("[ ]", "off") };
    let mark_style = if on {
        Style::default().fg(COLOR_ACTIVE)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let mut spans = vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(label, value_style(focused)),
    ];
    if focused {
        spans.push(Span::styled("  space", Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

fn validate_bool(_setting: &Setting, raw: &str) -> Result<SettingValue, String> {
    parse_bool(raw)
        .map(SettingValue::Bool)
        .ok_or_else(|| format!("'{}' is not true or false", raw.trim()))
}

fn adjust_toggle(setting: &Setting, _ctx: &WidgetContext, input: WidgetInput) -> Option<SettingValue> {
    match input {
        WidgetInput::Toggle | WidgetInput::Decrease | WidgetInput::Increase => {
            Some(SettingValue::Bool(!bool_of(setting)))
        }
        _ => None,
    }
}

// ============================================================================
// Select
// ============================================================================

pub const CHOICE: SettingWidget = SettingWidget {
    name: "choice",
    render: render_choice,
    validate: validate_choice,
    adjust: adjust_choice,
};

fn render_choice(setting: &Setting, _ctx: &WidgetContext, focused: bool) -> Line<'static> {
    let current = setting.value.to_string();
    let mut spans = Vec::new();
    if focused {
        spans.push(Span::styled("‹ ", Style::default().fg(COLOR_DIM)));
    }
    spans.push(Span::styled(current, value_style(focused)));
    if focused {
        spans.push(Span::styled(" ›", Style::default().fg(COLOR_DIM)));
        let position = setting
            .options
            .iter()
            .position(|o| *o == setting.value.to_string())
            .map(|i| i + 1)
            .unwrap_or(0);
        spans.push(Span::styled(
            format!("  {}/{}", position, setting.options.len()),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

fn validate_choice(setting: &Setting, raw: &str) -> Result<SettingValue, String> {
    let raw = raw.trim();
    if setting.options.is_empty() || setting.options.iter().any(|o| o == raw) {
        Ok(SettingValue::Text(raw.to_string()))
    } else {
        Err(format!(
            "{} must be one of: {}",
            setting.label(),
            setting.options.join(", ")
        ))
    }
}

fn adjust_choice(setting: &Setting, _ctx: &WidgetContext, input: WidgetInput) -> Option<SettingValue> {
    let count = setting.options.len();
    if count == 0 {
        return None;
    }
    let current = setting.value.to_string();
    let index = setting.options.iter().position(|o| *o == current);
    let next = match (input, index) {
        (WidgetInput::Increase | WidgetInput::Toggle, Some(i)) => (i + 1) % count,
        (WidgetInput::Decrease, Some(i)) => (i + count - 1) % count,
        (WidgetInput::Increase | WidgetInput::Toggle | WidgetInput::Decrease, None) => 0,
        _ => return None,
    };
    Some(SettingValue::Text(setting.options[next].clone()))
}

// ============================================================================
// Free text
// ============================================================================

pub const TEXT: SettingWidget = SettingWidget {
    name: "text",
    render: render_text,
    validate: validate_text,
    adjust: adjust_text,
};

fn render_text(setting: &Setting, _ctx: &WidgetContext, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(setting.value.to_string(), value_style(focused))];
    if focused {
        spans.push(Span::styled(
            "▏",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

fn validate_text(_setting: &Setting, raw: &str) -> Result<SettingValue, String> {
    Ok(SettingValue::Text(raw.to_string()))
}

fn adjust_text(setting: &Setting, _ctx: &WidgetContext, input: WidgetInput) -> Option<SettingValue> {
    let mut text = setting.value.to_string();
    match input {
        WidgetInput::Char(c) => text.push(c),
        WidgetInput::Backspace => {
            text.pop()?;
        }
        _ => return None,
    }
    Some(SettingValue::Text(text))
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_ACCENT)
    }
}
