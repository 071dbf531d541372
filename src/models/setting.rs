use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Settings for one chatbot, keyed (and ordered) by setting key.
pub type SettingsMap = BTreeMap<String, Setting>;

/// A typed setting value.
///
/// Untagged so the wire form is the bare JSON scalar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Best-guess type tag for a value that arrived without one.
    pub fn inferred_type(&self) -> SettingType {
        match self {
            SettingValue::Bool(_) => SettingType::Boolean,
            SettingValue::Number(_) => SettingType::Number,
            SettingValue::Text(_) => SettingType::String,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Type tag deciding how a setting is edited.
///
/// Tags the dashboard does not know are preserved in `Other` and edited as
/// free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SettingType {
    String,
    Number,
    Boolean,
    Select,
    Other(String),
}

impl SettingType {
    pub fn as_str(&self) -> &str {
        match self {
            SettingType::String => "string",
            SettingType::Number => "number",
            SettingType::Boolean => "boolean",
            SettingType::Select => "select",
            SettingType::Other(tag) => tag,
        }
    }
}

impl From<String> for SettingType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "string" | "text" => SettingType::String,
            "number" | "float" | "integer" => SettingType::Number,
            "boolean" | "bool" => SettingType::Boolean,
            "select" | "enum" => SettingType::Select,
            _ => SettingType::Other(tag),
        }
    }
}

impl From<SettingType> for String {
    fn from(kind: SettingType) -> Self {
        kind.as_str().to_string()
    }
}

/// Lower bound used for number settings without explicit bounds.
pub const DEFAULT_NUMBER_MIN: f64 = 0.0;
/// Upper bound used for number settings without explicit bounds.
pub const DEFAULT_NUMBER_MAX: f64 = 1.0;

/// A named, typed, per-chatbot configuration value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Setting {
    /// Map key; filled in from the surrounding mapping on load
    #[serde(default, skip_serializing)]
    pub key: String,
    pub value: SettingValue,
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Allowed choices for `select` settings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: SettingValue, setting_type: SettingType) -> Self {
        Self {
            key: key.into(),
            value,
            setting_type,
            display_name: None,
            description: None,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Label shown in the editor: display name if present, otherwise the key.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }

    /// Slider bounds for number settings, always with `min <= max`.
    ///
    /// The 0..1 defaults apply only when neither bound is given. A single
    /// bound collapses the default range onto it if they would cross, and an
    /// inverted pair is swapped.
    pub fn bounds(&self) -> (f64, f64) {
        match (self.min, self.max) {
            (None, None) => (DEFAULT_NUMBER_MIN, DEFAULT_NUMBER_MAX),
            (Some(min), None) => (min, min.max(DEFAULT_NUMBER_MAX)),
            (None, Some(max)) => (max.min(DEFAULT_NUMBER_MIN), max),
            (Some(a), Some(b)) => (a.min(b), a.max(b)),
        }
    }

    /// Parse the `GET /chatbot/{id}/settings/` payload.
    ///
    /// Entries are normally `{value, type, ...}` objects. Bare scalars (as
    /// stored by older backends) get an inferred type. Anything else, such
    /// as the document list some chatbot types keep in their settings, is
    /// not editable here and is skipped.
    pub fn map_from_wire(payload: serde_json::Value) -> Result<SettingsMap, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireSetting {
            Described(Setting),
            Bare(SettingValue),
            Unsupported(serde_json::Value),
        }

        let entries: BTreeMap<String, WireSetting> = serde_json::from_value(payload)?;
        let mut settings = SettingsMap::new();
        for (key, entry) in entries {
            let setting = match entry {
                WireSetting::Described(mut setting) => {
                    setting.key = key.clone();
                    setting
                }
                WireSetting::Bare(value) => {
                    let kind = value.inferred_type();
                    Setting::new(key.clone(), value, kind)
                }
                WireSetting::Unsupported(_) => {
                    tracing::debug!("Skipping non-scalar setting '{}'", key);
                    continue;
                }
            };
            settings.insert(key, setting);
        }
        Ok(settings)
    }
}
