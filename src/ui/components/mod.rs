//! Reusable UI Components
//!
//! - `DialogFrame` - Centered dialog overlay with rounded borders
//! - `InputField` - Labelled text input with focus styling
//! - `StatusIndicator` - Spinner, success and error lines

mod dialog_frame;
mod input_field;
mod status_indicator;

pub use dialog_frame::{render_dialog_frame, DialogFrameConfig};
pub use input_field::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
pub use status_indicator::StatusIndicator;
