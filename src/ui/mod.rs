//! Immediate-mode UI for the mockup panel
//!
//! Design principles:
//! - Immediate mode (no retained widget state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering
//!
//! Form fields are controlled: the caller owns a `FormInput` and the widget
//! only reports edits through it.

mod rect;
mod widgets;
mod input;
mod form_input;
pub mod theme;

pub use rect::*;
pub use widgets::*;
pub use input::*;
pub use form_input::{draw_form_input, ChangeEvent, EditKey, FormInput};
