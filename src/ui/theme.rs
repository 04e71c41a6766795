//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Sidebar background
pub const SIDEBAR_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.5, 0.5, 0.55, 1.0);

/// Accent color (active preset, focused input, primary button)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Status line text for failures
pub const ERROR_COLOR: Color = Color::new(0.95, 0.45, 0.4, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Section label text size
pub const FONT_SIZE_HEADER: f32 = 14.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 12.0;

// =============================================================================
// Buttons
// =============================================================================

pub const BUTTON_BG: Color = Color::new(0.196, 0.196, 0.216, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.235, 0.235, 0.275, 1.0);
pub const BUTTON_PRESSED: Color = Color::new(0.16, 0.16, 0.18, 1.0);

// =============================================================================
// Dropdown/Menu Colors
// =============================================================================

/// Dropdown menu background
pub const DROPDOWN_BG: Color = Color::new(0.176, 0.176, 0.196, 1.0); // ~45, 45, 50

/// Dropdown menu border
pub const DROPDOWN_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0); // ~80, 80, 80

/// Dropdown item hover background
pub const DROPDOWN_HOVER: Color = Color::new(0.235, 0.314, 0.392, 1.0); // ~60, 80, 100

// =============================================================================
// Tooltip
// =============================================================================

pub const TOOLTIP_BG: Color = Color::new(0.05, 0.05, 0.06, 0.95);
