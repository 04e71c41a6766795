//! Input state for UI interaction

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
}

impl MouseState {
    /// Snapshot macroquad's mouse for this frame
    pub fn poll() -> Self {
        use macroquad::prelude::*;
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is holding the button inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Tooltip requested by a hovered widget, drawn after everything else
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Open dropdown, if any
    pub open_dropdown: Option<u64>,
    pub tooltip: Option<Tooltip>,
    /// Set when a popup consumed this frame's click
    pub click_consumed: bool,
    /// Counter for generating unique IDs
    id_counter: u64,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            hot: None,
            open_dropdown: None,
            tooltip: None,
            click_consumed: false,
            id_counter: 0,
        }
    }

    /// Generate a unique ID for a widget
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.hot = None;
        self.tooltip = None;
        self.click_consumed = false;
        self.id_counter = 0;
    }

    pub fn set_hot(&mut self, id: u64) {
        self.hot = Some(id);
    }

    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some(Tooltip { text: text.to_string(), x, y });
    }

    /// True if the left button was pressed inside `rect` and nothing above
    /// (an open dropdown list) took the click
    pub fn clicked(&self, rect: &Rect) -> bool {
        !self.click_consumed && self.mouse.clicked(rect)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_frame_resets_per_frame_state() {
        let mut ctx = UiContext::new();
        ctx.next_id();
        ctx.set_hot(1);
        ctx.set_tooltip("Front", 1.0, 2.0);
        ctx.click_consumed = true;

        ctx.begin_frame(MouseState::default());
        assert_eq!(ctx.next_id(), 1);
        assert!(ctx.hot.is_none());
        assert!(ctx.tooltip.is_none());
        assert!(!ctx.click_consumed);
    }

    #[test]
    fn test_consumed_click_is_ignored() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { x: 5.0, y: 5.0, left_pressed: true, left_down: true });
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(ctx.clicked(&rect));
        ctx.click_consumed = true;
        assert!(!ctx.clicked(&rect));
    }
}
