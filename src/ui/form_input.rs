//! Controlled form input
//!
//! A `FormInput` holds the committed `value` of a field. Editing keys never
//! touch `value` directly: they compute the next text and hand it to
//! `on_change` as a `ChangeEvent`, the only place `value` is replaced.
//! No validation happens here; numeric consumers parse with `as_f32`, which
//! yields NaN for anything that is not a number.

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// New text produced by an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub value: String,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Editing operations, decoupled from the keyboard backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    SelectAll,
}

#[derive(Debug, Clone)]
pub struct FormInput {
    /// Committed text
    pub value: String,
    /// Cursor position (byte index)
    cursor: usize,
    /// Selection anchor (byte index), if selecting
    selection_start: Option<usize>,
    blink_timer: f32,
    pub focused: bool,
}

impl FormInput {
    pub fn new(initial: impl ToString) -> Self {
        let value = initial.to_string();
        let cursor = value.len();
        Self {
            value,
            cursor,
            selection_start: None,
            blink_timer: 0.0,
            focused: false,
        }
    }

    /// Replace the value with the event's text
    pub fn on_change(&mut self, event: ChangeEvent) {
        self.value = event.value;
        self.cursor = self.cursor.min(self.value.len());
        while !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
        self.selection_start = None;
    }

    /// Numeric reading of the value; NaN if it does not parse
    pub fn as_f32(&self) -> f32 {
        self.value.trim().parse().unwrap_or(f32::NAN)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected byte range in sorted order
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_start
            .filter(|&start| start != self.cursor)
            .map(|start| (start.min(self.cursor), start.max(self.cursor)))
    }

    fn prev_boundary(&self, from: usize) -> usize {
        self.value[..from].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
    }

    fn next_boundary(&self, from: usize) -> usize {
        self.value[from..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| from + i)
            .unwrap_or(self.value.len())
    }

    /// Apply one editing key. Returns the change event if the text changed;
    /// the event has already been applied through `on_change`.
    pub fn apply_key(&mut self, key: EditKey, shift: bool) -> Option<ChangeEvent> {
        self.blink_timer = 0.0;

        let mut text = self.value.clone();
        let mut cursor = self.cursor;

        match key {
            EditKey::Left | EditKey::Right | EditKey::Home | EditKey::End => {
                if shift && self.selection_start.is_none() {
                    self.selection_start = Some(self.cursor);
                }
                let collapsed = self.selection_range().filter(|_| !shift);
                self.cursor = match (key, collapsed) {
                    (EditKey::Left, Some((start, _))) => start,
                    (EditKey::Right, Some((_, end))) => end,
                    (EditKey::Left, None) => self.prev_boundary(self.cursor),
                    (EditKey::Right, None) => self.next_boundary(self.cursor),
                    (EditKey::Home, _) => 0,
                    _ => self.value.len(),
                };
                if !shift {
                    self.selection_start = None;
                }
                return None;
            }
            EditKey::SelectAll => {
                self.selection_start = Some(0);
                self.cursor = self.value.len();
                return None;
            }
            EditKey::Backspace | EditKey::Delete | EditKey::Char(_) => {
                if let Some((start, end)) = self.selection_range() {
                    text.drain(start..end);
                    cursor = start;
                    if !matches!(key, EditKey::Char(_)) {
                        return self.commit(text, cursor);
                    }
                } else if key == EditKey::Backspace && cursor > 0 {
                    let prev = self.prev_boundary(cursor);
                    text.drain(prev..cursor);
                    cursor = prev;
                } else if key == EditKey::Delete && cursor < text.len() {
                    let next = self.next_boundary(cursor);
                    text.drain(cursor..next);
                }

                if let EditKey::Char(ch) = key {
                    text.insert(cursor, ch);
                    cursor += ch.len_utf8();
                }
            }
        }

        self.commit(text, cursor)
    }

    fn commit(&mut self, text: String, cursor: usize) -> Option<ChangeEvent> {
        if text == self.value {
            self.selection_start = None;
            return None;
        }
        let event = ChangeEvent::new(text);
        self.on_change(event.clone());
        self.cursor = cursor.min(self.value.len());
        Some(event)
    }

    /// Poll the keyboard and apply edits. Returns true if the value changed.
    pub fn handle_input(&mut self) -> bool {
        self.blink_timer += get_frame_time();

        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper) || is_key_down(KeyCode::RightSuper);

        let mut keys = Vec::new();
        for (code, key) in [
            (KeyCode::Left, EditKey::Left),
            (KeyCode::Right, EditKey::Right),
            (KeyCode::Home, EditKey::Home),
            (KeyCode::End, EditKey::End),
            (KeyCode::Backspace, EditKey::Backspace),
            (KeyCode::Delete, EditKey::Delete),
        ] {
            if is_key_pressed(code) {
                keys.push(key);
            }
        }
        if ctrl && is_key_pressed(KeyCode::A) {
            keys.push(EditKey::SelectAll);
        }
        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' && !ctrl {
                keys.push(EditKey::Char(ch));
            }
        }

        let mut changed = false;
        for key in keys {
            changed |= self.apply_key(key, shift).is_some();
        }
        changed
    }
}

/// Colors for form inputs
const INPUT_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const INPUT_BORDER: Color = Color::new(0.25, 0.25, 0.28, 1.0);
const INPUT_SELECTION: Color = Color::new(0.0, 0.5, 0.7, 0.5);
const INPUT_CURSOR: Color = Color::new(0.9, 0.9, 0.95, 1.0);

/// A fresh click focuses the field under it and blurs the rest. Clicks an
/// open popup already took leave focus alone.
fn update_focus(ctx: &UiContext, rect: &Rect, input: &mut FormInput) {
    if ctx.mouse.left_pressed && !ctx.click_consumed {
        input.focused = ctx.mouse.inside(rect);
    }
}

/// Draw a labelled input field and handle focus and typing.
/// The label sits left of the text. Returns true if the value changed.
pub fn draw_form_input(ctx: &mut UiContext, rect: Rect, input: &mut FormInput, label: &str) -> bool {
    let font_size = theme::FONT_SIZE_CONTENT;

    update_focus(ctx, &rect, input);

    let border = if input.focused { theme::ACCENT_COLOR } else { INPUT_BORDER };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, INPUT_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

    let padding = 6.0;
    let text_y = (rect.y + (rect.h + font_size * 0.7) / 2.0).round();
    let label_w = if label.is_empty() {
        0.0
    } else {
        draw_text(label, rect.x + padding, text_y, font_size, theme::TEXT_DIM);
        measure_text(label, None, font_size as u16, 1.0).width + padding
    };
    let text_x = rect.x + padding + label_w;

    let changed = if input.focused { input.handle_input() } else { false };

    if let Some((start, end)) = input.selection_range() {
        let start_x = text_x + measure_text(&input.value[..start], None, font_size as u16, 1.0).width;
        let sel_w = measure_text(&input.value[start..end], None, font_size as u16, 1.0).width;
        draw_rectangle(start_x, rect.y + 3.0, sel_w, rect.h - 6.0, INPUT_SELECTION);
    }

    draw_text(&input.value, text_x, text_y, font_size, theme::TEXT_COLOR);

    if input.focused && (input.blink_timer % 1.0) < 0.5 {
        let cursor_x = text_x + measure_text(&input.value[..input.cursor], None, font_size as u16, 1.0).width;
        draw_line(cursor_x, rect.y + 4.0, cursor_x, rect.bottom() - 4.0, 1.0, INPUT_CURSOR);
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MouseState;

    fn type_str(input: &mut FormInput, s: &str) {
        for ch in s.chars() {
            input.apply_key(EditKey::Char(ch), false);
        }
    }

    #[test]
    fn test_numeric_initial_value() {
        assert_eq!(FormInput::new(32.0f32).value, "32");
        assert_eq!(FormInput::new(-4.0f32).value, "-4");
        assert_eq!(FormInput::new(8.5f32).as_f32(), 8.5);
    }

    #[test]
    fn test_on_change_replaces_value() {
        let mut input = FormInput::new("#FFFFFF");
        input.on_change(ChangeEvent::new("#000"));
        assert_eq!(input.value, "#000");
        assert!(input.cursor() <= input.value.len());
    }

    #[test]
    fn test_non_numeric_text_is_accepted_and_reads_nan() {
        let mut input = FormInput::new(0.0f32);
        input.apply_key(EditKey::SelectAll, false);
        type_str(&mut input, "abc");
        assert_eq!(input.value, "abc");
        assert!(input.as_f32().is_nan());
    }

    #[test]
    fn test_typing_emits_change_events() {
        let mut input = FormInput::new("1");
        let event = input.apply_key(EditKey::Char('5'), false);
        assert_eq!(event, Some(ChangeEvent::new("15")));
        assert_eq!(input.as_f32(), 15.0);

        let event = input.apply_key(EditKey::Backspace, false);
        assert_eq!(event, Some(ChangeEvent::new("1")));
    }

    #[test]
    fn test_navigation_does_not_change_value() {
        let mut input = FormInput::new("123");
        assert_eq!(input.apply_key(EditKey::Home, false), None);
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.apply_key(EditKey::Backspace, false), None);
        input.apply_key(EditKey::Delete, false);
        assert_eq!(input.value, "23");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut input = FormInput::new("-45");
        input.apply_key(EditKey::Home, false);
        input.apply_key(EditKey::Right, true);
        assert_eq!(input.selection_range(), Some((0, 1)));
        input.apply_key(EditKey::Char('9'), false);
        assert_eq!(input.value, "945");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_click_moves_focus_unless_consumed() {
        let field = Rect::new(0.0, 0.0, 100.0, 24.0);
        let mut input = FormInput::new("0");
        let mut ctx = UiContext::new();

        ctx.begin_frame(MouseState { x: 10.0, y: 10.0, left_down: true, left_pressed: true });
        update_focus(&ctx, &field, &mut input);
        assert!(input.focused);

        // A dropdown list drawn over the field took this click
        ctx.begin_frame(MouseState { x: 200.0, y: 10.0, left_down: true, left_pressed: true });
        ctx.click_consumed = true;
        update_focus(&ctx, &field, &mut input);
        assert!(input.focused);

        ctx.begin_frame(MouseState { x: 200.0, y: 10.0, left_down: true, left_pressed: true });
        update_focus(&ctx, &field, &mut input);
        assert!(!input.focused);
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut input = FormInput::new("aé");
        input.apply_key(EditKey::Left, false);
        assert_eq!(input.cursor(), 1);
        input.apply_key(EditKey::Delete, false);
        assert_eq!(input.value, "a");
    }
}
