//! Basic UI widgets
//!
//! Stateless draw-and-hit-test functions. Anything a widget needs to
//! remember across frames lives with the caller.

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// Section heading above a group of controls
pub fn section_label(rect: Rect, text: &str) {
    let font_size = theme::FONT_SIZE_HEADER;
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, rect.x.round(), text_y, font_size, theme::TEXT_DIM);
}

/// Centered text inside a rect
fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.height * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Text button, returns true if clicked. `primary` uses the accent fill.
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str, primary: bool) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    if hovered {
        ctx.set_hot(id);
    }

    let bg = match (primary, ctx.mouse.clicking(&rect), hovered) {
        (true, true, _) => Color::new(0.0, 0.6, 0.72, 1.0),
        (true, false, true) => Color::new(0.1, 0.82, 0.95, 1.0),
        (true, false, false) => theme::ACCENT_COLOR,
        (false, true, _) => theme::BUTTON_PRESSED,
        (false, false, true) => theme::BUTTON_HOVER,
        (false, false, false) => theme::BUTTON_BG,
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);

    let text_color = if primary { BLACK } else { theme::TEXT_COLOR };
    draw_text_centered(label, &rect, theme::FONT_SIZE_CONTENT, text_color);

    ctx.clicked(&rect)
}

/// Gallery button for one preset: thumbnail, active highlight, hover tooltip.
/// Returns true if clicked.
pub fn preset_button(
    ctx: &mut UiContext,
    rect: Rect,
    label: &str,
    is_active: bool,
    thumbnail: Option<&Texture2D>,
) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    if hovered {
        ctx.set_hot(id);
        ctx.set_tooltip(label, ctx.mouse.x, ctx.mouse.y);
    }

    let bg = if hovered { theme::BUTTON_HOVER } else { theme::BUTTON_BG };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);

    let inner = rect.pad(3.0);
    match thumbnail {
        Some(tex) => draw_texture_ex(
            tex,
            inner.x,
            inner.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(inner.w, inner.h)),
                ..Default::default()
            },
        ),
        None => draw_text_centered(label, &inner, theme::FONT_SIZE_CONTENT, theme::TEXT_DIM),
    }

    if is_active {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, theme::ACCENT_COLOR);
    }

    ctx.clicked(&rect)
}

/// Filled color swatch with a thin border
pub fn color_swatch(rect: Rect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, theme::DROPDOWN_BORDER);
}

/// Loading placeholder: a ring of dots with one highlighted, rotating over time
pub fn spinner(rect: Rect, time: f64) {
    const DOTS: usize = 8;
    let radius = rect.w.min(rect.h) * 0.08;
    let active = ((time * 10.0) as usize) % DOTS;
    for i in 0..DOTS {
        let angle = i as f32 / DOTS as f32 * std::f32::consts::TAU;
        let x = rect.center_x() + angle.cos() * radius;
        let y = rect.center_y() + angle.sin() * radius;
        let color = if i == active { theme::ACCENT_COLOR } else { theme::TEXT_DIM };
        draw_circle(x, y, 3.0, color);
    }
}

/// Dropdown select. The trigger and the open list are drawn separately so
/// the list can go on top of everything drawn after the trigger.
pub struct Dropdown {
    pub id: u64,
    pub item_height: f32,
}

impl Dropdown {
    pub fn new(id: u64) -> Self {
        Self { id, item_height: 24.0 }
    }

    fn list_rect(&self, trigger: Rect, count: usize) -> Rect {
        Rect::new(trigger.x, trigger.bottom() + 2.0, trigger.w, self.item_height * count as f32)
    }

    /// Process clicks on the open list. Call before any other widget so the
    /// click is not seen twice. Returns the picked option index.
    pub fn handle_list(&self, ctx: &mut UiContext, trigger: Rect, count: usize) -> Option<usize> {
        if ctx.open_dropdown != Some(self.id) || !ctx.mouse.left_pressed {
            return None;
        }
        let list = self.list_rect(trigger, count);
        ctx.open_dropdown = None;
        if ctx.mouse.inside(&list) {
            ctx.click_consumed = true;
            let index = ((ctx.mouse.y - list.y) / self.item_height) as usize;
            return Some(index.min(count.saturating_sub(1)));
        }
        if ctx.mouse.inside(&trigger) {
            // Clicking the trigger again just closes the list
            ctx.click_consumed = true;
        }
        None
    }

    /// Draw the closed trigger showing the current choice; toggles the list on click
    pub fn draw_trigger(&self, ctx: &mut UiContext, trigger: Rect, current: &str) {
        let hovered = ctx.mouse.inside(&trigger);
        let bg = if hovered { theme::BUTTON_HOVER } else { theme::BUTTON_BG };
        draw_rectangle(trigger.x, trigger.y, trigger.w, trigger.h, bg);
        draw_rectangle_lines(trigger.x, trigger.y, trigger.w, trigger.h, 1.0, theme::DROPDOWN_BORDER);

        let text_y = (trigger.center_y() + theme::FONT_SIZE_CONTENT * 0.35).round();
        draw_text(current, trigger.x + 8.0, text_y, theme::FONT_SIZE_CONTENT, theme::TEXT_COLOR);
        draw_text("v", trigger.right() - 16.0, text_y, theme::FONT_SIZE_CONTENT, theme::TEXT_DIM);

        if ctx.clicked(&trigger) {
            ctx.open_dropdown = Some(self.id);
        }
    }

    /// Draw the open list (call last)
    pub fn draw_list(&self, ctx: &UiContext, trigger: Rect, options: &[&str], selected: usize) {
        if ctx.open_dropdown != Some(self.id) {
            return;
        }
        let list = self.list_rect(trigger, options.len());
        draw_rectangle(list.x, list.y, list.w, list.h, theme::DROPDOWN_BG);
        draw_rectangle_lines(list.x, list.y, list.w, list.h, 1.0, theme::DROPDOWN_BORDER);

        for (i, option) in options.iter().enumerate() {
            let item = Rect::new(list.x, list.y + i as f32 * self.item_height, list.w, self.item_height);
            if ctx.mouse.inside(&item) {
                draw_rectangle(item.x, item.y, item.w, item.h, theme::DROPDOWN_HOVER);
            }
            let color = if i == selected { theme::ACCENT_COLOR } else { theme::TEXT_COLOR };
            let text_y = (item.center_y() + theme::FONT_SIZE_CONTENT * 0.35).round();
            draw_text(option, item.x + 8.0, text_y, theme::FONT_SIZE_CONTENT, color);
        }
    }
}

/// Draw the frame's tooltip, if a widget requested one
pub fn draw_tooltip(ctx: &UiContext) {
    let Some(tooltip) = &ctx.tooltip else {
        return;
    };
    let font_size = theme::FONT_SIZE_CONTENT;
    let dims = measure_text(&tooltip.text, None, font_size as u16, 1.0);
    let (w, h) = (dims.width + 12.0, font_size + 10.0);
    let x = (tooltip.x + 12.0).min(screen_width() - w - 2.0);
    let y = (tooltip.y + 16.0).min(screen_height() - h - 2.0);
    draw_rounded_rect(x, y, w, h, 3.0, theme::TOOLTIP_BG);
    draw_text(&tooltip.text, x + 6.0, (y + h * 0.5 + dims.height * 0.5).round(), font_size, WHITE);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
