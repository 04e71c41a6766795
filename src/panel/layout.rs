//! Panel layout: model viewport on the left, controls sidebar on the right

use macroquad::prelude::*;

use crate::catalog::PRESETS;
use crate::ui::{
    button, color_swatch, draw_form_input, draw_tooltip, preset_button, section_label, theme,
    Dropdown, Rect, UiContext,
};
use crate::viewport::parse_hex_color;
use super::Panel;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    SelectDevice(usize),
    SelectPreset(usize),
    CreateEmptyFrame,
    SaveImage,
}

/// Fixed sidebar geometry
pub struct PanelLayout {
    pub sidebar_width: f32,
    pub padding: f32,
    pub row_height: f32,
    pub label_height: f32,
    device_dropdown: Dropdown,
}

impl PanelLayout {
    pub fn new(ctx: &mut UiContext) -> Self {
        Self {
            sidebar_width: 280.0,
            padding: 12.0,
            row_height: 24.0,
            label_height: 20.0,
            device_dropdown: Dropdown::new(ctx.next_id()),
        }
    }
}

/// Sidebar rows, top to bottom
struct SidebarRects {
    device_label: Rect,
    device: Rect,
    preset_label: Rect,
    presets: Vec<Rect>,
    device_rotation_label: Rect,
    device_rotation: Vec<Rect>,
    camera_rotation_label: Rect,
    camera_rotation: Vec<Rect>,
    color_label: Rect,
    color_swatch: Rect,
    color_input: Rect,
    actions: Vec<Rect>,
    status: Rect,
}

fn sidebar_rects(layout: &PanelLayout, sidebar: Rect) -> SidebarRects {
    let gap = 6.0;
    let rest = sidebar.pad(layout.padding);
    let (status, rest) = {
        let (top, bottom) = rest.take_top(rest.h - layout.row_height);
        (bottom, top)
    };

    let (device_label, rest) = rest.take_top(layout.label_height);
    let (device, rest) = rest.take_top(layout.row_height);
    let (_, rest) = rest.take_top(gap * 2.0);

    let (preset_label, rest) = rest.take_top(layout.label_height);
    let tile = (rest.w - gap * (PRESETS.len() - 1) as f32) / PRESETS.len() as f32;
    let (preset_row, rest) = rest.take_top(tile);
    let presets = preset_row.columns(PRESETS.len(), gap);
    let (_, mut rest) = rest.take_top(gap * 2.0);

    let rows = |count: usize, rest: &mut Rect| -> Vec<Rect> {
        (0..count)
            .map(|_| {
                let (row, remaining) = rest.take_top(layout.row_height + gap);
                *rest = remaining;
                Rect::new(row.x, row.y, row.w, layout.row_height)
            })
            .collect()
    };

    let (device_rotation_label, next) = rest.take_top(layout.label_height);
    rest = next;
    let device_rotation = rows(3, &mut rest);
    let (camera_rotation_label, next) = rest.take_top(layout.label_height);
    rest = next;
    let camera_rotation = rows(2, &mut rest);

    let (color_label, next) = rest.take_top(layout.label_height);
    let (color_row, next) = next.take_top(layout.row_height);
    let (color_swatch, color_input) = color_row.split_h_px(layout.row_height);
    let color_input = Rect::new(color_input.x + gap, color_input.y, color_input.w - gap, color_input.h);
    let (_, next) = next.take_top(gap * 2.0);

    let (action_row, _) = next.take_top(layout.row_height + 4.0);
    let actions = action_row.columns(2, gap);

    SidebarRects {
        device_label,
        device,
        preset_label,
        presets,
        device_rotation_label,
        device_rotation,
        camera_rotation_label,
        camera_rotation,
        color_label,
        color_swatch,
        color_input,
        actions,
        status,
    }
}

/// Draw the whole panel. Form edits go straight into the panel's fields;
/// everything else comes back as an action.
pub fn draw_panel(ctx: &mut UiContext, layout: &PanelLayout, panel: &mut Panel, time: f64) -> Option<PanelAction> {
    let screen = Rect::screen(screen_width(), screen_height());
    let (viewport_rect, sidebar) = screen.split_h_px(screen.w - layout.sidebar_width);
    let rects = sidebar_rects(layout, sidebar);
    let mut action = None;

    // Open dropdown list gets the click before anything underneath it
    let names: Vec<&str> = panel.catalog.names().collect();
    if let Some(index) = layout.device_dropdown.handle_list(ctx, rects.device, names.len()) {
        action = Some(PanelAction::SelectDevice(index));
    }

    draw_rectangle(viewport_rect.x, viewport_rect.y, viewport_rect.w, viewport_rect.h, theme::BG_COLOR);
    panel.viewport.draw(viewport_rect.pad(16.0), time);

    draw_rectangle(sidebar.x, sidebar.y, sidebar.w, sidebar.h, theme::SIDEBAR_COLOR);

    section_label(rects.device_label, "Device Model");
    layout.device_dropdown.draw_trigger(ctx, rects.device, panel.state.selected_device);

    section_label(rects.preset_label, "Angle Preset");
    let device = panel.catalog.find_device_by_name(panel.state.selected_device);
    for (index, rect) in rects.presets.iter().enumerate() {
        let thumbnail = panel.previews.get(device, index);
        let active = panel.state.selected_preset == index;
        if preset_button(ctx, *rect, PRESETS[index].label, active, Some(thumbnail)) {
            action = Some(PanelAction::SelectPreset(index));
        }
    }

    section_label(rects.device_rotation_label, "Device Rotation");
    for ((field, rect), label) in panel
        .state
        .device_rotation
        .iter_mut()
        .zip(&rects.device_rotation)
        .zip(["Rotate X", "Rotate Y", "Rotate Z"])
    {
        draw_form_input(ctx, *rect, field, label);
    }

    section_label(rects.camera_rotation_label, "Camera Rotation");
    for ((field, rect), label) in panel
        .state
        .camera_rotation
        .iter_mut()
        .zip(&rects.camera_rotation)
        .zip(["Rotate X", "Rotate Y"])
    {
        draw_form_input(ctx, *rect, field, label);
    }

    section_label(rects.color_label, "Model Color");
    let swatch = parse_hex_color(&panel.state.color.value).unwrap_or(panel.viewport.body_color());
    color_swatch(
        rects.color_swatch,
        Color::from_rgba(swatch.r, swatch.g, swatch.b, 255),
    );
    draw_form_input(ctx, rects.color_input, &mut panel.state.color, "");

    if button(ctx, rects.actions[0], "Create Empty Frame", false) {
        action = Some(PanelAction::CreateEmptyFrame);
    }
    if button(ctx, rects.actions[1], "Save as Image", true) {
        action = Some(PanelAction::SaveImage);
    }

    if let Some((message, is_error)) = panel.status.get(time) {
        let color = if is_error { theme::ERROR_COLOR } else { theme::TEXT_DIM };
        let y = (rects.status.center_y() + theme::FONT_SIZE_CONTENT * 0.35).round();
        draw_text(message, rects.status.x, y, theme::FONT_SIZE_CONTENT, color);
    }

    // Overlays last
    layout
        .device_dropdown
        .draw_list(ctx, rects.device, &names, names.iter().position(|n| *n == device.name).unwrap_or(0));
    draw_tooltip(ctx);

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_rows_fit_and_do_not_overlap() {
        let mut ctx = UiContext::new();
        let layout = PanelLayout::new(&mut ctx);
        let sidebar = Rect::new(680.0, 0.0, 280.0, 600.0);
        let rects = sidebar_rects(&layout, sidebar);

        let mut column = vec![rects.device_label, rects.device, rects.preset_label, rects.presets[0]];
        column.push(rects.device_rotation_label);
        column.extend(rects.device_rotation.iter().copied());
        column.push(rects.camera_rotation_label);
        column.extend(rects.camera_rotation.iter().copied());
        column.extend([rects.color_label, rects.color_input, rects.actions[0], rects.status]);

        for pair in column.windows(2) {
            assert!(pair[0].bottom() <= pair[1].y + 0.001, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        assert!(rects.status.bottom() <= sidebar.bottom());
        assert_eq!(rects.presets.len(), PRESETS.len());
        assert!(rects.presets.iter().all(|r| r.right() <= sidebar.right()));
    }
}
