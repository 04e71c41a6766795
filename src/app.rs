//! Application state
//!
//! Everything the main loop carries from frame to frame.

use crate::config::PanelConfig;
use crate::error::HostError;
use crate::host::HostTransport;
use crate::panel::{draw_panel, Panel, PanelLayout};
use crate::ui::{MouseState, UiContext};

pub struct AppState {
    pub panel: Panel,
    pub layout: PanelLayout,
    pub ui: UiContext,
}

impl AppState {
    pub fn new(config: &PanelConfig, transport: Box<dyn HostTransport>) -> Result<Self, HostError> {
        let mut ui = UiContext::new();
        let layout = PanelLayout::new(&mut ui);
        Ok(Self {
            panel: Panel::new(config, transport)?,
            layout,
            ui,
        })
    }

    /// One frame: host events and rendering first, then the UI, then
    /// whatever the UI asked for
    pub fn frame(&mut self, dt: f32, time: f64) {
        self.panel.update(dt, time);

        self.ui.begin_frame(MouseState::poll());
        if let Some(action) = draw_panel(&mut self.ui, &self.layout, &mut self.panel, time) {
            self.panel.apply(action, time);
        }
    }
}
