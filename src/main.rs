//! Device mockup panel
//!
//! Previews an image on a 3D phone or tablet, lets the user pick the device,
//! angles and body color, and asks the host application to create a frame
//! or insert the rendered picture.
//! - Software-rasterized device model
//! - Angle presets with preview thumbnails
//! - JSON messages to and from the host over stdin/stdout

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod async_ops;
mod catalog;
mod config;
mod error;
mod host;
mod panel;
mod rasterizer;
mod scene;
mod texture;
mod ui;
mod viewport;

use std::path::Path;

use macroquad::prelude::*;

use app::AppState;
use config::{PanelConfig, CONFIG_FILE};
use host::StdioTransport;

fn window_conf() -> Conf {
    let config = PanelConfig::load_or_default(Path::new(CONFIG_FILE));
    Conf {
        window_title: format!("Mockup v{}", VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = PanelConfig::load_or_default(Path::new(CONFIG_FILE));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();
    log::info!("mockup v{} starting with {:?}", VERSION, config);

    let mut app = match AppState::new(&config, Box::new(StdioTransport::open())) {
        Ok(app) => app,
        Err(e) => {
            log::error!("failed to start panel: {}", e);
            return;
        }
    };

    loop {
        clear_background(ui::theme::BG_COLOR);
        app.frame(get_frame_time(), get_time());
        next_frame().await;
    }
}
