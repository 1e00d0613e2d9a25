//! Atoll Viewer - interactive 3D tropical cove
//!
//! A browser-viewport scene: sandy ground, a central gazebo with a computed
//! keep-clear radius, a scattered palm grove, drifting droplets, an orbit
//! camera, and click-to-highlight interaction on the palms.

mod app;
mod grove;
mod model;
mod particles;
mod scene;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    // Run the Bevy app
    app::run();
}
