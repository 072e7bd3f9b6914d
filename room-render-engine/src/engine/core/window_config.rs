use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(target_arch = "wasm32")]
use crate::constants::render_settings::FALLBACK_CANVAS_SIZE;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        // Canvas tracks its parent element; the resolution only applies until
        // the parent reports a size.
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            resolution: bevy::window::WindowResolution::new(
                FALLBACK_CANVAS_SIZE,
                FALLBACK_CANVAS_SIZE,
            ),
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Room".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
