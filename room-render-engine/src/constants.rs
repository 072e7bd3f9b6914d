/// Asset locations relative to the served `assets/` directory.
pub mod path;

/// Scene-wide rendering defaults: camera, fog, background and lights.
pub mod render_settings;

/// Timing and colour defaults for spinners and flickers.
pub mod animation;
