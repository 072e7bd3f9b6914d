/// Physical light units are scaled by the default camera exposure (EV100 9.7),
/// which maps roughly 1000 nits to display white.
pub const EXPOSURE_SCALE: f32 = 1000.0;

pub const BACKGROUND_COLOUR: &str = "#333333";

pub const FOG_COLOUR: &str = "#ffffff";
pub const FOG_START: f32 = 5.0;
pub const FOG_END: f32 = 10000.0;

pub const AMBIENT_COLOUR: &str = "#ffffff";
pub const AMBIENT_INTENSITY: f32 = 2.0;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: [f32; 3] = [8.0, 8.0, 8.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 5.0];
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;

pub const FLOOR_SIZE: f32 = 1000.0;
pub const FLOOR_HEIGHT: f32 = -1.0;

/// Canvas size used when the parent element reports no size.
pub const FALLBACK_CANVAS_SIZE: f32 = 600.0;
