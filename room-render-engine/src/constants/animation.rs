/// Spinner steps are expressed per frame at this rate.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

pub const LOGO_SPIN_STEP: f32 = 0.005;

pub const FLICKER_COLOUR: &str = "#08a85e";
pub const FLICKER_EMISSIVE_INTENSITY: f32 = 2.0;
pub const FLICKER_LIGHT_INTENSITY: f32 = 1.5;
pub const FLICKER_OPACITY_FLOOR: f32 = 0.2;
pub const FLICKER_HALF_PERIOD_SECS: f32 = 1.5;

/// Interval between FPS notifications sent to the frontend.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
