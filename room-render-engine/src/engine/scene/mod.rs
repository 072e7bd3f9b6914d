//! Static scene furniture around the room model.
//!
//! Camera, fog and background live in `environment`; ambient light, the
//! optional key light and floor in `lighting`.

/// Camera spawning, projection, distance fog and clear colour.
pub mod environment;

/// Ambient light, optional directional key light and optional floor plane.
pub mod lighting;
