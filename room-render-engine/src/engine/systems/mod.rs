//! Runtime systems for user controls and diagnostics.
//!
//! Provides bake variant switching, animation pausing and FPS tracking.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Scene control events from RPC or keyboard: bake variant and pause.
pub mod scene_controls;
