//! Orbit camera for inspecting the room.
//!
//! Left-drag orbits around a target, right-drag pans, the wheel dollies,
//! with the camera transform eased toward the orbit pose each frame.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
