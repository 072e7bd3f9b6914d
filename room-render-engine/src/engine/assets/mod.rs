//! Asset definitions for the room scene.
//!
//! Holds the JSON scene manifest, the handles of everything the loading
//! pipeline waits on, and the shared baked-lighting material.

/// Baked lighting material creation and day/night texture switching.
pub mod bake;

/// Handles for the room model, bake textures and shared material.
pub mod room_assets;

/// Scene manifest deserialised from `room.scene.json`, with validation.
pub mod scene_manifest;
