//! Asset loading pipeline for the room scene.
//!
//! Manifest first, then the GLTF model and both bake textures; once all three
//! are resident the scene is spawned hidden, dressed with materials and
//! animation hooks, and revealed on the transition to `Running`.

/// Load state polling for the model and bake textures.
pub mod asset_loader;

/// Scene manifest request, validation and follow-up asset requests.
pub mod manifest_loader;

/// Loading progress tracking resource reported to the frontend.
pub mod progress;

/// Bake material assignment and hook attachment once the scene instance exists.
pub mod room_dresser;

/// Spawning the hidden GLTF scene and revealing it when dressed.
pub mod room_spawner;
