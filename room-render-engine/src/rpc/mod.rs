//! JSON-RPC 2.0 communication layer for the embedding web page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page
//! that hosts its canvas via `postMessage`, supporting both request-response
//! and notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Page (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Error replies use the JSON-RPC 2.0 codes:
//! - `-32700`: Parse error (message is not JSON; reply carries a null id)
//! - `-32600`: Invalid request (not a 2.0 request object)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Methods
//!
//! - `get_fps`: Retrieve current frame rate
//! - `get_loading_progress`: App state, per-asset load states and overall fraction
//! - `set_bake_variant`: Switch the room between `night` and `day` bakes
//! - `set_animation_paused`: Pause or resume spinners and flickers
//!
//! ## Notifications
//!
//! `loading_progress`, `load_error`, `scene_ready`, `bake_variant_changed`,
//! `animation_paused_changed`, `fps_update`.

/// JSON-RPC 2.0 bidirectional communication system for page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
