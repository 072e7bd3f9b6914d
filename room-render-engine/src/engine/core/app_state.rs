use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    Failed,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Running => "running",
            Self::Failed => "failed",
        }
    }
}

#[derive(Component)]
pub struct FpsText;

// Final transition once the room is dressed
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.room_dressed {
        info!("→ Room dressed, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

// Any loading step may record an error; surface it once and stop loading
pub fn transition_to_failed(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(ref message) = loading_progress.error else {
        return;
    };
    error!("Room loading failed: {}", message);
    rpc_interface.send_notification("load_error", serde_json::json!({ "message": message }));
    next_state.set(AppState::Failed);
}

/// Push loading progress to the frontend whenever it changes.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_sent: Local<Option<Value>>,
) {
    let snapshot = loading_progress.to_json(AppState::Loading.as_str());
    if last_sent.as_ref() == Some(&snapshot) {
        return;
    }
    rpc_interface.send_notification("loading_progress", snapshot.clone());
    *last_sent = Some(snapshot);
}
