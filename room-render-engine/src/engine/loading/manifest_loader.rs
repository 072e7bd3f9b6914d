use crate::constants::path::SCENE_MANIFEST_PATH;
use crate::engine::assets::bake::BakeState;
use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::asset_loader::{AssetLoadStatus, asset_status, load_room_assets};
use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene manifest from: {}", SCENE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(SCENE_MANIFEST_PATH));
}

// Validate the manifest and request the model and bake textures it names
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut assets: ResMut<RoomAssets>,
    mut bake_state: ResMut<BakeState>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SceneManifest>>,
) {
    if loading_progress.manifest_loaded || loading_progress.error.is_some() {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let AssetLoadStatus::Failed(reason) = asset_status(&asset_server, handle.id()) {
        loading_progress.error = Some(format!("Scene manifest failed to load: {reason}"));
        return;
    }

    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    if let Err(err) = manifest.validate() {
        loading_progress.error = Some(format!("Scene manifest is invalid: {err}"));
        return;
    }

    info!("✓ Scene manifest loaded");
    commands.insert_resource(manifest.clone());
    bake_state.seed(manifest.bake.initial);
    loading_progress.manifest_loaded = true;

    load_room_assets(&asset_server, &mut assets, manifest);
}
