use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::assets::scene_manifest::{BakeVariant, SceneManifest};
use crate::engine::loading::progress::LoadingProgress;
use bevy::asset::{LoadState, RecursiveDependencyLoadState, UntypedAssetId};
use bevy::image::{ImageLoaderSettings, ImageSampler};
use bevy::prelude::*;

pub use crate::engine::loading::progress::AssetLoadStatus;

/// Request the room model and both bake textures.
///
/// Bake textures are sRGB and sampled nearest-neighbour; GLTF texture
/// coordinates already match image row order, so no vertical flip is applied.
pub fn load_room_assets(asset_server: &AssetServer, assets: &mut RoomAssets, manifest: &SceneManifest) {
    info!("Loading room assets:");
    info!("  Model: {}", manifest.model);
    info!("  Night bake: {}", manifest.bake.night);
    info!("  Day bake: {}", manifest.bake.day);

    assets.model = asset_server.load(manifest.model.clone());
    assets.bake_night = load_bake_texture(asset_server, manifest.bake_path(BakeVariant::Night));
    assets.bake_day = load_bake_texture(asset_server, manifest.bake_path(BakeVariant::Day));
}

fn load_bake_texture(asset_server: &AssetServer, path: &str) -> Handle<Image> {
    asset_server.load_with_settings(path.to_string(), |settings: &mut ImageLoaderSettings| {
        settings.is_srgb = true;
        settings.sampler = ImageSampler::nearest();
    })
}

/// Collapse Bevy's load states into what the pipeline cares about:
/// resident with all dependencies, still pending, or failed.
pub fn asset_status(asset_server: &AssetServer, id: impl Into<UntypedAssetId>) -> AssetLoadStatus {
    let id = id.into();
    if asset_server.is_loaded_with_dependencies(id) {
        return AssetLoadStatus::Loaded;
    }
    match asset_server.get_load_states(id) {
        Some((LoadState::Failed(err), _, _)) => AssetLoadStatus::Failed(err.to_string()),
        Some((_, _, RecursiveDependencyLoadState::Failed(err))) => {
            AssetLoadStatus::Failed(err.to_string())
        }
        _ => AssetLoadStatus::Pending,
    }
}

// Check if the model and both bake textures are loaded
pub fn check_asset_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    assets: Res<RoomAssets>,
    asset_server: Res<AssetServer>,
) {
    if !loading_progress.manifest_loaded
        || loading_progress.error.is_some()
        || (loading_progress.model_loaded && loading_progress.textures_loaded)
    {
        return;
    }

    let model = asset_status(&asset_server, assets.model.id());
    let night = asset_status(&asset_server, assets.bake_night.id());
    let day = asset_status(&asset_server, assets.bake_day.id());

    record_asset_states(&mut loading_progress, model, night, day);
}

/// Fold the three load statuses into the progress resource. The first failed
/// asset becomes the loading error.
pub fn record_asset_states(
    loading_progress: &mut LoadingProgress,
    model: AssetLoadStatus,
    night: AssetLoadStatus,
    day: AssetLoadStatus,
) {
    let model_loaded = model == AssetLoadStatus::Loaded;
    let textures_loaded = night == AssetLoadStatus::Loaded && day == AssetLoadStatus::Loaded;

    let states = vec![
        ("Room model".to_string(), model),
        ("Night bake".to_string(), night),
        ("Day bake".to_string(), day),
    ];

    if let Some((name, AssetLoadStatus::Failed(reason))) = states
        .iter()
        .find(|(_, status)| matches!(status, AssetLoadStatus::Failed(_)))
    {
        loading_progress.error = Some(format!("{name} failed to load: {reason}"));
    }

    loading_progress.asset_states = states;

    if model_loaded && !loading_progress.model_loaded {
        info!("✓ Room model loaded");
    }
    if textures_loaded && !loading_progress.textures_loaded {
        info!("✓ Bake textures loaded");
    }
    loading_progress.model_loaded = model_loaded;
    loading_progress.textures_loaded = textures_loaded;
}
