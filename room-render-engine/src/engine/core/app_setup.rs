use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::engine::animation::RoomAnimationPlugin;
use crate::engine::assets::bake::BakeState;
use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::orbit_camera::orbit_camera_controller;
use crate::engine::core::app_state::{
    AppState, transition_to_failed, transition_to_running, update_loading_frontend,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::asset_loader::check_asset_loading;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::room_spawner::{reveal_room, spawn_room_when_ready};
use crate::engine::scene::environment::{apply_scene_settings, spawn_room_camera};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::scene_controls::{SceneControlEvent, handle_scene_control_events};
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::scene_controls::handle_keyboard_shortcuts;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneManifest as a loadable asset type from `.scene.json` files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["scene.json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(RoomAnimationPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<RoomAssets>()
        .init_resource::<BakeState>()
        .add_event::<SceneControlEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                check_asset_loading,
                spawn_room_when_ready,
                update_loading_frontend,
                transition_to_failed,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            apply_scene_settings.run_if(resource_added::<SceneManifest>),
        )
        .add_systems(OnEnter(AppState::Running), reveal_room);

    // Controls may arrive before the room is revealed; the bake state is
    // picked up by the material when it is built.
    app.add_systems(Update, handle_scene_control_events);

    let runtime_systems = (orbit_camera_controller, fps_notification_system);

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Native overlay and shortcuts only.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
        app.add_systems(
            Update,
            handle_keyboard_shortcuts.run_if(in_state(AppState::Running)),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_room_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
