use crate::engine::assets::bake::{BakeState, create_bake_material};
use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::room_dresser::dress_room;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Root of the spawned GLTF scene.
#[derive(Component)]
pub struct RoomRoot;

/// Spawn the room scene hidden once the model and both bakes are resident.
pub fn spawn_room_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut assets: ResMut<RoomAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    gltfs: Res<Assets<Gltf>>,
    bake_state: Res<BakeState>,
) {
    if loading_progress.room_spawned
        || !loading_progress.model_loaded
        || !loading_progress.textures_loaded
    {
        return;
    }

    let Some(gltf) = gltfs.get(&assets.model) else {
        return;
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        loading_progress.error = Some("Room model contains no scenes".to_string());
        return;
    };

    let texture = assets.bake_texture(bake_state.active).clone();
    assets.bake_material = materials.add(create_bake_material(texture));

    commands
        .spawn((
            Name::new("Room"),
            RoomRoot,
            SceneRoot(scene),
            Transform::default(),
            Visibility::Hidden,
        ))
        .observe(dress_room);

    loading_progress.room_spawned = true;
    info!(
        "Room scene spawned with {} bake, waiting for instance",
        bake_state.active.as_str()
    );
}

/// Make the dressed room visible and tell the frontend it is ready.
pub fn reveal_room(
    mut rooms: Query<&mut Visibility, With<RoomRoot>>,
    loading_progress: Res<LoadingProgress>,
    bake_state: Res<BakeState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for mut visibility in rooms.iter_mut() {
        *visibility = Visibility::Visible;
    }

    info!("→ Room revealed");
    rpc_interface.send_notification(
        "scene_ready",
        serde_json::json!({
            "hooks_found": loading_progress.hooks_found,
            "hooks_missing": loading_progress.hooks_missing,
            "bake_variant": bake_state.active.as_str(),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_manifest::BakeVariant;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::platform::collections::HashMap;

    fn gltf_with_scenes(scenes: Vec<Handle<Scene>>) -> Gltf {
        Gltf {
            scenes,
            named_scenes: HashMap::default(),
            meshes: Vec::new(),
            named_meshes: HashMap::default(),
            materials: Vec::new(),
            named_materials: HashMap::default(),
            nodes: Vec::new(),
            named_nodes: HashMap::default(),
            skins: Vec::new(),
            named_skins: HashMap::default(),
            default_scene: None,
            animations: Vec::new(),
            named_animations: HashMap::default(),
            source: None,
        }
    }

    fn ready_world(gltf: Gltf) -> World {
        let mut world = World::new();
        let mut gltfs = Assets::<Gltf>::default();
        let mut images = Assets::<Image>::default();
        let assets = RoomAssets {
            model: gltfs.add(gltf),
            bake_night: images.add(Image::default()),
            bake_day: images.add(Image::default()),
            ..default()
        };
        world.insert_resource(gltfs);
        world.insert_resource(assets);
        world.init_resource::<Assets<StandardMaterial>>();
        world.insert_resource(BakeState {
            active: BakeVariant::Day,
            user_selected: false,
        });
        world.insert_resource(LoadingProgress {
            manifest_loaded: true,
            model_loaded: true,
            textures_loaded: true,
            ..default()
        });
        world
    }

    #[test]
    fn model_without_scenes_is_a_loading_error() {
        let mut world = ready_world(gltf_with_scenes(Vec::new()));

        world.run_system_once(spawn_room_when_ready).unwrap();

        let progress = world.resource::<LoadingProgress>();
        assert!(!progress.room_spawned);
        assert_eq!(progress.error.as_deref(), Some("Room model contains no scenes"));
    }

    #[test]
    fn first_scene_spawns_hidden_with_active_bake() {
        let mut world = ready_world(gltf_with_scenes(vec![Handle::default()]));

        world.run_system_once(spawn_room_when_ready).unwrap();

        assert!(world.resource::<LoadingProgress>().room_spawned);

        let mut rooms = world.query_filtered::<&Visibility, With<RoomRoot>>();
        let visibilities: Vec<Visibility> = rooms.iter(&world).copied().collect();
        assert_eq!(visibilities, vec![Visibility::Hidden]);

        let assets = world.resource::<RoomAssets>();
        let material = world
            .resource::<Assets<StandardMaterial>>()
            .get(&assets.bake_material)
            .unwrap();
        assert_eq!(material.base_color_texture.as_ref(), Some(&assets.bake_day));
    }

    #[test]
    fn reveal_shows_room_and_reports_hooks() {
        let mut world = World::new();
        let room = world.spawn((RoomRoot, Visibility::Hidden)).id();
        world.insert_resource(LoadingProgress {
            hooks_found: vec!["vueLog".to_string()],
            hooks_missing: vec!["node_o".to_string()],
            ..default()
        });
        world.init_resource::<BakeState>();
        world.init_resource::<WebRpcInterface>();

        world.run_system_once(reveal_room).unwrap();

        assert_eq!(world.get::<Visibility>(room), Some(&Visibility::Visible));
        let rpc = world.resource::<WebRpcInterface>();
        let notifications = rpc.queued_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].method, "scene_ready");
        assert_eq!(notifications[0].params["hooks_found"][0], "vueLog");
        assert_eq!(notifications[0].params["hooks_missing"][0], "node_o");
        assert_eq!(notifications[0].params["bake_variant"], "night");
    }
}
