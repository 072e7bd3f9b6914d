use crate::engine::assets::scene_manifest::{CameraConfig, SceneManifest};
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::scene::lighting::{
    KeyLight, RoomFloor, ambient_light, spawn_floor, spawn_key_light,
};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

pub fn camera_projection(config: &CameraConfig) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: config.fov_degrees.to_radians(),
        near: config.near,
        far: config.far,
        ..default()
    })
}

pub fn distance_fog(manifest: &SceneManifest) -> DistanceFog {
    DistanceFog {
        color: manifest.fog_colour(),
        falloff: FogFalloff::Linear {
            start: manifest.fog.start,
            end: manifest.fog.end,
        },
        ..default()
    }
}

/// Spawn the single scene camera with the built-in room defaults.
/// The manifest may adjust it later through [`apply_scene_settings`].
pub fn spawn_room_camera(commands: &mut Commands) {
    let manifest = SceneManifest::default();
    let orbit = OrbitCamera::from_config(&manifest.camera);

    commands.spawn((
        Camera3d::default(),
        camera_projection(&manifest.camera),
        // Linear output at exposure 1, no filmic curve.
        Tonemapping::None,
        distance_fog(&manifest),
        orbit.pose(),
    ));
    commands.insert_resource(ClearColor(manifest.background_colour()));
    commands.insert_resource(ambient_light(&manifest));
    commands.insert_resource(orbit);
}

/// Apply a freshly loaded manifest to the camera, fog, background and lights.
/// Any key light or floor from an earlier manifest is replaced.
pub fn apply_scene_settings(
    mut commands: Commands,
    manifest: Res<SceneManifest>,
    mut camera_query: Query<(&mut Transform, &mut Projection, &mut DistanceFog), With<Camera3d>>,
    existing: Query<Entity, Or<(With<KeyLight>, With<RoomFloor>)>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let orbit = OrbitCamera::from_config(&manifest.camera);

    if let Ok((mut transform, mut projection, mut fog)) = camera_query.single_mut() {
        *transform = orbit.pose();
        *projection = camera_projection(&manifest.camera);
        *fog = distance_fog(&manifest);
    }

    commands.insert_resource(ClearColor(manifest.background_colour()));
    commands.insert_resource(ambient_light(&manifest));
    commands.insert_resource(orbit);

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    if manifest.key_light.enabled {
        spawn_key_light(&mut commands, &manifest.key_light);
    }
    if manifest.floor.enabled {
        spawn_floor(&mut commands, &mut meshes, &mut materials, &manifest);
    }

    info!("Scene settings applied from manifest");
}
