use crate::constants::render_settings::EXPOSURE_SCALE;
use crate::engine::assets::scene_manifest::{KeyLightConfig, SceneManifest};
use bevy::prelude::*;

#[derive(Component)]
pub struct KeyLight;

#[derive(Component)]
pub struct RoomFloor;

pub fn ambient_light(manifest: &SceneManifest) -> AmbientLight {
    AmbientLight {
        color: manifest.ambient_colour(),
        brightness: manifest.ambient.intensity * EXPOSURE_SCALE,
        ..default()
    }
}

/// White directional light aimed at the origin, off unless the manifest asks for it.
pub fn spawn_key_light(commands: &mut Commands, config: &KeyLightConfig) {
    commands.spawn((
        KeyLight,
        DirectionalLight {
            illuminance: config.intensity * EXPOSURE_SCALE,
            shadows_enabled: config.shadows,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(config.position))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
    info!("Key light enabled at {:?}", config.position);
}

/// Double-sided ground plane under the room.
pub fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    manifest: &SceneManifest,
) {
    let floor = &manifest.floor;
    commands.spawn((
        RoomFloor,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor.size, floor.size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: manifest.floor_colour(),
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(0.0, floor.height, 0.0),
    ));
    info!("Floor spawned at y = {}", floor.height);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_follows_manifest_intensity() {
        let mut manifest = SceneManifest::default();
        manifest.ambient.intensity = 0.5;
        let light = ambient_light(&manifest);
        assert_eq!(light.color.to_srgba(), Srgba::WHITE);
        assert_eq!(light.brightness, 0.5 * EXPOSURE_SCALE);
    }
}
