use crate::constants::render_settings::EXPOSURE_SCALE;
use crate::engine::animation::tween::{LightIntensityTween, MaterialOpacityTween, Tween};
use crate::engine::assets::scene_manifest::{FlickerConfig, parse_colour};
use bevy::prelude::*;

/// Marker for hooks turned into glowing, pulsing panels.
#[derive(Component, Debug)]
pub struct Flicker;

/// Convert a point light intensity in candela, as authored in the manifest,
/// to exposure-scaled lumens.
pub fn light_lumens(candela: f32) -> f32 {
    candela * EXPOSURE_SCALE * 4.0 * std::f32::consts::PI
}

/// White, alpha-blended surface glowing in `colour`.
pub fn flicker_material(colour: Color, emissive_intensity: f32) -> StandardMaterial {
    let linear = colour.to_linear();
    let scale = emissive_intensity * EXPOSURE_SCALE;
    StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(linear.red * scale, linear.green * scale, linear.blue * scale),
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

pub fn flicker_light(colour: Color, candela: f32) -> PointLight {
    PointLight {
        color: colour,
        intensity: light_lumens(candela),
        shadows_enabled: true,
        ..default()
    }
}

/// Turn `hook` into a flickering panel.
///
/// Every mesh under the hook gets one shared emissive material, a point light
/// is parented to the hook, and both fade on an endless yoyo: the light down
/// to zero and the material down to the configured opacity floor.
pub fn create_flicker(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    hook: Entity,
    meshes: &[Entity],
    config: &FlickerConfig,
) {
    let colour = parse_colour(&config.name, &config.colour).unwrap_or(Color::WHITE);
    let material = materials.add(flicker_material(colour, config.emissive_intensity));

    for &mesh in meshes {
        commands
            .entity(mesh)
            .insert(MeshMaterial3d(material.clone()));
    }

    let light = flicker_light(colour, config.light_intensity);
    let light_tween = Tween::yoyo_forever(light.intensity, 0.0, config.half_period_secs);

    commands
        .entity(hook)
        .insert((
            Flicker,
            MaterialOpacityTween {
                tween: Tween::yoyo_forever(1.0, config.opacity_floor, config.half_period_secs),
                material,
            },
        ))
        .with_child((light, Transform::IDENTITY, LightIntensityTween(light_tween)));

    debug!(
        "Flicker attached to '{}' across {} mesh(es)",
        config.name,
        meshes.len()
    );
}
