//! Per-frame animation of the room's named hooks.
//!
//! Spinners rotate logos continuously; flickers pulse emissive panels and
//! their point lights through scalar tweens.

use crate::engine::core::app_state::AppState;
use bevy::prelude::*;

/// Emissive panel material, point light and their yoyo tweens.
pub mod flicker;

/// Constant-rate rotation about a local axis.
pub mod spinner;

/// Scalar tween with easing and loop modes, plus light and opacity drivers.
pub mod tween;

/// Global pause switch for every spinner and tween.
#[derive(Resource, Debug, Default)]
pub struct AnimationControl {
    pub paused: bool,
}

pub struct RoomAnimationPlugin;

impl Plugin for RoomAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationControl>().add_systems(
            Update,
            (
                spinner::spin_system,
                tween::tween_light_intensity_system,
                tween::tween_material_opacity_system,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}
