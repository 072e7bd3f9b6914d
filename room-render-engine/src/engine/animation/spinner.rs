use crate::constants::animation::REFERENCE_FRAME_RATE;
use crate::engine::animation::AnimationControl;
use crate::engine::assets::scene_manifest::{SpinAxis, SpinnerConfig};
use bevy::prelude::*;

/// Continuous rotation about one local axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    pub axis: SpinAxis,
    /// Radians per reference frame.
    pub step: f32,
}

impl Spinner {
    pub fn from_config(config: &SpinnerConfig) -> Self {
        Self {
            axis: config.axis,
            step: config.step,
        }
    }

    /// Angle to turn for a frame lasting `delta_secs`.
    pub fn angle_for(&self, delta_secs: f32) -> f32 {
        self.step * delta_secs * REFERENCE_FRAME_RATE
    }
}

pub fn spin_system(
    time: Res<Time>,
    control: Res<AnimationControl>,
    mut query: Query<(&mut Transform, &Spinner)>,
) {
    if control.paused {
        return;
    }
    let dt = time.delta_secs();
    for (mut transform, spinner) in query.iter_mut() {
        let angle = spinner.angle_for(dt);
        match spinner.axis {
            SpinAxis::X => transform.rotate_local_x(angle),
            SpinAxis::Y => transform.rotate_local_y(angle),
            SpinAxis::Z => transform.rotate_local_z(angle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn world_with_delta(secs: f32) -> World {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs_f32(secs));
        world.insert_resource(time);
        world.init_resource::<AnimationControl>();
        world
    }

    #[test]
    fn one_reference_frame_turns_by_one_step() {
        let spinner = Spinner {
            axis: SpinAxis::Y,
            step: 0.005,
        };
        assert!((spinner.angle_for(1.0 / 60.0) - 0.005).abs() < 1e-6);
        assert!((spinner.angle_for(1.0) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn spins_about_configured_local_axis() {
        let mut world = world_with_delta(1.0);
        let about_y = world
            .spawn((
                Transform::default(),
                Spinner {
                    axis: SpinAxis::Y,
                    step: 0.005,
                },
            ))
            .id();
        let about_z = world
            .spawn((
                Transform::default(),
                Spinner {
                    axis: SpinAxis::Z,
                    step: 0.005,
                },
            ))
            .id();

        world.run_system_once(spin_system).unwrap();

        let y_rot = world.get::<Transform>(about_y).unwrap().rotation;
        let (axis, angle) = y_rot.to_axis_angle();
        assert!((angle - 0.3).abs() < 1e-4);
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-4));

        let z_rot = world.get::<Transform>(about_z).unwrap().rotation;
        let (axis, _) = z_rot.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Z, 1e-4));
    }

    #[test]
    fn paused_spinners_hold_still() {
        let mut world = world_with_delta(1.0);
        world.resource_mut::<AnimationControl>().paused = true;
        let entity = world
            .spawn((
                Transform::default(),
                Spinner {
                    axis: SpinAxis::X,
                    step: 0.005,
                },
            ))
            .id();

        world.run_system_once(spin_system).unwrap();

        assert_eq!(world.get::<Transform>(entity).unwrap().rotation, Quat::IDENTITY);
    }
}
