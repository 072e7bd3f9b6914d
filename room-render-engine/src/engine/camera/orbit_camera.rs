use crate::engine::assets::scene_manifest::CameraConfig;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;

const PITCH_LIMIT: f32 = 1.55;
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 500.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Rotation about world Y; zero puts the eye on +Z of the target.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane.
    pub pitch: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub rotate_sensitivity: f32,
    /// Radius multiplier per wheel line.
    pub zoom_factor: f32,
    pub smoothing: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    /// Derive orbit parameters from an eye position looking at `target`.
    /// Radius and pitch are clamped to the controller's limits, so an eye
    /// outside them is pulled in along the same direction.
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius: distance.clamp(MIN_RADIUS, MAX_RADIUS),
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-PITCH_LIMIT, PITCH_LIMIT),
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            rotate_sensitivity: 0.005,
            zoom_factor: 0.95,
            smoothing: 12.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::from_eye(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
        )
    }

    pub fn eye_position(&self) -> Vec3 {
        let horizontal = self.radius * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.radius * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    pub fn pose(&self) -> Transform {
        Transform {
            translation: self.eye_position(),
            rotation: self.rotation(),
            ..default()
        }
    }

    /// Rotate around the target by a mouse delta in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.rotate_sensitivity;
        self.pitch = (self.pitch + delta.y * self.rotate_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Dolly toward the target; positive `lines` move closer.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * self.zoom_factor.powf(lines)).clamp(self.min_radius, self.max_radius);
    }

    /// Slide the target in the view plane so the scene follows the cursor.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov: f32) {
        let world_per_pixel = 2.0 * self.radius * (fov * 0.5).tan() / viewport_height.max(1.0);
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.target += (-delta.x * right + delta.y * up) * world_per_pixel;
    }
}

pub fn orbit_camera_controller(
    mut camera_query: Query<(&mut Transform, &Projection, &Camera), With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok((mut camera_transform, projection, camera)) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.orbit(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            let viewport_height = camera
                .logical_viewport_size()
                .map(|size| size.y)
                .unwrap_or(1.0);
            let fov = match projection {
                Projection::Perspective(perspective) => perspective.fov,
                _ => std::f32::consts::FRAC_PI_4,
            };
            orbit.pan(mouse_delta, viewport_height, fov);
        }
    }

    let scroll_lines: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll_lines.abs() > f32::EPSILON {
        orbit.zoom(scroll_lines);
    }

    let target = orbit.pose();
    let lerp_speed = (orbit.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}
