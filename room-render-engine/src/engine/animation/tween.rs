//! Scalar tweens for light intensity and material opacity.
//!
//! A [`Tween`] interpolates a single `f32` between two values over a duration,
//! shaped by an [`Easing`] curve and repeated according to its [`LoopMode`].
//! Components wrap a tween together with its target:
//! - [`LightIntensityTween`] drives the [`PointLight`] on the same entity
//! - [`MaterialOpacityTween`] drives the alpha of a [`StandardMaterial`] asset

use crate::engine::animation::AnimationControl;
use bevy::color::Alpha;
use bevy::prelude::*;

/// Determines how a tween behaves when it reaches either end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once and stop.
    Once,
    /// Restart from the beginning when finished.
    Loop,
    /// Reverse direction when reaching either end.
    Yoyo,
}

/// Easing functions applied to normalised time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineInOut,
}

/// Apply an easing function to a normalised time value.
///
/// The input `t` is clamped to [0.0, 1.0] before the curve is applied.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::SineInOut => 0.5 * (1.0 - (std::f32::consts::PI * t).cos()),
    }
}

pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolates a scalar from `from` to `to` over `duration` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration of one pass in seconds.
    pub duration: f32,
    pub easing: Easing,
    pub loop_mode: LoopMode,
    /// Passes left after the current one; `None` repeats forever.
    /// Ignored in [`LoopMode::Once`].
    pub repeat: Option<u32>,
    pub playing: bool,
    /// Current time within the pass.
    pub time: f32,
    /// Direction of playback (true = forward).
    pub forward: bool,
}

impl Tween {
    /// Defaults to a quadratic ease-out played once.
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::QuadOut,
            loop_mode: LoopMode::Once,
            repeat: None,
            playing: true,
            time: 0.0,
            forward: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Infinite back-and-forth, the shape used by the panel flicker.
    pub fn yoyo_forever(from: f32, to: f32, duration: f32) -> Self {
        Self::new(from, to, duration).with_loop_mode(LoopMode::Yoyo)
    }

    /// Normalised position within the current pass.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f32 {
        lerp_f32(self.from, self.to, ease(self.easing, self.progress()))
    }

    /// Advance tween time by `dt` seconds, handling looping and completion.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        if self.duration <= 0.0 {
            self.time = 0.0;
            self.playing = false;
            return;
        }

        let dir = if self.forward { 1.0 } else { -1.0 };
        self.time += dt.max(0.0) * dir;

        let finished_forward = self.forward && self.time >= self.duration;
        let finished_backward = !self.forward && self.time <= 0.0;
        if !finished_forward && !finished_backward {
            return;
        }

        if self.loop_mode != LoopMode::Once {
            match self.repeat {
                Some(0) => {
                    self.playing = false;
                    self.time = self.time.clamp(0.0, self.duration);
                    return;
                }
                Some(left) => self.repeat = Some(left - 1),
                None => {}
            }
        }

        match self.loop_mode {
            LoopMode::Once => {
                self.playing = false;
                self.time = self.time.clamp(0.0, self.duration);
            }
            LoopMode::Loop => {
                // Carry the overshoot into the next pass.
                self.time = if finished_forward {
                    self.time - self.duration
                } else {
                    self.time + self.duration
                }
                .clamp(0.0, self.duration);
            }
            LoopMode::Yoyo => {
                self.forward = !self.forward;
                self.time = if finished_forward {
                    2.0 * self.duration - self.time
                } else {
                    -self.time
                }
                .clamp(0.0, self.duration);
            }
        }
    }
}

/// Animates the intensity of the [`PointLight`] on the same entity.
#[derive(Component, Clone, Debug)]
pub struct LightIntensityTween(pub Tween);

/// Animates the alpha of a material asset.
#[derive(Component, Clone, Debug)]
pub struct MaterialOpacityTween {
    pub tween: Tween,
    pub material: Handle<StandardMaterial>,
}

pub fn tween_light_intensity_system(
    time: Res<Time>,
    control: Res<AnimationControl>,
    mut query: Query<(&mut PointLight, &mut LightIntensityTween)>,
) {
    if control.paused {
        return;
    }
    let dt = time.delta_secs();
    for (mut light, mut tween) in query.iter_mut() {
        if !tween.0.playing {
            continue;
        }
        tween.0.advance(dt);
        light.intensity = tween.0.value();
    }
}

pub fn tween_material_opacity_system(
    time: Res<Time>,
    control: Res<AnimationControl>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<&mut MaterialOpacityTween>,
) {
    if control.paused {
        return;
    }
    let dt = time.delta_secs();
    for mut opacity in query.iter_mut() {
        if !opacity.tween.playing {
            continue;
        }
        opacity.tween.advance(dt);
        let alpha = opacity.tween.value();
        if let Some(material) = materials.get_mut(&opacity.material) {
            material.base_color = material.base_color.with_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    const ALL_EASINGS: [Easing; 8] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
    ];

    fn world_with_delta(secs: f32) -> World {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs_f32(secs));
        world.insert_resource(time);
        world.init_resource::<AnimationControl>();
        world
    }

    #[test]
    fn easings_hit_both_endpoints() {
        for easing in ALL_EASINGS {
            assert!(approx_eq(ease(easing, 0.0), 0.0), "{:?} at 0", easing);
            assert!(approx_eq(ease(easing, 1.0), 1.0), "{:?} at 1", easing);
            assert!(approx_eq(ease(easing, -1.0), 0.0), "{:?} below 0", easing);
            assert!(approx_eq(ease(easing, 2.0), 1.0), "{:?} above 1", easing);
        }
    }

    #[test]
    fn easings_are_monotonic() {
        for easing in ALL_EASINGS {
            let mut prev = ease(easing, 0.0);
            for i in 1..=100 {
                let curr = ease(easing, i as f32 / 100.0);
                assert!(curr >= prev - EPSILON, "{:?} not monotonic at step {}", easing, i);
                prev = curr;
            }
        }
    }

    #[test]
    fn known_midpoints() {
        assert!(approx_eq(ease(Easing::QuadOut, 0.5), 0.75));
        assert!(approx_eq(ease(Easing::CubicIn, 0.5), 0.125));
        assert!(approx_eq(ease(Easing::SineInOut, 0.5), 0.5));
    }

    #[test]
    fn new_tween_defaults_to_quad_out_once() {
        let tween = Tween::new(1.0, 0.0, 1.5);
        assert_eq!(tween.easing, Easing::QuadOut);
        assert_eq!(tween.loop_mode, LoopMode::Once);
        assert_eq!(tween.repeat, None);
        assert!(tween.playing);
        assert!(approx_eq(tween.value(), 1.0));
    }

    #[test]
    fn once_stops_and_clamps_at_end() {
        let mut tween = Tween::new(0.0, 10.0, 1.0).with_easing(Easing::Linear);
        tween.advance(0.4);
        assert!(approx_eq(tween.value(), 4.0));
        tween.advance(0.8);
        assert!(!tween.playing);
        assert!(approx_eq(tween.time, 1.0));
        assert!(approx_eq(tween.value(), 10.0));
    }

    #[test]
    fn loop_carries_overshoot_into_next_pass() {
        let mut tween = Tween::new(0.0, 1.0, 1.0)
            .with_easing(Easing::Linear)
            .with_loop_mode(LoopMode::Loop);
        tween.advance(1.25);
        assert!(tween.playing);
        assert!(tween.forward);
        assert!(approx_eq(tween.time, 0.25));
    }

    #[test]
    fn yoyo_reflects_at_both_ends() {
        let mut tween = Tween::yoyo_forever(1.0, 0.0, 1.5).with_easing(Easing::Linear);

        tween.advance(1.75);
        assert!(!tween.forward);
        assert!(approx_eq(tween.time, 1.25));

        tween.advance(1.5);
        assert!(tween.forward);
        assert!(approx_eq(tween.time, 0.25));
        assert!(tween.playing);
    }

    #[test]
    fn yoyo_forever_never_finishes() {
        let mut tween = Tween::yoyo_forever(1.5, 0.0, 1.5);
        for _ in 0..10_000 {
            tween.advance(0.016);
        }
        assert!(tween.playing);
        assert!(tween.value() >= 0.0 && tween.value() <= 1.5);
    }

    #[test]
    fn finite_repeat_stops_after_counted_passes() {
        let mut tween = Tween::new(0.0, 1.0, 1.0)
            .with_loop_mode(LoopMode::Yoyo)
            .with_repeat(1);

        tween.advance(1.0);
        assert!(tween.playing);
        assert_eq!(tween.repeat, Some(0));

        tween.advance(1.0);
        assert!(!tween.playing);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tween = Tween::new(0.0, 5.0, 0.0);
        tween.advance(0.1);
        assert!(!tween.playing);
        assert!(approx_eq(tween.value(), 5.0));
    }

    #[test]
    fn light_system_drives_point_light_intensity() {
        let mut world = world_with_delta(0.75);
        let tween = Tween::yoyo_forever(100.0, 0.0, 1.5).with_easing(Easing::Linear);
        let light = world
            .spawn((
                PointLight {
                    intensity: 100.0,
                    ..default()
                },
                LightIntensityTween(tween),
            ))
            .id();

        world.run_system_once(tween_light_intensity_system).unwrap();

        let intensity = world.get::<PointLight>(light).unwrap().intensity;
        assert!(approx_eq(intensity, 50.0));
    }

    #[test]
    fn paused_control_freezes_light() {
        let mut world = world_with_delta(0.75);
        world.resource_mut::<AnimationControl>().paused = true;
        let light = world
            .spawn((
                PointLight {
                    intensity: 100.0,
                    ..default()
                },
                LightIntensityTween(Tween::yoyo_forever(100.0, 0.0, 1.5)),
            ))
            .id();

        world.run_system_once(tween_light_intensity_system).unwrap();

        assert!(approx_eq(world.get::<PointLight>(light).unwrap().intensity, 100.0));
    }

    #[test]
    fn opacity_system_updates_material_alpha() {
        let mut world = world_with_delta(1.5);
        let mut materials = Assets::<StandardMaterial>::default();
        let material = materials.add(StandardMaterial {
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        world.insert_resource(materials);
        world.spawn(MaterialOpacityTween {
            tween: Tween::yoyo_forever(1.0, 0.2, 1.5),
            material: material.clone(),
        });

        world.run_system_once(tween_material_opacity_system).unwrap();

        let materials = world.resource::<Assets<StandardMaterial>>();
        let alpha = materials.get(&material).unwrap().base_color.alpha();
        assert!(approx_eq(alpha, 0.2));
    }
}
