use crate::engine::animation::AnimationControl;
use crate::engine::assets::bake::{BakeState, apply_bake_variant};
use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::assets::scene_manifest::BakeVariant;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Requested change to the running scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneControl {
    SetBakeVariant(BakeVariant),
    ToggleBakeVariant,
    SetAnimationPaused(bool),
    ToggleAnimationPaused,
}

/// Source of a control request for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    Rpc,
    Keyboard,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SceneControlEvent {
    pub control: SceneControl,
    pub source: ControlSource,
}

pub fn handle_scene_control_events(
    mut events: EventReader<SceneControlEvent>,
    mut bake_state: ResMut<BakeState>,
    mut animation: ResMut<AnimationControl>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<RoomAssets>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match event.control {
            SceneControl::SetBakeVariant(variant) => {
                switch_bake(&mut bake_state, &mut materials, &assets, &mut rpc_interface, variant);
            }
            SceneControl::ToggleBakeVariant => {
                let variant = bake_state.active.toggled();
                switch_bake(&mut bake_state, &mut materials, &assets, &mut rpc_interface, variant);
            }
            SceneControl::SetAnimationPaused(paused) => {
                set_paused(&mut animation, &mut rpc_interface, paused);
            }
            SceneControl::ToggleAnimationPaused => {
                let paused = !animation.paused;
                set_paused(&mut animation, &mut rpc_interface, paused);
            }
        }
        debug!("Scene control {:?} via {:?}", event.control, event.source);
    }
}

fn switch_bake(
    bake_state: &mut BakeState,
    materials: &mut Assets<StandardMaterial>,
    assets: &RoomAssets,
    rpc_interface: &mut WebRpcInterface,
    variant: BakeVariant,
) {
    if !bake_state.select(variant) {
        return;
    }
    // Before the room spawns only the state changes; the material is built from it.
    if apply_bake_variant(materials, assets, variant) {
        info!("Bake switched to {}", variant.as_str());
    }
    rpc_interface.send_notification(
        "bake_variant_changed",
        serde_json::json!({ "variant": variant.as_str() }),
    );
}

fn set_paused(animation: &mut AnimationControl, rpc_interface: &mut WebRpcInterface, paused: bool) {
    if animation.paused == paused {
        return;
    }
    animation.paused = paused;
    info!("Animations {}", if paused { "paused" } else { "resumed" });
    rpc_interface.send_notification(
        "animation_paused_changed",
        serde_json::json!({ "paused": paused }),
    );
}

/// Native shortcuts: B toggles the bake, Space pauses animations.
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut control_events: EventWriter<SceneControlEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyB) {
        control_events.write(SceneControlEvent {
            control: SceneControl::ToggleBakeVariant,
            source: ControlSource::Keyboard,
        });
    }
    if keyboard.just_pressed(KeyCode::Space) {
        control_events.write(SceneControlEvent {
            control: SceneControl::ToggleAnimationPaused,
            source: ControlSource::Keyboard,
        });
    }
}
