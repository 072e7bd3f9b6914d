use crate::engine::assets::scene_manifest::BakeVariant;
use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Handles for every asset the room needs before it can be revealed.
#[derive(Resource, Default)]
pub struct RoomAssets {
    pub model: Handle<Gltf>,
    pub bake_night: Handle<Image>,
    pub bake_day: Handle<Image>,
    /// Single material shared by every baked mesh in the room.
    pub bake_material: Handle<StandardMaterial>,
}

impl RoomAssets {
    pub fn bake_texture(&self, variant: BakeVariant) -> &Handle<Image> {
        match variant {
            BakeVariant::Night => &self.bake_night,
            BakeVariant::Day => &self.bake_day,
        }
    }
}
