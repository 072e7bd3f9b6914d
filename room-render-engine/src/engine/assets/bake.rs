use crate::engine::assets::room_assets::RoomAssets;
use crate::engine::assets::scene_manifest::BakeVariant;
use bevy::prelude::*;

/// Currently displayed bake variant.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct BakeState {
    pub active: BakeVariant,
    /// Set once a control picks a variant; the manifest's initial variant
    /// no longer applies after that.
    pub user_selected: bool,
}

impl BakeState {
    /// Adopt the manifest's initial variant unless a control already chose one.
    pub fn seed(&mut self, initial: BakeVariant) {
        if !self.user_selected {
            self.active = initial;
        }
    }

    /// Record an explicit choice. Returns true when the variant changed.
    pub fn select(&mut self, variant: BakeVariant) -> bool {
        self.user_selected = true;
        let changed = self.active != variant;
        self.active = variant;
        changed
    }
}

/// Material for baked meshes: the texture already carries all lighting, so the
/// surface is fully rough and non-metallic.
pub fn create_bake_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

/// Point the shared bake material at the texture for `variant`.
/// Returns false when the material has not been created yet.
pub fn apply_bake_variant(
    materials: &mut Assets<StandardMaterial>,
    assets: &RoomAssets,
    variant: BakeVariant,
) -> bool {
    let Some(material) = materials.get_mut(&assets.bake_material) else {
        return false;
    };
    material.base_color_texture = Some(assets.bake_texture(variant).clone());
    true
}
