use crate::constants::animation::*;
use crate::constants::path::*;
use crate::constants::render_settings::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Which baked lighting texture the room is wearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BakeVariant {
    #[default]
    Night,
    Day,
}

impl BakeVariant {
    /// Convert string identifier to bake variant for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "night" => Some(Self::Night),
            "day" => Some(Self::Day),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Day => "day",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Night => Self::Day,
            Self::Day => Self::Night,
        }
    }
}

/// Local axis a spinner rotates about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinAxis {
    X,
    #[default]
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    pub night: String,
    pub day: String,
    pub initial: BakeVariant,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            night: BAKE_NIGHT_TEXTURE_PATH.to_string(),
            day: BAKE_DAY_TEXTURE_PATH.to_string(),
            initial: BakeVariant::Night,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub colour: String,
    pub start: f32,
    pub end: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            colour: FOG_COLOUR.to_string(),
            start: FOG_START,
            end: FOG_END,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub colour: String,
    pub intensity: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            colour: AMBIENT_COLOUR.to_string(),
            intensity: AMBIENT_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: CAMERA_POSITION,
            target: CAMERA_TARGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyLightConfig {
    pub enabled: bool,
    pub position: [f32; 3],
    pub intensity: f32,
    pub shadows: bool,
}

impl Default for KeyLightConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            position: KEY_LIGHT_POSITION,
            intensity: KEY_LIGHT_INTENSITY,
            shadows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub enabled: bool,
    pub size: f32,
    pub height: f32,
    pub colour: String,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: FLOOR_SIZE,
            height: FLOOR_HEIGHT,
            colour: "#ffffff".to_string(),
        }
    }
}

/// Named node rotated continuously while the scene runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    pub name: String,
    pub axis: SpinAxis,
    pub step: f32,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            axis: SpinAxis::Y,
            step: LOGO_SPIN_STEP,
        }
    }
}

/// Named node turned into a glowing panel with a pulsing point light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerConfig {
    pub name: String,
    pub colour: String,
    pub emissive_intensity: f32,
    pub light_intensity: f32,
    pub opacity_floor: f32,
    pub half_period_secs: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            colour: FLICKER_COLOUR.to_string(),
            emissive_intensity: FLICKER_EMISSIVE_INTENSITY,
            light_intensity: FLICKER_LIGHT_INTENSITY,
            opacity_floor: FLICKER_OPACITY_FLOOR,
            half_period_secs: FLICKER_HALF_PERIOD_SECS,
        }
    }
}

impl FlickerConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..default()
        }
    }
}

/// Complete scene description as a Bevy asset. Mirrors the JSON structure exactly.
/// Every field falls back to the built-in room defaults when omitted.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
#[serde(default)]
pub struct SceneManifest {
    pub model: String,
    pub bake: BakeConfig,
    pub background: String,
    pub fog: FogConfig,
    pub ambient: AmbientConfig,
    pub camera: CameraConfig,
    pub key_light: KeyLightConfig,
    pub floor: FloorConfig,
    pub spinners: Vec<SpinnerConfig>,
    pub flickers: Vec<FlickerConfig>,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            model: ROOM_MODEL_PATH.to_string(),
            bake: BakeConfig::default(),
            background: BACKGROUND_COLOUR.to_string(),
            fog: FogConfig::default(),
            ambient: AmbientConfig::default(),
            camera: CameraConfig::default(),
            key_light: KeyLightConfig::default(),
            floor: FloorConfig::default(),
            spinners: vec![
                SpinnerConfig {
                    name: "vueLog".to_string(),
                    axis: SpinAxis::Y,
                    step: LOGO_SPIN_STEP,
                },
                SpinnerConfig {
                    name: "reactLog".to_string(),
                    axis: SpinAxis::Z,
                    step: LOGO_SPIN_STEP,
                },
                SpinnerConfig {
                    name: "webpackLog".to_string(),
                    axis: SpinAxis::Z,
                    step: LOGO_SPIN_STEP,
                },
            ],
            flickers: vec![
                FlickerConfig::named("node_button"),
                FlickerConfig::named("node_o"),
            ],
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManifestError {
    #[error("Manifest field '{0}' must not be empty")]
    EmptyPath(&'static str),
    #[error("Invalid colour '{value}' for {field}")]
    InvalidColour { field: String, value: String },
    #[error("Camera field of view must be positive, got {0}")]
    InvalidFov(f32),
    #[error("Camera clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },
    #[error("Fog start {start} is beyond fog end {end}")]
    InvalidFogRange { start: f32, end: f32 },
    #[error("Flicker '{name}' needs a positive half period, got {secs}")]
    InvalidDuration { name: String, secs: f32 },
    #[error("Flicker '{name}' opacity floor {value} is outside [0, 1]")]
    InvalidOpacity { name: String, value: f32 },
    #[error("Hook '{0}' is listed more than once")]
    DuplicateHook(String),
    #[error("Every {0} entry needs a node name")]
    EmptyHookName(&'static str),
}

/// Parse `#rrggbb` (leading `#` optional) into an opaque sRGB colour.
/// Short and alpha-carrying hex forms are rejected.
pub fn parse_colour(field: &str, value: &str) -> Result<Color, ManifestError> {
    let invalid = || ManifestError::InvalidColour {
        field: field.to_string(),
        value: value.to_string(),
    };
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Srgba::hex(digits).map(Color::from).map_err(|_| invalid())
}

impl SceneManifest {
    /// Check every field the loading pipeline relies on.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.model.trim().is_empty() {
            return Err(ManifestError::EmptyPath("model"));
        }
        if self.bake.night.trim().is_empty() {
            return Err(ManifestError::EmptyPath("bake.night"));
        }
        if self.bake.day.trim().is_empty() {
            return Err(ManifestError::EmptyPath("bake.day"));
        }

        parse_colour("background", &self.background)?;
        parse_colour("fog.colour", &self.fog.colour)?;
        parse_colour("ambient.colour", &self.ambient.colour)?;
        parse_colour("floor.colour", &self.floor.colour)?;

        let camera = &self.camera;
        if camera.fov_degrees <= 0.0 || camera.fov_degrees >= 180.0 {
            return Err(ManifestError::InvalidFov(camera.fov_degrees));
        }
        if camera.near <= 0.0 || camera.near >= camera.far {
            return Err(ManifestError::InvalidClipPlanes {
                near: camera.near,
                far: camera.far,
            });
        }
        if self.fog.start > self.fog.end {
            return Err(ManifestError::InvalidFogRange {
                start: self.fog.start,
                end: self.fog.end,
            });
        }

        for flicker in &self.flickers {
            parse_colour(&format!("flickers.{}.colour", flicker.name), &flicker.colour)?;
            if flicker.half_period_secs <= 0.0 {
                return Err(ManifestError::InvalidDuration {
                    name: flicker.name.clone(),
                    secs: flicker.half_period_secs,
                });
            }
            if !(0.0..=1.0).contains(&flicker.opacity_floor) {
                return Err(ManifestError::InvalidOpacity {
                    name: flicker.name.clone(),
                    value: flicker.opacity_floor,
                });
            }
        }

        if self.spinners.iter().any(|s| s.name.trim().is_empty()) {
            return Err(ManifestError::EmptyHookName("spinner"));
        }
        if self.flickers.iter().any(|f| f.name.trim().is_empty()) {
            return Err(ManifestError::EmptyHookName("flicker"));
        }

        let mut seen = HashSet::new();
        for name in self.hook_names() {
            if !seen.insert(name) {
                return Err(ManifestError::DuplicateHook(name.to_string()));
            }
        }

        Ok(())
    }

    /// Names of every node the scene animates.
    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.spinners
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.flickers.iter().map(|f| f.name.as_str()))
    }

    pub fn bake_path(&self, variant: BakeVariant) -> &str {
        match variant {
            BakeVariant::Night => &self.bake.night,
            BakeVariant::Day => &self.bake.day,
        }
    }

    pub fn background_colour(&self) -> Color {
        parse_colour("background", &self.background).unwrap_or(Color::BLACK)
    }

    pub fn fog_colour(&self) -> Color {
        parse_colour("fog.colour", &self.fog.colour).unwrap_or(Color::WHITE)
    }

    pub fn ambient_colour(&self) -> Color {
        parse_colour("ambient.colour", &self.ambient.colour).unwrap_or(Color::WHITE)
    }

    pub fn floor_colour(&self) -> Color {
        parse_colour("floor.colour", &self.floor.colour).unwrap_or(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_room_defaults() {
        let manifest: SceneManifest = serde_json::from_str("{}").unwrap();

        assert_eq!(manifest, SceneManifest::default());
        assert_eq!(manifest.model, "model/room3D.glb");
        assert_eq!(manifest.bake.initial, BakeVariant::Night);
        assert_eq!(manifest.camera.position, [8.0, 8.0, 8.0]);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn shipped_manifest_matches_defaults() {
        let manifest: SceneManifest =
            serde_json::from_str(include_str!("../../../assets/room.scene.json")).unwrap();
        assert_eq!(manifest, SceneManifest::default());
    }

    #[test]
    fn default_hooks_cover_logos_and_panels() {
        let manifest = SceneManifest::default();
        let names: Vec<&str> = manifest.hook_names().collect();
        assert_eq!(
            names,
            vec!["vueLog", "reactLog", "webpackLog", "node_button", "node_o"]
        );
        assert_eq!(manifest.spinners[0].axis, SpinAxis::Y);
        assert_eq!(manifest.spinners[1].axis, SpinAxis::Z);
    }

    #[test]
    fn partial_entries_fill_in_defaults() {
        let json = r##"{
            "spinners": [{ "name": "rustLog", "axis": "x" }],
            "flickers": [{ "name": "sign", "colour": "#ff0000" }],
            "fog": { "end": 50.0 }
        }"##;
        let manifest: SceneManifest = serde_json::from_str(json).unwrap();

        assert_eq!(manifest.spinners.len(), 1);
        assert_eq!(manifest.spinners[0].step, LOGO_SPIN_STEP);
        assert_eq!(manifest.flickers[0].half_period_secs, 1.5);
        assert_eq!(manifest.flickers[0].opacity_floor, 0.2);
        assert_eq!(manifest.fog.start, 5.0);
        assert_eq!(manifest.fog.end, 50.0);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn unknown_axis_fails_to_parse() {
        let json = r#"{ "spinners": [{ "name": "a", "axis": "w" }] }"#;
        assert!(serde_json::from_str::<SceneManifest>(json).is_err());
    }

    #[test]
    fn rejects_bad_colour() {
        let manifest = SceneManifest {
            background: "#zzzzzz".to_string(),
            ..default()
        };
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::InvalidColour {
                field: "background".to_string(),
                value: "#zzzzzz".to_string(),
            })
        );
    }

    #[test]
    fn rejects_short_and_alpha_hex_colours() {
        for value in ["#fff", "#ffff", "#33333300", "333"] {
            assert!(
                parse_colour("background", value).is_err(),
                "{value} should be rejected"
            );
        }

        let manifest = SceneManifest {
            background: "#33333300".to_string(),
            ..default()
        };
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidColour { .. })
        ));
    }

    #[test]
    fn spinner_entry_with_only_a_name_uses_defaults() {
        let json = r#"{ "spinners": [{ "name": "vueLog" }] }"#;
        let manifest: SceneManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.spinners[0].axis, SpinAxis::Y);
        assert_eq!(manifest.spinners[0].step, LOGO_SPIN_STEP);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn rejects_hooks_without_names() {
        let json = r##"{ "flickers": [{ "colour": "#ff0000" }] }"##;
        let manifest: SceneManifest = serde_json::from_str(json).unwrap();
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::EmptyHookName("flicker"))
        );

        let json = r#"{ "spinners": [{ "axis": "x" }] }"#;
        let manifest: SceneManifest = serde_json::from_str(json).unwrap();
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::EmptyHookName("spinner"))
        );
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let mut manifest = SceneManifest::default();
        manifest.camera.near = 10.0;
        manifest.camera.far = 1.0;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidClipPlanes { .. })
        ));
    }

    #[test]
    fn rejects_inverted_fog_range() {
        let mut manifest = SceneManifest::default();
        manifest.fog.start = 20.0;
        manifest.fog.end = 10.0;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidFogRange { .. })
        ));
    }

    #[test]
    fn rejects_empty_model_path() {
        let manifest = SceneManifest {
            model: "  ".to_string(),
            ..default()
        };
        assert_eq!(manifest.validate(), Err(ManifestError::EmptyPath("model")));
    }

    #[test]
    fn rejects_flicker_with_zero_period_or_bad_opacity() {
        let mut manifest = SceneManifest::default();
        manifest.flickers[0].half_period_secs = 0.0;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidDuration { .. })
        ));

        let mut manifest = SceneManifest::default();
        manifest.flickers[1].opacity_floor = 1.5;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidOpacity { .. })
        ));
    }

    #[test]
    fn rejects_hook_listed_twice() {
        let mut manifest = SceneManifest::default();
        manifest.flickers.push(FlickerConfig::named("vueLog"));
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::DuplicateHook("vueLog".to_string()))
        );
    }

    #[test]
    fn parses_colour_with_and_without_hash() {
        let with_hash = parse_colour("c", "#08a85e").unwrap();
        let without_hash = parse_colour("c", "08a85e").unwrap();
        assert_eq!(with_hash, without_hash);
        assert_eq!(with_hash, Color::srgb_u8(0x08, 0xa8, 0x5e));
    }

    #[test]
    fn bake_variant_round_trips_through_strings() {
        assert_eq!(BakeVariant::from_string("DAY"), Some(BakeVariant::Day));
        assert_eq!(BakeVariant::from_string("dusk"), None);
        assert_eq!(BakeVariant::Night.toggled(), BakeVariant::Day);
        assert_eq!(BakeVariant::Day.as_str(), "day");

        let manifest = SceneManifest::default();
        assert_eq!(manifest.bake_path(BakeVariant::Day), "model/bake-day.jpg");
    }
}
