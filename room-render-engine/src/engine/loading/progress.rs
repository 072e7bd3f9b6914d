use bevy::prelude::*;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLoadStatus {
    Pending,
    Loaded,
    Failed(String),
}

impl AssetLoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Loaded => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub asset_states: Vec<(String, AssetLoadStatus)>,
    pub model_loaded: bool,
    pub textures_loaded: bool,
    pub room_spawned: bool,
    pub room_dressed: bool,
    pub hooks_found: Vec<String>,
    pub hooks_missing: Vec<String>,
    pub error: Option<String>,
}

impl LoadingProgress {
    /// Completed steps out of manifest, three assets and dressing.
    pub fn fraction(&self) -> f32 {
        let loaded_assets = self
            .asset_states
            .iter()
            .filter(|(_, status)| *status == AssetLoadStatus::Loaded)
            .count();
        let done = usize::from(self.manifest_loaded) + loaded_assets + usize::from(self.room_dressed);
        done as f32 / 5.0
    }

    pub fn to_json(&self, state: &str) -> Value {
        let assets: Vec<Value> = self
            .asset_states
            .iter()
            .map(|(name, status)| json!({ "name": name, "state": status.as_str() }))
            .collect();
        json!({
            "state": state,
            "assets": assets,
            "fraction": self.fraction(),
            "error": self.error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_counts_each_milestone() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.fraction(), 0.0);

        progress.manifest_loaded = true;
        progress.asset_states = vec![
            ("Room model".to_string(), AssetLoadStatus::Loaded),
            ("Night bake".to_string(), AssetLoadStatus::Pending),
            ("Day bake".to_string(), AssetLoadStatus::Loaded),
        ];
        assert!((progress.fraction() - 0.6).abs() < 1e-6);

        progress.asset_states[1].1 = AssetLoadStatus::Loaded;
        progress.room_dressed = true;
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn json_lists_asset_states_and_error() {
        let progress = LoadingProgress {
            asset_states: vec![(
                "Night bake".to_string(),
                AssetLoadStatus::Failed("404".to_string()),
            )],
            error: Some("Night bake failed to load: 404".to_string()),
            ..default()
        };
        let value = progress.to_json("failed");
        assert_eq!(value["state"], "failed");
        assert_eq!(value["assets"][0]["name"], "Night bake");
        assert_eq!(value["assets"][0]["state"], "failed");
        assert_eq!(value["error"], "Night bake failed to load: 404");
    }
}
