pub const SCENE_MANIFEST_PATH: &str = "room.scene.json";
pub const ROOM_MODEL_PATH: &str = "model/room3D.glb";
pub const BAKE_NIGHT_TEXTURE_PATH: &str = "model/bake-night.jpg";
pub const BAKE_DAY_TEXTURE_PATH: &str = "model/bake-day.jpg";
