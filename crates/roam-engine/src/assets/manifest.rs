use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::assets::error::AssetError;
use crate::components::animation::DEFAULT_FPS;

/// Asset manifest describing atlases, sprite sheets and named sprites.
/// Loaded from a JSON document at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Sprite sheets with their animations, by name.
    #[serde(default)]
    pub sheets: HashMap<String, SheetDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "spritesheet").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file.
    pub path: String,
}

/// An atlas sliced into `cols × rows` equal frames, with named animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    pub cols: u32,
    pub rows: u32,
    #[serde(default)]
    pub anims: HashMap<String, AnimDescriptor>,
}

impl SheetDescriptor {
    /// Total number of frames on the sheet.
    pub fn frame_count(&self) -> u32 {
        self.cols * self.rows
    }
}

/// A sheet animation: either one still frame or an inclusive frame range.
///
/// ```json
/// "walk-down-idle": 0,
/// "walk-down": { "from": 0, "to": 3, "loop": true, "speed": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimDescriptor {
    Single(u32),
    Range {
        from: u32,
        to: u32,
        #[serde(default, rename = "loop")]
        looping: bool,
        /// Frames per second.
        #[serde(default = "default_speed")]
        speed: f32,
    },
}

impl AnimDescriptor {
    /// Highest frame index the animation touches.
    pub fn max_frame(&self) -> u32 {
        match *self {
            AnimDescriptor::Single(frame) => frame,
            AnimDescriptor::Range { from, to, .. } => from.max(to),
        }
    }

    /// First frame shown when the animation starts.
    pub fn first_frame(&self) -> u32 {
        match *self {
            AnimDescriptor::Single(frame) => frame,
            AnimDescriptor::Range { from, .. } => from,
        }
    }
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

fn default_speed() -> f32 {
    DEFAULT_FPS
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "atlases": [],
            "sounds": {
                "meow": { "path": "meow.mp3", "event_id": 1 },
                "bg_music": { "path": "music.ogg" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["meow"].event_id, Some(1));
        assert_eq!(manifest.sounds["bg_music"].event_id, None);
    }

    #[test]
    fn parse_sheet_with_single_and_range_anims() {
        let json = r#"{
            "atlases": [
                { "name": "player", "cols": 4, "rows": 8, "path": "player.png" }
            ],
            "sheets": {
                "player": {
                    "atlas": 0, "cols": 4, "rows": 8,
                    "anims": {
                        "walk-down-idle": 0,
                        "walk-down": { "from": 0, "to": 3, "loop": true, "speed": 8 },
                        "wave": { "from": 4, "to": 7 }
                    }
                }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let sheet = &manifest.sheets["player"];
        assert_eq!(sheet.frame_count(), 32);
        assert_eq!(sheet.anims["walk-down-idle"], AnimDescriptor::Single(0));
        assert_eq!(
            sheet.anims["walk-down"],
            AnimDescriptor::Range { from: 0, to: 3, looping: true, speed: 8.0 }
        );
        match sheet.anims["wave"] {
            AnimDescriptor::Range { looping, speed, .. } => {
                assert!(!looping);
                assert_eq!(speed, DEFAULT_FPS);
            }
            ref other => panic!("expected Range, got {:?}", other),
        }
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = AssetManifest::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }
}
