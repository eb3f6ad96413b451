use std::collections::HashMap;
use crate::assets::error::AssetError;
use crate::assets::manifest::{AnimDescriptor, AssetManifest, SheetDescriptor};
use crate::components::animation::{AnimationComponent, AnimationDef};
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Registry of named sprites and sheets, built from an AssetManifest.
/// Sheets are validated once here so game code can build animations by name.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
    sheets: HashMap<String, SheetDescriptor>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest, checking every sheet
    /// against its atlas and frame count.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            sprites.insert(
                name.clone(),
                SpriteComponent::cell(AtlasId(desc.atlas), desc.col, desc.row),
            );
        }

        for (name, sheet) in &manifest.sheets {
            validate_sheet(name, sheet, manifest.atlases.len())?;
        }

        Ok(Self {
            sprites,
            sheets: manifest.sheets.clone(),
        })
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Whether a sheet with this name was loaded.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// A sprite showing the first frame of `anim` on `sheet`.
    pub fn sheet_sprite(&self, sheet: &str, anim: &str) -> Result<SpriteComponent, AssetError> {
        let desc = self.sheet(sheet)?;
        let frame = desc.anims.get(anim).map(AnimDescriptor::first_frame).unwrap_or(0);
        Ok(SpriteComponent::cell(
            AtlasId(desc.atlas),
            frame % desc.cols,
            frame / desc.cols,
        ))
    }

    /// Build an animation component holding every animation of `sheet`,
    /// starting on `initial`.
    pub fn animation(&self, sheet: &str, initial: &str) -> Result<AnimationComponent, AssetError> {
        let desc = self.sheet(sheet)?;
        let animations = desc
            .anims
            .iter()
            .map(|(name, anim)| (name.clone(), anim_def(desc.cols, anim)))
            .collect();
        Ok(AnimationComponent::new(animations, initial))
    }

    fn sheet(&self, name: &str) -> Result<&SheetDescriptor, AssetError> {
        self.sheets
            .get(name)
            .ok_or_else(|| AssetError::UnknownSheet(name.to_string()))
    }
}

fn validate_sheet(name: &str, sheet: &SheetDescriptor, atlas_count: usize) -> Result<(), AssetError> {
    if sheet.atlas as usize >= atlas_count {
        return Err(AssetError::UnknownAtlas {
            sheet: name.to_string(),
            atlas: sheet.atlas,
        });
    }
    let count = sheet.frame_count();
    if count == 0 {
        return Err(AssetError::EmptySheet(name.to_string()));
    }
    for (anim, desc) in &sheet.anims {
        let frame = desc.max_frame();
        if frame >= count {
            return Err(AssetError::FrameOutOfRange {
                sheet: name.to_string(),
                anim: anim.clone(),
                frame,
                count,
            });
        }
    }
    Ok(())
}

fn anim_def(cols: u32, anim: &AnimDescriptor) -> AnimationDef {
    match *anim {
        AnimDescriptor::Single(frame) => AnimationDef::still(cols, frame),
        AnimDescriptor::Range { from, to, looping, speed } => {
            AnimationDef::sheet_range(cols, from, to, speed, looping)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_SHEET: &str = r#"{
        "atlases": [
            { "name": "spritesheet", "cols": 4, "rows": 2, "path": "spritesheet.png" }
        ],
        "sheets": {
            "cat": {
                "atlas": 0, "cols": 4, "rows": 2,
                "anims": {
                    "idle": 0,
                    "sleep": { "from": 4, "to": 7, "loop": true, "speed": 4 }
                }
            }
        },
        "sprites": {
            "table": { "atlas": 0, "col": 3, "row": 1 }
        }
    }"#;

    fn registry(json: &str) -> Result<SpriteRegistry, AssetError> {
        SpriteRegistry::from_manifest(&AssetManifest::from_json(json)?)
    }

    #[test]
    fn loads_sprites_and_sheets() {
        let reg = registry(CAT_SHEET).unwrap();
        let table = reg.get("table").expect("table should exist");
        assert_eq!(table.atlas, AtlasId(0));
        assert_eq!(table.col, 3.0);
        assert_eq!(table.row, 1.0);
        assert!(reg.has_sheet("cat"));
    }

    #[test]
    fn animation_builds_every_named_anim() {
        let reg = registry(CAT_SHEET).unwrap();
        let anim = reg.animation("cat", "sleep").unwrap();
        assert_eq!(anim.current_name(), "sleep");
        assert_eq!(anim.animations.len(), 2);
        let sleep = &anim.animations["sleep"];
        assert_eq!(sleep.frames, vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]);
        assert!(sleep.looping);
        assert!((sleep.frame_duration - 0.25).abs() < 1e-6);
    }

    #[test]
    fn sheet_sprite_starts_on_first_frame() {
        let reg = registry(CAT_SHEET).unwrap();
        let sprite = reg.sheet_sprite("cat", "sleep").unwrap();
        assert_eq!((sprite.col, sprite.row), (0.0, 1.0));
    }

    #[test]
    fn unknown_sheet_is_an_error() {
        let reg = registry(CAT_SHEET).unwrap();
        assert!(matches!(
            reg.animation("dog", "idle"),
            Err(AssetError::UnknownSheet(name)) if name == "dog"
        ));
    }

    #[test]
    fn frame_past_sheet_end_is_rejected() {
        let json = r#"{
            "atlases": [{ "name": "a", "cols": 2, "rows": 2, "path": "a.png" }],
            "sheets": { "s": { "atlas": 0, "cols": 2, "rows": 2, "anims": { "bad": { "from": 1, "to": 4 } } } }
        }"#;
        match registry(json) {
            Err(AssetError::FrameOutOfRange { frame, count, .. }) => {
                assert_eq!(frame, 4);
                assert_eq!(count, 4);
            }
            other => panic!("expected FrameOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn empty_sheet_and_missing_atlas_are_rejected() {
        let empty = r#"{
            "atlases": [{ "name": "a", "cols": 1, "rows": 1, "path": "a.png" }],
            "sheets": { "s": { "atlas": 0, "cols": 0, "rows": 3 } }
        }"#;
        assert!(matches!(registry(empty), Err(AssetError::EmptySheet(_))));

        let no_atlas = r#"{
            "atlases": [],
            "sheets": { "s": { "atlas": 0, "cols": 1, "rows": 1 } }
        }"#;
        assert!(matches!(registry(no_atlas), Err(AssetError::UnknownAtlas { atlas: 0, .. })));
    }
}
