//! Atlas definition format: a packed sheet size, named sprite
//! sub-rectangles, and named animation frames.
//!
//! The definition is consumed as JSON and treated as read-only after
//! loading. Every loading path validates eagerly, so dangling frame or
//! sprite references surface as typed errors at construction instead of
//! failing at an animation transition thousands of ticks later.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// A named sub-rectangle of the packed sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDef {
    /// Texel offset of the sprite's top-left corner
    pub location: [u32; 2],
    /// Texel size of the sprite
    pub size: [u32; 2],
}

/// One step of an animation: a sprite, how long it stays visible, and the
/// frame that follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDef {
    /// Name of the sprite displayed during this frame
    pub sprite: String,
    /// Display duration, in the same time unit the caller feeds to
    /// `Animator::update` (conventionally milliseconds)
    pub duration: f32,
    /// Name of the successor frame; may point back at this frame for a
    /// single-frame loop
    pub next: String,
}

/// A complete atlas definition.
///
/// `start` names the frame an animator begins on. The maps are keyed by
/// name; declaration order in the source file carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atlas {
    /// Sheet size in texels (width, height)
    pub size: [u32; 2],
    /// Name of the initial frame
    pub start: String,
    /// Named sprite sub-rectangles
    pub sprites: BTreeMap<String, SpriteDef>,
    /// Named animation frames
    pub frames: BTreeMap<String, FrameDef>,
}

impl Atlas {
    /// Parse and validate an atlas from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let atlas: Self = serde_json::from_str(json)?;
        atlas.validate()?;
        Ok(atlas)
    }

    /// Parse and validate an atlas from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let atlas: Self = serde_json::from_reader(reader)?;
        atlas.validate()?;
        Ok(atlas)
    }

    /// Parse and validate an atlas from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validates the atlas for internal consistency.
    ///
    /// Checks that the sheet size is usable, that the sprite and frame maps
    /// are non-empty, that `start` and every cross-reference resolve, that
    /// durations are finite and positive, and that every sprite rectangle
    /// lies within the sheet bounds.
    pub fn validate(&self) -> Result<()> {
        self.validate_size()?;
        self.validate_sprites()?;
        self.validate_frames()?;
        Ok(())
    }

    /// Look up a sprite definition by name.
    pub fn sprite(&self, name: &str) -> Option<&SpriteDef> {
        self.sprites.get(name)
    }

    /// Look up a frame definition by name.
    pub fn frame(&self, name: &str) -> Option<&FrameDef> {
        self.frames.get(name)
    }

    fn validate_size(&self) -> Result<()> {
        let [width, height] = self.size;
        if width == 0 || height == 0 {
            return Err(AtlasError::InvalidSize { width, height });
        }
        Ok(())
    }

    fn validate_sprites(&self) -> Result<()> {
        if self.sprites.is_empty() {
            return Err(AtlasError::NoSprites);
        }

        for (name, sprite) in &self.sprites {
            let fits_x = sprite.location[0].checked_add(sprite.size[0]).is_some_and(|end| end <= self.size[0]);
            let fits_y = sprite.location[1].checked_add(sprite.size[1]).is_some_and(|end| end <= self.size[1]);

            if !fits_x || !fits_y {
                return Err(AtlasError::SpriteOutOfBounds {
                    sprite: name.clone(),
                    location: sprite.location,
                    size: sprite.size,
                    atlas: self.size,
                });
            }
        }

        Ok(())
    }

    fn validate_frames(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AtlasError::NoFrames);
        }

        if !self.frames.contains_key(&self.start) {
            return Err(AtlasError::UnknownStartFrame {
                start: self.start.clone(),
            });
        }

        for (name, frame) in &self.frames {
            if !self.sprites.contains_key(&frame.sprite) {
                return Err(AtlasError::UnknownSprite {
                    frame: name.clone(),
                    sprite: frame.sprite.clone(),
                });
            }

            if !self.frames.contains_key(&frame.next) {
                return Err(AtlasError::UnknownNextFrame {
                    frame: name.clone(),
                    next: frame.next.clone(),
                });
            }

            if !frame.duration.is_finite() || frame.duration <= 0.0 {
                return Err(AtlasError::InvalidDuration {
                    frame: name.clone(),
                    duration: frame.duration,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_frame_atlas_json() -> &'static str {
        r#"{
            "size": [100, 100],
            "start": "f1",
            "sprites": {
                "a": { "location": [0, 0], "size": [10, 10] },
                "b": { "location": [10, 0], "size": [10, 10] }
            },
            "frames": {
                "f1": { "sprite": "a", "duration": 100, "next": "f2" },
                "f2": { "sprite": "b", "duration": 100, "next": "f1" }
            }
        }"#
    }

    #[test]
    fn parses_valid_atlas() {
        let atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();

        assert_eq!(atlas.size, [100, 100]);
        assert_eq!(atlas.start, "f1");
        assert_eq!(atlas.sprite("a").unwrap().size, [10, 10]);
        assert_eq!(atlas.frame("f1").unwrap().next, "f2");
    }

    #[test]
    fn rejects_malformed_json() {
        let result = Atlas::from_json_str("{ not json");
        assert!(matches!(result, Err(AtlasError::Json(_))));
    }

    #[test]
    fn rejects_zero_size() {
        let atlas = Atlas {
            size: [0, 100],
            ..Atlas::from_json_str(two_frame_atlas_json()).unwrap()
        };

        assert!(matches!(
            atlas.validate(),
            Err(AtlasError::InvalidSize { width: 0, height: 100 })
        ));
    }

    #[test]
    fn rejects_empty_sprite_map() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.sprites.clear();

        assert!(matches!(atlas.validate(), Err(AtlasError::NoSprites)));
    }

    #[test]
    fn rejects_empty_frame_map() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.frames.clear();

        assert!(matches!(atlas.validate(), Err(AtlasError::NoFrames)));
    }

    #[test]
    fn rejects_unknown_start_frame() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.start = "missing".to_string();

        let err = atlas.validate().unwrap_err();
        assert!(matches!(err, AtlasError::UnknownStartFrame { start } if start == "missing"));
    }

    #[test]
    fn rejects_dangling_sprite_reference() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.frames.get_mut("f1").unwrap().sprite = "ghost".to_string();

        let err = atlas.validate().unwrap_err();
        assert!(
            matches!(err, AtlasError::UnknownSprite { frame, sprite } if frame == "f1" && sprite == "ghost")
        );
    }

    #[test]
    fn rejects_dangling_next_reference() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.frames.get_mut("f2").unwrap().next = "f3".to_string();

        let err = atlas.validate().unwrap_err();
        assert!(
            matches!(err, AtlasError::UnknownNextFrame { frame, next } if frame == "f2" && next == "f3")
        );
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.frames.get_mut("f1").unwrap().duration = 0.0;

        assert!(matches!(
            atlas.validate(),
            Err(AtlasError::InvalidDuration { duration, .. }) if duration == 0.0
        ));
    }

    #[test]
    fn rejects_non_finite_duration() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.frames.get_mut("f1").unwrap().duration = f32::NAN;

        assert!(matches!(
            atlas.validate(),
            Err(AtlasError::InvalidDuration { frame, .. }) if frame == "f1"
        ));
    }

    #[test]
    fn rejects_sprite_past_atlas_bounds() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.sprites.get_mut("b").unwrap().location = [95, 0];

        let err = atlas.validate().unwrap_err();
        assert!(matches!(err, AtlasError::SpriteOutOfBounds { sprite, .. } if sprite == "b"));
    }

    #[test]
    fn sprite_touching_the_edge_is_in_bounds() {
        let mut atlas = Atlas::from_json_str(two_frame_atlas_json()).unwrap();
        atlas.sprites.get_mut("b").unwrap().location = [90, 90];

        assert!(atlas.validate().is_ok());
    }

    #[test]
    fn single_frame_loop_is_valid() {
        let atlas = Atlas::from_json_str(
            r#"{
                "size": [16, 16],
                "start": "idle",
                "sprites": { "s": { "location": [0, 0], "size": [16, 16] } },
                "frames": { "idle": { "sprite": "s", "duration": 250, "next": "idle" } }
            }"#,
        );

        assert!(atlas.is_ok());
    }
}
