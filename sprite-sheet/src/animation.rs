//! Frame animation state machine over a validated atlas.
//!
//! An [`Animator`] is a finite-state clock: states are frame names, and a
//! transition fires when the time accumulated in the current frame reaches
//! its duration. The UV sub-rectangle transform is only recomputed on a
//! transition, so steady ticks inside one frame cost two float ops.

use log::debug;

use crate::atlas::Atlas;
use crate::error::{AtlasError, Result};

/// Frame data with name references resolved to indices.
#[derive(Debug, Clone)]
struct ResolvedFrame {
    /// Frame name, kept for reporting and lookups
    name: String,
    /// Index into the resolved sprite table
    sprite: usize,
    /// Display duration
    duration: f32,
    /// Index of the successor frame
    next: usize,
}

/// Sprite data with texel coordinates pre-divided by the sheet size.
#[derive(Debug, Clone)]
struct ResolvedSprite {
    /// Texel size of the sprite
    size: [u32; 2],
    /// Sprite footprint as a fraction of the sheet (scale part of the UV
    /// transform)
    uv_scale: [f32; 2],
    /// Sprite origin as a fraction of the sheet (translate part of the UV
    /// transform)
    uv_offset: [f32; 2],
}

/// Animation clock over the frames of a sprite atlas.
///
/// Owned by exactly one caller and driven from a single control flow: the
/// host render loop calls [`update`](Self::update) once per frame with the
/// elapsed time, then reads back [`uv_transform`](Self::uv_transform) and
/// [`sprite_size`](Self::sprite_size) for its uniform uploads.
#[derive(Debug, Clone)]
pub struct Animator {
    /// Sheet size in texels
    sheet_size: [u32; 2],
    sprites: Vec<ResolvedSprite>,
    frames: Vec<ResolvedFrame>,
    /// Index of the current frame
    current: usize,
    /// Time accumulated within the current frame
    frame_time: f32,
    /// UV transform for the current sprite, column-major
    transform: [f32; 16],
}

impl Animator {
    /// Create an animator starting on the atlas's declared start frame.
    ///
    /// The atlas is re-validated here so an animator can never be driven
    /// over dangling references, whatever path produced the definition.
    pub fn new(atlas: &Atlas) -> Result<Self> {
        Self::with_start(atlas, &atlas.start)
    }

    /// Create an animator starting on an explicit frame.
    pub fn with_start(atlas: &Atlas, start: &str) -> Result<Self> {
        atlas.validate()?;

        let sprite_names: Vec<&String> = atlas.sprites.keys().collect();
        let frame_names: Vec<&String> = atlas.frames.keys().collect();

        let sheet_w = atlas.size[0] as f32;
        let sheet_h = atlas.size[1] as f32;

        let sprites = atlas
            .sprites
            .values()
            .map(|sprite| ResolvedSprite {
                size: sprite.size,
                uv_scale: [
                    sprite.size[0] as f32 / sheet_w,
                    sprite.size[1] as f32 / sheet_h,
                ],
                uv_offset: [
                    sprite.location[0] as f32 / sheet_w,
                    sprite.location[1] as f32 / sheet_h,
                ],
            })
            .collect();

        let frames = atlas
            .frames
            .iter()
            .map(|(name, frame)| {
                // Both lookups were resolved by validate() above
                let sprite = sprite_names.binary_search(&&frame.sprite).unwrap_or(0);
                let next = frame_names.binary_search(&&frame.next).unwrap_or(0);
                ResolvedFrame {
                    name: name.clone(),
                    sprite,
                    duration: frame.duration,
                    next,
                }
            })
            .collect();

        let current = frame_names
            .binary_search_by(|name| name.as_str().cmp(start))
            .map_err(|_| AtlasError::UnknownStartFrame {
                start: start.to_string(),
            })?;

        let mut animator = Self {
            sheet_size: atlas.size,
            sprites,
            frames,
            current,
            frame_time: 0.0,
            transform: [0.0; 16],
        };
        animator.recompute_transform();
        Ok(animator)
    }

    /// Advance the frame clock by a non-negative elapsed time.
    ///
    /// When the accumulated time reaches the current frame's duration the
    /// overshoot carries over into the successor frame, so sub-frame
    /// precision survives transitions and a delta spanning several
    /// durations settles on the correct frame. The UV transform is
    /// recomputed once per call at most, and only if a transition fired.
    pub fn update(&mut self, delta: f32) {
        self.frame_time += delta;

        let mut advanced = false;
        while self.frame_time >= self.frames[self.current].duration {
            let remaining = self.frame_time - self.frames[self.current].duration;
            if remaining >= self.frame_time {
                // Duration is below f32 resolution at this magnitude; the
                // clock cannot make progress
                break;
            }
            self.frame_time = remaining;
            let next = self.frames[self.current].next;
            advanced = true;

            debug!(
                "frame '{}' -> '{}' (carry {:.3})",
                self.frames[self.current].name, self.frames[next].name, self.frame_time
            );
            self.current = next;
        }

        if advanced {
            self.recompute_transform();
        }
    }

    /// Name of the current frame.
    pub fn current_frame(&self) -> &str {
        &self.frames[self.current].name
    }

    /// Time accumulated within the current frame.
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    /// Texel size of the sprite displayed by the current frame, for sizing
    /// the on-screen quad.
    pub fn sprite_size(&self) -> [f32; 2] {
        let sprite = &self.sprites[self.frames[self.current].sprite];
        [sprite.size[0] as f32, sprite.size[1] as f32]
    }

    /// Sheet size in texels.
    pub fn sheet_size(&self) -> [u32; 2] {
        self.sheet_size
    }

    /// UV transform selecting the current sprite's sub-rectangle,
    /// column-major, ready for a uniform upload.
    ///
    /// Maps unit UV space onto the sprite's footprint: scale by the sprite
    /// size over the sheet size, translate by the sprite origin over the
    /// sheet size. The sampling stage feeds coordinates as `(u, v, 1, 0)`.
    pub fn uv_transform(&self) -> &[f32; 16] {
        &self.transform
    }

    fn recompute_transform(&mut self) {
        let sprite = &self.sprites[self.frames[self.current].sprite];
        let [dx, dy] = sprite.uv_scale;
        let [tx, ty] = sprite.uv_offset;

        self.transform = [
            dx, 0.0, 0.0, 0.0, // Column 0
            0.0, dy, 0.0, 0.0, // Column 1
            tx, ty, 1.0, 0.0, // Column 2
            0.0, 0.0, 0.0, 0.0, // Column 3
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Atlas;

    fn two_frame_atlas() -> Atlas {
        Atlas::from_json_str(
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
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn starts_on_declared_start_frame() {
        let animator = Animator::new(&two_frame_atlas()).unwrap();

        assert_eq!(animator.current_frame(), "f1");
        assert_eq!(animator.frame_time(), 0.0);
    }

    #[test]
    fn initial_transform_selects_start_sprite() {
        let animator = Animator::new(&two_frame_atlas()).unwrap();
        let t = animator.uv_transform();

        // Sprite "a": scale (0.1, 0.1), translate (0, 0)
        assert_eq!(t[0], 0.1);
        assert_eq!(t[5], 0.1);
        assert_eq!(t[8], 0.0);
        assert_eq!(t[9], 0.0);
    }

    #[test]
    fn two_half_duration_updates_reach_the_boundary() {
        let mut animator = Animator::new(&two_frame_atlas()).unwrap();

        animator.update(50.0);
        assert_eq!(animator.current_frame(), "f1");

        animator.update(50.0);
        assert_eq!(animator.current_frame(), "f2");
        assert_eq!(animator.frame_time(), 0.0);

        // Sprite "b": scale (0.1, 0.1), translate (0.1, 0)
        let t = animator.uv_transform();
        assert_eq!(t[0], 0.1);
        assert_eq!(t[5], 0.1);
        assert_eq!(t[8], 0.1);
        assert_eq!(t[9], 0.0);
    }

    #[test]
    fn overshoot_carries_over_into_the_next_frame() {
        let mut animator = Animator::new(&two_frame_atlas()).unwrap();

        animator.update(150.0);

        assert_eq!(animator.current_frame(), "f2");
        assert_eq!(animator.frame_time(), 50.0);
    }

    #[test]
    fn delta_spanning_multiple_durations_settles_correctly() {
        let mut animator = Animator::new(&two_frame_atlas()).unwrap();

        // 250 = two full frames plus 50 carry: f1 -> f2 -> f1
        animator.update(250.0);

        assert_eq!(animator.current_frame(), "f1");
        assert_eq!(animator.frame_time(), 50.0);
    }

    #[test]
    fn transform_is_untouched_between_boundaries() {
        let mut animator = Animator::new(&two_frame_atlas()).unwrap();
        let before = *animator.uv_transform();

        animator.update(30.0);
        animator.update(30.0);

        assert_eq!(*animator.uv_transform(), before);
    }

    #[test]
    fn single_frame_animation_loops_onto_itself() {
        let atlas = Atlas::from_json_str(
            r#"{
                "size": [16, 16],
                "start": "idle",
                "sprites": { "s": { "location": [0, 0], "size": [16, 16] } },
                "frames": { "idle": { "sprite": "s", "duration": 250, "next": "idle" } }
            }"#,
        )
        .unwrap();
        let mut animator = Animator::new(&atlas).unwrap();

        animator.update(600.0);

        assert_eq!(animator.current_frame(), "idle");
        assert_eq!(animator.frame_time(), 100.0);
    }

    #[test]
    fn with_start_overrides_declared_start() {
        let animator = Animator::with_start(&two_frame_atlas(), "f2").unwrap();

        assert_eq!(animator.current_frame(), "f2");
        assert_eq!(animator.uv_transform()[8], 0.1);
    }

    #[test]
    fn with_start_rejects_unknown_frame() {
        let result = Animator::with_start(&two_frame_atlas(), "f9");

        assert!(matches!(
            result,
            Err(AtlasError::UnknownStartFrame { start }) if start == "f9"
        ));
    }

    #[test]
    fn sprite_size_tracks_the_current_frame() {
        let atlas = Atlas::from_json_str(
            r#"{
                "size": [64, 64],
                "start": "wide",
                "sprites": {
                    "w": { "location": [0, 0], "size": [32, 16] },
                    "t": { "location": [0, 16], "size": [8, 48] }
                },
                "frames": {
                    "wide": { "sprite": "w", "duration": 10, "next": "tall" },
                    "tall": { "sprite": "t", "duration": 10, "next": "wide" }
                }
            }"#,
        )
        .unwrap();
        let mut animator = Animator::new(&atlas).unwrap();

        assert_eq!(animator.sprite_size(), [32.0, 16.0]);
        animator.update(10.0);
        assert_eq!(animator.sprite_size(), [8.0, 48.0]);
        assert_eq!(animator.sheet_size(), [64, 64]);
    }
}
