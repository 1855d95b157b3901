//! Sprite atlas definitions, frame animation, and movement transforms.
//!
//! This crate holds the backend-independent runtime of a 2D sprite
//! renderer: a JSON atlas format describing packed sprites and their frame
//! sequencing, an [`Animator`] that advances a frame clock and exposes the
//! UV sub-rectangle transform of the visible sprite, a [`Movement`] state
//! that composes a model transform from directional input, and a
//! [`FrameTracker`] for frame-time reporting. GPU contexts, image
//! decoding, and input polling stay with the host; its only contracts with
//! this crate are "supply the atlas JSON" and "supply per-frame deltas".
//!
//! # Examples
//!
//! ```
//! use sprite_sheet::{Animator, Atlas};
//!
//! let atlas = Atlas::from_json_str(
//!     r#"{
//!         "size": [100, 100],
//!         "start": "f1",
//!         "sprites": {
//!             "a": { "location": [0, 0], "size": [10, 10] },
//!             "b": { "location": [10, 0], "size": [10, 10] }
//!         },
//!         "frames": {
//!             "f1": { "sprite": "a", "duration": 100, "next": "f2" },
//!             "f2": { "sprite": "b", "duration": 100, "next": "f1" }
//!         }
//!     }"#,
//! )?;
//!
//! let mut animator = Animator::new(&atlas)?;
//! animator.update(16.7);
//!
//! // Bind these into the sampling stage and vertex scaling
//! let _uv: &[f32; 16] = animator.uv_transform();
//! let _quad: [f32; 2] = animator.sprite_size();
//! # Ok::<(), sprite_sheet::AtlasError>(())
//! ```

pub mod animation;
pub mod atlas;
pub mod error;
pub mod movement;
pub mod timing;

pub use animation::Animator;
pub use atlas::{Atlas, FrameDef, SpriteDef};
pub use error::{AtlasError, Result};
pub use movement::{Movement, MovementConfig};
pub use timing::FrameTracker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
