use std::io;
use thiserror::Error;

/// Error types for atlas loading and validation
#[derive(Error, Debug)]
pub enum AtlasError {
    /// I/O error while reading an atlas definition
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in an atlas definition
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Atlas dimensions include a zero component
    #[error("Invalid atlas size: {width}x{height} (both dimensions must be non-zero)")]
    InvalidSize {
        /// Declared atlas width in texels
        width: u32,
        /// Declared atlas height in texels
        height: u32,
    },

    /// Atlas declares no sprites
    #[error("Atlas declares no sprites")]
    NoSprites,

    /// Atlas declares no frames
    #[error("Atlas declares no frames")]
    NoFrames,

    /// Start frame does not resolve to a declared frame
    #[error("Start frame '{start}' is not a declared frame")]
    UnknownStartFrame {
        /// The unresolved start frame name
        start: String,
    },

    /// A frame references an undeclared sprite
    #[error("Frame '{frame}' references unknown sprite '{sprite}'")]
    UnknownSprite {
        /// Name of the referencing frame
        frame: String,
        /// The unresolved sprite name
        sprite: String,
    },

    /// A frame's successor does not resolve to a declared frame
    #[error("Frame '{frame}' references unknown next frame '{next}'")]
    UnknownNextFrame {
        /// Name of the referencing frame
        frame: String,
        /// The unresolved successor name
        next: String,
    },

    /// A frame duration is zero, negative, or not finite
    #[error("Frame '{frame}' has invalid duration {duration} (must be finite and positive)")]
    InvalidDuration {
        /// Name of the offending frame
        frame: String,
        /// The declared duration
        duration: f32,
    },

    /// A sprite rectangle extends past the atlas bounds
    #[error(
        "Sprite '{sprite}' at {location:?} with size {size:?} extends past the {atlas:?} atlas bounds"
    )]
    SpriteOutOfBounds {
        /// Name of the offending sprite
        sprite: String,
        /// Sprite texel offset
        location: [u32; 2],
        /// Sprite texel size
        size: [u32; 2],
        /// Atlas texel size
        atlas: [u32; 2],
    },
}

/// Result type using AtlasError
pub type Result<T> = std::result::Result<T, AtlasError>;
