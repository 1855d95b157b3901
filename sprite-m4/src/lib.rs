//! Zero-allocation column-major 4x4 transform chains for sprite rendering.
//!
//! This crate provides [`Mat4`], an owned 4x4 matrix that composes affine
//! and projective transforms in place. Every chained operation stages its
//! operation matrix in a pre-allocated scratch buffer and multiplies it
//! into the primary matrix, so a per-frame hot path never touches the heap.
//!
//! # Examples
//!
//! ```
//! use sprite_m4::Mat4;
//!
//! let mut model = Mat4::new();
//! model
//!     .identity()
//!     .scale(2.0, 2.0, 2.0)
//!     .translate(1.0, 0.0, 0.0);
//!
//! assert_eq!(model.apply([1.0, 0.0, 0.0, 1.0]), [3.0, 0.0, 0.0, 1.0]);
//!
//! // 16 floats in column-major order, ready for a uniform-buffer upload
//! let _floats: &[f32; 16] = model.as_array();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod matrix;

pub use matrix::Mat4;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
