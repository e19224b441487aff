//! Matrix and Vector Math
//!
//! A small, self-contained transform library: row-major 4x4 matrices and
//! 2/3-component vectors with the factory functions the demo needs
//! (rotation, translation, orthographic/perspective projection, look-at).
//!
//! The whole library uses the row-vector-on-left convention: a point `p`
//! is transformed as `p' = p * M`, and `a.multiply(b)` composes `a`'s rows
//! against `b`'s columns. All functions are pure and infallible; degenerate
//! inputs (zero-length normalize, parallel look-at axes, zero-extent
//! projection volumes) produce NaN/Inf components rather than errors and
//! must be avoided by the caller.

mod matrix;
mod vector;

pub use matrix::Matrix4x4;
pub use vector::{Vector2, Vector3};
