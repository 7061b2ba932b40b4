//! Procedural stippled textures: a flat base color speckled with thousands of
//! slightly off-color discs, for use as a texture map.

pub mod draw;
pub mod error;
pub mod stipple;
pub mod types;

pub use error::Error;
pub use stipple::{DEFAULT_SIZE, StippleParams, generate, generate_with_rng};
pub use types::{BaseColor, Canvas, Dot, FrameBuffer};
