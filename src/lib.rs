//! Digital rain simulation: columns of glyphs that fall, fade, freeze into
//! ghosts and recycle, projected into draw instructions for any surface
//! that can paint a coloured glyph at a pixel position.

pub mod clock;
pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod ghost;
pub mod glyphs;
pub mod project;
pub mod rng;

pub use column::{Column, ColumnState};
pub use config::RainConfig;
pub use engine::{Engine, Geometry};
pub use error::RainError;
pub use ghost::FrozenGhost;
pub use project::{DrawInstruction, Layer, Rgb};
pub use rng::Lcg;
