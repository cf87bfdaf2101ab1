//! Core domain types for qrstyle.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `ModuleGrid` - the encoded boolean matrix
//! - `PatternId` and friends - catalog identifiers
//! - `StyleConfig` - everything a render request can configure

mod colour;
mod grid;
mod pattern;
mod style;

pub use colour::Colour;
pub use grid::{EccLevel, Excavation, FinderZone, ModuleGrid, FINDER_SIZE};
pub use pattern::{CornerDotPatternId, CornerPatternId, PatternId};
pub use style::{ColorSpec, ConfigFormat, GradientStop, ImageSettings, StyleConfig};
