//! Rendering module for qrstyle.
//!
//! This module turns an encoded module grid into a styled SVG document:
//! data-module shapes, finder eyes, region-scoped fills and logo placement.

mod corners;
mod document;
mod excavation;
mod fill;
mod modules;
mod primitive;

pub use corners::{corner_dot, corner_eye};
pub use document::{render, RenderResult};
pub use excavation::{
    apply_excavation, compute_excavation, effective_ecc, ImagePlacement, RenderContext,
};
pub use fill::{gradient_id, resolve_fill, Fill, GradientDef, GradientShape, Region, Role, Zone};
pub use modules::{module_shape, synthesize};
pub use primitive::{circle_path, fmt_num, polygon_path, rounded_rect_path, Bounds, Primitive, Radii};
