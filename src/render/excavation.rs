//! Logo placement and module excavation.

use crate::types::{EccLevel, Excavation, ImageSettings, ModuleGrid};

/// Why a render is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderContext {
    /// Interactive preview; the requested ECC level is used as-is.
    #[default]
    Preview,
    /// Pre-publication check; weak ECC is raised when a logo excavates.
    Verification,
}

/// ECC level actually handed to the encoder.
///
/// Only `Verification` renders that excavate at `L` or `M` are raised to
/// `Q`; everything else keeps the requested level.
pub fn effective_ecc(requested: EccLevel, excavating: bool, context: RenderContext) -> EccLevel {
    if context == RenderContext::Verification && excavating && requested.is_weak() {
        tracing::debug!(from = %requested, to = %EccLevel::Q, "raising ecc for excavated logo");
        EccLevel::Q
    } else {
        requested
    }
}

/// Where the logo goes, in module units relative to the grid origin (the
/// quiet zone is not included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Whole modules covering the logo footprint.
    pub excavation: Excavation,
}

impl ImagePlacement {
    /// Pixel rectangle `(x, y, width, height)` for the `<image>` element.
    pub fn pixel_rect(&self, module_size: f32, margin: u32) -> (f32, f32, f32, f32) {
        let m = margin as f32;
        (
            (self.x + m) * module_size,
            (self.y + m) * module_size,
            self.width * module_size,
            self.height * module_size,
        )
    }
}

/// Map the image's pixel geometry onto the module grid.
pub fn compute_excavation(
    grid_size: usize,
    margin: u32,
    pixel_size: u32,
    image: &ImageSettings,
) -> ImagePlacement {
    let n = grid_size as f32;
    let scale = (n + 2.0 * margin as f32) / pixel_size.max(1) as f32;

    let width = image.width * scale;
    let height = image.height * scale;
    let x = image.x.map_or(n / 2.0 - width / 2.0, |x| x * scale);
    let y = image.y.map_or(n / 2.0 - height / 2.0, |y| y * scale);

    let floor_x = x.floor();
    let floor_y = y.floor();
    let excavation = Excavation {
        x: floor_x as i64,
        y: floor_y as i64,
        w: (width + x - floor_x).ceil() as i64,
        h: (height + y - floor_y).ceil() as i64,
    };

    ImagePlacement {
        x,
        y,
        width,
        height,
        excavation,
    }
}

/// Clear every module under `excavation`. Parts outside the grid are
/// ignored.
pub fn apply_excavation(grid: &ModuleGrid, excavation: &Excavation) -> ModuleGrid {
    let cleared = grid.excavated(excavation);
    tracing::debug!(
        x = excavation.x,
        y = excavation.y,
        w = excavation.w,
        h = excavation.h,
        cleared = grid.dark_count() - cleared.dark_count(),
        "excavated modules"
    );
    cleared
}
