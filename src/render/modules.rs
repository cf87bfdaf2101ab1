//! Data-module shape synthesis.
//!
//! Every dark module outside the finder zones becomes one primitive from the
//! `PatternId` catalog. Finder zones are left to the corner catalog so they
//! are never drawn twice.

use std::f32::consts::PI;

use crate::types::{ModuleGrid, PatternId};

use super::primitive::{polygon_path, rounded_rect_path, Bounds, Primitive, Radii};

/// Convert the dark modules of `grid` into primitives.
///
/// `module_size` is the pixel side of one module, `margin` the quiet zone in
/// modules.
pub fn synthesize(grid: &ModuleGrid, module_size: f32, margin: u32, pattern: PatternId) -> Vec<Primitive> {
    let offset = margin as f32;
    grid.iter()
        .filter(|&(x, y, dark)| dark && !grid.is_finder(x, y))
        .map(|(x, y, _)| {
            let left = (x as f32 + offset) * module_size;
            let top = (y as f32 + offset) * module_size;
            module_shape(pattern, left, top, module_size, x, y)
        })
        .collect()
}

/// Shape for one module whose cell starts at `(left, top)`.
///
/// `(x, y)` are the module coordinates, used only by patterns that vary
/// deterministically by position.
pub fn module_shape(pattern: PatternId, left: f32, top: f32, size: f32, x: usize, y: usize) -> Primitive {
    let cx = left + size / 2.0;
    let cy = top + size / 2.0;

    match pattern {
        PatternId::Circle => Primitive::Circle { cx, cy, r: size / 3.0 },
        PatternId::LargeCircle => Primitive::Circle { cx, cy, r: size / 2.0 },
        PatternId::Square => Primitive::Rect {
            x: left,
            y: top,
            width: size,
            height: size,
            rx: 0.0,
        },
        PatternId::SmallSquare => {
            let side = size * 0.7;
            Primitive::Rect {
                x: cx - side / 2.0,
                y: cy - side / 2.0,
                width: side,
                height: side,
                rx: 0.0,
            }
        }
        PatternId::Diamond => {
            let h = size / 2.0;
            Primitive::Path {
                d: polygon_path(&[(cx, cy - h), (cx + h, cy), (cx, cy + h), (cx - h, cy)]),
                bounds: cell(left, top, size),
            }
        }
        PatternId::MixedCircles => {
            const RATIOS: [f32; 3] = [0.3, 0.4, 0.5];
            let ratio = RATIOS[(x * 7 + y * 13) % RATIOS.len()];
            Primitive::Circle { cx, cy, r: size * ratio }
        }
        PatternId::Pacman => Primitive::Path {
            d: pacman_path(cx, cy, size / 2.0),
            bounds: cell(left, top, size),
        },
        PatternId::RoundedSquare => Primitive::Path {
            d: rounded_rect_path(left, top, size, size, Radii::all(size / 4.0)),
            bounds: cell(left, top, size),
        },
    }
}

fn cell(left: f32, top: f32, size: f32) -> Bounds {
    Bounds {
        x: left,
        y: top,
        width: size,
        height: size,
    }
}

/// Disc with a 60 degree mouth facing +x.
fn pacman_path(cx: f32, cy: f32, r: f32) -> String {
    use super::primitive::fmt_num as n;

    let half_mouth = PI / 6.0;
    let (dx, dy) = (r * half_mouth.cos(), r * half_mouth.sin());
    format!(
        "M{} {}L{} {}A{r} {r} 0 1 0 {} {}Z",
        n(cx),
        n(cy),
        n(cx + dx),
        n(cy - dy),
        n(cx + dx),
        n(cy + dy),
        r = n(r)
    )
}
