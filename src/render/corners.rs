//! Finder pattern ("eye") catalog.
//!
//! Each finder zone is drawn as a ring (the 7x7 outer frame) plus a dot (the
//! 3x3 centre). Rings are emitted as a single path meant for
//! `fill-rule="evenodd"`: the outer outline followed by the hole.

use std::f32::consts::PI;

use crate::types::{CornerDotPatternId, CornerPatternId};

use super::primitive::{
    circle_path, fmt_num, polygon_path, rounded_rect_path, Bounds, Primitive, Radii,
};

/// Gear teeth count.
const GEAR_TEETH: usize = 8;

/// Path data for an eye ring whose outer square starts at `(x, y)` with
/// side `size`. Ring thickness is one module (`size / 7`).
pub fn corner_eye(x: f32, y: f32, size: f32, pattern: CornerPatternId) -> String {
    let t = size / 7.0;

    let radii = match pattern {
        CornerPatternId::Square => Radii::default(),
        CornerPatternId::Rounded => Radii::all(size * 0.25),
        CornerPatternId::RoundedInward => Radii::diagonal(size * 0.35),
        CornerPatternId::RoundedInwardFlipped => Radii::anti_diagonal(size * 0.35),
        CornerPatternId::SemiRound => Radii::top(size / 2.0),
        CornerPatternId::RoundedExtra => Radii::all(size * 0.4),
        CornerPatternId::RoundedSquare => Radii::all(size * 0.12),
        CornerPatternId::Circle => {
            let (cx, cy, r) = (x + size / 2.0, y + size / 2.0, size / 2.0);
            return circle_path(cx, cy, r) + &circle_path(cx, cy, r - t);
        }
        CornerPatternId::Gear => return gear_ring(x + size / 2.0, y + size / 2.0, size / 2.0, t),
    };

    let outer = rounded_rect_path(x, y, size, size, radii);
    let inner = rounded_rect_path(x + t, y + t, size - 2.0 * t, size - 2.0 * t, radii.inset(t));
    outer + &inner
}

/// Flat-topped gear outline with a circular hole.
fn gear_ring(cx: f32, cy: f32, r: f32, t: f32) -> String {
    let valley = r * 0.88;
    let tip = 7.0_f32.to_radians();
    let shoulder = 12.0_f32.to_radians();
    let step = 2.0 * PI / GEAR_TEETH as f32;

    let at = |radius: f32, angle: f32| (cx + radius * angle.cos(), cy + radius * angle.sin());

    let mut points = Vec::with_capacity(GEAR_TEETH * 4);
    for i in 0..GEAR_TEETH {
        // First tooth points straight up
        let base = -PI / 2.0 + step * i as f32;
        points.push(at(valley, base - shoulder));
        points.push(at(r, base - tip));
        points.push(at(r, base + tip));
        points.push(at(valley, base + shoulder));
    }

    polygon_path(&points) + &circle_path(cx, cy, valley - t)
}

/// Eye dot centred on `(cx, cy)`; `r` is half the dot's side (1.5 modules).
pub fn corner_dot(cx: f32, cy: f32, r: f32, pattern: CornerDotPatternId) -> Primitive {
    let (x, y, side) = (cx - r, cy - r, r * 2.0);
    let bounds = Bounds {
        x,
        y,
        width: side,
        height: side,
    };
    let rounded = |radii: Radii| Primitive::Path {
        d: rounded_rect_path(x, y, side, side, radii),
        bounds,
    };

    match pattern {
        CornerDotPatternId::Square => Primitive::Rect {
            x,
            y,
            width: side,
            height: side,
            rx: 0.0,
        },
        CornerDotPatternId::RoundedSquare => Primitive::Rect {
            x,
            y,
            width: side,
            height: side,
            rx: r * 0.4,
        },
        CornerDotPatternId::Circle => Primitive::Circle { cx, cy, r },
        CornerDotPatternId::RoundedInward => rounded(Radii::diagonal(r * 0.6)),
        CornerDotPatternId::RoundedInwardFlipped => rounded(Radii::anti_diagonal(r * 0.6)),
        CornerDotPatternId::SemiRound => rounded(Radii::top(r)),
        CornerDotPatternId::Leaf => rounded(Radii::diagonal(r)),
        CornerDotPatternId::Diamond => Primitive::Path {
            d: polygon_path(&diamond(cx, cy, r)),
            bounds,
        },
        CornerDotPatternId::DiamondRounded => Primitive::Path {
            d: rounded_polygon_path(&diamond(cx, cy, r), 0.2),
            bounds,
        },
    }
}

fn diamond(cx: f32, cy: f32, r: f32) -> [(f32, f32); 4] {
    [(cx, cy - r), (cx + r, cy), (cx, cy + r), (cx - r, cy)]
}

/// Closed polygon whose corners are replaced by quadratic curves starting
/// `f` of the way along each edge.
fn rounded_polygon_path(points: &[(f32, f32)], f: f32) -> String {
    let n = points.len();
    let lerp = |a: (f32, f32), b: (f32, f32), t: f32| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);

    let mut d = String::new();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let here = points[i];
        let next = points[(i + 1) % n];
        let entry = lerp(here, prev, f);
        let exit = lerp(here, next, f);

        d += if i == 0 { "M" } else { "L" };
        d += &format!(
            "{} {}Q{} {} {} {}",
            fmt_num(entry.0),
            fmt_num(entry.1),
            fmt_num(here.0),
            fmt_num(here.1),
            fmt_num(exit.0),
            fmt_num(exit.1)
        );
    }
    d.push('Z');
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pull every coordinate pair out of simple path data (no arc flags).
    fn coords(d: &str) -> Vec<f32> {
        d.split(|c: char| c.is_ascii_alphabetic() || c == ' ')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    #[test]
    fn test_square_eye() {
        insta::assert_snapshot!(
            corner_eye(0.0, 0.0, 7.0, CornerPatternId::Square),
            @"M0 0H7V7H0V0ZM1 1H6V6H1V1Z"
        );
    }

    #[test]
    fn test_every_eye_is_two_subpaths() {
        for pattern in CornerPatternId::ALL {
            let d = corner_eye(10.0, 10.0, 70.0, *pattern);
            assert_eq!(d.matches('M').count(), 2, "{pattern}: {d}");
            assert!(d.ends_with('Z'));
        }
    }

    #[test]
    fn test_rounded_eye_hole_has_smaller_radius() {
        let d = corner_eye(0.0, 0.0, 70.0, CornerPatternId::Rounded);
        assert!(d.contains("A17.5 17.5"));
        assert!(d.contains("A7.5 7.5"));
    }

    #[test]
    fn test_gear_within_box() {
        let d = corner_eye(0.0, 0.0, 70.0, CornerPatternId::Gear);
        let values = coords(&d);
        assert!(!values.is_empty());
        for v in values {
            assert!((0.0..=70.0).contains(&v), "{v} outside eye box");
        }
        // 8 teeth x 4 points, first via M
        let outline = d.split('Z').next().unwrap_or_default();
        assert_eq!(outline.matches('L').count(), GEAR_TEETH * 4 - 1);
    }

    #[test]
    fn test_gear_first_tooth_flat_top() {
        let d = corner_eye(0.0, 0.0, 100.0, CornerPatternId::Gear);
        let values = coords(d.split('Z').next().unwrap_or_default());
        // Second and third points are the tooth tip: same y, symmetric x
        let (x1, y1, x2, y2) = (values[2], values[3], values[4], values[5]);
        assert!((y1 - y2).abs() < 1e-3);
        assert!(((x1 + x2) / 2.0 - 50.0).abs() < 1e-2);
        assert!(y1 < 1.0);
    }

    #[test]
    fn test_dot_bounds_cover_centre_block() {
        for pattern in CornerDotPatternId::ALL {
            let dot = corner_dot(35.0, 35.0, 15.0, *pattern);
            let b = dot.bounds();
            assert_eq!((b.x, b.y, b.width, b.height), (20.0, 20.0, 30.0, 30.0), "{pattern}");
        }
    }

    #[test]
    fn test_diamond_rounded_dot() {
        let dot = corner_dot(10.0, 10.0, 10.0, CornerDotPatternId::DiamondRounded);
        match dot {
            Primitive::Path { d, .. } => {
                assert_eq!(d.matches('Q').count(), 4);
                assert!(d.starts_with("M8 2Q10 0 12 2"));
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_dot_rounds_diagonal_corners() {
        let dot = corner_dot(10.0, 10.0, 10.0, CornerDotPatternId::Leaf);
        match dot {
            Primitive::Path { d, .. } => {
                insta::assert_snapshot!(d, @"M10 0H20V10A10 10 0 0 1 10 20H0V10A10 10 0 0 1 10 0Z");
            }
            other => panic!("expected path, got {other:?}"),
        }
    }
}
