//! Vector primitives and SVG path-data helpers.

use svg::node::element::{Circle, Path, Rectangle};
use svg::Node;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Whether two boxes overlap with positive area.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle { cx: f32, cy: f32, r: f32 },
    Rect { x: f32, y: f32, width: f32, height: f32, rx: f32 },
    /// Path data plus the box it was built in.
    Path { d: String, bounds: Bounds },
}

impl Primitive {
    /// Bounding box of the primitive.
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Circle { cx, cy, r } => Bounds {
                x: cx - r,
                y: cy - r,
                width: r * 2.0,
                height: r * 2.0,
            },
            Primitive::Rect { x, y, width, height, .. } => Bounds {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            Primitive::Path { bounds, .. } => *bounds,
        }
    }

    /// Convert to an SVG node, optionally with its own fill paint.
    pub fn to_node(&self, fill: Option<&str>) -> Box<dyn Node> {
        match self {
            Primitive::Circle { cx, cy, r } => {
                let mut node = Circle::new()
                    .set("cx", fmt_num(*cx))
                    .set("cy", fmt_num(*cy))
                    .set("r", fmt_num(*r));
                if let Some(fill) = fill {
                    node = node.set("fill", fill);
                }
                Box::new(node)
            }
            Primitive::Rect { x, y, width, height, rx } => {
                let mut node = Rectangle::new()
                    .set("x", fmt_num(*x))
                    .set("y", fmt_num(*y))
                    .set("width", fmt_num(*width))
                    .set("height", fmt_num(*height));
                if *rx > 0.0 {
                    node = node.set("rx", fmt_num(*rx));
                }
                if let Some(fill) = fill {
                    node = node.set("fill", fill);
                }
                Box::new(node)
            }
            Primitive::Path { d, .. } => {
                let mut node = Path::new().set("d", d.as_str());
                if let Some(fill) = fill {
                    node = node.set("fill", fill);
                }
                Box::new(node)
            }
        }
    }
}

/// Format a coordinate compactly: at most three decimals, no trailing zeros.
pub fn fmt_num(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.3}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Corner radii in clockwise order starting at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl Radii {
    pub fn all(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    /// Rounded top-left and bottom-right corners.
    pub fn diagonal(r: f32) -> Self {
        Self {
            top_left: r,
            bottom_right: r,
            ..Self::default()
        }
    }

    /// Rounded top-right and bottom-left corners.
    pub fn anti_diagonal(r: f32) -> Self {
        Self {
            top_right: r,
            bottom_left: r,
            ..Self::default()
        }
    }

    /// Rounded top corners only.
    pub fn top(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            ..Self::default()
        }
    }

    /// Shrink every non-zero radius by `by`, flooring at zero.
    pub fn inset(self, by: f32) -> Self {
        let shrink = |r: f32| if r > 0.0 { (r - by).max(0.0) } else { 0.0 };
        Self {
            top_left: shrink(self.top_left),
            top_right: shrink(self.top_right),
            bottom_right: shrink(self.bottom_right),
            bottom_left: shrink(self.bottom_left),
        }
    }

    fn clamped(self, limit: f32) -> Self {
        let c = |r: f32| r.clamp(0.0, limit);
        Self {
            top_left: c(self.top_left),
            top_right: c(self.top_right),
            bottom_right: c(self.bottom_right),
            bottom_left: c(self.bottom_left),
        }
    }
}

/// Clockwise rectangle outline with per-corner elliptical-arc rounding.
pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radii: Radii) -> String {
    let r = radii.clamped(w.min(h) / 2.0);
    let n = fmt_num;
    let mut d = format!("M{} {}H{}", n(x + r.top_left), n(y), n(x + w - r.top_right));
    if r.top_right > 0.0 {
        d += &arc(r.top_right, x + w, y + r.top_right);
    }
    d += &format!("V{}", n(y + h - r.bottom_right));
    if r.bottom_right > 0.0 {
        d += &arc(r.bottom_right, x + w - r.bottom_right, y + h);
    }
    d += &format!("H{}", n(x + r.bottom_left));
    if r.bottom_left > 0.0 {
        d += &arc(r.bottom_left, x, y + h - r.bottom_left);
    }
    d += &format!("V{}", n(y + r.top_left));
    if r.top_left > 0.0 {
        d += &arc(r.top_left, x + r.top_left, y);
    }
    d.push('Z');
    d
}

/// Quarter arc, clockwise sweep.
fn arc(r: f32, to_x: f32, to_y: f32) -> String {
    format!("A{r} {r} 0 0 1 {} {}", fmt_num(to_x), fmt_num(to_y), r = fmt_num(r))
}

/// Full circle as two half arcs.
pub fn circle_path(cx: f32, cy: f32, r: f32) -> String {
    let n = fmt_num;
    format!(
        "M{} {}A{r} {r} 0 1 1 {} {}A{r} {r} 0 1 1 {} {}Z",
        n(cx - r),
        n(cy),
        n(cx + r),
        n(cy),
        n(cx - r),
        n(cy),
        r = n(r)
    )
}

/// Closed polygon through `points`.
pub fn polygon_path(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d += if i == 0 { "M" } else { "L" };
        d += &format!("{} {}", fmt_num(*x), fmt_num(*y));
    }
    d.push('Z');
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(3.0), "3");
        assert_eq!(fmt_num(3.5), "3.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-2.25), "-2.25");
    }

    #[test]
    fn test_square_path() {
        insta::assert_snapshot!(
            rounded_rect_path(0.0, 0.0, 7.0, 7.0, Radii::default()),
            @"M0 0H7V7H0V0Z"
        );
    }

    #[test]
    fn test_rounded_path() {
        insta::assert_snapshot!(
            rounded_rect_path(0.0, 0.0, 4.0, 4.0, Radii::all(1.0)),
            @"M1 0H3A1 1 0 0 1 4 1V3A1 1 0 0 1 3 4H1A1 1 0 0 1 0 3V1A1 1 0 0 1 1 0Z"
        );
    }

    #[test]
    fn test_radii_clamped_to_half_side() {
        let clamped = rounded_rect_path(0.0, 0.0, 2.0, 2.0, Radii::all(5.0));
        let exact = rounded_rect_path(0.0, 0.0, 2.0, 2.0, Radii::all(1.0));
        assert_eq!(clamped, exact);
    }

    #[test]
    fn test_radii_inset() {
        let r = Radii::diagonal(2.0).inset(0.5);
        assert_eq!(r.top_left, 1.5);
        assert_eq!(r.top_right, 0.0);
        assert_eq!(Radii::all(0.2).inset(1.0), Radii::default());
    }

    #[test]
    fn test_circle_path() {
        insta::assert_snapshot!(circle_path(5.0, 5.0, 2.0), @"M3 5A2 2 0 1 1 7 5A2 2 0 1 1 3 5Z");
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds { x: 0.0, y: 0.0, width: 2.0, height: 2.0 };
        let b = Bounds { x: 2.0, y: 0.0, width: 2.0, height: 2.0 };
        let c = Bounds { x: 1.0, y: 1.0, width: 2.0, height: 2.0 };
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_primitive_bounds() {
        let circle = Primitive::Circle { cx: 5.0, cy: 5.0, r: 1.0 };
        assert_eq!(
            circle.bounds(),
            Bounds { x: 4.0, y: 4.0, width: 2.0, height: 2.0 }
        );
    }

    #[test]
    fn test_to_node_output() {
        let rect = Primitive::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0, rx: 0.0 };
        let out = rect.to_node(Some("#FF0000")).to_string();
        assert!(out.starts_with("<rect"));
        assert!(out.contains("fill=\"#FF0000\""));
        assert!(!out.contains("rx="));
    }
}
