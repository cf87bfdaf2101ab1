//! Colour resolution.
//!
//! A normalized `ColorSpec` becomes a `Fill` scoped to one drawing region.
//! Gradients are always `userSpaceOnUse` and sized to their region, so each
//! eye gets its own gradient rather than a slice of a canvas-wide one.

use svg::node::element::{LinearGradient, RadialGradient, Stop};
use svg::Node;

use crate::types::{ColorSpec, Colour, FinderZone, GradientStop, FINDER_SIZE};

use super::primitive::fmt_num;

/// What a region paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Foreground,
    Eye,
    Dot,
}

impl Role {
    pub fn slug(self) -> &'static str {
        match self {
            Role::Background => "bg",
            Role::Foreground => "fg",
            Role::Eye => "eye",
            Role::Dot => "dot",
        }
    }
}

/// Where a region sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The whole canvas, quiet zone included.
    Canvas,
    /// The `N x N` module area.
    Modules,
    /// One finder zone (`7 x 7` modules).
    Eye(FinderZone),
}

impl Zone {
    pub fn slug(self) -> &'static str {
        match self {
            Zone::Canvas => "canvas",
            Zone::Modules => "modules",
            Zone::Eye(zone) => zone.slug(),
        }
    }

    /// Gradient angle used when a linear spec omits one.
    pub fn default_angle(self) -> f32 {
        match self {
            Zone::Eye(FinderZone::TopRight) => 90.0,
            Zone::Eye(FinderZone::BottomLeft) => 270.0,
            _ => 0.0,
        }
    }
}

/// Square region in output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub zone: Zone,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Region {
    /// The whole canvas of side `size`.
    pub fn canvas(size: f32) -> Self {
        Self {
            zone: Zone::Canvas,
            x: 0.0,
            y: 0.0,
            size,
        }
    }

    /// The module area of an `n`-module grid.
    pub fn modules(n: usize, module_size: f32, margin: u32) -> Self {
        let offset = margin as f32 * module_size;
        Self {
            zone: Zone::Modules,
            x: offset,
            y: offset,
            size: n as f32 * module_size,
        }
    }

    /// One finder zone of an `n`-module grid.
    pub fn eye(zone: FinderZone, n: usize, module_size: f32, margin: u32) -> Self {
        let (ox, oy) = zone.origin(n);
        Self {
            zone: Zone::Eye(zone),
            x: (ox as f32 + margin as f32) * module_size,
            y: (oy as f32 + margin as f32) * module_size,
            size: FINDER_SIZE as f32 * module_size,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Gradient geometry in user space.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientShape {
    Linear { x1: f32, y1: f32, x2: f32, y2: f32 },
    Radial { cx: f32, cy: f32, r: f32 },
}

/// A gradient bound to one region.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDef {
    pub id: String,
    pub shape: GradientShape,
    pub stops: [GradientStop; 2],
}

impl GradientDef {
    /// `<linearGradient>` / `<radialGradient>` element for `<defs>`.
    pub fn to_node(&self) -> Box<dyn Node> {
        match &self.shape {
            GradientShape::Linear { x1, y1, x2, y2 } => {
                let mut node = LinearGradient::new()
                    .set("id", self.id.as_str())
                    .set("gradientUnits", "userSpaceOnUse")
                    .set("x1", fmt_num(*x1))
                    .set("y1", fmt_num(*y1))
                    .set("x2", fmt_num(*x2))
                    .set("y2", fmt_num(*y2));
                for stop in &self.stops {
                    node = node.add(stop_node(stop));
                }
                Box::new(node)
            }
            GradientShape::Radial { cx, cy, r } => {
                let mut node = RadialGradient::new()
                    .set("id", self.id.as_str())
                    .set("gradientUnits", "userSpaceOnUse")
                    .set("cx", fmt_num(*cx))
                    .set("cy", fmt_num(*cy))
                    .set("r", fmt_num(*r));
                for stop in &self.stops {
                    node = node.add(stop_node(stop));
                }
                Box::new(node)
            }
        }
    }
}

fn stop_node(stop: &GradientStop) -> Stop {
    let mut node = Stop::new()
        .set("offset", format!("{}%", fmt_num(stop.offset)))
        .set("stop-color", stop.color.to_rgb_hex());
    if !stop.color.is_opaque() {
        node = node.set("stop-opacity", fmt_num(stop.color.opacity()));
    }
    node
}

/// Resolved paint for one region.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Colour),
    Gradient(GradientDef),
}

impl Fill {
    /// Value for a `fill` attribute.
    pub fn paint(&self) -> String {
        match self {
            Fill::Solid(colour) => colour.to_rgb_hex(),
            Fill::Gradient(def) => format!("url(#{})", def.id),
        }
    }

    /// `fill-opacity` for translucent solid colours.
    pub fn opacity(&self) -> Option<f32> {
        match self {
            Fill::Solid(colour) if !colour.is_opaque() => Some(colour.opacity()),
            _ => None,
        }
    }

    pub fn gradient(&self) -> Option<&GradientDef> {
        match self {
            Fill::Gradient(def) => Some(def),
            Fill::Solid(_) => None,
        }
    }

    /// Set `fill` (and `fill-opacity` when needed) on an element.
    pub fn apply<T: Node>(&self, mut node: T) -> T {
        node.assign("fill", self.paint());
        if let Some(opacity) = self.opacity() {
            node.assign("fill-opacity", fmt_num(opacity));
        }
        node
    }
}

/// Element id for a region's gradient.
pub fn gradient_id(prefix: &str, role: Role, zone: Zone) -> String {
    format!("{}-{}-{}", prefix, role.slug(), zone.slug())
}

/// Resolve `spec` for `region`. Never fails; anything missing in the spec
/// resolves to `fallback`.
pub fn resolve_fill(spec: &ColorSpec, region: &Region, id: &str, fallback: Colour) -> Fill {
    let (cx, cy) = region.center();

    match spec.normalize(fallback) {
        ColorSpec::Solid { color } => Fill::Solid(color.unwrap_or(fallback)),
        ColorSpec::Linear { stops, angle } => {
            let theta = angle.unwrap_or_else(|| region.zone.default_angle()).to_radians();
            let half = region.size * std::f32::consts::SQRT_2 / 2.0;
            let (dx, dy) = (half * theta.cos(), half * theta.sin());
            Fill::Gradient(GradientDef {
                id: id.to_string(),
                shape: GradientShape::Linear {
                    x1: cx - dx,
                    y1: cy - dy,
                    x2: cx + dx,
                    y2: cy + dy,
                },
                stops: endpoints(&stops, fallback),
            })
        }
        ColorSpec::Radial { stops } => Fill::Gradient(GradientDef {
            id: id.to_string(),
            shape: GradientShape::Radial {
                cx,
                cy,
                r: 0.97 * region.size / 2.0,
            },
            stops: endpoints(&stops, fallback),
        }),
    }
}

fn endpoints(stops: &[GradientStop], fallback: Colour) -> [GradientStop; 2] {
    match stops {
        [first, .., last] => [*first, *last],
        _ => [GradientStop::new(0.0, fallback), GradientStop::new(100.0, fallback)],
    }
}
