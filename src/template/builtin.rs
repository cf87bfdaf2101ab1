//! Built-in templates.
//!
//! Every wrapper draws in 300x300 template units.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use svg::node::element::{Circle, Element, Group, Rectangle};
use svg::node::Text;
use svg::{Document, Node};

use crate::render::fmt_num;

use super::{template_document, StyleProps, TemplateConfig, TemplateDefinition, TEMPLATE_SPACE};

/// Built-in template catalog.
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// Get all builtin templates.
    pub fn all() -> Vec<TemplateDefinition> {
        vec![
            TemplateDefinition {
                id: "frame",
                name: "Frame",
                description: "Rounded border around the code",
                wrapper: frame,
            },
            TemplateDefinition {
                id: "caption",
                name: "Caption",
                description: "Border with a SCAN ME banner below the code",
                wrapper: caption,
            },
            TemplateDefinition {
                id: "dot-ring",
                name: "Dot ring",
                description: "Circular badge with a ring of decorative dots",
                wrapper: dot_ring,
            },
        ]
    }
}

fn border(style: &StyleProps) -> Rectangle {
    Rectangle::new()
        .set("x", 8)
        .set("y", 8)
        .set("width", 284)
        .set("height", 284)
        .set("rx", 24)
        .set("fill", "none")
        .set("stroke", style.foreground.to_rgb_hex())
        .set("stroke-width", 8)
}

fn backdrop(style: &StyleProps, rx: u32) -> Rectangle {
    Rectangle::new()
        .set("width", 300)
        .set("height", 300)
        .set("rx", rx)
        .set("fill", style.background.to_rgb_hex())
}

fn frame(child: Group, style: &StyleProps, _config: &TemplateConfig) -> Document {
    template_document()
        .add(backdrop(style, 32))
        .add(
            Group::new()
                .set("transform", "translate(24 24) scale(0.84)")
                .add(child),
        )
        .add(border(style))
}

fn caption(child: Group, style: &StyleProps, _config: &TemplateConfig) -> Document {
    let banner = Rectangle::new()
        .set("x", 8)
        .set("y", 232)
        .set("width", 284)
        .set("height", 56)
        .set("rx", 16)
        .set("fill", style.foreground.to_rgb_hex());

    let mut label = Element::new("text");
    label.assign("x", 150);
    label.assign("y", 268);
    label.assign("text-anchor", "middle");
    label.assign("font-family", "sans-serif");
    label.assign("font-weight", "bold");
    label.assign("font-size", 28);
    label.assign("fill", style.background.to_rgb_hex());
    label.append(Text::new("SCAN ME"));

    template_document()
        .add(backdrop(style, 32))
        .add(
            Group::new()
                .set("transform", "translate(45 12) scale(0.7)")
                .add(child),
        )
        .add(border(style))
        .add(banner)
        .add(label)
}

/// Side and offset of the code inside the dot-ring badge.
const RING_CODE_SIDE: f32 = 190.0;
const RING_CODE_OFFSET: f32 = 55.0;
/// Dots stay inside this radius.
const RING_LIMIT: f32 = 146.0;

fn dot_ring(child: Group, style: &StyleProps, config: &TemplateConfig) -> Document {
    let code_scale = RING_CODE_SIDE / TEMPLATE_SPACE;
    let fill = style.foreground.to_rgb_hex();

    let mut dots = Group::new().set("fill", fill);
    for (cx, cy, r) in ring_dots(config.pixel_size * code_scale, &config.source_value) {
        dots = dots.add(
            Circle::new()
                .set("cx", fmt_num(cx))
                .set("cy", fmt_num(cy))
                .set("r", fmt_num(r)),
        );
    }

    template_document()
        .add(
            Circle::new()
                .set("cx", 150)
                .set("cy", 150)
                .set("r", 150)
                .set("fill", style.background.to_rgb_hex()),
        )
        .add(dots)
        .add(
            Group::new()
                .set(
                    "transform",
                    format!("translate({} {}) scale({})", RING_CODE_OFFSET, RING_CODE_OFFSET, code_scale),
                )
                .add(child),
        )
}

/// Decorative dots on a `pitch` lattice between the code and the badge
/// edge, roughly half of them lit, chosen by hashing `seed`.
pub(crate) fn ring_dots(pitch: f32, seed: &str) -> Vec<(f32, f32, f32)> {
    let pitch = pitch.max(2.0);
    let r = pitch * 0.4;
    let cells = (TEMPLATE_SPACE / pitch).ceil() as u32;
    let centre = TEMPLATE_SPACE / 2.0;
    let keep_out_lo = RING_CODE_OFFSET - pitch / 2.0;
    let keep_out_hi = RING_CODE_OFFSET + RING_CODE_SIDE + pitch / 2.0;
    let mut rng = seeded_rng(seed);

    let mut dots = Vec::new();
    for j in 0..cells {
        for i in 0..cells {
            let cx = (i as f32 + 0.5) * pitch;
            let cy = (j as f32 + 0.5) * pitch;

            if (cx - centre).hypot(cy - centre) + r >= RING_LIMIT {
                continue;
            }
            let over_code = cx > keep_out_lo && cx < keep_out_hi && cy > keep_out_lo && cy < keep_out_hi;
            if over_code {
                continue;
            }

            if rng.gen_bool(0.5) {
                dots.push((cx, cy, r));
            }
        }
    }
    dots
}

/// Generator seeded from the SHA-256 digest of `seed`.
fn seeded_rng(seed: &str) -> StdRng {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    StdRng::from_seed(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    fn style() -> StyleProps {
        StyleProps {
            foreground: Colour::rgb(0x11, 0x22, 0x33),
            background: Colour::WHITE,
            margin: 30.0,
            module_size: 8.0,
            qr_size: 240.0,
        }
    }

    fn config(seed: &str) -> TemplateConfig {
        TemplateConfig {
            pixel_size: 8.0,
            source_value: seed.to_string(),
        }
    }

    #[test]
    fn test_builtin_all() {
        let all = BuiltinTemplates::all();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|t| !t.name.is_empty() && !t.description.is_empty()));
    }

    #[test]
    fn test_frame_places_code() {
        let out = frame(Group::new(), &style(), &config("x")).to_string();
        assert!(out.contains("translate(24 24) scale(0.84)"));
        assert!(out.contains("stroke=\"#112233\""));
    }

    #[test]
    fn test_caption_has_label() {
        let out = caption(Group::new(), &style(), &config("x")).to_string();
        assert!(out.contains("SCAN ME"));
        assert!(out.contains("translate(45 12) scale(0.7)"));
    }

    #[test]
    fn test_ring_dots_deterministic() {
        let a = ring_dots(8.0, "https://example.com");
        let b = ring_dots(8.0, "https://example.com");
        let c = ring_dots(8.0, "https://example.org");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let draw = |seed: &str| {
            let mut rng = seeded_rng(seed);
            (0..4).map(|_| rng.gen::<u32>()).collect::<Vec<_>>()
        };
        assert_eq!(draw("card"), draw("card"));
        assert_ne!(draw("card"), draw("badge"));
    }

    #[test]
    fn test_ring_dots_stay_in_ring() {
        let pitch = 6.0;
        for (cx, cy, r) in ring_dots(pitch, "seed") {
            assert!((cx - 150.0).hypot(cy - 150.0) + r < RING_LIMIT);
            let inside_code = cx > 55.0 - pitch / 2.0
                && cx < 245.0 + pitch / 2.0
                && cy > 55.0 - pitch / 2.0
                && cy < 245.0 + pitch / 2.0;
            assert!(!inside_code, "dot at ({cx}, {cy}) overlaps the code");
        }
    }

    #[test]
    fn test_ring_dots_roughly_half() {
        let pitch = 5.0;
        let lit = ring_dots(pitch, "density").len();
        // Count all lattice cells in the ring
        let mut total = 0;
        let cells = (300.0 / pitch) as u32;
        for j in 0..cells {
            for i in 0..cells {
                let cx = (i as f32 + 0.5) * pitch;
                let cy = (j as f32 + 0.5) * pitch;
                let in_ring = (cx - 150.0).hypot(cy - 150.0) + pitch * 0.4 < RING_LIMIT;
                let lo = 55.0 - pitch / 2.0;
                let hi = 245.0 + pitch / 2.0;
                let over = cx > lo && cx < hi && cy > lo && cy < hi;
                if in_ring && !over {
                    total += 1;
                }
            }
        }
        let ratio = lit as f32 / total as f32;
        assert!((0.3..0.7).contains(&ratio), "ratio {ratio}");
    }
}
