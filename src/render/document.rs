//! Full render pipeline: encode, excavate, synthesize, colour, assemble.

use svg::node::element::{Definitions, Group, Image, Path, Rectangle};
use svg::Document;

use crate::encode::encode;
use crate::error::Result;
use crate::export::ExportSize;
use crate::template::{compose, StyleProps, TemplateConfig, TemplateRegistry};
use crate::types::{Colour, EccLevel, Excavation, FinderZone, StyleConfig};

use super::corners::{corner_dot, corner_eye};
use super::excavation::{apply_excavation, compute_excavation, effective_ecc, RenderContext};
use super::fill::{gradient_id, resolve_fill, Fill, Region, Role, Zone};
use super::modules::synthesize;
use super::primitive::fmt_num;

/// Eye dot radius in modules (a 3x3 block).
const DOT_RADIUS_MODULES: f32 = 1.5;

/// A rendered code and the facts it was rendered with.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub document: Document,
    /// Pixel size the geometry was generated at.
    pub size: u32,
    /// Grid side in modules.
    pub modules: usize,
    /// ECC level handed to the encoder.
    pub ecc: EccLevel,
    pub excavation: Option<Excavation>,
    /// Template applied, if any.
    pub template: Option<&'static str>,
}

impl RenderResult {
    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }
}

/// Render `config` into an SVG document.
pub fn render(config: &StyleConfig, context: RenderContext) -> Result<RenderResult> {
    let size = ExportSize::square(config.size).validate()?.width;
    let margin = config.margin;

    let image = config.image.as_ref().filter(|img| {
        let usable = img.is_usable();
        if !usable {
            tracing::warn!(src = %img.src, width = img.width, height = img.height, "dropping unusable image");
        }
        usable
    });
    let excavating = image.is_some_and(|img| img.excavate);

    let ecc = effective_ecc(config.ecc, excavating, context);
    let grid = encode(&config.text, ecc)?;
    let n = grid.size();
    let module_size = size as f32 / (n as f32 + 2.0 * margin as f32);

    let placement = image.map(|img| compute_excavation(n, margin, size, img));
    let excavation = placement.filter(|_| excavating).map(|p| p.excavation);
    let grid = match &excavation {
        Some(e) => apply_excavation(&grid, e),
        None => grid,
    };

    let prefix = config.id_prefix.as_str();
    let mut gradients = Vec::new();
    let mut track = |fill: Fill| {
        if let Some(def) = fill.gradient() {
            gradients.push(def.to_node());
        }
        fill
    };

    let canvas = Region::canvas(size as f32);
    let background = track(resolve_fill(
        &config.background_spec(),
        &canvas,
        &gradient_id(prefix, Role::Background, Zone::Canvas),
        Colour::WHITE,
    ));

    let module_area = Region::modules(n, module_size, margin);
    let foreground = track(resolve_fill(
        &config.foreground_spec(),
        &module_area,
        &gradient_id(prefix, Role::Foreground, Zone::Modules),
        Colour::BLACK,
    ));

    let mut data = foreground.apply(Group::new().set("id", format!("{}-modules", prefix)));
    for primitive in synthesize(&grid, module_size, margin, config.pattern) {
        data = data.add(primitive.to_node(None));
    }

    let eye_spec = config.eye_spec();
    let dot_spec = config.dot_spec();
    let mut eyes = Group::new().set("id", format!("{}-eyes", prefix));
    for zone in FinderZone::ALL {
        let region = Region::eye(zone, n, module_size, margin);
        let eye_fill = track(resolve_fill(
            &eye_spec,
            &region,
            &gradient_id(prefix, Role::Eye, Zone::Eye(zone)),
            Colour::BLACK,
        ));
        let dot_fill = track(resolve_fill(
            &dot_spec,
            &region,
            &gradient_id(prefix, Role::Dot, Zone::Eye(zone)),
            Colour::BLACK,
        ));

        let ring = Path::new()
            .set("d", corner_eye(region.x, region.y, region.size, config.corner_pattern))
            .set("fill-rule", "evenodd");
        let (cx, cy) = region.center();
        let dot = corner_dot(cx, cy, DOT_RADIUS_MODULES * module_size, config.corner_dot_pattern);

        eyes = eyes
            .add(eye_fill.apply(ring))
            .add(dot_fill.apply(Group::new()).add(dot.to_node(None)));
    }

    let mut content = Group::new();
    if !gradients.is_empty() {
        let mut defs = Definitions::new();
        for gradient in gradients {
            defs = defs.add(gradient);
        }
        content = content.add(defs);
    }
    content = content
        .add(background.apply(
            Rectangle::new()
                .set("width", size)
                .set("height", size),
        ))
        .add(data)
        .add(eyes);

    if let (Some(img), Some(p)) = (image, placement) {
        let (x, y, w, h) = p.pixel_rect(module_size, margin);
        let mut node = Image::new()
            .set("href", img.src.as_str())
            .set("x", fmt_num(x))
            .set("y", fmt_num(y))
            .set("width", fmt_num(w))
            .set("height", fmt_num(h))
            .set("preserveAspectRatio", "none");
        if let Some(opacity) = img.opacity {
            node = node.set("opacity", fmt_num(opacity.clamp(0.0, 1.0)));
        }
        content = content.add(node);
    }

    let template = match config.template.as_deref() {
        Some(id) => {
            let found = TemplateRegistry::get(id);
            if found.is_none() {
                tracing::warn!(template = id, "unknown template, rendering without one");
            }
            found
        }
        None => None,
    };

    let document = match template {
        Some(template) => {
            let style = StyleProps {
                foreground: config.foreground_spec().primary(Colour::BLACK),
                background: config.background_spec().primary(Colour::WHITE),
                margin: margin as f32 * module_size,
                module_size,
                qr_size: n as f32 * module_size,
            };
            let template_config = TemplateConfig {
                pixel_size: module_size,
                source_value: config.text.clone(),
            };
            compose(content, size, template, &style, &template_config)
        }
        None => Document::new()
            .set("viewBox", (0, 0, size, size))
            .set("width", size)
            .set("height", size)
            .add(content),
    };

    tracing::debug!(size, modules = n, %ecc, template = template.map(|t| t.id), "rendered");

    Ok(RenderResult {
        document,
        size,
        modules: n,
        ecc,
        excavation,
        template: template.map(|t| t.id),
    })
}
