//! Decorative templates around a rendered code.
//!
//! Templates draw in a fixed 300x300 space. The code is handed to a
//! template already scaled into that space, together with style values
//! scaled by the same `ScaleFactor`; the template's root is then resized to
//! the requested pixel size.

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use svg::node::element::Group;
use svg::Document;

use crate::types::Colour;

pub use builtin::BuiltinTemplates;

/// Side of the template coordinate space.
pub const TEMPLATE_SPACE: f32 = 300.0;

/// Factor from output pixels to template units (`300 / size`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    pub fn for_size(size: u32) -> Self {
        ScaleFactor(TEMPLATE_SPACE / size.max(1) as f32)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert a pixel length into template units.
    pub fn apply(self, px: f32) -> f32 {
        px * self.0
    }
}

/// Style values a template may reuse.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProps {
    pub foreground: Colour,
    pub background: Colour,
    /// Quiet zone width.
    pub margin: f32,
    pub module_size: f32,
    /// Side of the module area.
    pub qr_size: f32,
}

impl StyleProps {
    pub fn scaled(&self, k: ScaleFactor) -> StyleProps {
        StyleProps {
            foreground: self.foreground,
            background: self.background,
            margin: k.apply(self.margin),
            module_size: k.apply(self.module_size),
            qr_size: k.apply(self.qr_size),
        }
    }
}

/// Per-render inputs for templates that generate their own decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    /// Module pitch.
    pub pixel_size: f32,
    /// Encoded text, used to seed deterministic decoration.
    pub source_value: String,
}

impl TemplateConfig {
    pub fn scaled(&self, k: ScaleFactor) -> TemplateConfig {
        TemplateConfig {
            pixel_size: k.apply(self.pixel_size),
            source_value: self.source_value.clone(),
        }
    }
}

/// Builds the template document around an already scaled code group.
pub type Wrapper = fn(Group, &StyleProps, &TemplateConfig) -> Document;

/// A named template.
#[derive(Clone, Copy)]
pub struct TemplateDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub wrapper: Wrapper,
}

impl fmt::Debug for TemplateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static REGISTRY: LazyLock<HashMap<&'static str, TemplateDefinition>> = LazyLock::new(|| {
    BuiltinTemplates::all()
        .into_iter()
        .map(|t| (t.id, t))
        .collect()
});

/// Immutable registry of the built-in templates.
pub struct TemplateRegistry;

impl TemplateRegistry {
    /// Look up a template by id.
    pub fn get(id: &str) -> Option<&'static TemplateDefinition> {
        REGISTRY.get(id)
    }

    /// All templates, sorted by id.
    pub fn all() -> Vec<&'static TemplateDefinition> {
        let mut all: Vec<_> = REGISTRY.values().collect();
        all.sort_by_key(|t| t.id);
        all
    }
}

/// Wrap `content` (drawn at `size` pixels) in `template`.
pub fn compose(
    content: Group,
    size: u32,
    template: &TemplateDefinition,
    style: &StyleProps,
    config: &TemplateConfig,
) -> Document {
    let k = ScaleFactor::for_size(size);
    tracing::debug!(template = template.id, size, scale = k.value(), "composing template");

    let child = Group::new()
        .set("transform", format!("scale({})", k.value()))
        .add(content);

    (template.wrapper)(child, &style.scaled(k), &config.scaled(k))
        .set("width", size)
        .set("height", size)
}

/// Root document in template space.
pub(crate) fn template_document() -> Document {
    Document::new().set("viewBox", (0, 0, 300, 300))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::Rectangle;

    fn style() -> StyleProps {
        StyleProps {
            foreground: Colour::BLACK,
            background: Colour::WHITE,
            margin: 40.0,
            module_size: 10.0,
            qr_size: 210.0,
        }
    }

    fn config() -> TemplateConfig {
        TemplateConfig {
            pixel_size: 10.0,
            source_value: "https://example.com".to_string(),
        }
    }

    fn content() -> Group {
        Group::new().add(Rectangle::new().set("width", 500).set("height", 500))
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(ScaleFactor::for_size(300).value(), 1.0);
        assert_eq!(ScaleFactor::for_size(600).apply(10.0), 5.0);
        assert_eq!(ScaleFactor::for_size(150).apply(10.0), 20.0);
    }

    #[test]
    fn test_style_props_scaled() {
        let scaled = style().scaled(ScaleFactor::for_size(600));
        assert_eq!(scaled.margin, 20.0);
        assert_eq!(scaled.module_size, 5.0);
        assert_eq!(scaled.qr_size, 105.0);
        assert_eq!(scaled.foreground, Colour::BLACK);

        let cfg = config().scaled(ScaleFactor::for_size(600));
        assert_eq!(cfg.pixel_size, 5.0);
        assert_eq!(cfg.source_value, "https://example.com");
    }

    #[test]
    fn test_registry_lookup() {
        assert!(TemplateRegistry::get("frame").is_some());
        assert!(TemplateRegistry::get("caption").is_some());
        assert!(TemplateRegistry::get("dot-ring").is_some());
        assert!(TemplateRegistry::get("no-such-template").is_none());

        let ids: Vec<_> = TemplateRegistry::all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["caption", "dot-ring", "frame"]);
    }

    #[test]
    fn test_compose_keeps_template_space() {
        for template in TemplateRegistry::all() {
            let doc = compose(content(), 600, template, &style(), &config());
            let out = doc.to_string();
            assert!(out.contains("viewBox=\"0 0 300 300\""), "{}", template.id);
            assert!(out.contains("width=\"600\""), "{}", template.id);
            assert!(out.contains("height=\"600\""), "{}", template.id);
            assert!(out.contains("scale(0.5)"), "{}", template.id);
        }
    }
}
