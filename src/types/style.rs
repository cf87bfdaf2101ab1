//! Style configuration (`*.qr.yaml` / `*.qr.json`).
//!
//! # Example
//!
//! ```yaml
//! text: https://example.com
//! size: 512
//! ecc: Q
//! pattern: rounded-square
//! corner_pattern: rounded
//! foreground:
//!   type: linear
//!   angle: 45
//!   stops:
//!     - { offset: 0, color: "#1d4ed8" }
//!     - { offset: 100, color: "#9333ea" }
//! image:
//!   src: logo.png
//!   width: 96
//!   height: 96
//! template: frame
//! ```

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QrError, Result};
use crate::export::ExportOptions;

use super::colour::Colour;
use super::grid::EccLevel;
use super::pattern::{CornerDotPatternId, CornerPatternId, PatternId};

/// One colour stop of a gradient; `offset` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Colour,
}

impl GradientStop {
    pub fn new(offset: f32, color: Colour) -> Self {
        Self { offset, color }
    }
}

/// A colour specification: flat colour or two-stop gradient.
///
/// Configuration files may give a plain colour string (`"#112233"`) or a
/// tagged object (`{type: linear, stops: [...], angle: 45}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColorSpec {
    Solid {
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Colour>,
    },
    Linear {
        stops: Vec<GradientStop>,
        #[serde(skip_serializing_if = "Option::is_none")]
        angle: Option<f32>,
    },
    Radial {
        stops: Vec<GradientStop>,
    },
}

impl ColorSpec {
    /// A flat colour.
    pub fn solid(color: Colour) -> Self {
        ColorSpec::Solid { color: Some(color) }
    }

    /// A linear gradient between two colours.
    pub fn linear(from: Colour, to: Colour, angle: Option<f32>) -> Self {
        ColorSpec::Linear {
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(100.0, to)],
            angle,
        }
    }

    /// A radial gradient from the centre colour outwards.
    pub fn radial(inner: Colour, outer: Colour) -> Self {
        ColorSpec::Radial {
            stops: vec![GradientStop::new(0.0, inner), GradientStop::new(100.0, outer)],
        }
    }

    /// Normalize into the canonical form.
    ///
    /// - Solid without a colour takes `fallback`.
    /// - Gradients keep exactly two stops: the lowest-offset stop (first on
    ///   ties) and the highest-offset stop (last on ties), clamped to
    ///   `0..=100` and sorted ascending.
    /// - A gradient with no stops becomes `Solid(fallback)`; with one stop it
    ///   becomes a solid of that stop's colour.
    /// - Linear angles are wrapped into `0..360`.
    ///
    /// Normalizing an already normalized spec returns it unchanged.
    pub fn normalize(&self, fallback: Colour) -> ColorSpec {
        match self {
            ColorSpec::Solid { color } => ColorSpec::solid(color.unwrap_or(fallback)),
            ColorSpec::Linear { stops, angle } => match endpoints(stops) {
                Endpoints::None => ColorSpec::solid(fallback),
                Endpoints::One(color) => ColorSpec::solid(color),
                Endpoints::Two(pair) => ColorSpec::Linear {
                    stops: pair.to_vec(),
                    angle: angle
                        .filter(|a| a.is_finite())
                        .map(|a| a.rem_euclid(360.0)),
                },
            },
            ColorSpec::Radial { stops } => match endpoints(stops) {
                Endpoints::None => ColorSpec::solid(fallback),
                Endpoints::One(color) => ColorSpec::solid(color),
                Endpoints::Two(pair) => ColorSpec::Radial {
                    stops: pair.to_vec(),
                },
            },
        }
    }

    /// Whether this spec describes a gradient.
    pub fn is_gradient(&self) -> bool {
        !matches!(self, ColorSpec::Solid { .. })
    }

    /// A single representative colour: the solid colour, or the midpoint
    /// of the two gradient endpoints.
    pub fn primary(&self, fallback: Colour) -> Colour {
        match self.normalize(fallback) {
            ColorSpec::Solid { color } => color.unwrap_or(fallback),
            ColorSpec::Linear { stops, .. } | ColorSpec::Radial { stops } => {
                stops[0].color.mix(stops[1].color, 0.5)
            }
        }
    }
}

enum Endpoints {
    None,
    One(Colour),
    Two([GradientStop; 2]),
}

fn clamp_offset(offset: f32) -> f32 {
    if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, 100.0)
    }
}

fn endpoints(stops: &[GradientStop]) -> Endpoints {
    match stops {
        [] => Endpoints::None,
        [only] => Endpoints::One(only.color),
        _ => {
            let clamped: Vec<GradientStop> = stops
                .iter()
                .map(|s| GradientStop::new(clamp_offset(s.offset), s.color))
                .collect();

            // First stop wins ties for the low end, last stop for the high end
            let mut low = clamped[0];
            let mut high = clamped[0];
            for stop in &clamped[1..] {
                if stop.offset < low.offset {
                    low = *stop;
                }
                if stop.offset >= high.offset {
                    high = *stop;
                }
            }
            Endpoints::Two([low, high])
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedColorSpec {
    Solid {
        #[serde(default)]
        color: Option<Colour>,
    },
    Linear {
        #[serde(default)]
        stops: Vec<GradientStop>,
        #[serde(default)]
        angle: Option<f32>,
    },
    Radial {
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
}

const COLOR_TYPES: [&str; 3] = ["solid", "linear", "radial"];

impl<'de> Deserialize<'de> for ColorSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        if value.is_string() {
            let color: Colour = serde_json::from_value(value).map_err(D::Error::custom)?;
            return Ok(ColorSpec::solid(color));
        }

        let tag = match &value {
            serde_json::Value::Object(map) => match map.get("type") {
                Some(serde_json::Value::String(tag)) => tag.clone(),
                Some(other) => {
                    return Err(D::Error::custom(format!(
                        "colour type must be a string, got {}",
                        other
                    )))
                }
                None => {
                    return Err(D::Error::custom(
                        "colour object needs a `type` of solid, linear or radial",
                    ))
                }
            },
            other => {
                return Err(D::Error::custom(format!(
                    "expected a colour string or a {{type: ...}} object, got {}",
                    other
                )))
            }
        };

        if !COLOR_TYPES.contains(&tag.as_str()) {
            return Err(D::Error::custom(format!(
                "unknown colour type '{}', expected solid, linear or radial",
                tag
            )));
        }

        Ok(
            match serde_json::from_value::<TaggedColorSpec>(value).map_err(D::Error::custom)? {
                TaggedColorSpec::Solid { color } => ColorSpec::Solid { color },
                TaggedColorSpec::Linear { stops, angle } => ColorSpec::Linear { stops, angle },
                TaggedColorSpec::Radial { stops } => ColorSpec::Radial { stops },
            },
        )
    }
}

/// Overlay image (logo) settings. `width`/`height` and the optional `x`/`y`
/// are in output pixels; the image is centred when `x`/`y` are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    /// File path, `file://`, `http(s)://` or `data:` URI.
    pub src: String,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Clear the modules under the image.
    #[serde(default = "default_true")]
    pub excavate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

fn default_true() -> bool {
    true
}

impl ImageSettings {
    /// A centred, excavating image of the given pixel size.
    pub fn centered(src: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
            x: None,
            y: None,
            excavate: true,
            opacity: None,
        }
    }

    /// Whether the image has a source and finite, positive geometry.
    pub fn is_usable(&self) -> bool {
        let finite = |v: Option<f32>| v.map_or(true, f32::is_finite);
        !self.src.is_empty()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && finite(self.x)
            && finite(self.y)
    }
}

/// Configuration file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the syntax from a file extension (`.json` is JSON, else YAML).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Everything needed to render and export one code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Payload to encode.
    pub text: String,

    /// Output size in pixels (square).
    pub size: u32,

    /// Requested error correction level.
    pub ecc: EccLevel,

    /// Quiet zone in modules.
    pub margin: u32,

    pub pattern: PatternId,
    pub corner_pattern: CornerPatternId,
    pub corner_dot_pattern: CornerDotPatternId,

    pub foreground: Option<ColorSpec>,
    pub background: Option<ColorSpec>,
    /// Eye ring colour; defaults to the foreground.
    pub eye_color: Option<ColorSpec>,
    /// Eye dot colour; defaults to the eye colour.
    pub dot_color: Option<ColorSpec>,

    pub image: Option<ImageSettings>,

    /// Template id; unknown ids render without a template.
    pub template: Option<String>,

    /// Prefix for generated element ids.
    pub id_prefix: String,

    pub export: ExportOptions,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: 300,
            ecc: EccLevel::M,
            margin: 4,
            pattern: PatternId::default(),
            corner_pattern: CornerPatternId::default(),
            corner_dot_pattern: CornerDotPatternId::default(),
            foreground: None,
            background: None,
            eye_color: None,
            dot_color: None,
            image: None,
            template: None,
            id_prefix: "qr".to_string(),
            export: ExportOptions::default(),
        }
    }
}

impl StyleConfig {
    /// Default style for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Load a configuration file (YAML, or JSON for `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| QrError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content, ConfigFormat::from_path(path)).map_err(|e| match e {
            QrError::Parse { message, help } => QrError::Parse {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            other => other,
        })
    }

    /// Parse configuration text.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| QrError::Parse {
                message: format!("Invalid config: {}", e),
                help: Some("Check the YAML syntax and colour specs".to_string()),
            }),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| QrError::Parse {
                message: format!("Invalid config: {}", e),
                help: Some("Check the JSON syntax and colour specs".to_string()),
            }),
        }
    }

    /// Normalized foreground spec.
    pub fn foreground_spec(&self) -> ColorSpec {
        normalized_or(&self.foreground, Colour::BLACK)
    }

    /// Normalized background spec.
    pub fn background_spec(&self) -> ColorSpec {
        normalized_or(&self.background, Colour::WHITE)
    }

    /// Normalized eye ring spec (falls back to the foreground).
    pub fn eye_spec(&self) -> ColorSpec {
        match &self.eye_color {
            Some(spec) => spec.normalize(self.foreground_spec().primary(Colour::BLACK)),
            None => self.foreground_spec(),
        }
    }

    /// Normalized eye dot spec (falls back to the eye ring).
    pub fn dot_spec(&self) -> ColorSpec {
        match &self.dot_color {
            Some(spec) => spec.normalize(self.eye_spec().primary(Colour::BLACK)),
            None => self.eye_spec(),
        }
    }
}

fn normalized_or(spec: &Option<ColorSpec>, fallback: Colour) -> ColorSpec {
    spec.as_ref()
        .map(|s| s.normalize(fallback))
        .unwrap_or_else(|| ColorSpec::solid(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn red() -> Colour {
        Colour::rgb(255, 0, 0)
    }

    fn green() -> Colour {
        Colour::rgb(0, 255, 0)
    }

    fn blue() -> Colour {
        Colour::rgb(0, 0, 255)
    }

    fn three_stop_linear() -> ColorSpec {
        ColorSpec::Linear {
            stops: vec![
                GradientStop::new(50.0, green()),
                GradientStop::new(90.0, blue()),
                GradientStop::new(10.0, red()),
            ],
            angle: Some(30.0),
        }
    }

    #[test]
    fn test_normalize_three_stops_keeps_endpoints() {
        let normalized = three_stop_linear().normalize(Colour::BLACK);
        assert_eq!(
            normalized,
            ColorSpec::Linear {
                stops: vec![GradientStop::new(10.0, red()), GradientStop::new(90.0, blue())],
                angle: Some(30.0),
            }
        );
    }

    #[test]
    fn test_normalize_all_four_roles() {
        let mut config = StyleConfig::new("x");
        config.foreground = Some(three_stop_linear());
        config.background = Some(three_stop_linear());
        config.eye_color = Some(three_stop_linear());
        config.dot_color = Some(ColorSpec::Radial {
            stops: vec![
                GradientStop::new(40.0, green()),
                GradientStop::new(0.0, red()),
                GradientStop::new(100.0, blue()),
            ],
        });

        for spec in [
            config.foreground_spec(),
            config.background_spec(),
            config.eye_spec(),
            config.dot_spec(),
        ] {
            match spec {
                ColorSpec::Linear { stops, .. } | ColorSpec::Radial { stops } => {
                    assert_eq!(stops.len(), 2);
                    assert!(stops[0].offset <= stops[1].offset);
                    assert_eq!(stops[0].color, red());
                    assert_eq!(stops[1].color, blue());
                }
                other => panic!("expected gradient, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_normalize_swaps_crossed_pair() {
        let spec = ColorSpec::Radial {
            stops: vec![GradientStop::new(80.0, red()), GradientStop::new(20.0, blue())],
        };
        assert_eq!(
            spec.normalize(Colour::BLACK),
            ColorSpec::Radial {
                stops: vec![GradientStop::new(20.0, blue()), GradientStop::new(80.0, red())],
            }
        );
    }

    #[test]
    fn test_normalize_clamps_offsets() {
        let spec = ColorSpec::Linear {
            stops: vec![GradientStop::new(-20.0, red()), GradientStop::new(250.0, blue())],
            angle: Some(-90.0),
        };
        assert_eq!(
            spec.normalize(Colour::BLACK),
            ColorSpec::Linear {
                stops: vec![GradientStop::new(0.0, red()), GradientStop::new(100.0, blue())],
                angle: Some(270.0),
            }
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let specs = [
            three_stop_linear(),
            ColorSpec::Solid { color: None },
            ColorSpec::Radial { stops: vec![] },
            ColorSpec::Linear {
                stops: vec![GradientStop::new(30.0, red()), GradientStop::new(30.0, blue())],
                angle: None,
            },
        ];
        for spec in specs {
            let once = spec.normalize(Colour::WHITE);
            assert_eq!(once.normalize(Colour::BLACK), once);
        }
    }

    #[test]
    fn test_normalize_missing_fields_use_fallback() {
        let fallback = Colour::rgb(1, 2, 3);
        assert_eq!(
            ColorSpec::Solid { color: None }.normalize(fallback),
            ColorSpec::solid(fallback)
        );
        assert_eq!(
            ColorSpec::Linear { stops: vec![], angle: None }.normalize(fallback),
            ColorSpec::solid(fallback)
        );
        assert_eq!(
            ColorSpec::Radial { stops: vec![GradientStop::new(10.0, red())] }.normalize(fallback),
            ColorSpec::solid(red())
        );
    }

    #[test]
    fn test_deserialize_plain_and_tagged() {
        let plain: ColorSpec = serde_yaml::from_str("\"#ff0000\"").unwrap();
        assert_eq!(plain, ColorSpec::solid(red()));

        let tagged: ColorSpec = serde_yaml::from_str(
            "type: linear\nangle: 45\nstops:\n  - { offset: 0, color: red }\n  - { offset: 100, color: blue }\n",
        )
        .unwrap();
        assert_eq!(tagged, ColorSpec::linear(red(), blue(), Some(45.0)));

        let empty: ColorSpec = serde_yaml::from_str("type: radial\n").unwrap();
        assert_eq!(empty, ColorSpec::Radial { stops: vec![] });
    }

    #[test]
    fn test_deserialize_unknown_shape_rejected() {
        let err = serde_yaml::from_str::<ColorSpec>("type: conic\n").unwrap_err();
        assert!(
            err.to_string()
                .contains("unknown colour type 'conic', expected solid, linear or radial"),
            "{}",
            err
        );
        assert!(serde_yaml::from_str::<ColorSpec>("\"#12\"").is_err());
        assert!(serde_yaml::from_str::<ColorSpec>("stops: []\n").is_err());
        assert!(serde_yaml::from_str::<ColorSpec>("42\n").is_err());

        let err = StyleConfig::parse("text: x\nforeground:\n  type: conic\n", ConfigFormat::Yaml)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown colour type 'conic'"), "{}", message);
    }

    #[test]
    fn test_eye_and_dot_fallback_chain() {
        let mut config = StyleConfig::new("x");
        config.foreground = Some(ColorSpec::solid(red()));
        assert_eq!(config.eye_spec(), ColorSpec::solid(red()));
        assert_eq!(config.dot_spec(), ColorSpec::solid(red()));

        config.eye_color = Some(ColorSpec::solid(blue()));
        assert_eq!(config.dot_spec(), ColorSpec::solid(blue()));
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r##"
text: https://example.com
size: 512
ecc: q
pattern: diamond
corner_pattern: no-such-corner
foreground: "#112233"
image:
  src: logo.png
  width: 64
  height: 32
template: frame
"##;
        let config = StyleConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.text, "https://example.com");
        assert_eq!(config.size, 512);
        assert_eq!(config.ecc, EccLevel::Q);
        assert_eq!(config.margin, 4);
        assert_eq!(config.pattern, PatternId::Diamond);
        assert_eq!(config.corner_pattern, CornerPatternId::Gear);
        assert_eq!(config.foreground, Some(ColorSpec::solid(Colour::rgb(0x11, 0x22, 0x33))));
        let image = config.image.unwrap();
        assert!(image.excavate);
        assert_eq!(image.x, None);
        assert_eq!(config.template.as_deref(), Some("frame"));
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{"text": "hi", "size": 128, "background": {"type": "solid"}}"#;
        let config = StyleConfig::parse(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.size, 128);
        assert_eq!(config.background_spec(), ColorSpec::solid(Colour::WHITE));
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = StyleConfig::parse("size: [1, 2", ConfigFormat::Yaml);
        assert!(matches!(result, Err(QrError::Parse { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.qr.json");
        std::fs::write(&path, r#"{"text": "card"}"#).unwrap();

        let config = StyleConfig::load(&path).unwrap();
        assert_eq!(config.text, "card");

        let missing = StyleConfig::load(&dir.path().join("missing.qr.yaml"));
        assert!(matches!(missing, Err(QrError::Io { .. })));
    }
}
