//! Module grid and error correction levels.
//!
//! A `ModuleGrid` is the square boolean matrix produced by the encoder. It is
//! never mutated in place; excavation produces a new grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};

/// Side length (in modules) of a finder pattern.
pub const FINDER_SIZE: usize = 7;

/// Error correction level of the encoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EccLevel {
    /// ~7% recovery.
    L,
    /// ~15% recovery.
    #[default]
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

impl EccLevel {
    /// All levels from weakest to strongest.
    pub const ALL: [EccLevel; 4] = [EccLevel::L, EccLevel::M, EccLevel::Q, EccLevel::H];

    /// Nominal fraction of codewords that can be recovered.
    pub fn recovery(self) -> f32 {
        match self {
            EccLevel::L => 0.07,
            EccLevel::M => 0.15,
            EccLevel::Q => 0.25,
            EccLevel::H => 0.30,
        }
    }

    /// Whether this is one of the two weakest levels.
    pub fn is_weak(self) -> bool {
        matches!(self, EccLevel::L | EccLevel::M)
    }

    pub fn name(self) -> &'static str {
        match self {
            EccLevel::L => "L",
            EccLevel::M => "M",
            EccLevel::Q => "Q",
            EccLevel::H => "H",
        }
    }
}

impl FromStr for EccLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(EccLevel::L),
            "M" | "MEDIUM" => Ok(EccLevel::M),
            "Q" | "QUARTILE" => Ok(EccLevel::Q),
            "H" | "HIGH" => Ok(EccLevel::H),
            _ => Err(QrError::Parse {
                message: format!("Invalid error correction level: '{}'", s),
                help: Some("Use one of L, M, Q, H".to_string()),
            }),
        }
    }
}

impl TryFrom<String> for EccLevel {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EccLevel> for String {
    fn from(level: EccLevel) -> Self {
        level.name().to_string()
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three finder pattern zones. There is no bottom-right zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinderZone {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl FinderZone {
    pub const ALL: [FinderZone; 3] = [FinderZone::TopLeft, FinderZone::TopRight, FinderZone::BottomLeft];

    /// Top-left module of this zone in a grid of side `n`.
    pub fn origin(self, n: usize) -> (usize, usize) {
        let far = n.saturating_sub(FINDER_SIZE);
        match self {
            FinderZone::TopLeft => (0, 0),
            FinderZone::TopRight => (far, 0),
            FinderZone::BottomLeft => (0, far),
        }
    }

    /// Short suffix used in generated element ids.
    pub fn slug(self) -> &'static str {
        match self {
            FinderZone::TopLeft => "tl",
            FinderZone::TopRight => "tr",
            FinderZone::BottomLeft => "bl",
        }
    }

    /// Whether module `(x, y)` lies in this zone's 7x7 footprint.
    pub fn contains(self, n: usize, x: usize, y: usize) -> bool {
        let (ox, oy) = self.origin(n);
        x >= ox && x < ox + FINDER_SIZE && y >= oy && y < oy + FINDER_SIZE
    }
}

/// Rectangle of modules cleared for an overlay image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excavation {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Excavation {
    /// Whether module `(x, y)` is inside the rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x
            && x < self.x.saturating_add(self.w)
            && y >= self.y
            && y < self.y.saturating_add(self.h)
    }
}

/// Square boolean matrix of modules (`true` = dark).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Build a grid from row-major modules.
    ///
    /// Returns an error if `modules.len()` is not `size * size`.
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self> {
        if size == 0 || modules.len() != size * size {
            return Err(QrError::Encode {
                message: format!(
                    "Module grid of side {} needs {} modules, got {}",
                    size,
                    size * size,
                    modules.len()
                ),
                help: None,
            });
        }
        Ok(Self { size, modules })
    }

    /// Build a grid from rows of `#` (dark) and any other character (light).
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = rows.len();
        let modules = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();
        Self::new(size, modules)
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module value; out-of-range coordinates read as light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }

    /// Whether `(x, y)` lies in one of the three finder zones.
    pub fn is_finder(&self, x: usize, y: usize) -> bool {
        FinderZone::ALL
            .iter()
            .any(|zone| zone.contains(self.size, x, y))
    }

    /// Iterate over `(x, y, dark)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(move |(i, &dark)| (i % self.size, i / self.size, dark))
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Return a copy with every module inside `excavation` forced light.
    pub fn excavated(&self, excavation: &Excavation) -> ModuleGrid {
        let modules = self
            .iter()
            .map(|(x, y, dark)| dark && !excavation.contains(x, y))
            .collect();
        ModuleGrid {
            size: self.size,
            modules,
        }
    }
}
