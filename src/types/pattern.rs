//! Pattern catalog identifiers.
//!
//! Three independent catalogs: data-module shapes, corner eye rings and
//! corner eye dots. Ids are parsed leniently: saved configurations may name
//! patterns this build does not know, and those resolve to the catalog
//! default instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! catalog_id {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, kind = $kind:literal {
            $($variant:ident => $id:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                #[doc = concat!("`", $id, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every id in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical id string.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            /// Strict lookup; `None` for unknown ids.
            pub fn lookup(s: &str) -> Option<Self> {
                let key = s.trim().to_ascii_lowercase().replace('_', "-");
                match key.as_str() {
                    $($id $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Lenient lookup; unknown ids resolve to the default.
            pub fn from_name(s: &str) -> Self {
                Self::lookup(s).unwrap_or_else(|| {
                    tracing::warn!(
                        kind = $kind,
                        id = s,
                        fallback = $name::$default.name(),
                        "unknown pattern id, using default"
                    );
                    $name::$default
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from_name(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.name().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

catalog_id! {
    /// Shape drawn for each dark data module.
    PatternId, default = Circle, kind = "module" {
        Circle => "circle" | "dots",
        LargeCircle => "large-circle",
        Square => "square",
        SmallSquare => "small-square",
        Diamond => "diamond",
        MixedCircles => "mixed-circles" | "mixed",
        Pacman => "pacman" | "pill",
        RoundedSquare => "rounded-square" | "rounded",
    }
}

catalog_id! {
    /// Outer ring of a finder ("eye").
    CornerPatternId, default = Gear, kind = "corner" {
        Square => "square",
        Rounded => "rounded",
        RoundedInward => "rounded-inward",
        RoundedInwardFlipped => "rounded-inward-flipped",
        SemiRound => "semi-round",
        RoundedExtra => "rounded-extra",
        RoundedSquare => "rounded-square",
        Circle => "circle",
        Gear => "gear",
    }
}

catalog_id! {
    /// Inner 3x3 dot of a finder.
    CornerDotPatternId, default = Circle, kind = "corner dot" {
        Square => "square",
        RoundedSquare => "rounded-square",
        Circle => "circle" | "dot",
        RoundedInward => "rounded-inward",
        RoundedInwardFlipped => "rounded-inward-flipped",
        SemiRound => "semi-round",
        Leaf => "leaf",
        Diamond => "diamond",
        DiamondRounded => "diamond-rounded",
    }
}
