//! Thread shimmer heuristic.
//!
//! Polyester and metallic threads read lighter than their measured RGB. The
//! heuristic scores a color from its LAB coordinates and nudges lightness
//! (and, for metallics, chroma) before a LAB-based distance is taken.
//!
//! ```text
//! score = (L + |a| + |b|) / 3
//!
//! score <  50 → matte      L − 3  (floor 0)
//! score <= 75 → semi-gloss L + 3  (cap 100)
//! score >  75 → metallic   L + 6  (cap 100), a × 0.95, b × 0.95
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::convert::{Lab, Rgb, rgb_to_lab};

const MATTE_CEILING: f64 = 50.0;
const SEMI_GLOSS_CEILING: f64 = 75.0;

/// Heuristic sheen class of a thread color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShimmerLevel {
    Matte,
    SemiGloss,
    Metallic,
}

impl ShimmerLevel {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Matte => "matte",
            Self::SemiGloss => "semi-gloss",
            Self::Metallic => "metallic",
        }
    }
}

impl fmt::Display for ShimmerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw shimmer score, `(L + |a| + |b|) / 3`.
pub fn shimmer_score(lab: Lab) -> f64 {
    (lab.l + lab.a.abs() + lab.b.abs()) / 3.0
}

/// Classify a LAB color by its shimmer score.
pub fn classify_shimmer(lab: Lab) -> ShimmerLevel {
    let score = shimmer_score(lab);
    if score < MATTE_CEILING {
        ShimmerLevel::Matte
    } else if score <= SEMI_GLOSS_CEILING {
        ShimmerLevel::SemiGloss
    } else {
        ShimmerLevel::Metallic
    }
}

/// Return a shimmer-adjusted copy of `lab`. The input is not modified.
pub fn adjust_for_shimmer(lab: Lab) -> Lab {
    match classify_shimmer(lab) {
        ShimmerLevel::Matte => Lab {
            l: (lab.l - 3.0).max(0.0),
            ..lab
        },
        ShimmerLevel::SemiGloss => Lab {
            l: (lab.l + 3.0).min(100.0),
            ..lab
        },
        ShimmerLevel::Metallic => Lab {
            l: (lab.l + 6.0).min(100.0),
            a: lab.a * 0.95,
            b: lab.b * 0.95,
        },
    }
}

/// Shimmer class and score for a catalog swatch, for badge display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShimmerInfo {
    pub level: ShimmerLevel,
    pub score: f64,
}

/// Compute [`ShimmerInfo`] straight from sRGB.
pub fn shimmer_info(rgb: Rgb) -> ShimmerInfo {
    let lab = rgb_to_lab(rgb);
    ShimmerInfo {
        level: classify_shimmer(lab),
        score: shimmer_score(lab),
    }
}
