//! Display-oriented similarity percentage derived from a match distance.
//!
//! Each metric has a very different numeric range, so the distance is scaled
//! per method before being subtracted from 100:
//!
//! ```text
//! deltaE2000 → 100 − min(d × 10,   100)
//! lab        → 100 − min(d / 2,    100)
//! rgb        → 100 − min(d / 4.42, 100)    (4.42 ≈ 441.67 / 100, the RGB cube diagonal)
//! ```

use serde::{Deserialize, Serialize};

use super::DistanceMethod;

/// Similarity as a percentage in [0, 100].
pub fn similarity_percent(distance: f64, method: DistanceMethod) -> f64 {
    let penalty = match method {
        DistanceMethod::DeltaE2000 => distance * 10.0,
        DistanceMethod::LabEuclidean => distance / 2.0,
        DistanceMethod::RgbEuclidean => distance / 4.42,
    };
    (100.0 - penalty.min(100.0)).max(0.0)
}

/// Coarse bucket used to color-code a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityClass {
    HighMatch,
    MediumMatch,
    LowMatch,
}

impl SimilarityClass {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 85.0 {
            Self::HighMatch
        } else if percent >= 70.0 {
            Self::MediumMatch
        } else {
            Self::LowMatch
        }
    }
}
