//! Color distance metrics — RGB Euclidean, ΔE76, and CIEDE2000.
//!
//! [`compute`] is the single entry point used by the matching engine. LAB-based
//! methods may first pass both sides through the shimmer heuristic; the RGB
//! method ignores that flag entirely.
//!
//! # Known edge case
//! Shimmer adjustment clamps L into [0, 100] on each side before measuring.
//! Near the clamp the adjustment is not injective, so two distinct colors can
//! land on the same adjusted LAB and adjusted distances need not satisfy the
//! triangle inequality. Symmetry of the metric itself is not guaranteed in that
//! regime and callers must not rely on it.

pub mod ciede2000;
pub mod shimmer;
pub mod similarity;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::catalog::ColorSample;
use crate::color::convert::{Lab, Rgb};
use crate::error::SkeinError;

pub use ciede2000::delta_e_2000;
pub use shimmer::{ShimmerLevel, adjust_for_shimmer, classify_shimmer};

/// Distance metric used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceMethod {
    /// Euclidean distance over raw 8-bit channels.
    #[default]
    #[serde(rename = "rgb")]
    RgbEuclidean,
    /// CIE76 ΔE, Euclidean distance in LAB.
    #[serde(rename = "lab")]
    LabEuclidean,
    /// CIEDE2000 ΔE.
    #[serde(rename = "deltaE2000")]
    DeltaE2000,
}

impl DistanceMethod {
    /// Configuration key, matching the serde name.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::RgbEuclidean => "rgb",
            Self::LabEuclidean => "lab",
            Self::DeltaE2000 => "deltaE2000",
        }
    }

    /// Whether the metric works in LAB (and therefore honours the shimmer flag).
    pub const fn is_lab_based(&self) -> bool {
        matches!(self, Self::LabEuclidean | Self::DeltaE2000)
    }

    pub fn all() -> &'static [Self] {
        &[Self::RgbEuclidean, Self::LabEuclidean, Self::DeltaE2000]
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DistanceMethod {
    type Err = SkeinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rgb" => Ok(Self::RgbEuclidean),
            "lab" => Ok(Self::LabEuclidean),
            "deltaE2000" | "deltae2000" | "ciede2000" => Ok(Self::DeltaE2000),
            other => Err(SkeinError::InvalidConfig(format!(
                "unknown distance method {other:?} (expected rgb, lab or deltaE2000)"
            ))),
        }
    }
}

/// The two knobs every distance computation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchParams {
    pub method: DistanceMethod,
    /// Only meaningful with LAB-based methods.
    pub shimmer_enabled: bool,
}

impl MatchParams {
    pub const fn new(method: DistanceMethod, shimmer_enabled: bool) -> Self {
        Self {
            method,
            shimmer_enabled,
        }
    }
}

/// Euclidean distance between two 8-bit RGB triples.
pub fn euclidean_rgb(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// CIE76 ΔE: straight Euclidean distance in LAB.
pub fn lab_euclidean(a: Lab, b: Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Distance between two samples under `params`.
///
/// LAB methods use each side's cached LAB when it has one.
pub fn compute<A, B>(a: &A, b: &B, params: MatchParams) -> f64
where
    A: ColorSample + ?Sized,
    B: ColorSample + ?Sized,
{
    match params.method {
        DistanceMethod::RgbEuclidean => euclidean_rgb(a.rgb(), b.rgb()),
        method => {
            let (mut lab_a, mut lab_b) = (a.lab(), b.lab());
            if params.shimmer_enabled {
                lab_a = adjust_for_shimmer(lab_a);
                lab_b = adjust_for_shimmer(lab_b);
            }
            if method == DistanceMethod::DeltaE2000 {
                delta_e_2000(lab_a, lab_b)
            } else {
                lab_euclidean(lab_a, lab_b)
            }
        }
    }
}
