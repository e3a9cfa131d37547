//! sRGB → CIE XYZ → CIELAB conversion under a D65 reference white.
//!
//! The pipeline is the textbook one used by thread and spot-color charts:
//! 8-bit sRGB is gamma-decompressed, projected into XYZ with the sRGB
//! primaries, scaled to the 0–100 range, and then mapped into LAB relative
//! to the D65 white point.
//!
//! # Reference
//! - IEC 61966-2-1 — sRGB transfer function and primaries
//! - CIE 15:2004 — CIELAB

use serde::{Deserialize, Serialize};

/// D65 reference white in the 0–100 XYZ scale.
pub const D65_WHITE: Xyz = Xyz {
    x: 95.047,
    y: 100.0,
    z: 108.883,
};

/// sRGB (linear) → XYZ matrix for D65 (Lindbloom). Rows sum to the D65 white.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

/// Below this normalized value the LAB companding switches to its linear segment.
const LAB_EPSILON: f64 = 0.008856;
/// Slope of the linear LAB segment.
const LAB_SLOPE: f64 = 7.787;

/// An 8-bit sRGB triple as delivered by catalog ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, `[r, g, b]`.
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Uppercase `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        super::hex::rgb_to_hex([self.r as i32, self.g as i32, self.b as i32])
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// CIE XYZ tristimulus values, scaled so that Y of the reference white is 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIELAB coordinates. `l` is in [0, 100]; `a` and `b` are roughly [-128, 127].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, `sqrt(a² + b²)`.
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }
}

/// Decode one sRGB channel into linear light.
///
/// ```text
/// V <= 0.04045 → V / 12.92
/// V >  0.04045 → ((V + 0.055) / 1.055) ^ 2.4
/// ```
fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert 8-bit sRGB to XYZ (0–100 scale).
pub fn rgb_to_xyz(rgb: Rgb) -> Xyz {
    let lin = [
        srgb_to_linear(rgb.r),
        srgb_to_linear(rgb.g),
        srgb_to_linear(rgb.b),
    ];
    let m = &SRGB_TO_XYZ;
    Xyz {
        x: (m[0][0] * lin[0] + m[0][1] * lin[1] + m[0][2] * lin[2]) * 100.0,
        y: (m[1][0] * lin[0] + m[1][1] * lin[1] + m[1][2] * lin[2]) * 100.0,
        z: (m[2][0] * lin[0] + m[2][1] * lin[1] + m[2][2] * lin[2]) * 100.0,
    }
}

/// LAB companding function.
///
/// ```text
/// t >  0.008856 → t^(1/3)
/// t <= 0.008856 → 7.787 × t + 16/116
/// ```
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_SLOPE * t + 16.0 / 116.0
    }
}

/// Convert XYZ (0–100 scale) to LAB relative to D65.
///
/// ```text
/// L = 116 × f(Y/Yn) − 16
/// a = 500 × (f(X/Xn) − f(Y/Yn))
/// b = 200 × (f(Y/Yn) − f(Z/Zn))
/// ```
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert 8-bit sRGB straight to LAB. Pure and deterministic.
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    xyz_to_lab(rgb_to_xyz(rgb))
}
