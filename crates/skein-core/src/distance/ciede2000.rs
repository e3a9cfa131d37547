//! CIEDE2000 color difference.
//!
//! # Reference
//! Sharma, Wu, Dalal — "The CIEDE2000 Color-Difference Formula: Implementation
//! Notes, Supplementary Test Data, and Mathematical Observations" (2005).
//!
//! ```text
//! C̄   = (C1 + C2) / 2
//! G   = ½ (1 − √(C̄⁷ / (C̄⁷ + 25⁷)))
//! a′  = (1 + G) a          C′ = √(a′² + b²)          h′ = atan2(b, a′) ∈ [0°, 360°)
//!
//! ΔL′ = L2 − L1            ΔC′ = C2′ − C1′
//! Δh′ = h2′ − h1′, wrapped by ±360° when |h2′ − h1′| > 180°
//! ΔH′ = 2 √(C1′ C2′) sin(Δh′ / 2)
//!
//! H̄′  = (h1′ + h2′) / 2, shifted by ±360° / 2 when |h1′ − h2′| > 180°
//! T   = 1 − 0.17 cos(H̄′ − 30°) + 0.24 cos(2H̄′) + 0.32 cos(3H̄′ + 6°) − 0.20 cos(4H̄′ − 63°)
//! S_L = 1 + 0.015 (L̄ − 50)² / √(20 + (L̄ − 50)²)
//! S_C = 1 + 0.045 C̄′
//! S_H = 1 + 0.015 C̄′ T
//! R_T = −2 √(C̄′⁷ / (C̄′⁷ + 25⁷)) sin(60° exp(−((H̄′ − 275°) / 25°)²))
//!
//! ΔE  = √((ΔL′/S_L)² + (ΔC′/S_C)² + (ΔH′/S_H)² + R_T (ΔC′/S_C)(ΔH′/S_H))
//! ```
//!
//! Weighting factors are fixed at k_L = k_C = k_H = 1. Zero-chroma and
//! identical inputs fall out of the formula itself (ΔH′ vanishes), so there
//! is no special-casing.

use crate::color::convert::Lab;

const K_L: f64 = 1.0;
const K_C: f64 = 1.0;
const K_H: f64 = 1.0;

/// 25⁷
const POW25_7: f64 = 6_103_515_625.0;

/// `√(c⁷ / (c⁷ + 25⁷))`, shared by the G factor and R_C.
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// Hue angle in degrees, normalized to [0, 360).
fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    let h = b.atan2(a_prime).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

/// CIEDE2000 ΔE between two LAB colors.
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let c_bar = (lab1.chroma() + lab2.chroma()) / 2.0;
    let g = 0.5 * (1.0 - chroma_weight(c_bar));

    let a1_prime = (1.0 + g) * lab1.a;
    let a2_prime = (1.0 + g) * lab2.a;

    let c1_prime = a1_prime.hypot(lab1.b);
    let c2_prime = a2_prime.hypot(lab2.b);

    let h1_prime = hue_degrees(lab1.b, a1_prime);
    let h2_prime = hue_degrees(lab2.b, a2_prime);

    // Deltas
    let delta_l_prime = lab2.l - lab1.l;
    let delta_c_prime = c2_prime - c1_prime;

    let raw_dh = h2_prime - h1_prime;
    let delta_h_prime = if raw_dh > 180.0 {
        raw_dh - 360.0
    } else if raw_dh < -180.0 {
        raw_dh + 360.0
    } else {
        raw_dh
    };
    let delta_big_h_prime =
        2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    // Means
    let l_bar_prime = (lab1.l + lab2.l) / 2.0;
    let c_bar_prime = (c1_prime + c2_prime) / 2.0;

    let hue_sum = h1_prime + h2_prime;
    let h_bar_prime = if (h1_prime - h2_prime).abs() > 180.0 {
        if hue_sum < 360.0 {
            (hue_sum + 360.0) / 2.0
        } else {
            (hue_sum - 360.0) / 2.0
        }
    } else {
        hue_sum / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_prime - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_prime).to_radians().cos()
        + 0.32 * (3.0 * h_bar_prime + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_prime - 63.0).to_radians().cos();

    // Weighting functions
    let l_offset_sq = (l_bar_prime - 50.0).powi(2);
    let s_l = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;
    let s_h = 1.0 + 0.015 * c_bar_prime * t;

    // Rotation term
    let delta_theta = 30.0 * (-((h_bar_prime - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * chroma_weight(c_bar_prime);
    let r_t = -r_c * (2.0 * delta_theta).to_radians().sin();

    let l_term = delta_l_prime / (K_L * s_l);
    let c_term = delta_c_prime / (K_C * s_c);
    let h_term = delta_big_h_prime / (K_H * s_h);

    (l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term).sqrt()
}
