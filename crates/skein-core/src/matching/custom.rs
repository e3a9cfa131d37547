//! Ad-hoc matching of a user-entered hex color.

use serde::Serialize;

use super::MAX_ALTERNATIVES;
use super::annotations::MatchAnnotation;
use super::engine::find_closest;
use crate::color::catalog::{CatalogType, Color};
use crate::color::hex::hex_to_rgb;
use crate::distance::MatchParams;
use crate::error::SkeinError;

/// A custom color and what it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomMatch {
    /// The entered color, coded by its canonical `#RRGGBB` form.
    pub color: Color,
    /// Best reference match with the closest threads as alternatives. `None`
    /// when the reference catalog is empty.
    pub annotation: Option<MatchAnnotation>,
}

/// Resolve `hex` against the reference catalog (best match) and the thread
/// catalog (up to three alternatives).
pub fn match_custom(
    hex: &str,
    references: &[Color],
    threads: &[Color],
    params: MatchParams,
) -> Result<CustomMatch, SkeinError> {
    let rgb = hex_to_rgb(hex).ok_or_else(|| SkeinError::InvalidHex(hex.to_string()))?;
    let color = Color::new(rgb.to_hex(), rgb, CatalogType::Custom);

    let annotation = find_closest(&rgb, references, 1, params, None)
        .into_iter()
        .next()
        .map(|best| MatchAnnotation {
            match_code: best.target_code,
            match_rgb: best.target_rgb,
            distance: best.distance,
            match_method: params.method,
            match_type: CatalogType::Reference,
            alternatives: find_closest(&rgb, threads, MAX_ALTERNATIVES, params, None),
        });

    Ok(CustomMatch { color, annotation })
}
