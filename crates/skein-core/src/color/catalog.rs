//! Catalog records and the sampling trait the distance engine consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::convert::{Lab, Rgb, rgb_to_lab};

/// Which catalog a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogType {
    /// Embroidery thread chart.
    Thread,
    /// Spot-color reference book.
    Reference,
    /// Ad-hoc color entered by the user.
    Custom,
}

impl CatalogType {
    /// Human-readable label for status text and suggestion lists.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Thread => "Thread",
            Self::Reference => "Reference",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything a distance can be measured from.
///
/// `lab()` defaults to deriving from `rgb()`; catalog records override it with
/// their cached value so hot loops never re-run the conversion.
pub trait ColorSample {
    fn rgb(&self) -> Rgb;

    fn lab(&self) -> Lab {
        rgb_to_lab(self.rgb())
    }
}

impl ColorSample for Rgb {
    fn rgb(&self) -> Rgb {
        *self
    }
}

/// One immutable catalog entry.
///
/// `lab` is always the conversion of `rgb`; both are fixed at construction.
/// Match results are not stored here; see
/// [`MatchAnnotations`](crate::matching::annotations::MatchAnnotations).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    code: String,
    rgb: Rgb,
    lab: Lab,
    catalog: CatalogType,
}

impl Color {
    pub fn new(code: impl Into<String>, rgb: Rgb, catalog: CatalogType) -> Self {
        Self {
            code: code.into(),
            rgb,
            lab: rgb_to_lab(rgb),
            catalog,
        }
    }

    pub fn thread(code: impl Into<String>, rgb: Rgb) -> Self {
        Self::new(code, rgb, CatalogType::Thread)
    }

    pub fn reference(code: impl Into<String>, rgb: Rgb) -> Self {
        Self::new(code, rgb, CatalogType::Reference)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn catalog(&self) -> CatalogType {
        self.catalog
    }
}

impl ColorSample for Color {
    fn rgb(&self) -> Rgb {
        self.rgb
    }

    fn lab(&self) -> Lab {
        self.lab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_caches_lab_of_its_rgb() {
        let rgb = Rgb::new(40, 90, 200);
        let color = Color::thread("1902", rgb);
        assert_eq!(color.lab(), rgb_to_lab(rgb));
        assert_eq!(ColorSample::lab(&rgb), color.lab());
    }

    #[test]
    fn test_catalog_type_serializes_lowercase() {
        let json = serde_json::to_string(&CatalogType::Reference).unwrap();
        assert_eq!(json, "\"reference\"");
    }
}
