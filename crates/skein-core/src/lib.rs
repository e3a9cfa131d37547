//! Skein Core — domain layer for cross-catalog color matching.
//!
//! This crate contains the color science (sRGB → XYZ → CIELAB), the distance
//! metrics, the nearest-neighbor matching engine, and the code search index.
//! Everything here is synchronous and runtime-free; background execution of
//! cross-catalog runs lives in `skein-worker`.

pub mod color;
pub mod config;
pub mod distance;
pub mod error;
pub mod matching;
pub mod search;

// Re-exports for convenience.
pub use color::catalog::{CatalogType, Color, ColorSample};
pub use color::convert::{Lab, Rgb, Xyz, rgb_to_lab};
pub use color::hex::{hex_to_rgb, rgb_to_hex};
pub use config::MatchConfig;
pub use distance::{DistanceMethod, MatchParams};
pub use error::SkeinError;
pub use matching::annotations::{MatchAnnotation, MatchAnnotations};
pub use matching::cross::{CuratedPairing, CuratedPairings, SourceMatches};
pub use matching::engine::{MatchResult, find_closest, find_closest_configured};
pub use search::index::SearchIndex;
pub use search::shared::SharedIndex;
