//! Nearest-neighbor matching over color catalogs.
//!
//! [`engine`] ranks one query against a catalog. [`cross`] ranks a whole
//! source catalog in batches, and [`annotations`] records the outcome.

pub mod annotations;
pub mod cross;
pub mod custom;
pub mod engine;

/// Alternatives kept per source in addition to the best match.
pub const MAX_ALTERNATIVES: usize = 3;

/// Ranked candidates kept per source: best match plus alternatives.
pub const MATCHES_PER_SOURCE: usize = MAX_ALTERNATIVES + 1;
