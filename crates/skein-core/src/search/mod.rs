//! Code search — exact lookup, reverse match-code lookup, prefix trie and
//! bounded-edit-distance fuzzy suggestions.
//!
//! Indexes are explicitly constructed and owned. [`index::SearchIndex`] is
//! rebuilt wholesale whenever a catalog or its annotations change;
//! [`shared::SharedIndex`] wraps one behind a lock with a generation counter
//! so callers can drop answers computed against a replaced index.

pub mod fuzzy;
pub mod index;
pub mod shared;
pub mod trie;

/// Shortest prefix worth sending to [`index::SearchIndex::prefix_search`].
/// Enforced by callers.
pub const MIN_PREFIX_LEN: usize = 2;

/// Suggestion list length for prefix completion.
pub const MAX_SUGGESTIONS: usize = 10;

/// Default number of fuzzy "did you mean" suggestions.
pub const DEFAULT_FUZZY_LIMIT: usize = 5;

/// Default fuzzy similarity threshold; only strictly greater scores are kept.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.3;

/// Default bound on the color references cached per trie node.
pub const DEFAULT_NODE_CAPACITY: usize = 10;
