//! Generation-tagged shared handle around a [`SearchIndex`].
//!
//! Every successful rebuild bumps the generation. Query results carry the
//! generation they were computed against, and [`SharedIndex::is_current`]
//! tells a caller whether an answer still describes the live index.

use std::sync::Arc;

use parking_lot::RwLock;

use super::index::SearchIndex;
use crate::color::catalog::Color;
use crate::config::MatchConfig;
use crate::error::SkeinError;
use crate::matching::annotations::MatchAnnotations;

/// A value computed against a particular index generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    pub generation: u64,
    pub value: T,
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    index: SearchIndex,
}

/// Cloneable handle; clones share the same index.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<Inner>>,
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(SearchIndex::default())
    }
}

impl SharedIndex {
    /// Wrap an index at generation 0.
    pub fn new(index: SearchIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                generation: 0,
                index,
            })),
        }
    }

    /// Empty index tuned from `config`. Rebuilds keep the same settings.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(SearchIndex::from_config(config))
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Build a fresh index from `colors` and swap it in.
    ///
    /// The new index is built outside the lock with the live index's trie
    /// bound and fuzzy threshold. On error the live index and its generation
    /// are left unchanged.
    pub fn rebuild(
        &self,
        colors: &[Color],
        annotations: &MatchAnnotations,
    ) -> Result<u64, SkeinError> {
        let (capacity, threshold) = {
            let inner = self.inner.read();
            (inner.index.node_capacity(), inner.index.fuzzy_threshold())
        };
        let mut fresh = SearchIndex::with_settings(capacity, threshold);
        fresh.build(colors, annotations)?;

        let mut inner = self.inner.write();
        inner.index = fresh;
        inner.generation += 1;
        tracing::info!(
            "search index rebuilt: generation {}, {} colors",
            inner.generation,
            inner.index.len()
        );
        Ok(inner.generation)
    }

    /// Run `f` against the live index under a read lock.
    pub fn query<R>(&self, f: impl FnOnce(&SearchIndex) -> R) -> Tagged<R> {
        let inner = self.inner.read();
        Tagged {
            generation: inner.generation,
            value: f(&inner.index),
        }
    }

    /// Owned results of [`SearchIndex::prefix_search`].
    pub fn prefix_search(&self, prefix: &str, limit: usize) -> Tagged<Vec<Color>> {
        self.query(|idx| idx.prefix_search(prefix, limit).into_iter().cloned().collect())
    }

    /// Owned results of [`SearchIndex::filter`].
    pub fn filter(&self, term: &str) -> Tagged<Vec<Color>> {
        self.query(|idx| idx.filter(term).into_iter().cloned().collect())
    }

    /// Owned results of [`SearchIndex::complete`].
    pub fn complete(&self, prefix: &str) -> Tagged<Vec<Color>> {
        self.query(|idx| idx.complete(prefix).into_iter().cloned().collect())
    }

    /// Owned `(color, similarity)` pairs from [`SearchIndex::suggest`].
    pub fn suggest(&self, term: &str, limit: usize) -> Tagged<Vec<(Color, f64)>> {
        self.query(|idx| {
            idx.suggest(term, limit)
                .into_iter()
                .map(|s| (s.color.clone(), s.similarity))
                .collect()
        })
    }

    /// Owned `(color, similarity)` pairs from [`SearchIndex::fuzzy_suggest`].
    pub fn fuzzy_suggest(
        &self,
        term: &str,
        limit: usize,
        threshold: f64,
    ) -> Tagged<Vec<(Color, f64)>> {
        self.query(|idx| {
            idx.fuzzy_suggest(term, limit, threshold)
                .into_iter()
                .map(|s| (s.color.clone(), s.similarity))
                .collect()
        })
    }
}
