//! Match annotations, kept in a side-table keyed by `(catalog, code)`.
//!
//! Catalog records stay immutable; a cross-match run writes its outcome here.
//! Each entry is replaced wholesale, never merged with a previous run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::MAX_ALTERNATIVES;
use super::cross::SourceMatches;
use super::engine::MatchResult;
use crate::color::catalog::CatalogType;
use crate::color::convert::Rgb;
use crate::distance::DistanceMethod;

/// The resolved best match of one color, plus up to three alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnnotation {
    pub match_code: String,
    pub match_rgb: Rgb,
    pub distance: f64,
    pub match_method: DistanceMethod,
    /// Catalog the match was drawn from.
    pub match_type: CatalogType,
    pub alternatives: Vec<MatchResult>,
}

impl MatchAnnotation {
    /// Build an annotation from a ranked candidate list. Returns `None` when
    /// there are no candidates.
    pub fn from_ranked(
        ranked: &[MatchResult],
        method: DistanceMethod,
        match_type: CatalogType,
    ) -> Option<Self> {
        let (best, rest) = ranked.split_first()?;
        Some(Self {
            match_code: best.target_code.clone(),
            match_rgb: best.target_rgb,
            distance: best.distance,
            match_method: method,
            match_type,
            alternatives: rest.iter().take(MAX_ALTERNATIVES).cloned().collect(),
        })
    }
}

type Key = (CatalogType, String);

/// Side-table of [`MatchAnnotation`]s.
#[derive(Debug, Clone, Default)]
pub struct MatchAnnotations {
    entries: HashMap<Key, MatchAnnotation>,
}

impl MatchAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, catalog: CatalogType, code: &str) -> Option<&MatchAnnotation> {
        self.entries.get(&(catalog, code.to_string()))
    }

    /// Resolved match code for a color, if it has one.
    pub fn match_code(&self, catalog: CatalogType, code: &str) -> Option<&str> {
        self.get(catalog, code).map(|a| a.match_code.as_str())
    }

    /// Insert or replace the annotation for a color.
    pub fn insert(
        &mut self,
        catalog: CatalogType,
        code: impl Into<String>,
        annotation: MatchAnnotation,
    ) -> Option<MatchAnnotation> {
        self.entries.insert((catalog, code.into()), annotation)
    }

    pub fn remove(&mut self, catalog: CatalogType, code: &str) -> Option<MatchAnnotation> {
        self.entries.remove(&(catalog, code.to_string()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CatalogType, &str, &MatchAnnotation)> {
        self.entries
            .iter()
            .map(|((catalog, code), a)| (*catalog, code.as_str(), a))
    }

    /// Write the outcome of a cross-match run.
    ///
    /// Each source in `results` gets its annotation replaced; sources whose
    /// candidate list is empty lose any annotation they had. Returns the number
    /// of sources that ended up annotated.
    pub fn apply_run(
        &mut self,
        source_type: CatalogType,
        results: &[SourceMatches],
        method: DistanceMethod,
        target_type: CatalogType,
    ) -> usize {
        let mut annotated = 0;
        for sm in results {
            match MatchAnnotation::from_ranked(&sm.matches, method, target_type) {
                Some(annotation) => {
                    self.insert(source_type, sm.source_code.clone(), annotation);
                    annotated += 1;
                }
                None => {
                    self.remove(source_type, &sm.source_code);
                }
            }
        }
        tracing::debug!(
            "applied {annotated}/{} {source_type} annotations ({method} → {target_type})",
            results.len()
        );
        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(code: &str, distance: f64) -> MatchResult {
        MatchResult {
            target_code: code.to_string(),
            target_rgb: Rgb::new(1, 2, 3),
            distance,
        }
    }

    fn ranked(source: &str, codes: &[(&str, f64)]) -> SourceMatches {
        SourceMatches {
            source_code: source.to_string(),
            matches: codes.iter().map(|&(c, d)| result(c, d)).collect(),
        }
    }

    #[test]
    fn test_from_ranked_splits_best_and_alternatives() {
        let sm = ranked("T1", &[("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0), ("E", 5.0)]);
        let a = MatchAnnotation::from_ranked(&sm.matches, DistanceMethod::DeltaE2000, CatalogType::Reference)
            .unwrap();
        assert_eq!(a.match_code, "A");
        assert_eq!(a.distance, 1.0);
        assert_eq!(a.match_type, CatalogType::Reference);
        let alts: Vec<_> = a.alternatives.iter().map(|m| m.target_code.as_str()).collect();
        assert_eq!(alts, ["B", "C", "D"]);
    }

    #[test]
    fn test_from_ranked_empty_is_none() {
        assert!(MatchAnnotation::from_ranked(&[], DistanceMethod::RgbEuclidean, CatalogType::Thread).is_none());
    }

    #[test]
    fn test_apply_run_overwrites_wholesale() {
        let mut table = MatchAnnotations::new();
        table.apply_run(
            CatalogType::Thread,
            &[ranked("T1", &[("A", 1.0), ("B", 2.0), ("C", 3.0)])],
            DistanceMethod::RgbEuclidean,
            CatalogType::Reference,
        );
        table.apply_run(
            CatalogType::Thread,
            &[ranked("T1", &[("Z", 0.5)])],
            DistanceMethod::DeltaE2000,
            CatalogType::Reference,
        );
        let a = table.get(CatalogType::Thread, "T1").unwrap();
        assert_eq!(a.match_code, "Z");
        assert_eq!(a.match_method, DistanceMethod::DeltaE2000);
        assert!(a.alternatives.is_empty());
    }

    #[test]
    fn test_apply_run_removes_sources_without_candidates() {
        let mut table = MatchAnnotations::new();
        table.apply_run(
            CatalogType::Thread,
            &[ranked("T1", &[("A", 1.0)]), ranked("T2", &[("B", 1.0)])],
            DistanceMethod::RgbEuclidean,
            CatalogType::Reference,
        );
        let n = table.apply_run(
            CatalogType::Thread,
            &[ranked("T1", &[])],
            DistanceMethod::RgbEuclidean,
            CatalogType::Reference,
        );
        assert_eq!(n, 0);
        assert_eq!(table.match_code(CatalogType::Thread, "T1"), None);
        assert_eq!(table.match_code(CatalogType::Thread, "T2"), Some("B"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_code_in_different_catalogs_is_distinct() {
        let mut table = MatchAnnotations::new();
        table.apply_run(
            CatalogType::Thread,
            &[ranked("100", &[("PMS 100", 1.0)])],
            DistanceMethod::RgbEuclidean,
            CatalogType::Reference,
        );
        table.apply_run(
            CatalogType::Reference,
            &[ranked("100", &[("T100", 2.0)])],
            DistanceMethod::RgbEuclidean,
            CatalogType::Thread,
        );
        assert_eq!(table.match_code(CatalogType::Thread, "100"), Some("PMS 100"));
        assert_eq!(table.match_code(CatalogType::Reference, "100"), Some("T100"));
    }
}
