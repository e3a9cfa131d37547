//! The code search index.
//!
//! # Structures
//! - exact map: normalized code → color (last write wins on duplicate codes)
//! - reverse map: normalized match code → every color annotated with it
//!
//! Codes are normalized (trimmed, lowercased) the same way on insert and on
//! lookup.
//! - prefix trie over both codes and match codes
//!
//! # Complexity
//! Exact and reverse lookups are O(1). Prefix search is O(|prefix|) plus the
//! bounded subtree walk. Substring filtering and fuzzy suggestion scan every
//! color.

use std::collections::HashMap;

use serde::Serialize;

use super::fuzzy::similarity_above;
use super::trie::PrefixTrie;
use super::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_NODE_CAPACITY, MAX_SUGGESTIONS, MIN_PREFIX_LEN};
use crate::color::catalog::Color;
use crate::config::MatchConfig;
use crate::error::SkeinError;
use crate::matching::annotations::MatchAnnotations;

/// A fuzzy suggestion and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    pub color: &'a Color,
    pub similarity: f64,
}

#[derive(Debug)]
pub struct SearchIndex {
    colors: Vec<Color>,
    /// Normalized code per color, parallel to `colors`.
    keys: Vec<String>,
    /// Normalized resolved match code per color, parallel to `colors`.
    match_keys: Vec<Option<String>>,
    exact: HashMap<String, usize>,
    reverse: HashMap<String, Vec<usize>>,
    trie: PrefixTrie,
    fuzzy_threshold: f64,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::with_settings(DEFAULT_NODE_CAPACITY, DEFAULT_FUZZY_THRESHOLD)
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty index sized and tuned from `config`.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::with_settings(config.trie_node_capacity, config.fuzzy_threshold)
    }

    /// Empty index whose trie nodes cache up to `node_capacity` colors each.
    pub fn with_node_capacity(node_capacity: usize) -> Self {
        Self::with_settings(node_capacity, DEFAULT_FUZZY_THRESHOLD)
    }

    /// Empty index with an explicit trie bound and default fuzzy threshold
    /// for [`suggest`](Self::suggest).
    pub fn with_settings(node_capacity: usize, fuzzy_threshold: f64) -> Self {
        Self {
            colors: Vec::new(),
            keys: Vec::new(),
            match_keys: Vec::new(),
            exact: HashMap::new(),
            reverse: HashMap::new(),
            trie: PrefixTrie::new(node_capacity),
            fuzzy_threshold,
        }
    }

    /// Replace the indexed contents with `colors`.
    ///
    /// Colors that have a resolved match in `annotations` are also indexed by
    /// their match code. A color with an empty code is rejected before
    /// anything is touched, so on error the previous contents stay intact.
    pub fn build(
        &mut self,
        colors: &[Color],
        annotations: &MatchAnnotations,
    ) -> Result<(), SkeinError> {
        if let Some(position) = colors.iter().position(|c| c.code().trim().is_empty()) {
            return Err(SkeinError::EmptyCode { position });
        }

        self.clear();
        self.colors.reserve(colors.len());

        for (id, color) in colors.iter().enumerate() {
            let key = normalize(color.code());
            self.exact.insert(key.clone(), id);
            self.trie.insert(&key, id);

            let match_key = annotations
                .match_code(color.catalog(), color.code())
                .map(normalize);
            if let Some(mk) = &match_key {
                self.reverse.entry(mk.clone()).or_default().push(id);
                self.trie.insert(mk, id);
            }

            self.colors.push(color.clone());
            self.keys.push(key);
            self.match_keys.push(match_key);
        }

        tracing::debug!(
            "search index built: {} colors, {} exact keys, {} match codes, {} trie nodes",
            self.colors.len(),
            self.exact.len(),
            self.reverse.len(),
            self.trie.node_count()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.colors.clear();
        self.keys.clear();
        self.match_keys.clear();
        self.exact.clear();
        self.reverse.clear();
        self.trie.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn node_capacity(&self) -> usize {
        self.trie.node_capacity()
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// Case-insensitive lookup by code.
    pub fn exact_lookup(&self, term: &str) -> Option<&Color> {
        self.exact
            .get(&normalize(term))
            .map(|&id| &self.colors[id])
    }

    /// Every color whose resolved match code equals `match_code`.
    pub fn reverse_lookup(&self, match_code: &str) -> Vec<&Color> {
        self.reverse
            .get(&normalize(match_code))
            .map(|ids| ids.iter().map(|&id| &self.colors[id]).collect())
            .unwrap_or_default()
    }

    /// Up to `limit` distinct colors whose code or match code starts with
    /// `prefix`. Callers should not query below
    /// [`MIN_PREFIX_LEN`](super::MIN_PREFIX_LEN) characters.
    pub fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<&Color> {
        self.trie
            .collect(&normalize(prefix), limit)
            .into_iter()
            .map(|id| &self.colors[id])
            .collect()
    }

    /// Autocomplete for a search box: nothing below [`MIN_PREFIX_LEN`]
    /// characters, otherwise up to [`MAX_SUGGESTIONS`] prefix hits.
    pub fn complete(&self, prefix: &str) -> Vec<&Color> {
        if prefix.trim().chars().count() < MIN_PREFIX_LEN {
            return Vec::new();
        }
        self.prefix_search(prefix, MAX_SUGGESTIONS)
    }

    /// Search-box filtering: an exact code hit, else a match-code hit, else
    /// every color whose code or match code contains `term`. An empty term
    /// returns everything.
    pub fn filter(&self, term: &str) -> Vec<&Color> {
        let term = normalize(term);
        if term.is_empty() {
            return self.colors.iter().collect();
        }
        if let Some(&id) = self.exact.get(&term) {
            return vec![&self.colors[id]];
        }
        if let Some(ids) = self.reverse.get(&term) {
            return ids.iter().map(|&id| &self.colors[id]).collect();
        }

        self.keys
            .iter()
            .zip(&self.match_keys)
            .zip(&self.colors)
            .filter(|((key, match_key), _)| {
                key.contains(&term) || match_key.as_deref().is_some_and(|mk| mk.contains(&term))
            })
            .map(|(_, color)| color)
            .collect()
    }

    /// "Did you mean" suggestions for a term that found nothing, best first.
    ///
    /// Only codes scoring strictly above `threshold` are kept; equal scores
    /// keep catalog order. A blank term suggests nothing.
    pub fn fuzzy_suggest(&self, term: &str, limit: usize, threshold: f64) -> Vec<Suggestion<'_>> {
        let term = normalize(term);
        if term.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<Suggestion<'_>> = self
            .keys
            .iter()
            .zip(&self.colors)
            .filter_map(|(key, color)| {
                let similarity = similarity_above(&term, key, threshold);
                (similarity > threshold).then_some(Suggestion { color, similarity })
            })
            .collect();

        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(limit);
        hits
    }

    /// [`fuzzy_suggest`](Self::fuzzy_suggest) with the index's configured
    /// threshold.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<Suggestion<'_>> {
        self.fuzzy_suggest(term, limit, self.fuzzy_threshold)
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::catalog::CatalogType;
    use crate::color::convert::Rgb;
    use crate::distance::DistanceMethod;
    use crate::matching::annotations::MatchAnnotation;
    use crate::search::DEFAULT_FUZZY_LIMIT;

    fn colors(codes: &[&str]) -> Vec<Color> {
        codes
            .iter()
            .enumerate()
            .map(|(i, c)| Color::reference(*c, Rgb::new(i as u8, 0, 0)))
            .collect()
    }

    fn built(codes: &[&str]) -> SearchIndex {
        let mut idx = SearchIndex::new();
        idx.build(&colors(codes), &MatchAnnotations::new()).unwrap();
        idx
    }

    fn codes<'a>(found: impl IntoIterator<Item = &'a Color>) -> Vec<&'a str> {
        found.into_iter().map(Color::code).collect()
    }

    fn annotate(table: &mut MatchAnnotations, code: &str, match_code: &str) {
        table.insert(
            CatalogType::Reference,
            code,
            MatchAnnotation {
                match_code: match_code.to_string(),
                match_rgb: Rgb::new(0, 0, 0),
                distance: 1.0,
                match_method: DistanceMethod::RgbEuclidean,
                match_type: CatalogType::Thread,
                alternatives: Vec::new(),
            },
        );
    }

    #[test]
    fn test_prefix_search_pms2() {
        let idx = built(&["PMS200", "PMS201", "PMS300"]);
        let mut found = codes(idx.prefix_search("pms2", 10));
        found.sort_unstable();
        assert_eq!(found, ["PMS200", "PMS201"]);
        assert_eq!(codes(idx.prefix_search("PMS3", 10)), ["PMS300"]);
    }

    #[test]
    fn test_fuzzy_suggest_pms200() {
        let idx = built(&["PMS200", "PMS201", "Red Thread"]);
        let hits = idx.fuzzy_suggest("PMS200", 5, 0.3);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].color.code(), "PMS200");
        assert_eq!(hits[0].similarity, 1.0);
        assert_eq!(hits[1].color.code(), "PMS201");
        assert!(hits[1].similarity > 0.3);
    }

    #[test]
    fn test_fuzzy_suggest_is_bounded_and_ordered() {
        let idx = built(&["1902", "1903", "1904", "1905", "1906", "1907", "1800"]);
        let hits = idx.suggest("1901", DEFAULT_FUZZY_LIMIT);
        assert_eq!(hits.len(), DEFAULT_FUZZY_LIMIT);
        assert!(hits.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        assert_eq!(hits[0].color.code(), "1902");
        assert!(idx.fuzzy_suggest("  ", 5, 0.3).is_empty());
    }

    #[test]
    fn test_exact_lookup_is_case_insensitive_last_write_wins() {
        let mut idx = SearchIndex::new();
        let cs = vec![
            Color::thread("1902", Rgb::new(1, 1, 1)),
            Color::thread("1902", Rgb::new(2, 2, 2)),
            Color::thread("Gold 4", Rgb::new(3, 3, 3)),
        ];
        idx.build(&cs, &MatchAnnotations::new()).unwrap();
        let hit = idx.exact_lookup("1902").unwrap();
        assert_eq!(crate::color::catalog::ColorSample::rgb(hit), Rgb::new(2, 2, 2));
        assert_eq!(idx.exact_lookup(" gold 4 ").map(Color::code), Some("Gold 4"));
        assert!(idx.exact_lookup("1903").is_none());
    }

    #[test]
    fn test_match_codes_are_indexed() {
        let cs = colors(&["PMS 185 C", "PMS 186 C", "PMS 300 C"]);
        let mut table = MatchAnnotations::new();
        annotate(&mut table, "PMS 185 C", "Madeira 1147");
        annotate(&mut table, "PMS 186 C", "Madeira 1147");

        let mut idx = SearchIndex::new();
        idx.build(&cs, &table).unwrap();

        assert_eq!(codes(idx.reverse_lookup("MADEIRA 1147")), ["PMS 185 C", "PMS 186 C"]);
        assert!(idx.reverse_lookup("nothing").is_empty());
        assert_eq!(codes(idx.prefix_search("made", 10)), ["PMS 185 C", "PMS 186 C"]);
    }

    #[test]
    fn test_filter_falls_through_exact_reverse_substring() {
        let cs = colors(&["PMS 185 C", "PMS 1857 C", "PMS 300 C"]);
        let mut table = MatchAnnotations::new();
        annotate(&mut table, "PMS 300 C", "1076");

        let mut idx = SearchIndex::new();
        idx.build(&cs, &table).unwrap();

        assert_eq!(codes(idx.filter("pms 185 c")), ["PMS 185 C"]);
        assert_eq!(codes(idx.filter("1076")), ["PMS 300 C"]);
        assert_eq!(codes(idx.filter("185")), ["PMS 185 C", "PMS 1857 C"]);
        assert_eq!(codes(idx.filter("07")), ["PMS 300 C"]);
        assert_eq!(idx.filter("").len(), 3);
        assert!(idx.filter("zzz").is_empty());
    }

    #[test]
    fn test_empty_code_fails_and_keeps_previous_contents() {
        let mut idx = built(&["PMS200"]);
        let err = idx
            .build(&colors(&["PMS201", "  "]), &MatchAnnotations::new())
            .unwrap_err();
        assert!(matches!(err, SkeinError::EmptyCode { position: 1 }));
        assert_eq!(idx.len(), 1);
        assert!(idx.exact_lookup("pms200").is_some());
    }

    #[test]
    fn test_codes_with_surrounding_whitespace_are_found_by_their_own_code() {
        let cs = colors(&["PMS 200 ", " Gold 4"]);
        let mut table = MatchAnnotations::new();
        annotate(&mut table, "PMS 200 ", " Madeira 1147 ");

        let mut idx = SearchIndex::new();
        idx.build(&cs, &table).unwrap();

        assert_eq!(idx.exact_lookup("PMS 200 ").map(Color::code), Some("PMS 200 "));
        assert_eq!(idx.exact_lookup(" Gold 4").map(Color::code), Some(" Gold 4"));
        assert_eq!(codes(idx.reverse_lookup(" Madeira 1147 ")), ["PMS 200 "]);
        assert_eq!(codes(idx.prefix_search(" Gold", 10)), [" Gold 4"]);
        assert_eq!(codes(idx.prefix_search(" madeira", 10)), ["PMS 200 "]);
        assert_eq!(codes(idx.filter("PMS 200 ")), ["PMS 200 "]);
    }

    #[test]
    fn test_config_sets_trie_bound_and_threshold() {
        let cs = colors(&["ab9", "ab5", "ab1", "PMS200", "PMS201"]);
        let mut config = MatchConfig::builtin();

        let mut wide = SearchIndex::from_config(&config);
        wide.build(&cs, &MatchAnnotations::new()).unwrap();
        assert_eq!(codes(wide.prefix_search("ab", 10)), ["ab9", "ab5", "ab1"]);
        assert_eq!(codes(wide.suggest("PMS200", 5).iter().map(|h| h.color)), ["PMS200", "PMS201"]);

        config.trie_node_capacity = 1;
        config.fuzzy_threshold = 0.9;
        let mut narrow = SearchIndex::from_config(&config);
        narrow.build(&cs, &MatchAnnotations::new()).unwrap();
        assert_eq!(narrow.node_capacity(), 1);
        assert_eq!(narrow.fuzzy_threshold(), 0.9);
        // Only "ab9" is cached at the shared node; the rest come from deeper
        // nodes in key order.
        assert_eq!(codes(narrow.prefix_search("ab", 10)), ["ab9", "ab1", "ab5"]);
        // "pms201" scores 5/6, below the configured threshold.
        assert_eq!(codes(narrow.suggest("PMS200", 5).iter().map(|h| h.color)), ["PMS200"]);
    }

    #[test]
    fn test_complete_respects_min_prefix_and_max_suggestions() {
        let many: Vec<String> = (0..15).map(|i| format!("PMS {i:02}")).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let idx = built(&refs);
        assert!(idx.complete("p").is_empty());
        assert_eq!(idx.complete("pm").len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut idx = built(&["PMS200", "PMS201"]);
        idx.build(&colors(&["1902"]), &MatchAnnotations::new()).unwrap();
        assert_eq!(idx.len(), 1);
        assert!(idx.exact_lookup("pms200").is_none());
        assert!(idx.prefix_search("pm", 10).is_empty());
    }
}
