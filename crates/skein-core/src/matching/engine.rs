//! Top-K nearest-neighbor ranking over a catalog.
//!
//! # Complexity
//! O(N) distance evaluations plus an O(N log N) stable sort per query.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::catalog::{Color, ColorSample};
use crate::color::convert::Rgb;
use crate::config::MatchConfig;
use crate::distance::{self, MatchParams};

/// One ranked candidate. Ephemeral; regenerated on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub target_code: String,
    pub target_rgb: Rgb,
    pub distance: f64,
}

impl MatchResult {
    pub fn for_target(target: &Color, distance: f64) -> Self {
        Self {
            target_code: target.code().to_string(),
            target_rgb: target.rgb(),
            distance,
        }
    }
}

/// Sort ascending by distance. Stable, so ties keep their incoming order.
pub(crate) fn sort_by_distance(results: &mut [MatchResult]) {
    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Rank `catalog` against `query` and keep the `k` closest.
///
/// Candidates whose code is in `exclude` are dropped before ranking. Ties are
/// broken by catalog order. The result length is `min(k, |catalog| − excluded)`.
pub fn find_closest<Q>(
    query: &Q,
    catalog: &[Color],
    k: usize,
    params: MatchParams,
    exclude: Option<&HashSet<String>>,
) -> Vec<MatchResult>
where
    Q: ColorSample + ?Sized,
{
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<MatchResult> = catalog
        .iter()
        .filter(|c| exclude.is_none_or(|ex| !ex.contains(c.code())))
        .map(|c| MatchResult::for_target(c, distance::compute(query, c, params)))
        .collect();

    sort_by_distance(&mut ranked);
    ranked.truncate(k);
    ranked
}

/// [`find_closest`] with `k` and the metric taken from `config`.
pub fn find_closest_configured<Q>(
    query: &Q,
    catalog: &[Color],
    config: &MatchConfig,
) -> Vec<MatchResult>
where
    Q: ColorSample + ?Sized,
{
    find_closest(query, catalog, config.limit, config.params(), None)
}
