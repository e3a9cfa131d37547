//! String similarity for "did you mean" suggestions.
//!
//! ```text
//! similarity = 1 − lev(a, b) / max(|a|, |b|)
//! ```
//!
//! Equal strings score 1.0 and containment in either direction scores 0.8
//! without running the edit distance. Both inputs are compared lowercase.
//!
//! # Pruning
//! For a threshold `t` a candidate can only survive if
//! `lev < (1 − t) × max_len`. Two cheap checks reject hopeless pairs early:
//! the length difference is a lower bound on the edit distance, and the
//! minimum of any DP row is a lower bound on the final value.

/// Score two strings with no pruning.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    similarity_above(&a.to_lowercase(), &b.to_lowercase(), 0.0)
}

/// Score two already-lowercased strings, returning 0.0 early when the result
/// provably cannot exceed `threshold`.
///
/// Any value above `threshold` is exactly what [`string_similarity`] would
/// return for the same pair.
pub fn similarity_above(a: &str, b: &str, threshold: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return 0.8;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len());
    let slack = (1.0 - threshold) * max_len as f64;

    if (a.len().abs_diff(b.len()) as f64) > slack {
        return 0.0;
    }

    match bounded_levenshtein(&a, &b, slack.floor() as usize) {
        Some(d) => 1.0 - d as f64 / max_len as f64,
        None => 0.0,
    }
}

/// Levenshtein distance, or `None` as soon as it is known to exceed `max`.
pub fn bounded_levenshtein(a: &[char], b: &[char], max: usize) -> Option<usize> {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
            row_min = row_min.min(curr[j + 1]);
        }
        if row_min > max {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let d = prev[b.len()];
    (d <= max).then_some(d)
}
