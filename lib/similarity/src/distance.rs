//! Fuzzy similarity metrics
//!
//! Both metrics are symmetric and return a score in [0.0, 1.0] where 1.0
//! means identical.

use crate::normalize::{normalize_text, tokenize};
use ahash::AHashSet;

/// Jaccard overlap of the normalized word tokens of `a` and `b`
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let norm_a = normalize_text(a);
    let norm_b = normalize_text(b);
    let tokens_a: AHashSet<&str> = tokenize(&norm_a).into_iter().collect();
    let tokens_b: AHashSet<&str> = tokenize(&norm_b).into_iter().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}

/// Character-level similarity: `2 * lcs / (len(a) + len(b))`.
///
/// Case-folded before comparison. Lengths are counted in chars.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();

    if a_chars.is_empty() && b_chars.is_empty() {
        return 1.0;
    }
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }

    let matched = lcs_length(&a_chars, &b_chars);
    (2 * matched) as f64 / (a_chars.len() + b_chars.len()) as f64
}

/// Longest common subsequence length, two-row DP
fn lcs_length(a: &[char], b: &[char]) -> usize {
    // keep the shorter sequence in the inner loop
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &oc in outer {
        for (j, &ic) in inner.iter().enumerate() {
            curr[j + 1] = if oc == ic {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}
