//! Minimum-weight perfect matching of an even vertex set.
//!
//! Christofides needs a perfect matching on the odd-degree vertices of its
//! spanning tree. The matcher is a collaborator behind [`PerfectMatcher`];
//! [`DefaultMatcher`] solves small sets exactly by dynamic programming over
//! subsets. Beyond its limit it pairs greedily and then swaps partners until
//! no exchange of two pairs is cheaper; such matchings are reported as
//! approximate through [`PerfectMatcher::is_exact`].

use std::fmt;

use graphstep_core::models::VertexId;
use tracing::{debug, trace, warn};

/// Largest vertex set [`DefaultMatcher`] solves exactly by default.
pub const DEFAULT_EXACT_MATCHING_LIMIT: usize = 20;

/// Ceiling for the exact limit; the subset table grows as 2^n.
pub const MAX_EXACT_MATCHING_LIMIT: usize = 22;

/// Pairs up an even number of vertices.
pub trait PerfectMatcher: fmt::Debug + Send + Sync {
    /// Match every vertex of `vertices` with exactly one other.
    ///
    /// `cost(a, b)` gives the weight of pairing `a` with `b`. An odd leftover
    /// vertex, if any, stays unmatched.
    fn perfect_matching(
        &self,
        vertices: &[VertexId],
        cost: &dyn Fn(VertexId, VertexId) -> f64,
    ) -> Vec<(VertexId, VertexId)>;

    /// Whether a set of `vertex_count` vertices is matched at minimum weight.
    fn is_exact(&self, _vertex_count: usize) -> bool {
        true
    }
}

/// Exact matching up to `exact_limit` vertices, local search beyond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultMatcher {
    exact_limit: usize,
}

impl Default for DefaultMatcher {
    fn default() -> Self {
        Self {
            exact_limit: DEFAULT_EXACT_MATCHING_LIMIT,
        }
    }
}

impl DefaultMatcher {
    /// Create a matcher that solves up to `exact_limit` vertices exactly,
    /// clamped to [`MAX_EXACT_MATCHING_LIMIT`].
    pub fn new(exact_limit: usize) -> Self {
        Self {
            exact_limit: exact_limit.min(MAX_EXACT_MATCHING_LIMIT),
        }
    }

    /// Largest vertex set solved exactly.
    pub fn exact_limit(&self) -> usize {
        self.exact_limit
    }
}

impl PerfectMatcher for DefaultMatcher {
    fn perfect_matching(
        &self,
        vertices: &[VertexId],
        cost: &dyn Fn(VertexId, VertexId) -> f64,
    ) -> Vec<(VertexId, VertexId)> {
        if vertices.len() % 2 == 1 {
            warn!("Matching an odd number of vertices ({})", vertices.len());
        }
        if self.is_exact(vertices.len()) {
            exact_matching(vertices, cost)
        } else {
            debug!(
                "{} vertices exceed the exact matching limit {}, using local search",
                vertices.len(),
                self.exact_limit
            );
            let mut pairs = greedy_matching(vertices, cost);
            improve_by_exchange(&mut pairs, cost);
            pairs
        }
    }

    fn is_exact(&self, vertex_count: usize) -> bool {
        vertex_count <= self.exact_limit
    }
}

/// Optimal matching by dynamic programming over subsets, O(n * 2^n).
///
/// `best[mask]` is the cheapest matching of the vertices in `mask`; the lowest
/// vertex of a mask is always paired first, so each matching is counted once.
/// Callers keep the set within [`MAX_EXACT_MATCHING_LIMIT`].
pub(crate) fn exact_matching(
    vertices: &[VertexId],
    cost: &dyn Fn(VertexId, VertexId) -> f64,
) -> Vec<(VertexId, VertexId)> {
    let n = vertices.len() - vertices.len() % 2;
    if n == 0 {
        return Vec::new();
    }
    let full = (1usize << n) - 1;
    let mut best = vec![f64::INFINITY; full + 1];
    let mut choice = vec![(0usize, 0usize); full + 1];
    best[0] = 0.0;

    for mask in 1..=full {
        if mask.count_ones() % 2 == 1 {
            continue;
        }
        let i = mask.trailing_zeros() as usize;
        for j in (i + 1)..n {
            if mask & (1 << j) == 0 {
                continue;
            }
            let rest = mask & !(1 << i) & !(1 << j);
            let candidate = best[rest] + cost(vertices[i], vertices[j]);
            if candidate < best[mask] {
                best[mask] = candidate;
                choice[mask] = (i, j);
            }
        }
    }

    let mut pairs = Vec::with_capacity(n / 2);
    let mut mask = full;
    while mask != 0 {
        let (i, j) = choice[mask];
        pairs.push((vertices[i], vertices[j]));
        mask &= !(1 << i) & !(1 << j);
    }
    pairs
}

/// Repeatedly pair the cheapest two unmatched vertices.
pub(crate) fn greedy_matching(
    vertices: &[VertexId],
    cost: &dyn Fn(VertexId, VertexId) -> f64,
) -> Vec<(VertexId, VertexId)> {
    let mut candidates = Vec::new();
    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            candidates.push((cost(a, b), a, b));
        }
    }
    candidates.sort_by(|x, y| x.0.total_cmp(&y.0).then_with(|| (x.1, x.2).cmp(&(y.1, y.2))));

    let mut matched = std::collections::BTreeSet::new();
    let mut pairs = Vec::new();
    for (_, a, b) in candidates {
        if !matched.contains(&a) && !matched.contains(&b) {
            matched.insert(a);
            matched.insert(b);
            pairs.push((a, b));
        }
    }
    pairs
}

const EXCHANGE_TOLERANCE: f64 = 1e-9;

/// Re-pair two pairs whenever the other split of their four vertices is
/// cheaper, until no such exchange remains.
pub(crate) fn improve_by_exchange(
    pairs: &mut [(VertexId, VertexId)],
    cost: &dyn Fn(VertexId, VertexId) -> f64,
) {
    let mut improved = true;
    let mut rounds = 0usize;
    while improved {
        improved = false;
        rounds += 1;
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                let ((a, b), (c, d)) = (pairs[i], pairs[j]);
                let current = cost(a, b) + cost(c, d);
                let crossed = cost(a, c) + cost(b, d);
                let swapped = cost(a, d) + cost(b, c);
                if crossed + EXCHANGE_TOLERANCE < current && crossed <= swapped {
                    pairs[i] = (a, c);
                    pairs[j] = (b, d);
                    improved = true;
                } else if swapped + EXCHANGE_TOLERANCE < current {
                    pairs[i] = (a, d);
                    pairs[j] = (b, c);
                    improved = true;
                }
            }
        }
    }
    trace!("Pair exchange settled after {} rounds", rounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<VertexId> {
        (0..n).map(VertexId).collect()
    }

    /// Points on a line at the given coordinates.
    fn line(xs: &'static [f64]) -> impl Fn(VertexId, VertexId) -> f64 {
        move |a, b| (xs[a.get() as usize] - xs[b.get() as usize]).abs()
    }

    #[test]
    fn test_exact_beats_greedy() {
        // Greedy grabs the middle pair (1, 2) and is left with the far ends.
        let cost = line(&[0.0, 2.0, 3.0, 5.0]);
        let exact = exact_matching(&ids(4), &cost);
        let greedy = greedy_matching(&ids(4), &cost);

        assert_eq!(total(&exact, &cost), 4.0);
        assert_eq!(total(&greedy, &cost), 6.0);
    }

    #[test]
    fn test_every_vertex_matched_once() {
        let cost = line(&[0.0, 1.0, 4.0, 9.0, 16.0, 25.0]);
        let pairs = DefaultMatcher::default().perfect_matching(&ids(6), &cost);
        let mut seen: Vec<_> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        seen.sort_unstable();
        assert_eq!(seen, ids(6));
    }

    fn total(pairs: &[(VertexId, VertexId)], cost: &dyn Fn(VertexId, VertexId) -> f64) -> f64 {
        pairs.iter().map(|&(a, b)| cost(a, b)).sum()
    }

    #[test]
    fn test_above_limit_recovers_from_greedy_choice() {
        let cost = line(&[0.0, 2.0, 3.0, 5.0]);
        let matcher = DefaultMatcher::new(2);
        assert!(!matcher.is_exact(4));

        let pairs = matcher.perfect_matching(&ids(4), &cost);
        assert_eq!(total(&pairs, &cost), 4.0);
        assert_eq!(total(&pairs, &cost), total(&exact_matching(&ids(4), &cost), &cost));
    }

    #[test]
    fn test_exchange_never_worsens_greedy() {
        let cost = line(&[0.0, 1.5, 2.0, 3.5, 7.0, 7.5, 9.0, 12.0]);
        let greedy = greedy_matching(&ids(8), &cost);
        let mut improved = greedy.clone();
        improve_by_exchange(&mut improved, &cost);
        assert!(total(&improved, &cost) <= total(&greedy, &cost));
        assert!(total(&improved, &cost) >= total(&exact_matching(&ids(8), &cost), &cost));

        let mut seen: Vec<_> = improved.iter().flat_map(|&(a, b)| [a, b]).collect();
        seen.sort_unstable();
        assert_eq!(seen, ids(8));
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(DefaultMatcher::new(usize::MAX).exact_limit(), MAX_EXACT_MATCHING_LIMIT);
        assert_eq!(DefaultMatcher::new(4).exact_limit(), 4);
        assert!(!DefaultMatcher::new(usize::MAX).is_exact(MAX_EXACT_MATCHING_LIMIT + 2));
    }

    #[test]
    fn test_empty() {
        let cost = line(&[]);
        assert!(exact_matching(&[], &cost).is_empty());
    }
}
