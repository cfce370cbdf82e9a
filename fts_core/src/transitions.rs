//! Transition mapping from patterns to their expected next value

use crate::pattern::{FuzzyRelationship, Pattern};
use indexmap::IndexMap;

/// Aggregated successors of one pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Arithmetic mean of every successor observed after the pattern
    pub mean: f64,
    /// Number of times the pattern was observed
    pub count: usize,
}

/// Mapping from each distinct pattern to the mean of its successors.
///
/// Iteration follows the first occurrence of each pattern. Lookups are exact
/// matches on the full tuple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionMap {
    entries: IndexMap<Pattern, Transition>,
}

impl TransitionMap {
    /// Expected next value for a pattern, if it was ever observed
    pub fn get(&self, pattern: &Pattern) -> Option<f64> {
        self.entries.get(pattern).map(|t| t.mean)
    }

    /// Full aggregate for a pattern
    pub fn transition(&self, pattern: &Pattern) -> Option<&Transition> {
        self.entries.get(pattern)
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.entries.contains_key(pattern)
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over patterns and their aggregates in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, &Transition)> {
        self.entries.iter()
    }
}

/// Group relationships by pattern and average the successors of each group.
///
/// The mean is a plain left-to-right sum divided by the count. There is no
/// weighting by recency, so duplicate patterns only ever average.
pub fn build_transitions(pairs: &[FuzzyRelationship]) -> TransitionMap {
    let mut grouped: IndexMap<Pattern, Vec<f64>> = IndexMap::new();
    for pair in pairs {
        grouped
            .entry(pair.pattern.clone())
            .or_default()
            .push(pair.successor);
    }

    let entries: IndexMap<Pattern, Transition> = grouped
        .into_iter()
        .map(|(pattern, successors)| {
            let count = successors.len();
            let mean = successors.iter().sum::<f64>() / count as f64;
            (pattern, Transition { mean, count })
        })
        .collect();

    tracing::debug!(
        pairs = pairs.len(),
        patterns = entries.len(),
        "built transition mapping"
    );

    TransitionMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::extract_pairs;
    use approx::assert_relative_eq;

    fn pair(pattern: &[f64], successor: f64) -> FuzzyRelationship {
        FuzzyRelationship {
            pattern: Pattern::from(pattern),
            successor,
        }
    }

    #[test]
    fn test_single_occurrence_keeps_successor() {
        let pairs = extract_pairs(&[10.0, 12.0, 14.0, 16.0], 2).unwrap();
        let map = build_transitions(&pairs);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Pattern::new(vec![10.0, 12.0])), Some(14.0));
        assert_eq!(map.get(&Pattern::new(vec![12.0, 14.0])), Some(16.0));
        assert_eq!(map.get(&Pattern::new(vec![14.0, 16.0])), None);
    }

    #[test]
    fn test_duplicate_patterns_average() {
        let pairs = vec![
            pair(&[1.0, 2.0], 3.0),
            pair(&[2.0, 3.0], 1.0),
            pair(&[1.0, 2.0], 4.0),
            pair(&[1.0, 2.0], 8.0),
        ];
        let map = build_transitions(&pairs);

        let transition = map.transition(&Pattern::new(vec![1.0, 2.0])).unwrap();
        assert_eq!(transition.count, 3);
        assert_relative_eq!(transition.mean, (3.0 + 4.0 + 8.0) / 3.0);
        assert_eq!(map.get(&Pattern::new(vec![2.0, 3.0])), Some(1.0));
    }

    #[test]
    fn test_mean_ignores_order_of_occurrence() {
        let forward = build_transitions(&[pair(&[5.0], 1.0), pair(&[5.0], 9.0)]);
        let backward = build_transitions(&[pair(&[5.0], 9.0), pair(&[5.0], 1.0)]);

        assert_eq!(forward.get(&Pattern::new(vec![5.0])), Some(5.0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_iteration_follows_first_occurrence() {
        let pairs = vec![
            pair(&[3.0], 1.0),
            pair(&[1.0], 2.0),
            pair(&[3.0], 5.0),
        ];
        let map = build_transitions(&pairs);

        let keys: Vec<f64> = map.iter().map(|(p, _)| p.values()[0]).collect();
        assert_eq!(keys, vec![3.0, 1.0]);
    }

    #[test]
    fn test_empty_pairs() {
        let map = build_transitions(&[]);
        assert!(map.is_empty());
        assert!(!map.contains(&Pattern::new(vec![1.0])));
    }
}
