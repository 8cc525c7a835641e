// src/sampler.rs
// =============================================================================
// This module picks which snapshots get fetched.
//
// The archive can hold thousands of robots.txt captures for a busy site.
// We fetch at most `limit` of them, either:
// - all of them (no limit, --recent, or fewer captures than the limit), or
// - `limit` captures spread evenly over the full history, walking backward
//   from the newest one
//
// The input order is treated as time order (oldest first, newest last).
// =============================================================================

use std::fmt;

/// How many snapshots to fetch for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    AtMost(usize),
}

impl Limit {
    /// Builds a Limit from the command-line value, where -1 means unlimited
    pub fn from_flag(value: i64) -> Option<Limit> {
        match value {
            -1 => Some(Limit::Unlimited),
            n if n >= 0 => Some(Limit::AtMost(n as usize)),
            _ => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => f.write_str("unlimited"),
            Limit::AtMost(n) => write!(f, "{}", n),
        }
    }
}

// Selects the snapshots to fetch, preserving the values of the picked entries
pub fn select<T: Clone>(versions: &[T], limit: Limit, recent: bool) -> Vec<T> {
    select_indices(versions.len(), limit, recent)
        .into_iter()
        .map(|index| versions[index].clone())
        .collect()
}

// Returns the positions (into a history of `length` entries) to fetch
//
// Evenly spaced picks use interval = ceil(length / limit) and walk backward
// from the newest entry. Pick `i` never goes below `limit - 1 - i`, which
// keeps room for the remaining picks at the start of the history, so the
// picks are strictly descending and never repeat.
pub fn select_indices(length: usize, limit: Limit, recent: bool) -> Vec<usize> {
    let limit = match limit {
        Limit::AtMost(0) => return Vec::new(),
        Limit::AtMost(n) if !recent && n < length => n,
        _ => return (0..length).collect(),
    };

    let interval = length.div_ceil(limit);

    (0..limit)
        .map(|i| {
            let floor = limit - 1 - i;
            match (length - 1).checked_sub(i * interval) {
                Some(index) if index >= floor => index,
                _ => floor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_limit_from_flag() {
        assert_eq!(Limit::from_flag(-1), Some(Limit::Unlimited));
        assert_eq!(Limit::from_flag(0), Some(Limit::AtMost(0)));
        assert_eq!(Limit::from_flag(50), Some(Limit::AtMost(50)));
        assert_eq!(Limit::from_flag(-2), None);
    }

    #[test]
    fn test_returns_everything_when_not_sampling() {
        let versions: Vec<u32> = (0..10).collect();
        assert_eq!(select(&versions, Limit::Unlimited, false), versions);
        assert_eq!(select(&versions, Limit::AtMost(3), true), versions);
        assert_eq!(select(&versions, Limit::AtMost(10), false), versions);
        assert_eq!(select(&versions, Limit::AtMost(50), false), versions);
    }

    #[test]
    fn test_empty_cases() {
        let empty: Vec<u32> = Vec::new();
        assert!(select(&empty, Limit::AtMost(5), false).is_empty());
        assert!(select(&empty, Limit::Unlimited, true).is_empty());

        let versions: Vec<u32> = (0..10).collect();
        assert!(select(&versions, Limit::AtMost(0), false).is_empty());
        assert!(select(&versions, Limit::AtMost(0), true).is_empty());
    }

    #[test]
    fn test_even_spacing_matches_backward_walk() {
        // interval = ceil(10 / 4) = 3
        assert_eq!(select_indices(10, Limit::AtMost(4), false), vec![9, 6, 3, 0]);
        // interval = ceil(10 / 3) = 4
        assert_eq!(select_indices(10, Limit::AtMost(3), false), vec![9, 5, 1]);
        assert_eq!(select_indices(10, Limit::AtMost(1), false), vec![9]);
    }

    #[test]
    fn test_underflow_does_not_repeat() {
        // interval = 2, the backward walk would run past the start at the last pick
        assert_eq!(select_indices(10, Limit::AtMost(6), false), vec![9, 7, 5, 3, 1, 0]);
        assert_eq!(
            select_indices(10, Limit::AtMost(9), false),
            vec![9, 7, 6, 5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn test_sampled_indices_are_distinct_and_start_with_newest() {
        for length in 1..=60 {
            for limit in 1..length {
                let picks = select_indices(length, Limit::AtMost(limit), false);
                assert_eq!(picks.len(), limit, "length={} limit={}", length, limit);
                assert_eq!(picks[0], length - 1, "length={} limit={}", length, limit);

                let unique: HashSet<_> = picks.iter().collect();
                assert_eq!(unique.len(), limit, "length={} limit={}", length, limit);
                assert!(picks.iter().all(|&i| i < length));
            }
        }
    }

    #[test]
    fn test_selects_values_not_positions() {
        let versions: Vec<String> = (0..10).map(|i| format!("20{:02}0101000000", i)).collect();
        let picked = select(&versions, Limit::AtMost(3), false);
        assert_eq!(picked, vec!["20090101000000", "20050101000000", "20010101000000"]);
    }
}
