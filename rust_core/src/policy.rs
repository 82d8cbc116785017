//! Sport-specific merge policy table.
//!
//! Thresholds and time windows are configuration data, not per-call
//! constants: `MergePolicies` is injected into the merge engine and can be
//! overridden for individual sports without touching the algorithm.

use std::collections::HashMap;

/// Merge tuning for one sport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePolicy {
    /// Minimum pairwise similarity for a record to join a cluster
    /// (inclusive: a score exactly at the threshold merges).
    pub merge_threshold: f64,
    /// Maximum timestamp difference between cluster seed and candidate,
    /// in minutes.
    pub max_time_diff_minutes: i64,
    /// Tokens of this length or shorter are dropped before scoring.
    /// Team sports drop more aggressively than name-based sports, where
    /// two-letter particles ("de", "al") still carry signal.
    pub min_token_len: usize,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            merge_threshold: 0.30,
            max_time_diff_minutes: 120,
            min_token_len: 1,
        }
    }
}

impl MergePolicy {
    pub fn max_time_diff_seconds(&self) -> i64 {
        self.max_time_diff_minutes * 60
    }
}

/// Policy table keyed by canonical sport name, with a default for
/// everything unlisted.
#[derive(Debug, Clone)]
pub struct MergePolicies {
    by_sport: HashMap<String, MergePolicy>,
    default: MergePolicy,
}

impl Default for MergePolicies {
    fn default() -> Self {
        let mut by_sport = HashMap::new();
        by_sport.insert(
            "Tennis".to_string(),
            MergePolicy {
                merge_threshold: 0.35,
                max_time_diff_minutes: 120,
                min_token_len: 1,
            },
        );
        by_sport.insert(
            "American Football".to_string(),
            MergePolicy {
                merge_threshold: 0.45,
                max_time_diff_minutes: 60,
                min_token_len: 2,
            },
        );
        by_sport.insert(
            "Football".to_string(),
            MergePolicy {
                merge_threshold: 0.50,
                max_time_diff_minutes: 90,
                min_token_len: 2,
            },
        );
        by_sport.insert(
            "Basketball".to_string(),
            MergePolicy {
                merge_threshold: 0.40,
                max_time_diff_minutes: 180,
                min_token_len: 2,
            },
        );

        Self {
            by_sport,
            default: MergePolicy::default(),
        }
    }
}

impl MergePolicies {
    /// Look up the policy for a canonical sport name. Unlisted sports get
    /// the default policy.
    pub fn for_sport(&self, sport: &str) -> MergePolicy {
        self.by_sport.get(sport).copied().unwrap_or(self.default)
    }

    /// Override the policy for one sport.
    pub fn set(&mut self, sport: impl Into<String>, policy: MergePolicy) {
        self.by_sport.insert(sport.into(), policy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_values() {
        let policies = MergePolicies::default();

        let tennis = policies.for_sport("Tennis");
        assert_eq!(tennis.merge_threshold, 0.35);
        assert_eq!(tennis.max_time_diff_minutes, 120);

        let football = policies.for_sport("Football");
        assert_eq!(football.merge_threshold, 0.50);
        assert_eq!(football.max_time_diff_minutes, 90);

        let amfoot = policies.for_sport("American Football");
        assert_eq!(amfoot.merge_threshold, 0.45);
        assert_eq!(amfoot.max_time_diff_minutes, 60);

        let basketball = policies.for_sport("Basketball");
        assert_eq!(basketball.merge_threshold, 0.40);
        assert_eq!(basketball.max_time_diff_minutes, 180);
    }

    #[test]
    fn test_unlisted_sport_uses_default() {
        let policies = MergePolicies::default();
        let darts = policies.for_sport("Darts");
        assert_eq!(darts.merge_threshold, 0.30);
        assert_eq!(darts.max_time_diff_minutes, 120);
    }

    #[test]
    fn test_override() {
        let mut policies = MergePolicies::default();
        policies.set(
            "Tennis",
            MergePolicy {
                merge_threshold: 0.6,
                max_time_diff_minutes: 30,
                min_token_len: 1,
            },
        );
        assert_eq!(policies.for_sport("Tennis").merge_threshold, 0.6);
    }
}
