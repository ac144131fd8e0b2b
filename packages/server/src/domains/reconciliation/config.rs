use chrono::Duration;

/// Scoring knobs for matching a submitted thread to a pending reference.
///
/// These are product heuristics, not invariants. Defaults: two points per
/// shared title word, recency bonus of 10/5/2 under 1h/6h/24h, and a match
/// must score strictly more than 2.
#[derive(Debug, Clone)]
pub struct ReconciliationConfig {
    pub enabled: bool,
    pub word_overlap_weight: i64,
    /// `(max age, bonus)` pairs, checked in order; first bucket that the
    /// candidate is younger than wins.
    pub recency_buckets: Vec<(Duration, i64)>,
    pub acceptance_threshold: i64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            word_overlap_weight: 2,
            recency_buckets: vec![
                (Duration::hours(1), 10),
                (Duration::hours(6), 5),
                (Duration::hours(24), 2),
            ],
            acceptance_threshold: 2,
        }
    }
}

impl ReconciliationConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn recency_bonus(&self, age: Duration) -> i64 {
        self.recency_buckets
            .iter()
            .find(|(limit, _)| age < *limit)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }
}
