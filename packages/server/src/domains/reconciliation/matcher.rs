//! Pure scoring of pending references against a submitted thread.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use capture::{has_role_markers, Platform};

use crate::domains::reconciliation::ReconciliationConfig;
use crate::domains::references::models::PendingReference;
use crate::domains::threads::models::SubmittedThread;

/// The accepted candidate and the score it won with.
#[derive(Debug, Clone)]
pub struct Match {
    pub reference: PendingReference,
    pub score: i64,
}

/// Whether a thread came out of the capture pipeline: its source label names
/// a known provider, or its content carries the transcript role markers.
/// Manually authored posts have neither and are never reconciled.
pub fn has_provider_markers(thread: &SubmittedThread) -> bool {
    let source = thread.source.to_lowercase();
    Platform::KNOWN
        .iter()
        .any(|p| source.contains(&p.display_name().to_lowercase()))
        || has_role_markers(&thread.content)
}

fn title_words(title: Option<&str>) -> HashSet<String> {
    title
        .map(|t| t.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default()
}

/// Number of distinct lowercase words the two titles share. Zero when
/// either title is missing.
pub fn shared_words(a: Option<&str>, b: Option<&str>) -> usize {
    let a = title_words(a);
    let b = title_words(b);
    a.intersection(&b).count()
}

/// Score one candidate. Recency is the candidate's age at `submitted_at`.
pub fn score_candidate(
    thread: &SubmittedThread,
    candidate: &PendingReference,
    submitted_at: DateTime<Utc>,
    config: &ReconciliationConfig,
) -> i64 {
    let overlap = shared_words(thread.title.as_deref(), candidate.title.as_deref()) as i64;
    config.word_overlap_weight * overlap + config.recency_bonus(submitted_at - candidate.created_at)
}

/// Pick the best pending candidate for `thread`, if any clears the threshold.
///
/// Non-pending candidates are ignored. Ties keep the first candidate in
/// `candidates` order.
pub fn reconcile(
    thread: &SubmittedThread,
    candidates: &[PendingReference],
    submitted_at: DateTime<Utc>,
    config: &ReconciliationConfig,
) -> Option<Match> {
    let mut best: Option<(&PendingReference, i64)> = None;
    for candidate in candidates.iter().filter(|c| c.is_pending()) {
        let score = score_candidate(thread, candidate, submitted_at, config);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score > config.acceptance_threshold)
        .map(|(reference, score)| Match {
            reference: reference.clone(),
            score,
        })
}
