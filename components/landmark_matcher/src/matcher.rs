use std::collections::HashMap;

use landmark_fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use spectral_primitives::AnalysisConfig;
use tracing::{debug, info};

/// Best alignment found between two recordings.
///
/// `frames` is the winning vote's `reference.t1 - query.t1`, so a query
/// that starts 20 frames after the reference reports -20. `votes` is how
/// many matching pairs agreed on that offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetEstimate {
    pub frames: i64,
    pub seconds: f64,
    pub votes: usize,
}

/// What the matcher found: every query fingerprint whose hash also appears
/// in the reference set, and the offset the votes agreed on.
///
/// `offset` is `None` when there was nothing to vote with — an empty input
/// or zero hash collisions — never a fabricated zero seconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: Vec<Fingerprint>,
    pub offset: Option<OffsetEstimate>,
}

/// Cross-reference two finalized fingerprint collections and vote on the
/// most consistent time offset between them.
///
/// Every (reference, query) pair with equal packed hashes contributes the
/// query print to `matched` (one entry per supporting pair, so repeated
/// reference hits accumulate) and one vote for `reference.t1 - query.t1`.
/// The query side is grouped by hash up front; the reference side is then
/// walked in input order and each hash bucket in query input order, which
/// keeps the vote counts and the first-seen tie-break identical to the
/// naive pairwise sweep.
pub fn match_recordings(
    reference: &[Fingerprint],
    query: &[Fingerprint],
    config: &AnalysisConfig,
) -> MatchOutcome {
    let mut query_by_hash: HashMap<i32, Vec<&Fingerprint>> = HashMap::new();
    for print in query {
        query_by_hash.entry(print.hash()).or_default().push(print);
    }

    let mut matched = Vec::new();
    let mut votes: HashMap<i64, usize> = HashMap::new();
    let mut seen_order: Vec<i64> = Vec::new();

    for reference_print in reference {
        let Some(bucket) = query_by_hash.get(&reference_print.hash()) else {
            continue;
        };
        for query_print in bucket {
            matched.push(**query_print);
            let time_diff = i64::from(reference_print.t1()) - i64::from(query_print.t1());
            let count = votes.entry(time_diff).or_insert_with(|| {
                seen_order.push(time_diff);
                0
            });
            *count += 1;
        }
    }

    let offset = select_offset(&votes, &seen_order).map(|(frames, supporting)| OffsetEstimate {
        frames,
        seconds: config.frames_to_seconds(frames),
        votes: supporting,
    });

    match &offset {
        Some(estimate) => info!(
            "Found a time offset of {}s ({} aligned fingerprints)",
            estimate.seconds, estimate.votes
        ),
        None => debug!("No hash collisions between query and reference"),
    }

    MatchOutcome { matched, offset }
}

/// Ties go to the offset seen first during the reference-then-query sweep.
fn select_offset(votes: &HashMap<i64, usize>, seen_order: &[i64]) -> Option<(i64, usize)> {
    let mut best: Option<(i64, usize)> = None;
    for &time_diff in seen_order {
        let count = votes[&time_diff];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((time_diff, count));
        }
    }
    best
}

/// Keep only the local fingerprints whose hash appears in an externally
/// supplied list of known matching prints.
///
/// A hash-to-fingerprint lookup is rebuilt over `local` first; when several
/// local prints share a hash the last one wins and stands in for all of
/// them. Kept prints come back in `known` order.
pub fn filter_by_known_prints(local: &[Fingerprint], known: &[Fingerprint]) -> Vec<Fingerprint> {
    let mut local_by_hash: HashMap<i32, &Fingerprint> = HashMap::new();
    for print in local {
        local_by_hash.insert(print.hash(), print);
    }

    let mut kept = Vec::new();
    for known_print in known {
        if let Some(representative) = local_by_hash.get(&known_print.hash()) {
            kept.push(**representative);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(t1: u32, f1: u32, t2: u32, f2: u32) -> Fingerprint {
        Fingerprint::new(t1, f1, t2, f2).unwrap()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn shifted_query_reports_negative_shift() {
        let reference = vec![print(0, 28, 100, 22), print(50, 42, 117, 28)];
        // Same landmarks, 20 frames later
        let query = vec![print(20, 28, 120, 22), print(70, 42, 137, 28)];

        let outcome = match_recordings(&reference, &query, &config());

        assert_eq!(outcome.matched, query);
        let offset = outcome.offset.unwrap();
        assert_eq!(offset.frames, -20);
        assert_eq!(offset.votes, 2);
        // -20 frames * 256 samples / 8000 Hz
        assert_eq!(offset.seconds, -0.64);
    }

    #[test]
    fn empty_inputs_leave_the_offset_undefined() {
        let reference = vec![print(0, 28, 100, 22)];

        let outcome = match_recordings(&reference, &[], &config());
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.offset, None);

        let outcome = match_recordings(&[], &reference, &config());
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.offset, None);
    }

    #[test]
    fn disjoint_hashes_are_not_an_error() {
        let reference = vec![print(0, 28, 100, 22)];
        let query = vec![print(0, 90, 100, 95)];

        let outcome = match_recordings(&reference, &query, &config());

        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.offset, None);
    }

    #[test]
    fn repeated_reference_hits_accumulate() {
        // Two reference prints with the same hash
        let reference = vec![print(0, 28, 100, 22), print(500, 28, 600, 22)];
        let query = vec![print(20, 28, 120, 22)];

        let outcome = match_recordings(&reference, &query, &config());

        assert_eq!(outcome.matched.len(), 2);
        assert_eq!(outcome.matched[0], query[0]);
        assert_eq!(outcome.matched[1], query[0]);
    }

    #[test]
    fn tied_votes_resolve_to_the_first_seen_offset() {
        // Each pair casts one vote: -20 is seen before 480
        let reference = vec![print(0, 28, 100, 22), print(500, 28, 600, 22)];
        let query = vec![print(20, 28, 120, 22)];

        let outcome = match_recordings(&reference, &query, &config());

        let offset = outcome.offset.unwrap();
        assert_eq!(offset.frames, -20);
        assert_eq!(offset.votes, 1);
    }

    #[test]
    fn majority_vote_beats_an_earlier_minority() {
        let reference = vec![
            print(0, 28, 100, 22),
            print(50, 42, 117, 28),
            print(300, 64, 350, 70),
        ];
        // First print misaligned by 5, the other two shifted by 20
        let query = vec![
            print(25, 28, 125, 22),
            print(70, 42, 137, 28),
            print(320, 64, 370, 70),
        ];

        let outcome = match_recordings(&reference, &query, &config());

        let offset = outcome.offset.unwrap();
        assert_eq!(offset.frames, -20);
        assert_eq!(offset.votes, 2);
        assert_eq!(outcome.matched.len(), 3);
    }

    #[test]
    fn known_print_filter_keeps_local_representatives() {
        let local = vec![print(0, 28, 100, 22), print(50, 42, 117, 28)];
        let known = vec![print(700, 42, 767, 28), print(900, 90, 950, 95)];

        let kept = filter_by_known_prints(&local, &known);

        // Only the 42->28 hash is known; the local print stands in for it
        assert_eq!(kept, vec![local[1]]);
    }

    #[test]
    fn known_print_filter_is_last_write_wins() {
        // Both local prints share a hash; the later one becomes the
        // representative for it
        let local = vec![print(0, 28, 100, 22), print(500, 28, 600, 22)];
        let known = vec![print(20, 28, 120, 22)];

        let kept = filter_by_known_prints(&local, &known);

        assert_eq!(kept, vec![local[1]]);
    }
}
