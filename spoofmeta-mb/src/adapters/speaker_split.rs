//! Deterministic speaker-disjoint split assignment
//!
//! Assigns each distinct speaker to exactly one split so that no speaker's
//! utterances straddle train/val/test. The permutation depends only on the
//! seed and the speaker set: speakers are deduplicated into lexicographic
//! order before the single seeded shuffle, so input row order and hash
//! iteration order cannot leak into the result.

use crate::config::SplitRatio;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use spoofmeta_common::schema::Split;
use std::collections::{BTreeMap, BTreeSet};

/// Compute the speaker → split assignment.
///
/// Split sizes are `floor(n * train)` and `floor(n * val)` over the count of
/// distinct speakers; all remaining speakers go to test, which absorbs the
/// rounding remainder.
pub fn speaker_disjoint_split(
    speakers: &[String],
    split_ratio: &SplitRatio,
    split_seed: u64,
) -> BTreeMap<String, Split> {
    let mut speakers: Vec<String> = speakers
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rng = StdRng::seed_from_u64(split_seed);
    speakers.shuffle(&mut rng);

    let n_total = speakers.len();
    let n_train = (n_total as f64 * split_ratio.train) as usize;
    let n_val = (n_total as f64 * split_ratio.val) as usize;

    let mut split_by_speaker = BTreeMap::new();
    for (idx, speaker) in speakers.into_iter().enumerate() {
        let split = if idx < n_train {
            Split::Train
        } else if idx < n_train + n_val {
            Split::Val
        } else {
            Split::Test
        };
        split_by_speaker.insert(speaker, split);
    }

    split_by_speaker
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speakers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn ratio(train: f64, val: f64, test: f64) -> SplitRatio {
        SplitRatio { train, val, test }
    }

    fn count(assignment: &BTreeMap<String, Split>, split: Split) -> usize {
        assignment.values().filter(|s| **s == split).count()
    }

    #[test]
    fn same_seed_and_speakers_give_the_same_assignment() {
        let spk = speakers(&["s1", "s2", "s3", "s4", "s5"]);
        let r = ratio(0.6, 0.2, 0.2);
        let first = speaker_disjoint_split(&spk, &r, 123);
        let second = speaker_disjoint_split(&spk, &r, 123);
        assert_eq!(first, second);
    }

    #[test]
    fn assignment_is_independent_of_input_order_and_duplicates() {
        let r = ratio(0.6, 0.2, 0.2);
        let ordered = speakers(&["s1", "s2", "s3", "s4", "s5"]);
        let shuffled = speakers(&["s4", "s1", "s5", "s1", "s3", "s2", "s2"]);
        assert_eq!(
            speaker_disjoint_split(&ordered, &r, 123),
            speaker_disjoint_split(&shuffled, &r, 123)
        );
    }

    #[test]
    fn different_seeds_may_permute_but_always_cover_every_speaker() {
        let spk = speakers(&["s1", "s2", "s3", "s4", "s5"]);
        let r = ratio(0.6, 0.2, 0.2);
        for seed in [0, 1, 123, u64::MAX] {
            let assignment = speaker_disjoint_split(&spk, &r, seed);
            assert_eq!(assignment.len(), 5);
            assert_eq!(count(&assignment, Split::Train), 3);
            assert_eq!(count(&assignment, Split::Val), 1);
            assert_eq!(count(&assignment, Split::Test), 1);
        }
    }

    #[test]
    fn split_counts_use_floor_division() {
        // 4 speakers at 0.5/0.25/0.25: 2 train, 1 val, 1 test
        let spk = speakers(&["a", "b", "c", "d"]);
        let assignment = speaker_disjoint_split(&spk, &ratio(0.5, 0.25, 0.25), 7);
        assert_eq!(count(&assignment, Split::Train), 2);
        assert_eq!(count(&assignment, Split::Val), 1);
        assert_eq!(count(&assignment, Split::Test), 1);
    }

    #[test]
    fn rounding_remainder_lands_in_test() {
        // floor(3 * 0.9) = 2 train, floor(3 * 0.05) = 0 val, remainder 1 test
        let spk = speakers(&["a", "b", "c"]);
        let assignment = speaker_disjoint_split(&spk, &ratio(0.9, 0.05, 0.05), 42);
        assert_eq!(count(&assignment, Split::Train), 2);
        assert_eq!(count(&assignment, Split::Val), 0);
        assert_eq!(count(&assignment, Split::Test), 1);
    }

    #[test]
    fn empty_speaker_set_yields_empty_assignment() {
        let assignment = speaker_disjoint_split(&[], &ratio(0.6, 0.2, 0.2), 123);
        assert!(assignment.is_empty());
    }
}
