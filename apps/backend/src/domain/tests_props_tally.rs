//! Property tests for the vote tally (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::tally::{count_votes, Decision};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every ballot is either counted for a side or ignored.
    #[test]
    fn prop_ballots_are_conserved((open, ballots) in test_gens::faceoffs_and_ballots()) {
        let out = count_votes(&open, &ballots);
        let counted: u32 = out.results.iter().map(|r| r.votes_a + r.votes_b).sum();
        prop_assert_eq!(counted as usize + out.ignored.len(), ballots.len());
        prop_assert_eq!(out.results.len(), open.len());
    }

    /// The winner is a side, and never the side with fewer votes.
    #[test]
    fn prop_winner_is_a_side_with_most_votes((open, ballots) in test_gens::faceoffs_and_ballots()) {
        let out = count_votes(&open, &ballots);
        for (faceoff, result) in open.iter().zip(&out.results) {
            match faceoff.side_b {
                None => {
                    prop_assert_eq!(result.winner_submission_id, faceoff.side_a.submission_id);
                    prop_assert_eq!(result.decision, Decision::Bye);
                }
                Some(b) => {
                    let a = faceoff.side_a;
                    prop_assert!(result.winner_submission_id == a.submission_id
                        || result.winner_submission_id == b.submission_id);
                    if result.votes_a > result.votes_b {
                        prop_assert_eq!(result.winner_submission_id, a.submission_id);
                    }
                    if result.votes_b > result.votes_a {
                        prop_assert_eq!(result.winner_submission_id, b.submission_id);
                    }
                    // side A is the higher seed, so it takes every tie
                    if result.votes_a == result.votes_b {
                        prop_assert_eq!(result.winner_submission_id, a.submission_id);
                    }
                }
            }
        }
    }

    /// No ballots at all: every faceoff goes to side A.
    #[test]
    fn prop_zero_votes_higher_seed_advances((open, _ballots) in test_gens::faceoffs_and_ballots()) {
        let out = count_votes(&open, &[]);
        for (faceoff, result) in open.iter().zip(&out.results) {
            prop_assert_eq!(result.winner_submission_id, faceoff.side_a.submission_id);
        }
    }
}
