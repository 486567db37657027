// Proptest generators for tournament inputs.
// Submission ids are assigned by position so they are unique by construction.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::domain::aggregation::EligibleSubmission;
use crate::domain::matchups::Seed;
use crate::domain::tally::{Ballot, OpenFaceoff};

/// Known squads, eligible submissions, and `(submission_id, points)` ledger rows.
pub type Snapshot = (BTreeSet<i64>, Vec<EligibleSubmission>, Vec<(i64, i64)>);

/// Squads present in a cycle (some may end up with no submissions).
pub fn squads() -> impl Strategy<Value = BTreeSet<i64>> {
    prop::collection::btree_set(1i64..8, 1..6)
}

/// Eligible submissions spread over `squads`, plus one award ledger entry each.
pub fn submissions_for(
    squads: BTreeSet<i64>,
) -> impl Strategy<Value = Snapshot> {
    let squad_list: Vec<i64> = squads.iter().copied().collect();
    prop::collection::vec((prop::sample::select(squad_list), 0i64..60), 0..40).prop_map(
        move |entries| {
            let mut subs = Vec::with_capacity(entries.len());
            let mut ledger = Vec::with_capacity(entries.len());
            for (i, (squad_id, points)) in entries.into_iter().enumerate() {
                let submission_id = 100 + i as i64;
                subs.push(EligibleSubmission {
                    submission_id,
                    squad_id,
                });
                ledger.push((submission_id, points));
            }
            (squads.clone(), subs, ledger)
        },
    )
}

/// A cycle snapshot: known squads, eligible submissions, ledger.
pub fn snapshot() -> impl Strategy<Value = Snapshot> {
    squads().prop_flat_map(submissions_for)
}

/// Open faceoffs (some byes) with ballots that mostly hit a side.
pub fn faceoffs_and_ballots() -> impl Strategy<Value = (Vec<OpenFaceoff>, Vec<Ballot>)> {
    prop::collection::vec((0i64..50, prop::option::weighted(0.8, 0i64..50)), 1..8)
        .prop_flat_map(|sides| {
            let open: Vec<OpenFaceoff> = sides
                .into_iter()
                .enumerate()
                .map(|(i, (a_points, b_points))| {
                    let base = (i as i64 + 1) * 10;
                    OpenFaceoff {
                        faceoff_id: i as i64 + 1,
                        side_a: Seed {
                            submission_id: base,
                            points: a_points.max(b_points.unwrap_or(0)),
                        },
                        side_b: b_points.map(|p| Seed {
                            submission_id: base + 1,
                            points: p.min(a_points),
                        }),
                    }
                })
                .collect();
            let count = open.len() as i64;
            let ballots = prop::collection::vec((1..=count, 0i64..3), 0..30).prop_map(
                |picks| {
                    picks
                        .into_iter()
                        .enumerate()
                        .map(|(voter, (faceoff_id, side))| Ballot {
                            faceoff_id,
                            voter_member_id: voter as i64 + 1,
                            // side 2 names a submission outside the faceoff
                            submission_id: faceoff_id * 10 + if side == 2 { 7 } else { side },
                        })
                        .collect::<Vec<_>>()
                },
            );
            (Just(open), ballots)
        })
}
