//! Vote tally: count ballots per side and pick a winner for each open faceoff.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::matchups::Seed;

/// An unresolved faceoff as the tally sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFaceoff {
    pub faceoff_id: i64,
    pub side_a: Seed,
    pub side_b: Option<Seed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    pub faceoff_id: i64,
    pub voter_member_id: i64,
    pub submission_id: i64,
}

/// What settled the faceoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Strictly more votes
    Votes,
    /// Equal votes (including none), higher seed points
    SeedPoints,
    /// Equal votes and points, lower submission id
    SubmissionId,
    /// Only one entrant
    Bye,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyResult {
    pub faceoff_id: i64,
    pub winner_submission_id: i64,
    pub votes_a: u32,
    pub votes_b: u32,
    pub decision: Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Ballot references a faceoff that is not open
    UnknownFaceoff,
    /// Ballot names a submission that is not a side of its faceoff
    NotASide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredBallot {
    pub ballot: Ballot,
    pub reason: IgnoreReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyOutcome {
    /// One result per open faceoff, in input order
    pub results: Vec<TallyResult>,
    pub ignored: Vec<IgnoredBallot>,
}

/// Pick the winner of a two-sided faceoff.
pub fn decide(a: &Seed, b: &Seed, votes_a: u32, votes_b: u32) -> (i64, Decision) {
    match votes_a.cmp(&votes_b) {
        Ordering::Greater => (a.submission_id, Decision::Votes),
        Ordering::Less => (b.submission_id, Decision::Votes),
        Ordering::Equal => match a.points.cmp(&b.points) {
            Ordering::Greater => (a.submission_id, Decision::SeedPoints),
            Ordering::Less => (b.submission_id, Decision::SeedPoints),
            Ordering::Equal => (
                a.submission_id.min(b.submission_id),
                Decision::SubmissionId,
            ),
        },
    }
}

/// Count ballots for every open faceoff and decide each one.
pub fn count_votes(open: &[OpenFaceoff], ballots: &[Ballot]) -> TallyOutcome {
    let index: BTreeMap<i64, usize> = open
        .iter()
        .enumerate()
        .map(|(i, f)| (f.faceoff_id, i))
        .collect();
    let mut counts = vec![(0u32, 0u32); open.len()];
    let mut ignored = Vec::new();

    for ballot in ballots {
        let Some(&i) = index.get(&ballot.faceoff_id) else {
            ignored.push(IgnoredBallot {
                ballot: *ballot,
                reason: IgnoreReason::UnknownFaceoff,
            });
            continue;
        };
        let faceoff = &open[i];
        if ballot.submission_id == faceoff.side_a.submission_id {
            counts[i].0 += 1;
        } else if faceoff.side_b.map(|b| b.submission_id) == Some(ballot.submission_id) {
            counts[i].1 += 1;
        } else {
            ignored.push(IgnoredBallot {
                ballot: *ballot,
                reason: IgnoreReason::NotASide,
            });
        }
    }

    let results = open
        .iter()
        .zip(counts)
        .map(|(faceoff, (votes_a, votes_b))| {
            let (winner_submission_id, decision) = match &faceoff.side_b {
                Some(b) => decide(&faceoff.side_a, b, votes_a, votes_b),
                None => (faceoff.side_a.submission_id, Decision::Bye),
            };
            TallyResult {
                faceoff_id: faceoff.faceoff_id,
                winner_submission_id,
                votes_a,
                votes_b,
                decision,
            }
        })
        .collect();

    TallyOutcome { results, ignored }
}
