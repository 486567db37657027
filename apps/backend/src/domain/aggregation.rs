//! Submission aggregation: sum ledger points and group eligible
//! submissions by squad, best first.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::domain::DomainError;

/// An approved submission not yet paired in any faceoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleSubmission {
    pub submission_id: i64,
    pub squad_id: i64,
}

/// A submission with its accumulated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedSubmission {
    pub submission_id: i64,
    pub points: i64,
}

/// Squad id -> submissions sorted by points desc, then id asc.
pub type SquadGroups = BTreeMap<i64, Vec<RankedSubmission>>;

/// Sum `(submission_id, amount)` ledger entries per submission.
pub fn sum_points(entries: &[(i64, i64)]) -> BTreeMap<i64, i64> {
    let mut totals = BTreeMap::new();
    for &(submission_id, amount) in entries {
        *totals.entry(submission_id).or_insert(0) += amount;
    }
    totals
}

/// Build the per-squad ranking.
///
/// Every squad in `known_squads` gets a key, even with no submissions.
/// A submission whose squad is not known is a data integrity failure.
pub fn collect_and_sum(
    known_squads: &BTreeSet<i64>,
    submissions: &[EligibleSubmission],
    ledger: &[(i64, i64)],
) -> Result<SquadGroups, DomainError> {
    let totals = sum_points(ledger);

    let mut groups: SquadGroups = known_squads.iter().map(|&id| (id, Vec::new())).collect();

    for sub in submissions {
        let Some(group) = groups.get_mut(&sub.squad_id) else {
            return Err(DomainError::data_integrity(format!(
                "Submission {} references missing squad {}",
                sub.submission_id, sub.squad_id
            )));
        };
        group.push(RankedSubmission {
            submission_id: sub.submission_id,
            points: totals.get(&sub.submission_id).copied().unwrap_or(0),
        });
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.submission_id.cmp(&b.submission_id))
        });
    }

    Ok(groups)
}
