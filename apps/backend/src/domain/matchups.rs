//! Matchup generation: pair neighbours down each squad's ranking.

use crate::domain::aggregation::{RankedSubmission, SquadGroups};

/// One side of a faceoff with the points it carried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub submission_id: i64,
    pub points: i64,
}

impl From<&RankedSubmission> for Seed {
    fn from(r: &RankedSubmission) -> Self {
        Self {
            submission_id: r.submission_id,
            points: r.points,
        }
    }
}

/// A faceoff to be written. `side_b == None` is a bye.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupPlan {
    pub squad_id: i64,
    /// 1-based position within the squad's bracket
    pub slot: i16,
    pub side_a: Seed,
    pub side_b: Option<Seed>,
}

impl MatchupPlan {
    pub fn is_bye(&self) -> bool {
        self.side_b.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Squad ascending, slot ascending
    pub matchups: Vec<MatchupPlan>,
    /// Squads that had nothing to pair
    pub skipped_squads: Vec<i64>,
}

/// Pair rank 1 v 2, 3 v 4, ... per squad, at most `matchups_per_squad`
/// faceoffs each. An odd entry left at the end becomes a bye; entries past
/// the cap stay unpaired for a later week.
///
/// Groups must already be ranked (see `aggregation::collect_and_sum`).
pub fn generate_matchups(groups: &SquadGroups, matchups_per_squad: usize) -> GenerationPlan {
    let cap = matchups_per_squad.min(i16::MAX as usize);
    let mut plan = GenerationPlan::default();

    for (&squad_id, ranked) in groups {
        if ranked.is_empty() {
            plan.skipped_squads.push(squad_id);
            continue;
        }

        for (idx, pair) in ranked.chunks(2).take(cap).enumerate() {
            plan.matchups.push(MatchupPlan {
                squad_id,
                slot: (idx + 1) as i16,
                side_a: Seed::from(&pair[0]),
                side_b: pair.get(1).map(Seed::from),
            });
        }
    }

    plan
}
