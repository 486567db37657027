use std::collections::BTreeSet;

use sea_orm::DatabaseTransaction;
use tracing::{debug, warn};

use super::TournamentService;
use crate::config::cycle::CycleConfig;
use crate::domain::aggregation::{self, EligibleSubmission, SquadGroups};
use crate::domain::matchups::generate_matchups;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::{cohorts, faceoffs, points, squads, submissions};

/// Which submissions a generation cycle looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleScope {
    All,
    Cohort(i64),
}

impl CycleScope {
    pub fn cohort_id(&self) -> Option<i64> {
        match self {
            CycleScope::All => None,
            CycleScope::Cohort(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub week: i32,
    /// New faceoff ids, squad ascending then slot ascending
    pub faceoff_ids: Vec<i64>,
    /// Squads with no eligible submissions
    pub skipped_squads: Vec<i64>,
}

impl TournamentService {
    /// Read eligible submissions with their ledger points and rank them per squad.
    ///
    /// Every squad in scope appears in the result. A cohort scope naming a
    /// missing cohort is `NotFound`; a submission pointing at a missing squad
    /// is `DataIntegrity`.
    pub async fn collect_and_sum(
        &self,
        txn: &DatabaseTransaction,
        scope: CycleScope,
    ) -> Result<SquadGroups, AppError> {
        if let CycleScope::Cohort(cohort_id) = scope {
            cohorts::require(txn, cohort_id).await?;
        }

        let scope_squads = squads::find_all(txn, scope.cohort_id()).await?;
        let eligible = submissions::find_eligible(txn, scope.cohort_id()).await?;

        let mut known: BTreeSet<i64> = scope_squads.iter().map(|s| s.id).collect();
        // submissions may name squads outside the scope's own list
        let outside: Vec<i64> = eligible
            .iter()
            .map(|s| s.squad_id)
            .filter(|id| !known.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        known.extend(squads::find_by_ids(txn, &outside).await?.iter().map(|s| s.id));

        let ids: Vec<i64> = eligible.iter().map(|s| s.id).collect();
        let ledger = points::award_amounts(txn, &ids).await?;
        let subs: Vec<EligibleSubmission> = eligible
            .iter()
            .map(|s| EligibleSubmission {
                submission_id: s.id,
                squad_id: s.squad_id,
            })
            .collect();

        Ok(aggregation::collect_and_sum(&known, &subs, &ledger)?)
    }

    /// Aggregate, pair and persist one week of faceoffs.
    pub async fn generate(
        &self,
        txn: &DatabaseTransaction,
        scope: CycleScope,
        config: &CycleConfig,
    ) -> Result<GenerationOutcome, AppError> {
        let groups = self.collect_and_sum(txn, scope).await?;
        let plan = generate_matchups(&groups, config.matchups_per_squad);

        for &squad_id in &plan.skipped_squads {
            let condition = DomainError::insufficient_data(format!(
                "Squad {squad_id} has no eligible submissions"
            ));
            warn!(squad_id, reason = %condition, "Squad skipped for this week");
        }

        let week = faceoffs::next_week(txn).await?;
        for m in &plan.matchups {
            debug!(
                squad_id = m.squad_id,
                week,
                slot = m.slot,
                a = m.side_a.submission_id,
                b = ?m.side_b.map(|b| b.submission_id),
                "Planned faceoff"
            );
        }

        let faceoff_ids = faceoffs::create_faceoffs(txn, week, &plan.matchups).await?;

        Ok(GenerationOutcome {
            week,
            faceoff_ids,
            skipped_squads: plan.skipped_squads,
        })
    }
}
