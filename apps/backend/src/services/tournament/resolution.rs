use std::collections::BTreeMap;

use sea_orm::DatabaseTransaction;
use tracing::{debug, warn};

use super::TournamentService;
use crate::config::cycle::CycleConfig;
use crate::domain::matchups::Seed;
use crate::domain::standings::{fold_credits, WinCredit};
use crate::domain::tally::{self, Ballot, OpenFaceoff, TallyOutcome, TallyResult};
use crate::error::AppError;
use crate::repos::faceoffs::{self, Faceoff};
use crate::repos::{members, points, squads, submissions, teams, votes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub results: Vec<TallyResult>,
    pub credits: Vec<WinCredit>,
    pub ignored_votes: usize,
}

impl TryFrom<&Faceoff> for OpenFaceoff {
    type Error = AppError;

    fn try_from(f: &Faceoff) -> Result<Self, Self::Error> {
        let side_b = match (f.submission_b_id, f.seed_b_points) {
            (Some(submission_id), Some(points)) => Some(Seed {
                submission_id,
                points,
            }),
            (Some(submission_id), None) => {
                return Err(AppError::data_integrity(format!(
                    "Faceoff {} has side B submission {} but no seed points",
                    f.id, submission_id
                )));
            }
            (None, _) => None,
        };

        Ok(OpenFaceoff {
            faceoff_id: f.id,
            side_a: Seed {
                submission_id: f.submission_a_id,
                points: f.seed_a_points,
            },
            side_b,
        })
    }
}

impl TournamentService {
    /// Load open faceoffs and their ballots and tally them.
    pub async fn count_votes(
        &self,
        txn: &DatabaseTransaction,
    ) -> Result<(Vec<Faceoff>, TallyOutcome), AppError> {
        let open = faceoffs::find_unresolved(txn).await?;
        let ids: Vec<i64> = open.iter().map(|f| f.id).collect();
        let ballots: Vec<Ballot> = votes::find_by_faceoffs(txn, &ids)
            .await?
            .into_iter()
            .map(|v| Ballot {
                faceoff_id: v.faceoff_id,
                voter_member_id: v.voter_member_id,
                submission_id: v.submission_id,
            })
            .collect();

        let open_view = open
            .iter()
            .map(OpenFaceoff::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let outcome = tally::count_votes(&open_view, &ballots);

        for ignored in &outcome.ignored {
            warn!(
                faceoff_id = ignored.ballot.faceoff_id,
                voter_member_id = ignored.ballot.voter_member_id,
                submission_id = ignored.ballot.submission_id,
                reason = ?ignored.reason,
                "Vote ignored"
            );
        }

        Ok((open, outcome))
    }

    /// Mark each faceoff resolved, book a win credit for the winner's team
    /// and squad, and add the credits to their cumulative totals.
    pub async fn update_faceoffs_and_standings(
        &self,
        txn: &DatabaseTransaction,
        open: &[Faceoff],
        results: &[TallyResult],
        win_credit: i64,
    ) -> Result<Vec<WinCredit>, AppError> {
        let weeks: BTreeMap<i64, i32> = open.iter().map(|f| (f.id, f.week)).collect();
        let mut credits = Vec::with_capacity(results.len());

        for result in results {
            faceoffs::resolve(txn, result).await?;

            let week = weeks.get(&result.faceoff_id).copied().ok_or_else(|| {
                AppError::data_integrity(format!(
                    "Tally result for faceoff {} that was not loaded",
                    result.faceoff_id
                ))
            })?;

            let winner = submissions::find_by_id(txn, result.winner_submission_id)
                .await?
                .ok_or_else(|| {
                    AppError::data_integrity(format!(
                        "Winning submission {} does not exist",
                        result.winner_submission_id
                    ))
                })?;
            let member = members::find_by_id(txn, winner.member_id)
                .await?
                .ok_or_else(|| {
                    AppError::data_integrity(format!(
                        "Member {} of submission {} does not exist",
                        winner.member_id, winner.id
                    ))
                })?;
            let team = teams::find_by_id(txn, member.team_id)
                .await?
                .ok_or_else(|| {
                    AppError::data_integrity(format!(
                        "Team {} of member {} does not exist",
                        member.team_id, member.id
                    ))
                })?;
            if squads::find_by_id(txn, team.squad_id).await?.is_none() {
                return Err(AppError::data_integrity(format!(
                    "Squad {} of team {} does not exist",
                    team.squad_id, team.id
                )));
            }

            let credit = WinCredit {
                team_id: team.id,
                squad_id: team.squad_id,
                faceoff_id: result.faceoff_id,
                week,
                amount: win_credit,
            };
            points::create_win_credit(txn, &credit).await?;

            debug!(
                faceoff_id = result.faceoff_id,
                winner = result.winner_submission_id,
                votes_a = result.votes_a,
                votes_b = result.votes_b,
                decision = ?result.decision,
                team_id = team.id,
                "Faceoff resolved"
            );
            credits.push(credit);
        }

        let delta = fold_credits(&credits);
        for (&team_id, &amount) in &delta.teams {
            teams::add_points(txn, team_id, amount).await?;
        }
        for (&squad_id, &amount) in &delta.squads {
            squads::add_points(txn, squad_id, amount).await?;
        }

        Ok(credits)
    }

    /// Tally and apply one week of results.
    pub async fn resolve(
        &self,
        txn: &DatabaseTransaction,
        config: &CycleConfig,
    ) -> Result<ResolutionOutcome, AppError> {
        let (open, outcome) = self.count_votes(txn).await?;
        let credits = self
            .update_faceoffs_and_standings(txn, &open, &outcome.results, config.win_credit)
            .await?;

        Ok(ResolutionOutcome {
            ignored_votes: outcome.ignored.len(),
            results: outcome.results,
            credits,
        })
    }
}
