//! Domain layer: pure tournament algorithms. Each phase maps a snapshot of
//! stored state to the set of writes the service layer applies.

pub mod aggregation;
pub mod matchups;
pub mod standings;
pub mod tally;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_tally;

// Re-exports for ergonomics
pub use aggregation::{collect_and_sum, EligibleSubmission, RankedSubmission, SquadGroups};
pub use matchups::{generate_matchups, GenerationPlan, MatchupPlan, Seed};
pub use standings::{fold_credits, StandingsDelta, WinCredit};
pub use tally::{count_votes, Ballot, Decision, OpenFaceoff, TallyOutcome, TallyResult};
