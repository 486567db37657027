//! Standings: fold faceoff win credits into per-team and per-squad deltas.

use std::collections::BTreeMap;

/// Credit for winning one faceoff, booked against the winner's team and squad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinCredit {
    pub team_id: i64,
    pub squad_id: i64,
    pub faceoff_id: i64,
    pub week: i32,
    pub amount: i64,
}

/// Points to add per team and per squad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsDelta {
    pub teams: BTreeMap<i64, i64>,
    pub squads: BTreeMap<i64, i64>,
}

pub fn fold_credits(credits: &[WinCredit]) -> StandingsDelta {
    let mut delta = StandingsDelta::default();
    for credit in credits {
        *delta.teams.entry(credit.team_id).or_insert(0) += credit.amount;
        *delta.squads.entry(credit.squad_id).or_insert(0) += credit.amount;
    }
    delta
}
