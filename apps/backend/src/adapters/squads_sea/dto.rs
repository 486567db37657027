//! DTOs for squads_sea adapter.

#[derive(Debug, Clone)]
pub struct SquadCreate {
    pub cohort_id: i64,
    pub name: String,
}
