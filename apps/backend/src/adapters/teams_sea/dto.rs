//! DTOs for teams_sea adapter.

#[derive(Debug, Clone)]
pub struct TeamCreate {
    pub squad_id: i64,
    pub name: String,
}
