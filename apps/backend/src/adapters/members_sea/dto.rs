//! DTOs for members_sea adapter.

#[derive(Debug, Clone)]
pub struct MemberCreate {
    pub team_id: i64,
    pub squad_id: i64,
    pub display_name: String,
}
