//! DTOs for votes_sea adapter.

#[derive(Debug, Clone)]
pub struct VoteCreate {
    pub faceoff_id: i64,
    pub voter_member_id: i64,
    pub submission_id: i64,
}
