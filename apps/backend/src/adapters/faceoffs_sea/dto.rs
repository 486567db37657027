//! DTOs for faceoffs_sea adapter.

#[derive(Debug, Clone)]
pub struct FaceoffCreate {
    pub squad_id: i64,
    pub week: i32,
    pub slot: i16,
    pub submission_a_id: i64,
    pub submission_b_id: Option<i64>,
    pub seed_a_points: i64,
    pub seed_b_points: Option<i64>,
}

/// Outcome written by resolution.
#[derive(Debug, Clone)]
pub struct FaceoffResolve {
    pub faceoff_id: i64,
    pub winner_submission_id: i64,
    pub votes_a: i32,
    pub votes_b: i32,
}
