//! DTOs for points_sea adapter.

use crate::entities::points::PointReason;

/// One ledger row. Award rows carry `submission_id`; win rows carry
/// team, squad, faceoff and week.
#[derive(Debug, Clone)]
pub struct PointCreate {
    pub submission_id: Option<i64>,
    pub team_id: Option<i64>,
    pub squad_id: Option<i64>,
    pub faceoff_id: Option<i64>,
    pub week: Option<i32>,
    pub amount: i64,
    pub reason: PointReason,
}
