use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PointReason {
    /// Points granted to a submission outside the tournament (moderators, educators).
    #[sea_orm(string_value = "AWARD")]
    Award,
    /// Credit for winning a faceoff, booked against team and squad.
    #[sea_orm(string_value = "FACEOFF_WIN")]
    FaceoffWin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "submission_id")]
    pub submission_id: Option<i64>,
    #[sea_orm(column_name = "team_id")]
    pub team_id: Option<i64>,
    #[sea_orm(column_name = "squad_id")]
    pub squad_id: Option<i64>,
    #[sea_orm(column_name = "faceoff_id")]
    pub faceoff_id: Option<i64>,
    pub week: Option<i32>,
    pub amount: i64,
    pub reason: PointReason,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
