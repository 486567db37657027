use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faceoffs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "squad_id")]
    pub squad_id: i64,
    pub week: i32,
    pub slot: i16,
    #[sea_orm(column_name = "submission_a_id")]
    pub submission_a_id: i64,
    /// None marks a bye.
    #[sea_orm(column_name = "submission_b_id")]
    pub submission_b_id: Option<i64>,
    #[sea_orm(column_name = "seed_a_points")]
    pub seed_a_points: i64,
    #[sea_orm(column_name = "seed_b_points")]
    pub seed_b_points: Option<i64>,
    pub resolved: bool,
    #[sea_orm(column_name = "winner_submission_id")]
    pub winner_submission_id: Option<i64>,
    #[sea_orm(column_name = "votes_a")]
    pub votes_a: i32,
    #[sea_orm(column_name = "votes_b")]
    pub votes_b: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "resolved_at")]
    pub resolved_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
