use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "faceoff_id")]
    pub faceoff_id: i64,
    #[sea_orm(column_name = "voter_member_id")]
    pub voter_member_id: i64,
    #[sea_orm(column_name = "submission_id")]
    pub submission_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::faceoffs::Entity",
        from = "Column::FaceoffId",
        to = "super::faceoffs::Column::Id"
    )]
    Faceoff,
}

impl Related<super::faceoffs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faceoff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
