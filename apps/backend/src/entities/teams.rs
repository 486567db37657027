use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "squad_id")]
    pub squad_id: i64,
    pub name: String,
    pub points: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::squads::Entity",
        from = "Column::SquadId",
        to = "super::squads::Column::Id"
    )]
    Squad,
    #[sea_orm(has_many = "super::members::Entity")]
    Members,
}

impl Related<super::squads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Squad.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
