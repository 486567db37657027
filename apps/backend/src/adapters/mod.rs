//! SeaORM adapters. Functions here speak `sea_orm::DbErr`; repos translate.

pub mod cohorts_sea;
pub mod faceoffs_sea;
pub mod maintenance_sea;
pub mod members_sea;
pub mod points_sea;
pub mod squads_sea;
pub mod submissions_sea;
pub mod teams_sea;
pub mod votes_sea;
