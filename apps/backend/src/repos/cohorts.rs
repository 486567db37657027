//! Cohorts repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::cohorts_sea as cohorts_adapter;
use crate::entities::cohorts;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub id: i64,
    pub name: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Option<Cohort>, DomainError> {
    let cohort = cohorts_adapter::find_by_id(conn, cohort_id).await?;
    Ok(cohort.map(Cohort::from))
}

/// Like [`find_by_id`] but a missing cohort is `NotFound`.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Cohort, DomainError> {
    find_by_id(conn, cohort_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Cohort, format!("Cohort {cohort_id} not found"))
    })
}

pub async fn create_cohort(txn: &DatabaseTransaction, name: &str) -> Result<Cohort, DomainError> {
    let cohort =
        cohorts_adapter::create_cohort(txn, cohorts_adapter::CohortCreate::new(name)).await?;
    Ok(Cohort::from(cohort))
}

impl From<cohorts::Model> for Cohort {
    fn from(model: cohorts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
