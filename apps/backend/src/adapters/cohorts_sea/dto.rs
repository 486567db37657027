//! DTOs for cohorts_sea adapter.

#[derive(Debug, Clone)]
pub struct CohortCreate {
    pub name: String,
}

impl CohortCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
