//! Repository functions for the domain layer: domain structs in, `DomainError` out.

pub mod cohorts;
pub mod faceoffs;
pub mod members;
pub mod points;
pub mod squads;
pub mod submissions;
pub mod teams;
pub mod votes;
