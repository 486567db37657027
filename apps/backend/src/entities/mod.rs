pub mod cohorts;
pub mod faceoffs;
pub mod members;
pub mod points;
pub mod squads;
pub mod submissions;
pub mod teams;
pub mod votes;

pub use cohorts::Entity as Cohorts;
pub use faceoffs::Entity as Faceoffs;
pub use members::Entity as Members;
pub use points::Entity as Points;
pub use squads::Entity as Squads;
pub use submissions::Entity as Submissions;
pub use teams::Entity as Teams;
pub use votes::Entity as Votes;
