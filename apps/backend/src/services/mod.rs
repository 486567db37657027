pub mod cohorts;
pub mod moderation;
pub mod points;
pub mod standings;
pub mod tournament;
pub mod votes;
