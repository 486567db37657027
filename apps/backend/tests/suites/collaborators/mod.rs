mod cohorts;
mod moderation;
mod points;
mod standings;
mod votes;
