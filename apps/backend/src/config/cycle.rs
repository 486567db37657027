//! Tunables for the weekly cycle.

use std::env;

use crate::error::AppError;

pub const DEFAULT_MATCHUPS_PER_SQUAD: usize = 4;
pub const DEFAULT_WIN_CREDIT: i64 = 10;

/// How many faceoffs a squad gets per week and what a win is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    pub matchups_per_squad: usize,
    pub win_credit: i64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            matchups_per_squad: DEFAULT_MATCHUPS_PER_SQUAD,
            win_credit: DEFAULT_WIN_CREDIT,
        }
    }
}

impl CycleConfig {
    pub fn new(matchups_per_squad: usize, win_credit: i64) -> Result<Self, AppError> {
        if matchups_per_squad == 0 {
            return Err(AppError::config("matchups_per_squad must be at least 1"));
        }
        if win_credit < 1 {
            return Err(AppError::config("win_credit must be at least 1"));
        }
        Ok(Self {
            matchups_per_squad,
            win_credit,
        })
    }

    /// Read `ARENA_MATCHUPS_PER_SQUAD` and `ARENA_WIN_CREDIT`, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let matchups = parse_var("ARENA_MATCHUPS_PER_SQUAD", DEFAULT_MATCHUPS_PER_SQUAD)?;
        let credit = parse_var("ARENA_WIN_CREDIT", DEFAULT_WIN_CREDIT)?;
        Self::new(matchups, credit)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} is not a valid number: '{raw}'"))),
        _ => Ok(default),
    }
}
