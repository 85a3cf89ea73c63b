use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appraisal score, a percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> AppResult<Self> {
        if !(0..=Self::MAX as i64).contains(&value) {
            return Err(AppError::invalid(format!(
                "score must be between 0 and 100, got {value}"
            )));
        }
        Ok(Score(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn percent(&self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<i64> for Score {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for i64 {
    fn from(s: Score) -> Self {
        s.0 as i64
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
