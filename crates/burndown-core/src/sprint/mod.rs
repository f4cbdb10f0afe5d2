//! Per-request sprint configuration.

pub mod calendar;

pub use calendar::SprintCalendar;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{BurndownError, BurndownResult};

/// Longest accepted sprint, in working days (one working year).
pub const MAX_SPRINT_LENGTH: u32 = 260;

/// Label name to story points.
pub type Metric = BTreeMap<String, u32>;

/// Board, sprint window and scoring table for one burndown computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintConfig {
    pub board_id: String,
    /// First day of the sprint, taken as midnight UTC.
    pub begin: NaiveDate,
    /// Sprint length in working days.
    pub length: u32,
    #[serde(default)]
    pub metric: Metric,
}

impl SprintConfig {
    /// Parse and validate a configuration from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> BurndownResult<Self> {
        let config: SprintConfig = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BurndownResult<()> {
        if self.length == 0 {
            return Err(BurndownError::validation("Sprint length must be at least 1"));
        }
        if self.length > MAX_SPRINT_LENGTH {
            return Err(BurndownError::validation(format!(
                "Sprint length {} exceeds the maximum of {} working days",
                self.length, MAX_SPRINT_LENGTH
            )));
        }
        if self.board_id.trim().is_empty() {
            return Err(BurndownError::validation("boardId must not be empty"));
        }
        Ok(())
    }

    pub fn calendar(&self) -> SprintCalendar {
        SprintCalendar::new(self.begin, self.length)
    }
}
