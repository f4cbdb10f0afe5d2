//! Burndown chart output.

use chrono::NaiveDate;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::sprint::Metric;

/// One chart point: `[day, ideal]` or `[day, ideal, actual]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub day: u32,
    pub ideal: f64,
    /// Absent for days after today.
    pub actual: Option<u64>,
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.actual.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.day)?;
        seq.serialize_element(&self.ideal)?;
        if let Some(actual) = self.actual {
            seq.serialize_element(&actual)?;
        }
        seq.end()
    }
}

/// Ideal and actual remaining story points over a sprint.
///
/// Field names are capitalized in JSON; the browser client depends on them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Burndown {
    pub total_story_points: u64,
    /// Per working day, index 0 being the end of day 1.
    pub ideal_remaining: Vec<f64>,
    /// Up to and including today.
    pub actual_remaining: Vec<u64>,
    pub ideal_speed: f64,
    pub actual_speed: f64,
    pub metric: Metric,
    pub chart_data: Vec<ChartRow>,
    pub begin_of_sprint: NaiveDate,
    pub length_of_sprint: u32,
}
