use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Header of the run id column
pub const RUN_ID_COLUMN: &str = "RunId";
/// Header of the agent name column
pub const AGENT_COLUMN: &str = "Agent";
/// Header of the outcome column
pub const OUTCOME_COLUMN: &str = "Success(Y/N)";
/// Header of the duration column, in minutes
pub const DURATION_COLUMN: &str = "Time(min)";

/// The columns that every results file must have, in their conventional order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    RUN_ID_COLUMN,
    AGENT_COLUMN,
    OUTCOME_COLUMN,
    DURATION_COLUMN,
];

/// How a single run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Fail,
    Skip,
}

impl Outcome {
    /// Classify a raw outcome cell.
    ///
    /// The value is trimmed and compared case-insensitively. `SKIP` is a skipped run, `Y` is a
    /// success and anything else, including an empty cell, is a failure.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "SKIP" => Outcome::Skip,
            "Y" => Outcome::Success,
            _ => Outcome::Fail,
        }
    }

    /// The literal code shown in the run listing
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Success => "Y",
            Outcome::Fail => "N",
            Outcome::Skip => "SKIP",
        }
    }

    /// Skipped runs do not count as attempts
    pub fn is_attempted(&self) -> bool {
        !matches!(self, Outcome::Skip)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One evaluation run, as recorded in one row of the results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// The run id
    ///
    /// Zero when the cell was not a plain non-negative integer.
    pub run_id: u64,
    /// The name of the agent that was run
    pub agent: String,
    /// How the run ended
    pub outcome: Outcome,
    /// How long the run took, in minutes
    ///
    /// Absent when the cell could not be read as a finite number.
    pub duration_minutes: Option<f64>,
}

impl RunRecord {
    /// Create a run record
    pub fn new(
        run_id: u64,
        agent: impl Into<String>,
        outcome: Outcome,
        duration_minutes: Option<f64>,
    ) -> Self {
        Self {
            run_id,
            agent: agent.into(),
            outcome,
            duration_minutes,
        }
    }

    /// Build a record from the raw text of the four required cells.
    ///
    /// Malformed run ids and durations never fail, see [parse_run_id] and [parse_duration].
    pub fn from_cells(run_id: &str, agent: &str, outcome: &str, duration: &str) -> Self {
        Self {
            run_id: parse_run_id(run_id),
            agent: agent.to_string(),
            outcome: Outcome::from_code(outcome),
            duration_minutes: parse_duration(duration),
        }
    }
}

/// Parse a run id cell.
///
/// Only a non-empty string of ASCII digits is accepted. Signs, whitespace, fractions and values
/// that do not fit in a `u64` all coerce to `0`.
pub fn parse_run_id(cell: &str) -> u64 {
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    cell.parse().unwrap_or(0)
}

/// Parse a duration cell, in minutes.
///
/// Surrounding whitespace is ignored. Anything that is not a finite number is absent.
pub fn parse_duration(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|minutes| minutes.is_finite())
}
