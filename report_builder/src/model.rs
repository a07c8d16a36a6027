use serde::{Deserialize, Serialize};

/// Aggregate results for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub agent: String,
    /// Runs that were not skipped
    pub attempted: usize,
    /// Successful runs, never more than [AgentSummary::attempted]
    pub passed: usize,
    /// Skipped runs, not counted anywhere else
    pub skipped: usize,
    /// Percentage of attempted runs that passed, `0.0` when nothing was attempted
    pub success_rate: f64,
    /// Median time of the attempted runs that have a time, in minutes
    pub median_duration: Option<f64>,
}

impl AgentSummary {
    /// The `passed/attempted` label used in tables
    pub fn pass_label(&self) -> String {
        format!("{}/{}", self.passed, self.attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_label() {
        let summary = AgentSummary {
            agent: "A".to_string(),
            attempted: 3,
            passed: 2,
            skipped: 1,
            success_rate: 200.0 / 3.0,
            median_duration: None,
        };
        assert_eq!("2/3", summary.pass_label());
    }
}
