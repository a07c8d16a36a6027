use crate::model::AgentSummary;
use agent_eval_results_model::RunRecord;
use std::path::PathBuf;
use thiserror::Error;

mod aggregator;
mod analyze;
mod config;
mod frame;
pub mod model;
mod render;
mod summary_table;

#[cfg(feature = "test_data")]
pub mod test_data;

pub use aggregator::summarize_agents;
pub use config::*;
pub use frame::{load_results, LoadError};
pub use render::{escape_html, render_report};
pub use summary_table::summary_table;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Cannot write report file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// A file could not be read or written
    pub fn is_file_error(&self) -> bool {
        match self {
            ReportError::Load(e) => e.is_file_error(),
            ReportError::Write { .. } => true,
        }
    }

    /// The results file has an unusable header
    pub fn is_format_error(&self) -> bool {
        match self {
            ReportError::Load(e) => e.is_format_error(),
            ReportError::Write { .. } => false,
        }
    }
}

/// The result of a successful report build
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    /// Where the report was written
    pub report_path: PathBuf,
    /// One summary per agent, in the order they appear in the report
    pub summaries: Vec<AgentSummary>,
    /// Every run from the results file, in file order
    pub records: Vec<RunRecord>,
}

/// Build the report for the results file named in `config` and write it next to that file.
///
/// Any existing report is replaced. Nothing is written unless the results file was loaded.
pub fn build_report(config: &ReportConfig) -> Result<ReportOutput, ReportError> {
    let records = load_results(&config.results_path)?;
    let summaries = summarize_agents(&records);

    for summary in &summaries {
        log::debug!("Summary for {}: {summary:?}", summary.agent);
    }

    let html = render_report(&summaries, &records, config.task_label.as_deref());

    let report_path = config.report_path();
    std::fs::write(&report_path, html).map_err(|source| ReportError::Write {
        path: report_path.clone(),
        source,
    })?;
    log::info!(
        "Wrote report for {} agents and {} runs to {}",
        summaries.len(),
        records.len(),
        report_path.display()
    );

    Ok(ReportOutput {
        report_path,
        summaries,
        records,
    })
}
