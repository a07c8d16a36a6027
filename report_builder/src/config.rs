use std::path::PathBuf;

/// Environment variable name to set a custom results file path
pub const RESULTS_PATH_ENV: &str = "RESULTS_CSV_PATH";
/// Default path for the results file
pub const DEFAULT_RESULTS_PATH: &str = "results.csv";
/// Environment variable name for the task label shown in the report header
pub const TASK_ENV: &str = "TASK";
/// Environment variable that, when set, prints the per-agent summary to stdout
pub const PRINT_SUMMARY_TABLE_ENV: &str = "PRINT_SUMMARY_TABLE";
/// The report is written next to the results file, under this name
pub const REPORT_FILE_NAME: &str = "report.html";

/// Everything a report build needs to know that is not in the results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub results_path: PathBuf,
    /// Label for the task that the runs were evaluated on
    ///
    /// Never blank, a blank label is stored as [None].
    pub task_label: Option<String>,
    pub print_summary_table: bool,
}

impl ReportConfig {
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            task_label: None,
            print_summary_table: false,
        }
    }

    pub fn with_task_label(mut self, task_label: impl Into<String>) -> Self {
        let task_label = task_label.into();
        self.task_label = if task_label.trim().is_empty() {
            None
        } else {
            Some(task_label)
        };
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps an environment variable name to its
    /// value if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let results_path = lookup(RESULTS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_PATH));

        let mut config = Self::new(results_path);
        if let Some(task_label) = lookup(TASK_ENV) {
            config = config.with_task_label(task_label);
        }
        config.print_summary_table = lookup(PRINT_SUMMARY_TABLE_ENV).is_some();

        config
    }

    /// Where the report is written
    pub fn report_path(&self) -> PathBuf {
        self.results_path.with_file_name(REPORT_FILE_NAME)
    }
}
