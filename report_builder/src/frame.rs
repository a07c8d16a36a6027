use agent_eval_results_model::{
    RunRecord, AGENT_COLUMN, DURATION_COLUMN, OUTCOME_COLUMN, REQUIRED_COLUMNS, RUN_ID_COLUMN,
};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read results file {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Results file {} is not a table with a header row", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Results file {} is missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

impl LoadError {
    /// The results file could not be opened or read
    pub fn is_file_error(&self) -> bool {
        matches!(self, LoadError::Unreadable { .. })
    }

    /// The results file was read but its header is not usable
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LoadError::Malformed { .. } | LoadError::MissingColumn { .. }
        )
    }
}

/// Load every row of a results file as a [RunRecord], in file order.
///
/// Only the header is validated. Cells that fail to parse degrade to the defaults described on
/// [RunRecord::from_cells] and the row is kept. Blank lines are not rows.
pub fn load_results(path: &Path) -> Result<Vec<RunRecord>, LoadError> {
    let frame = read_frame(path)?;

    let run_ids = text_cells(&frame, path, RUN_ID_COLUMN)?;
    let agents = text_cells(&frame, path, AGENT_COLUMN)?;
    let outcomes = text_cells(&frame, path, OUTCOME_COLUMN)?;
    let durations = text_cells(&frame, path, DURATION_COLUMN)?;
    let blank = blank_rows(&frame);

    let records = run_ids
        .iter()
        .zip(agents.iter())
        .zip(outcomes.iter())
        .zip(durations.iter())
        .enumerate()
        .filter(|(index, _)| !blank[*index])
        .map(|(index, (((run_id, agent), outcome), duration))| {
            let record = RunRecord::from_cells(run_id, agent, outcome, duration);
            warn_on_degraded_cells(index + 1, run_id, duration, &record);
            record
        })
        .collect::<Vec<_>>();

    log::debug!("Loaded {} runs from {}", records.len(), path.display());

    Ok(records)
}

fn read_frame(path: &Path) -> Result<DataFrame, LoadError> {
    let unreadable = |source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(unreadable(std::io::Error::other("not a regular file")));
    }
    let file = File::open(path).map_err(unreadable)?;

    // Every column is read as text so that one bad cell cannot change the type of its column
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Rows where every column, required or not, is null.
///
/// The CSV reader turns a blank line into a row of nulls.
fn blank_rows(frame: &DataFrame) -> Vec<bool> {
    let mut blank = vec![true; frame.height()];
    for column in frame.get_columns() {
        let nulls = column.as_materialized_series().is_null();
        for (row, is_null) in (&nulls).into_iter().enumerate() {
            if is_null != Some(true) {
                blank[row] = false;
            }
        }
    }

    blank
}

fn text_cells(
    frame: &DataFrame,
    path: &Path,
    column: &'static str,
) -> Result<Vec<String>, LoadError> {
    debug_assert!(REQUIRED_COLUMNS.contains(&column));

    let missing = || LoadError::MissingColumn {
        path: path.to_path_buf(),
        column,
    };
    let malformed = |source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    if !frame
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == column)
    {
        return Err(missing());
    }

    let series = frame
        .column(column)
        .map_err(|_| missing())?
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(malformed)?;

    // Empty and missing cells come back as nulls
    Ok(series
        .str()
        .map_err(malformed)?
        .into_iter()
        .map(|cell| cell.unwrap_or_default().to_string())
        .collect())
}

fn warn_on_degraded_cells(row: usize, run_id: &str, duration: &str, record: &RunRecord) {
    if (record.run_id == 0 && !run_id.trim_start_matches('0').is_empty()) || run_id.is_empty() {
        log::warn!("Row {row}: run id `{run_id}` is not a non-negative integer, using 0");
    }
    // Blank times are normal for skipped runs
    if record.duration_minutes.is_none() && !duration.trim().is_empty() {
        log::warn!("Row {row}: time `{duration}` is not a number, leaving it out of the statistics");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_eval_results_model::Outcome;
    use std::io::Write;

    fn write_results(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_all_rows_in_order() -> anyhow::Result<()> {
        let file = write_results(
            "RunId,Agent,Success(Y/N),Time(min)\n2,claude,Y,2.5\n1,gemini,n,4\n3,claude,skip,\n",
        );

        let records = load_results(file.path())?;

        assert_eq!(
            vec![
                RunRecord::new(2, "claude", Outcome::Success, Some(2.5)),
                RunRecord::new(1, "gemini", Outcome::Fail, Some(4.0)),
                RunRecord::new(3, "claude", Outcome::Skip, None),
            ],
            records
        );
        Ok(())
    }

    #[test]
    fn columns_are_matched_by_name() -> anyhow::Result<()> {
        let file =
            write_results("Time(min),Notes,Agent,RunId,Success(Y/N)\n1.25,first try,copilot,9,Y\n");

        let records = load_results(file.path())?;

        assert_eq!(
            vec![RunRecord::new(9, "copilot", Outcome::Success, Some(1.25))],
            records
        );
        Ok(())
    }

    #[test]
    fn malformed_cells_degrade_instead_of_failing() -> anyhow::Result<()> {
        let file = write_results("RunId,Agent,Success(Y/N),Time(min)\nabc,B,Y,notanumber\n");

        let records = load_results(file.path())?;

        assert_eq!(vec![RunRecord::new(0, "B", Outcome::Success, None)], records);
        Ok(())
    }

    #[test]
    fn blank_lines_are_not_runs() -> anyhow::Result<()> {
        let file = write_results("RunId,Agent,Success(Y/N),Time(min)\n1,A,Y,2\n\n2,A,N,4\n\n");

        let records = load_results(file.path())?;

        assert_eq!(
            vec![
                RunRecord::new(1, "A", Outcome::Success, Some(2.0)),
                RunRecord::new(2, "A", Outcome::Fail, Some(4.0)),
            ],
            records
        );
        Ok(())
    }

    #[test]
    fn rows_with_only_extra_columns_are_kept() -> anyhow::Result<()> {
        let file = write_results("RunId,Agent,Success(Y/N),Time(min),Notes\n,,,,retried\n");

        let records = load_results(file.path())?;

        assert_eq!(vec![RunRecord::new(0, "", Outcome::Fail, None)], records);
        Ok(())
    }

    #[test]
    fn crlf_line_endings() -> anyhow::Result<()> {
        let file = write_results(
            "RunId,Agent,Success(Y/N),Time(min)\r\n1,claude,Y,2.5\r\n2,gemini,SKIP,\r\n",
        );

        let records = load_results(file.path())?;

        assert_eq!(
            vec![
                RunRecord::new(1, "claude", Outcome::Success, Some(2.5)),
                RunRecord::new(2, "gemini", Outcome::Skip, None),
            ],
            records
        );
        Ok(())
    }

    #[test]
    fn duplicate_header_is_a_format_error() {
        let file = write_results("RunId,Agent,Agent,Success(Y/N),Time(min)\n1,A,B,Y,2\n");

        let err = load_results(file.path()).unwrap_err();

        assert!(err.is_format_error(), "{err:?}");
    }

    #[test]
    fn quoted_cells_keep_commas() -> anyhow::Result<()> {
        let file = write_results("RunId,Agent,Success(Y/N),Time(min)\n1,\"agent, v2\",Y,1\n");

        let records = load_results(file.path())?;

        assert_eq!("agent, v2", records[0].agent);
        Ok(())
    }

    #[test]
    fn header_only_loads_nothing() -> anyhow::Result<()> {
        let file = write_results("RunId,Agent,Success(Y/N),Time(min)\n");

        assert!(load_results(file.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_column_is_a_format_error() {
        let file = write_results("RunId,Agent,Time(min)\n1,A,2\n");

        let err = load_results(file.path()).unwrap_err();

        assert!(err.is_format_error());
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: OUTCOME_COLUMN,
                ..
            }
        ));
    }

    #[test]
    fn empty_file_is_a_format_error() {
        let file = write_results("");

        let err = load_results(file.path()).unwrap_err();

        assert!(err.is_format_error(), "{err:?}");
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_results(&dir.path().join("results.csv")).unwrap_err();

        assert!(err.is_file_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn directory_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_results(dir.path()).unwrap_err();

        assert!(err.is_file_error());
    }
}
