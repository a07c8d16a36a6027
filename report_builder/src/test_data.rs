use crate::model::AgentSummary;
use anyhow::Context;
use std::path::{Path, PathBuf};

const RESULTS_STAGE: &str = "1_results";
const SUMMARIES_STAGE: &str = "2_summaries";

/// Path of the results fixture for a test case
pub fn results_path(case: &str) -> PathBuf {
    stage_path(RESULTS_STAGE).join(format!("{case}.csv"))
}

/// Load the expected summaries for a test case
pub fn load_summaries(case: &str) -> anyhow::Result<Vec<AgentSummary>> {
    let path = summaries_path(case);
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open expected summaries: {:?}", path))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .context("Failed to load expected summaries")
}

/// Store the summaries for a test case.
///
/// An existing file is only replaced when `overwrite` is set.
pub fn insert_summaries(
    case: &str,
    summaries: &[AgentSummary],
    overwrite: bool,
) -> anyhow::Result<()> {
    let path = summaries_path(case);

    let out_file = match std::fs::OpenOptions::new()
        .create_new(!overwrite)
        .create(overwrite)
        .truncate(overwrite)
        .write(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            log::info!("Not creating summaries file as it already exists: {:?}", path);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to open file for writing"),
    };

    log::debug!("Writing summaries to {:?}", path);

    serde_json::to_writer_pretty(out_file, summaries).context("Failed to write summaries")?;

    Ok(())
}

fn summaries_path(case: &str) -> PathBuf {
    stage_path(SUMMARIES_STAGE).join(format!("{case}.json"))
}

fn stage_path(stage: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(stage)
}
