use agent_eval_report::{build_report, summary_table, ReportConfig};
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ReportConfig::from_env();
    log::debug!("Building report with {config:?}");

    let output = build_report(&config).with_context(|| {
        format!(
            "Failed to build report from {}",
            config.results_path.display()
        )
    })?;

    if config.print_summary_table {
        println!("{}", summary_table(&output.summaries));
    }

    println!("Wrote {}", output.report_path.display());

    Ok(())
}
