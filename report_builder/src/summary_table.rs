use crate::model::AgentSummary;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AgentSummaryRow {
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Pass")]
    pass: String,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Success Rate", display = "percent")]
    success_rate: f64,
    #[tabled(rename = "Median Time")]
    median_time: String,
}

fn percent(n: &f64) -> String {
    format!("{:.1}%", n)
}

/// Format the per-agent summaries as a console table
pub fn summary_table(summaries: &[AgentSummary]) -> String {
    let rows = summaries.iter().map(|summary| AgentSummaryRow {
        agent: summary.agent.clone(),
        pass: summary.pass_label(),
        skipped: summary.skipped,
        success_rate: summary.success_rate,
        median_time: summary
            .median_duration
            .map(|minutes| format!("{:.2} m", minutes))
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());

    table.to_string()
}
