use crate::analyze::{median_duration, success_rate};
use crate::model::AgentSummary;
use agent_eval_results_model::{Outcome, RunRecord};
use itertools::Itertools;

/// Summarize the runs of every agent that appears in `records`.
///
/// There is exactly one [AgentSummary] per distinct agent name, ordered by name. Skipped runs
/// are only counted in [AgentSummary::skipped], so an agent with nothing but skipped runs still
/// gets a summary with no attempts.
pub fn summarize_agents(records: &[RunRecord]) -> Vec<AgentSummary> {
    let summaries = records
        .iter()
        .into_group_map_by(|record| record.agent.clone())
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(agent, runs)| summarize_agent(agent, &runs))
        .collect::<Vec<_>>();

    log::debug!(
        "Summarized {} runs across {} agents",
        records.len(),
        summaries.len()
    );

    summaries
}

fn summarize_agent(agent: String, runs: &[&RunRecord]) -> AgentSummary {
    let (attempted, skipped): (Vec<&RunRecord>, Vec<&RunRecord>) = runs
        .iter()
        .copied()
        .partition(|record| record.outcome.is_attempted());

    let passed = attempted
        .iter()
        .filter(|record| record.outcome == Outcome::Success)
        .count();
    let durations = attempted
        .iter()
        .map(|record| record.duration_minutes)
        .collect::<Vec<_>>();

    AgentSummary {
        agent,
        attempted: attempted.len(),
        passed,
        skipped: skipped.len(),
        success_rate: success_rate(passed, attempted.len()),
        median_duration: median_duration(&durations),
    }
}
