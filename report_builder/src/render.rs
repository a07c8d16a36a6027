use crate::model::AgentSummary;
use agent_eval_results_model::RunRecord;
use chart::{bar_chart_svg, Bar};
use itertools::Itertools;
use std::borrow::Cow;

mod chart;

const TITLE: &str = "CLI Coding Agents — Evaluation Report";
/// Shown in place of a missing task label or a missing time
const NO_TASK_LABEL: &str = "n/a";
const NO_VALUE: &str = "—";

const STYLE: &str = r#"<style>
  :root { --fg:#0f172a; --muted:#64748b; --card:#f8fafc; --accent:#4F46E5; }
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; color:var(--fg); margin:24px; }
  h1 { margin: 0 0 4px 0; }
  .muted { color: var(--muted); }
  .grid { display:grid; grid-template-columns: 1fr 1fr; gap: 24px; }
  .card { background:var(--card); padding:16px; border-radius:12px; box-shadow:0 1px 2px rgba(0,0,0,.06); }
  table { width:100%; border-collapse: collapse; }
  th, td { padding:8px 10px; border-bottom:1px solid #e5e7eb; text-align:left; }
  th { font-weight:600; }
  .mono { font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace; }
</style>"#;

/// Escape the HTML metacharacters `&`, `<` and `>`.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>'][..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render the full HTML report.
///
/// `summaries` is expected in display order. `records` may be in any order, the run listing is
/// sorted by run id and then agent. Nothing in the output depends on the time or environment, so
/// the same inputs always give the same document.
pub fn render_report(
    summaries: &[AgentSummary],
    records: &[RunRecord],
    task_label: Option<&str>,
) -> String {
    let task_label = match task_label {
        Some(label) if !label.is_empty() => escape_html(label),
        _ => Cow::Borrowed(NO_TASK_LABEL),
    };
    let run_count = records.iter().map(|record| record.run_id).unique().count();

    let success_chart = bar_chart_svg(
        &summaries
            .iter()
            .map(|summary| Bar {
                label: &summary.agent,
                value: summary.success_rate,
            })
            .collect::<Vec<_>>(),
        "%",
    );
    // Agents without a median time are drawn as empty bars
    let time_chart = bar_chart_svg(
        &summaries
            .iter()
            .map(|summary| Bar {
                label: &summary.agent,
                value: summary.median_duration.unwrap_or(0.0),
            })
            .collect::<Vec<_>>(),
        "m",
    );

    let summary_rows = summaries.iter().map(summary_row).join("\n");
    let run_rows = records
        .iter()
        .sorted_by(|a, b| (a.run_id, &a.agent).cmp(&(b.run_id, &b.agent)))
        .map(run_row)
        .join("\n");

    format!(
        r#"<!doctype html>
<meta charset="utf-8">
<title>{TITLE}</title>
{STYLE}

<h1>{TITLE}</h1>
<p class="muted">Task: <b class="mono">{task_label}</b> • Runs per agent: <b>{run_count}</b></p>

<div class="grid">
  <div class="card">
    <h2>Success Rate</h2>
    {success_chart}
  </div>
  <div class="card">
    <h2>Median Time (minutes)</h2>
    {time_chart}
  </div>
</div>

<div class="card" style="margin-top:24px">
  <h2>Per-agent Summary</h2>
  <table>
    <thead><tr><th>Agent</th><th>Pass</th><th>Success Rate</th><th>Median Time</th></tr></thead>
    <tbody>
      {summary_rows}
    </tbody>
  </table>
</div>

<div class="card" style="margin-top:24px">
  <h2>All Runs</h2>
  <table class="mono">
    <thead><tr><th>RunId</th><th>Agent</th><th>Success</th><th>Time (min)</th></tr></thead>
    <tbody>
      {run_rows}
    </tbody>
  </table>
</div>
"#
    )
}

fn summary_row(summary: &AgentSummary) -> String {
    let median = match summary.median_duration {
        Some(minutes) => format!("{minutes:.2} m"),
        None => NO_VALUE.to_string(),
    };

    format!(
        "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{median}</td></tr>",
        escape_html(&summary.agent),
        summary.pass_label(),
        summary.success_rate,
    )
}

fn run_row(record: &RunRecord) -> String {
    let duration = match record.duration_minutes {
        Some(minutes) => format!("{minutes:.2}"),
        None => NO_VALUE.to_string(),
    };

    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{duration}</td></tr>",
        record.run_id,
        escape_html(&record.agent),
        record.outcome.code(),
    )
}
