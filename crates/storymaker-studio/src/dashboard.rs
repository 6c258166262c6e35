//! Plain-text rendering of the studio panels.
//!
//! Every function returns the full panel as a `String`; callers decide where
//! it goes.

use storymaker_config::{Service, StudioConfig};
use storymaker_flow::{FAIL_GLYPH, GateDecision, NodeOutcome, OK_GLYPH, Projection, RunResult};

use crate::graph::WorldGraph;
use crate::health::HealthRow;
use crate::outline::OutlineView;
use crate::qa::{BudgetTone, PromiseLedgerView, QaView, TropeBudgetView};
use crate::runner::FlowState;

const NO_RESULTS: &str = "No results yet.";
const BAR_WIDTH: usize = 20;

/// Status, premise, results and diagram of the flow runner.
pub fn render_flow(state: &FlowState) -> String {
  let mut lines = vec![format!("Flow status: {}", state.phase().as_str())];

  if let Some(premise) = state.premise() {
    lines.push(format!("Premise: {}", premise));
  }

  match state {
    FlowState::Failed { error, .. } => lines.push(format!("Error: {}", error)),
    FlowState::Completed {
      result, projection, ..
    } => {
      lines.push(String::new());
      lines.push(render_run(result, projection));
    }
    FlowState::Idle | FlowState::Running { .. } => {}
  }

  lines.join("\n")
}

/// Outline, QA, approval, node statuses and diagram of one run.
pub fn render_run(result: &RunResult, projection: &Projection) -> String {
  let mut sections = Vec::new();

  if let Some(outline) = result.outline() {
    sections.push(format!("== Story Outline ==\n{}", render_payload(outline)));
  }

  if result.trope_budget().is_some() || result.promise_payoff().is_some() {
    sections.push(format!(
      "== Quality Assurance ==\n{}",
      render_qa(&QaView::from_run(result))
    ));
  }

  sections.push(format!(
    "== Approval Status ==\n{}",
    render_gate(projection.gate_decision)
  ));

  let nodes = if projection.node_statuses.is_empty() {
    "(no nodes)".to_string()
  } else {
    projection
      .node_statuses
      .iter()
      .map(|node| {
        let glyph = if node.status.is_ok() {
          OK_GLYPH
        } else {
          FAIL_GLYPH
        };
        format!("{} {}", glyph, node.node_id)
      })
      .collect::<Vec<_>>()
      .join("\n")
  };
  sections.push(format!("== Nodes ==\n{}", nodes));

  if let Some(failure) = &result.failure {
    let code = failure.code.as_deref().unwrap_or("error");
    sections.push(format!("== Run Error ==\n{}: {}", code, failure.message));
  }

  sections.push(format!("== Flow Diagram ==\n{}", projection.diagram_text));

  sections.join("\n\n")
}

fn render_payload(outcome: &NodeOutcome) -> String {
  match (&outcome.payload, &outcome.error) {
    (_, Some(error)) if !outcome.status.is_ok() => format!("{} {}", FAIL_GLYPH, error),
    (Some(payload), _) => {
      serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    }
    (None, _) => "(empty)".to_string(),
  }
}

/// `Approved`, `Rejected` or `Unknown`.
pub fn render_gate(decision: GateDecision) -> String {
  match decision {
    GateDecision::Decided { approved: true } => format!("{} Approved", OK_GLYPH),
    GateDecision::Decided { approved: false } => format!("{} Rejected", FAIL_GLYPH),
    GateDecision::Unknown => "Unknown (no decide_gate node)".to_string(),
  }
}

/// Numbered outline beats.
pub fn render_outline(view: &OutlineView) -> String {
  if view.is_empty() {
    return NO_RESULTS.to_string();
  }

  view
    .beats
    .iter()
    .enumerate()
    .map(|(i, beat)| format!("{:>2}. {}", i + 1, beat.text))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Trope budget bar and promise/payoff ledger.
pub fn render_qa(view: &QaView) -> String {
  let mut lines = vec!["Trope Budget".to_string()];
  match &view.trope_budget {
    Some(trope) => lines.extend(render_trope(trope)),
    None => lines.push(format!("  {}", NO_RESULTS)),
  }

  lines.push("Promise / Payoff".to_string());
  match &view.promise_ledger {
    Some(ledger) if !ledger.is_empty() => lines.extend(render_ledger(ledger)),
    _ => lines.push(format!("  {}", NO_RESULTS)),
  }

  for error in &view.errors {
    lines.push(format!("{} {}", FAIL_GLYPH, error));
  }

  lines.join("\n")
}

fn render_trope(trope: &TropeBudgetView) -> Vec<String> {
  let filled = usize::from(trope.percent) * BAR_WIDTH / 100;
  let tone = match trope.tone {
    BudgetTone::Good => "good",
    BudgetTone::Warning => "warning",
    BudgetTone::Over => "over budget",
  };

  let mut lines = vec![
    format!("  Clichés used {} / {}", trope.used, trope.cap),
    format!(
      "  [{}{}] {}% ({})",
      "#".repeat(filled),
      "-".repeat(BAR_WIDTH - filled),
      trope.percent,
      tone
    ),
  ];
  lines.extend(trope.notes.iter().map(|note| format!("  - {}", note)));
  lines
}

fn render_ledger(ledger: &PromiseLedgerView) -> Vec<String> {
  let mut lines = vec![format!(
    "  {}/{} payoffs satisfied",
    ledger.ok_count(),
    ledger.rows.len()
  )];
  for row in &ledger.rows {
    let glyph = if row.is_ok() { OK_GLYPH } else { FAIL_GLYPH };
    lines.push(format!(
      "  {} {} -> {}",
      glyph,
      row.setup.as_deref().unwrap_or("-"),
      row.payoff.as_deref().unwrap_or("-")
    ));
  }
  lines
}

/// One line per service.
pub fn render_health(row: &HealthRow) -> String {
  row
    .reports
    .iter()
    .map(|report| {
      let glyph = if report.ok { OK_GLYPH } else { FAIL_GLYPH };
      match &report.detail {
        Some(detail) => format!(
          "{} {:<14} {} ({})",
          glyph,
          report.service.name(),
          report.url,
          detail
        ),
        None => format!("{} {:<14} {}", glyph, report.service.name(), report.url),
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Counts, entry points, hubs and dangling edges of the world graph.
pub fn render_graph(graph: &WorldGraph) -> String {
  let mut lines = vec![format!(
    "{} entities, {} relations",
    graph.node_count(),
    graph.edge_count()
  )];

  for (entity_type, count) in graph.type_counts() {
    lines.push(format!("  {}: {}", entity_type, count));
  }

  if !graph.entry_points().is_empty() {
    lines.push(format!("Entry points: {}", graph.entry_points().join(", ")));
  }

  if !graph.hubs().is_empty() {
    let hubs: Vec<&str> = graph.hubs().iter().map(String::as_str).collect();
    lines.push(format!("Hubs: {}", hubs.join(", ")));
  }

  for edge in graph.dangling() {
    lines.push(format!("Dangling: {} -> {}", edge.source, edge.target));
  }

  lines.join("\n")
}

/// Resolved endpoints plus the variables that fell back to defaults.
pub fn render_config(config: &StudioConfig, missing: &[&str]) -> String {
  let mut lines: Vec<String> = Service::ALL
    .iter()
    .map(|service| format!("{:<14} {}", service.name(), config.endpoint(*service)))
    .collect();

  lines.push(format!("{:<14} {}", "proofs_count", config.proofs_count_path));
  if let Some(ms) = config.request_timeout_ms {
    lines.push(format!("{:<14} {}ms", "timeout", ms));
  }

  if !missing.is_empty() {
    lines.push(format!("Missing env (using defaults): {}", missing.join(", ")));
  }

  lines.join("\n")
}
