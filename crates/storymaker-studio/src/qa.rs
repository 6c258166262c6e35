//! QA view: trope budget bar and promise/payoff ledger.

use futures::join;
use serde::Serialize;
use serde_json::Value;
use storymaker_client::StudioClient;
use storymaker_flow::{Envelope, NodeOutcome, RunResult};
use tracing::warn;

const DEFAULT_CAP: f64 = 10.0;

/// Colour band of the trope budget bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTone {
  /// Under 40%.
  Good,
  /// Under 80%.
  Warning,
  Over,
}

impl BudgetTone {
  pub fn from_percent(percent: u8) -> Self {
    if percent < 40 {
      BudgetTone::Good
    } else if percent < 80 {
      BudgetTone::Warning
    } else {
      BudgetTone::Over
    }
  }
}

/// How many clichés a draft spends against its cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TropeBudgetView {
  pub used: f64,
  pub cap: f64,
  pub notes: Vec<String>,
  /// `round(used / max(1, cap) * 100)`, clamped to 100.
  pub percent: u8,
  pub tone: BudgetTone,
}

impl TropeBudgetView {
  /// Build from the `data` of a trope budget response.
  ///
  /// `used` and `cap` may be numbers or numeric strings; missing or
  /// unparsable values fall back to 0 and 10.
  pub fn from_data(data: &Value) -> Self {
    let used = number_field(data, "used").unwrap_or(0.0);
    let cap = number_field(data, "cap").unwrap_or(DEFAULT_CAP);
    let notes = data
      .get("notes")
      .and_then(Value::as_array)
      .map(|notes| notes.iter().map(note_text).collect())
      .unwrap_or_default();

    let ratio = (used / cap.max(1.0) * 100.0).round();
    let percent = ratio.clamp(0.0, 100.0) as u8;

    Self {
      used,
      cap,
      notes,
      percent,
      tone: BudgetTone::from_percent(percent),
    }
  }

  /// `None` when the envelope carries no data.
  pub fn from_envelope(envelope: &Envelope<Value>) -> Option<Self> {
    envelope.data.as_ref().map(Self::from_data)
  }
}

fn number_field(data: &Value, key: &str) -> Option<f64> {
  match data.get(key)? {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
    _ => None,
  }
}

fn note_text(note: &Value) -> String {
  match note {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// One setup and its payoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
  pub setup: Option<String>,
  pub payoff: Option<String>,
  /// `ok`, `missing` or `extraneous`.
  pub status: Option<String>,
}

impl LedgerRow {
  pub fn is_ok(&self) -> bool {
    self.status.as_deref() == Some("ok")
  }
}

/// Promise/payoff ledger rows in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromiseLedgerView {
  pub rows: Vec<LedgerRow>,
}

impl PromiseLedgerView {
  pub fn from_data(data: &Value) -> Self {
    let rows = data
      .get("ledger")
      .and_then(Value::as_array)
      .map(|rows| {
        rows
          .iter()
          .map(|row| LedgerRow {
            setup: text_field(row, "setup"),
            payoff: text_field(row, "payoff"),
            status: text_field(row, "status"),
          })
          .collect()
      })
      .unwrap_or_default();

    Self { rows }
  }

  pub fn from_envelope(envelope: &Envelope<Value>) -> Option<Self> {
    envelope.data.as_ref().map(Self::from_data)
  }

  pub fn ok_count(&self) -> usize {
    self.rows.iter().filter(|row| row.is_ok()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

fn text_field(row: &Value, key: &str) -> Option<String> {
  row
    .get(key)
    .and_then(Value::as_str)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}

/// Both QA panels. A panel is `None` until results exist for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QaView {
  pub trope_budget: Option<TropeBudgetView>,
  pub promise_ledger: Option<PromiseLedgerView>,
  /// Errors reported by the QA checks.
  pub errors: Vec<String>,
}

impl QaView {
  /// Build from the responses of the two QA endpoints.
  pub fn from_envelopes(
    trope: Option<&Envelope<Value>>,
    payoff: Option<&Envelope<Value>>,
  ) -> Self {
    let mut errors = Vec::new();
    for envelope in trope.iter().chain(payoff.iter()) {
      if let Some(error) = &envelope.error {
        errors.push(error.message.clone());
      }
    }

    Self {
      trope_budget: trope.and_then(TropeBudgetView::from_envelope),
      promise_ledger: payoff.and_then(PromiseLedgerView::from_envelope),
      errors,
    }
  }

  /// Run both checks on a draft concurrently.
  ///
  /// A failed check leaves its panel empty and adds the failure to `errors`.
  pub async fn run_checks(client: &StudioClient, draft: &str) -> Self {
    let (trope, payoff) = join!(client.trope_budget(draft), client.promise_payoff(draft));

    let mut view = Self::from_envelopes(trope.as_ref().ok(), payoff.as_ref().ok());
    for error in [trope.err(), payoff.err()].into_iter().flatten() {
      warn!(error = %error, "qa check failed");
      view.errors.push(error.to_string());
    }
    view
  }

  /// Build from the QA nodes of a flow run.
  pub fn from_run(result: &RunResult) -> Self {
    let mut errors = Vec::new();
    let mut collect = |outcome: Option<&NodeOutcome>| {
      let outcome = outcome?;
      if let Some(error) = &outcome.error {
        errors.push(format!("{}: {}", outcome.node_id, error));
      }
      outcome.payload.clone()
    };

    let trope = collect(result.trope_budget());
    let payoff = collect(result.promise_payoff());

    Self {
      trope_budget: trope.as_ref().map(TropeBudgetView::from_data),
      promise_ledger: payoff.as_ref().map(PromiseLedgerView::from_data),
      errors,
    }
  }
}
