//! Flow runner events and notifiers.
//!
//! Events are emitted on every state transition of the flow runner so that
//! consumers can log them, stream them or ignore them.

use serde::Serialize;
use storymaker_flow::GateDecision;
use tracing::{info, warn};

/// Events emitted by the flow runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FlowEvent {
  /// A run request was issued.
  RunStarted { generation: u64, premise: String },

  /// A run result was applied.
  RunCompleted {
    generation: u64,
    nodes: usize,
    gate: GateDecision,
  },

  /// A run failed and the error was applied.
  RunFailed { generation: u64, error: String },

  /// A completion arrived for a run that is no longer current.
  StaleDiscarded { generation: u64, current: u64 },

  /// The held result was discarded.
  Reset { generation: u64 },
}

/// Trait for receiving flow runner events.
pub trait FlowNotifier: Send + Sync {
  fn notify(&self, event: FlowEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl FlowNotifier for NoopNotifier {
  fn notify(&self, _event: FlowEvent) {}
}

/// A notifier that writes every event to the `tracing` log.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl FlowNotifier for TracingNotifier {
  fn notify(&self, event: FlowEvent) {
    match event {
      FlowEvent::RunStarted {
        generation,
        premise,
      } => info!(generation, premise = %premise, "flow run started"),
      FlowEvent::RunCompleted {
        generation,
        nodes,
        gate,
      } => info!(generation, nodes, gate = ?gate, "flow run completed"),
      FlowEvent::RunFailed { generation, error } => {
        warn!(generation, error = %error, "flow run failed")
      }
      FlowEvent::StaleDiscarded {
        generation,
        current,
      } => warn!(generation, current, "discarded stale flow run"),
      FlowEvent::Reset { generation } => info!(generation, "flow runner reset"),
    }
  }
}
