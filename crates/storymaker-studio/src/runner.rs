//! Flow runner view state.
//!
//! The runner holds at most one run result. Each `begin` hands out a ticket
//! stamped with a new generation; a completion is applied only when its
//! ticket is still the current generation, so an older request that answers
//! late can never overwrite a newer one (or resurrect a reset runner).

use std::fmt::Display;

use storymaker_client::StudioClient;
use storymaker_flow::{Projection, RunResult, project};

use crate::error::FlowRunError;
use crate::events::{FlowEvent, FlowNotifier, NoopNotifier};

/// Coarse phase of the runner, for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
  Idle,
  Running,
  Completed,
  Failed,
}

impl FlowPhase {
  pub fn as_str(&self) -> &'static str {
    match self {
      FlowPhase::Idle => "idle",
      FlowPhase::Running => "running",
      FlowPhase::Completed => "completed",
      FlowPhase::Failed => "error",
    }
  }
}

/// Current state of the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
  Idle,
  Running {
    premise: String,
  },
  Completed {
    premise: String,
    result: Box<RunResult>,
    projection: Projection,
  },
  Failed {
    premise: String,
    error: String,
  },
}

impl FlowState {
  pub fn phase(&self) -> FlowPhase {
    match self {
      FlowState::Idle => FlowPhase::Idle,
      FlowState::Running { .. } => FlowPhase::Running,
      FlowState::Completed { .. } => FlowPhase::Completed,
      FlowState::Failed { .. } => FlowPhase::Failed,
    }
  }

  pub fn premise(&self) -> Option<&str> {
    match self {
      FlowState::Idle => None,
      FlowState::Running { premise }
      | FlowState::Completed { premise, .. }
      | FlowState::Failed { premise, .. } => Some(premise),
    }
  }
}

/// Handle for one issued run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
  generation: u64,
  premise: String,
}

impl RunTicket {
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// The trimmed premise to send.
  pub fn premise(&self) -> &str {
    &self.premise
  }
}

/// What `complete` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
  Applied,
  /// The ticket was superseded by a newer run or a reset.
  Stale,
}

/// State machine behind the flow runner panel.
pub struct FlowRunner<N: FlowNotifier = NoopNotifier> {
  state: FlowState,
  generation: u64,
  notifier: N,
}

impl FlowRunner<NoopNotifier> {
  pub fn new() -> Self {
    Self::with_notifier(NoopNotifier)
  }
}

impl Default for FlowRunner<NoopNotifier> {
  fn default() -> Self {
    Self::new()
  }
}

impl<N: FlowNotifier> FlowRunner<N> {
  pub fn with_notifier(notifier: N) -> Self {
    Self {
      state: FlowState::Idle,
      generation: 0,
      notifier,
    }
  }

  pub fn state(&self) -> &FlowState {
    &self.state
  }

  pub fn phase(&self) -> FlowPhase {
    self.state.phase()
  }

  /// Generation of the most recent `begin` or `reset`.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Start a run. Blank premises are rejected without changing state.
  pub fn begin(&mut self, premise: &str) -> Result<RunTicket, FlowRunError> {
    let premise = premise.trim();
    if premise.is_empty() {
      return Err(FlowRunError::EmptyPremise);
    }

    self.generation += 1;
    self.state = FlowState::Running {
      premise: premise.to_string(),
    };
    self.notifier.notify(FlowEvent::RunStarted {
      generation: self.generation,
      premise: premise.to_string(),
    });

    Ok(RunTicket {
      generation: self.generation,
      premise: premise.to_string(),
    })
  }

  /// Apply the outcome of a run if its ticket is still current.
  pub fn complete<E: Display>(
    &mut self,
    ticket: RunTicket,
    outcome: Result<RunResult, E>,
  ) -> Completion {
    if ticket.generation != self.generation {
      self.notifier.notify(FlowEvent::StaleDiscarded {
        generation: ticket.generation,
        current: self.generation,
      });
      return Completion::Stale;
    }

    match outcome {
      Ok(result) => {
        let projection = project(&result);
        self.notifier.notify(FlowEvent::RunCompleted {
          generation: ticket.generation,
          nodes: projection.node_statuses.len(),
          gate: projection.gate_decision,
        });
        self.state = FlowState::Completed {
          premise: ticket.premise,
          result: Box::new(result),
          projection,
        };
      }
      Err(e) => {
        let error = e.to_string();
        self.notifier.notify(FlowEvent::RunFailed {
          generation: ticket.generation,
          error: error.clone(),
        });
        self.state = FlowState::Failed {
          premise: ticket.premise,
          error,
        };
      }
    }

    Completion::Applied
  }

  /// Discard the held result and invalidate any in-flight run.
  pub fn reset(&mut self) {
    self.generation += 1;
    self.state = FlowState::Idle;
    self.notifier.notify(FlowEvent::Reset {
      generation: self.generation,
    });
  }

  /// Begin a run, send it, and apply the response.
  pub async fn run(
    &mut self,
    client: &StudioClient,
    premise: &str,
  ) -> Result<Completion, FlowRunError> {
    let ticket = self.begin(premise)?;
    let outcome = client.run_flow(ticket.premise()).await;
    Ok(self.complete(ticket, outcome))
  }
}
