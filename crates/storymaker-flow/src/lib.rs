//! StoryMaker Flow
//!
//! This crate provides the run model for one orchestration flow execution and
//! the projector that turns it into the views the studio renders.
//!
//! The orchestration service answers `POST /run` with an envelope whose
//! `data.state.nodes` is a mapping of node id to per-node envelope. Parsing
//! that envelope into a [`RunResult`] validates the mapping once; everything
//! downstream of the parse is infallible.
//!
//! ```text
//!  wire JSON ──► FlowRunResponse ──► RunResult ──► project() ──► Projection
//!                  (serde)          (FormatError)   (pure)       ├─ node_statuses
//!                                                                ├─ diagram_text
//!                                                                └─ gate_decision
//! ```
//!
//! # Usage
//!
//! ```
//! use storymaker_flow::{GateDecision, RunResult, project};
//!
//! let result = RunResult::from_value(serde_json::json!({
//!   "status": "ok",
//!   "data": { "state": { "nodes": {
//!     "decide_gate": { "status": "ok", "data": { "cond": true } }
//!   } } }
//! }))?;
//!
//! let projection = project(&result);
//! assert_eq!(projection.gate_decision, GateDecision::Decided { approved: true });
//! # Ok::<(), storymaker_flow::FormatError>(())
//! ```

mod error;
mod projector;
mod result;
mod truthy;
mod wire;

pub use error::FormatError;
pub use projector::{
  CANONICAL_EDGES, DiagramDescription, DiagramNode, FAIL_GLYPH, GateDecision, NodeStatus, OK_GLYPH,
  Projection, project, project_diagram, project_gate_decision, project_node_statuses,
  project_value,
};
pub use result::{NodeOutcome, OutcomeStatus, RunFailure, RunMeta, RunResult, nodes};
pub use truthy::is_truthy;
pub use wire::{Envelope, EnvelopeError, EnvelopeStatus, FlowRunData, FlowRunRequest, FlowRunResponse, FlowState};
