//! StoryMaker Studio
//!
//! View state for the studio: everything between a service response and the
//! text a terminal prints.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FlowRunner                           │
//! │  - begin(premise) → RunTicket (generation N)                │
//! │  - complete(ticket, outcome) applies only generation N      │
//! │  - reset() discards the held result                         │
//! └─────────────────────────────────────────────────────────────┘
//!                               │ RunResult
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 storymaker_flow::project                    │
//! │  - node statuses, diagram text, gate decision               │
//! └─────────────────────────────────────────────────────────────┘
//!                               │ Projection
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        dashboard                            │
//! │  - flow status, outline, QA, approval, diagram              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The outline, QA view, health row and world graph summary are independent
//! panels fed directly by `storymaker-client` responses.

pub mod dashboard;
mod error;
mod events;
mod graph;
mod health;
mod outline;
mod qa;
mod runner;

pub use error::FlowRunError;
pub use events::{FlowEvent, FlowNotifier, NoopNotifier, TracingNotifier};
pub use graph::WorldGraph;
pub use health::HealthRow;
pub use outline::{OutlineBeat, OutlineView};
pub use qa::{BudgetTone, LedgerRow, PromiseLedgerView, QaView, TropeBudgetView};
pub use runner::{Completion, FlowPhase, FlowRunner, FlowState, RunTicket};
