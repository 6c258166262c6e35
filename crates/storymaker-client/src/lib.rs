//! StoryMaker Client
//!
//! Thin wrappers around the HTTP contracts of the StoryMaker services. Every
//! call is a single attempt: no retries, no backoff, and no timeout beyond the
//! one configured on the underlying `reqwest` client.
//!
//! | Call | Request |
//! |---|---|
//! | [`StudioClient::run_flow`] | `POST {orchestration}/run` |
//! | [`StudioClient::health`] | `GET {service}/health` |
//! | [`StudioClient::trope_budget`] | `POST {worldcore}/api/qa/trope-budget` |
//! | [`StudioClient::promise_payoff`] | `POST {worldcore}/api/qa/promise-payoff` |
//! | [`StudioClient::narrative_outline`] | `POST {narrative}/narrative/outline` |
//! | [`StudioClient::world_graph`] | `GET {worldcore}/graph` |
//! | [`StudioClient::proofs_count`] | `GET {worldcore}{proofs_count_path}` |

mod client;
mod error;
mod graph;
mod health;
mod requests;

pub use client::StudioClient;
pub use error::ClientError;
pub use graph::{GraphDocument, GraphEdge, GraphNode, GraphQuery};
pub use health::{HealthReport, interpret_health_body};
pub use requests::{DraftRequest, OutlineRequest, StoryStructure};
