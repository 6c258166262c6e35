//! StoryMaker Config
//!
//! This crate contains the endpoint configuration for the StoryMaker service
//! mesh. The configuration is an explicit value handed to the client at
//! start-up; nothing in the workspace reads endpoints from global state.
//!
//! Configuration can be loaded from:
//! - An environment map (via `StudioConfig::from_vars`, usually `std::env::vars()`)
//! - A JSON file overlay (via CLI with `--config=studio.json`)
//!
//! Every endpoint has a fallback default, so an empty environment still yields
//! a usable configuration pointing at the local development ports.

mod endpoint;
mod error;
mod file;
mod service;
mod studio;

pub use endpoint::ServiceEndpoint;
pub use error::ConfigError;
pub use file::ConfigFile;
pub use service::Service;
pub use studio::{DEFAULT_PROOFS_COUNT_PATH, PROOFS_COUNT_PATH_VAR, ResolvedConfig, StudioConfig, TIMEOUT_VAR};
