use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowRunError {
  #[error("premise must not be empty")]
  EmptyPremise,
}
