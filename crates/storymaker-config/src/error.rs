use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid base URL for {service}: {value} ({message})")]
  InvalidUrl {
    service: String,
    value: String,
    message: String,
  },

  #[error("unsupported URL scheme for {service}: {scheme}")]
  UnsupportedScheme { service: String, scheme: String },

  #[error("invalid value for {key}: {value}")]
  InvalidValue { key: String, value: String },

  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config file: {0}")]
  Parse(#[from] serde_json::Error),
}
