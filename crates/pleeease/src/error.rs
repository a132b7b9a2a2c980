use pleeease_options::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("{name} failed: {error}")]
  Preprocessor { name: String, error: anyhow::Error },

  /// The engine's own error is kept and can be recovered with `downcast_ref`
  #[error("{}", .0)]
  Parse(anyhow::Error),

  #[error("{id} failed: {error}")]
  Plugin { id: String, error: anyhow::Error },

  #[error("{}", .0)]
  Stringify(anyhow::Error),
}
