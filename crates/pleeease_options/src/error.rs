use crate::rc::RcFileError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("multiple preprocessors enabled: {}", .names.join(", "))]
  MultiplePreprocessors { names: Vec<String> },

  #[error(transparent)]
  RcFile(#[from] RcFileError),
}
