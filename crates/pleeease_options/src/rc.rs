use std::path::PathBuf;
use std::sync::Arc;

use mockall::automock;
use serde_json::Map;
use serde_json::Value;
use serde_json5::Location;

pub const RC_FILE_NAME: &str = ".pleeeaserc";

/// RcSource abstraction instance
pub type RcSourceRef = Arc<dyn RcSource + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum RcFileError {
  #[error("Failed to parse {} at line {line}, column {column}: {message}", .path.display())]
  Parse {
    path: PathBuf,
    message: String,
    line: usize,
    column: usize,
  },

  #[error("{} must contain an object", .path.display())]
  NotAnObject { path: PathBuf },

  #[error("{0}")]
  Unavailable(String),
}

/// The contents of a `.pleeeaserc` file
///
/// Finding and reading the file is left to the caller, this only handles text that has already
/// been loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct RcFile {
  pub contents: Map<String, Value>,
  pub path: PathBuf,
}

impl RcFile {
  /// Parses JSON5 rc contents, returning `None` for an empty file or an empty object
  pub fn parse(path: impl Into<PathBuf>, raw: &str) -> Result<Option<Self>, RcFileError> {
    let path = path.into();

    if raw.trim().is_empty() {
      return Ok(None);
    }

    let contents = match serde_json5::from_str(raw) {
      Ok(Value::Object(contents)) => contents,
      Ok(_) => return Err(RcFileError::NotAnObject { path }),
      Err(error) => return Err(serde_to_rc_error(error, path)),
    };

    if contents.is_empty() {
      return Ok(None);
    }

    Ok(Some(RcFile { contents, path }))
  }
}

/// Supplies the rc file to merge under the options passed in programmatically
#[automock]
pub trait RcSource {
  fn load(&self) -> Result<Option<RcFile>, RcFileError>;
}

impl RcSource for RcFile {
  fn load(&self) -> Result<Option<RcFile>, RcFileError> {
    Ok(Some(self.clone()))
  }
}

fn serde_to_rc_error(error: serde_json5::Error, path: PathBuf) -> RcFileError {
  match error {
    serde_json5::Error::Message { msg, location } => {
      let location = location.unwrap_or(Location { column: 1, line: 1 });

      RcFileError::Parse {
        path,
        message: msg,
        line: location.line,
        column: location.column,
      }
    }
  }
}
