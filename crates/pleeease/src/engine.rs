use std::fmt::Debug;

use pleeease_options::ResolvedOptions;
use serde::Serialize;
use serde_json::Value;

/// Parses CSS into an AST and prints it back
///
/// The AST type is opaque to the processor, it is only ever handed to plugins.
pub trait CssEngine: Debug + Send + Sync {
  type Root;

  fn parse(&self, css: &str, options: &ParseOptions) -> Result<Self::Root, anyhow::Error>;

  fn stringify(
    &self,
    root: &Self::Root,
    options: &ParseOptions,
  ) -> Result<ProcessResult, anyhow::Error>;
}

/// CSS to process, either as source text or as an already parsed AST
#[derive(Clone, Debug, PartialEq)]
pub enum CssInput<R> {
  Css(String),
  Ast(R),
}

impl<R> From<&str> for CssInput<R> {
  fn from(css: &str) -> Self {
    CssInput::Css(css.to_string())
  }
}

impl<R> From<String> for CssInput<R> {
  fn from(css: String) -> Self {
    CssInput::Css(css)
  }
}

/// File names and source map settings shared by parsing and stringifying
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParseOptions {
  /// Input file name, `sourcemaps.from` when set, `in` otherwise
  pub from: Option<String>,
  /// Output file name, `sourcemaps.to` when set, `out` otherwise
  pub to: Option<String>,
  /// `sourcemaps.map`, only present when source maps are enabled
  pub map: Option<Value>,
}

impl From<&ResolvedOptions> for ParseOptions {
  fn from(options: &ResolvedOptions) -> Self {
    let sourcemaps = options.sourcemaps();
    let sourcemap_file = |key: &str| {
      sourcemaps
        .and_then(|sourcemaps| sourcemaps.get(key))
        .and_then(Value::as_str)
        .map(String::from)
    };

    ParseOptions {
      from: sourcemap_file("from").or_else(|| options.input_file().map(String::from)),
      to: sourcemap_file("to").or_else(|| options.output_file().map(String::from)),
      map: sourcemaps.map(|sourcemaps| sourcemaps.get("map").cloned().unwrap_or(Value::Bool(true))),
    }
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessResult {
  pub css: String,
  pub map: Option<String>,
}
