use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::browsers::BrowsersShorthand;
use crate::error::ConfigError;
use crate::options::resolve_over;
use crate::options::RawOptions;
use crate::schema::BROWSERS;
use crate::schema::INPUT_FILE;
use crate::schema::OUTPUT_FILE;
use crate::schema::PREPROCESSORS;
use crate::schema::SCHEMA;
use crate::schema::SOURCEMAPS;

/// Fully normalized options, ready to be handed to the plugins
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
  options: Map<String, Value>,
}

impl Default for ResolvedOptions {
  fn default() -> Self {
    ResolvedOptions {
      options: SCHEMA.initial_values(),
    }
  }
}

impl From<Map<String, Value>> for ResolvedOptions {
  fn from(options: Map<String, Value>) -> Self {
    ResolvedOptions { options }
  }
}

impl ResolvedOptions {
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.options.get(name)
  }

  pub fn is_enabled(&self, name: &str) -> bool {
    self.get(name).is_some_and(is_truthy)
  }

  /// The value a plugin is configured with, `None` when the option is disabled or missing
  pub fn plugin_options(&self, name: &str) -> Option<&Value> {
    self.get(name).filter(|value| is_truthy(value))
  }

  pub fn browsers(&self) -> Option<Vec<String>> {
    self
      .get(BROWSERS)
      .and_then(BrowsersShorthand::from_value)
      .map(BrowsersShorthand::into_list)
  }

  pub fn input_file(&self) -> Option<&str> {
    self.get(INPUT_FILE).and_then(Value::as_str)
  }

  pub fn output_file(&self) -> Option<&str> {
    self.get(OUTPUT_FILE).and_then(Value::as_str)
  }

  /// Source map settings, `None` unless source maps are enabled
  pub fn sourcemaps(&self) -> Option<&Map<String, Value>> {
    self.plugin_options(SOURCEMAPS).and_then(Value::as_object)
  }

  pub fn enabled_preprocessors(&self) -> Vec<&'static str> {
    PREPROCESSORS
      .iter()
      .copied()
      .filter(|name| self.is_enabled(name))
      .collect()
  }

  /// The single enabled preprocessor, if any
  pub fn preprocessor(&self) -> Option<&'static str> {
    self.enabled_preprocessors().into_iter().next()
  }

  /// Re-resolves only the options present in `partial`, every other option keeps its current
  /// value. Nothing changes when resolution fails.
  pub fn set_options(&mut self, partial: impl Into<RawOptions>) -> Result<(), ConfigError> {
    let partial = partial.into().into_map();
    let options = resolve_over(self.options.clone(), &partial)?;

    tracing::debug!(keys = ?partial.keys().collect::<Vec<_>>(), "Updated options");
    self.options = options;

    Ok(())
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.options
  }

  pub fn into_map(self) -> Map<String, Value> {
    self.options
  }
}

/// Truthiness as the configuration format understands it: `null`, `false`, `0` and `""` are
/// false, everything else is true
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(value) => *value,
    Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
    Value::String(string) => !string.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
