use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;

pub const AUTOPREFIXER: &str = "autoprefixer";
pub const BROWSERS: &str = "browsers";
pub const INPUT_FILE: &str = "in";
pub const OUTPUT_FILE: &str = "out";
pub const SOURCEMAPS: &str = "sourcemaps";

/// Options that are switched off by a `browsers` list unless it still targets browsers needing
/// their fallbacks
pub const BROWSER_DEPENDENT_FEATURES: &[&str] = &["rem", "opacity", "pseudoElements"];

/// Preprocessor integrations, at most one of them may be enabled at a time
pub const PREPROCESSORS: &[&str] = &["sass", "less", "stylus"];

/// The built-in option table, created once and never mutated
pub static SCHEMA: LazyLock<OptionSchema> = LazyLock::new(OptionSchema::builtin);

/// The default value and shape of a single option
#[derive(Clone, Debug, PartialEq)]
pub enum OptionDefault {
  /// `true` expands to `defaults`, an object is merged over `defaults`
  Feature {
    enabled: bool,
    defaults: Map<String, Value>,
  },
  /// Used verbatim when the option is not supplied
  Literal(Value),
  /// A retired option. Kept so old configurations still resolve, but never expanded into the
  /// sub-options it used to switch on.
  Legacy(Value),
  /// Known to the pipeline but without a built-in value
  Unset,
}

impl OptionDefault {
  fn feature(enabled: bool, defaults: Value) -> Self {
    let defaults = match defaults {
      Value::Object(defaults) => defaults,
      _ => Map::new(),
    };

    OptionDefault::Feature { enabled, defaults }
  }

  /// The value an option resolves to when no input mentions it
  pub fn initial_value(&self) -> Option<Value> {
    match self {
      OptionDefault::Feature {
        enabled: true,
        defaults,
      } => Some(Value::Object(defaults.clone())),
      OptionDefault::Feature { enabled: false, .. } => Some(Value::Bool(false)),
      OptionDefault::Literal(value) | OptionDefault::Legacy(value) => Some(value.clone()),
      OptionDefault::Unset => None,
    }
  }

  /// The value an option resolves to when it is switched on without further configuration
  pub fn enabled_value(&self) -> Value {
    match self {
      OptionDefault::Feature { defaults, .. } => Value::Object(defaults.clone()),
      OptionDefault::Literal(Value::Bool(_))
      | OptionDefault::Legacy(Value::Bool(_))
      | OptionDefault::Unset => Value::Bool(true),
      OptionDefault::Literal(value) | OptionDefault::Legacy(value) => value.clone(),
    }
  }

  pub fn is_feature(&self) -> bool {
    matches!(self, OptionDefault::Feature { .. })
  }

  pub fn is_legacy(&self) -> bool {
    matches!(self, OptionDefault::Legacy(_))
  }
}

/// Ordered table of every option the pipeline knows about
#[derive(Clone, Debug, PartialEq)]
pub struct OptionSchema {
  options: IndexMap<&'static str, OptionDefault>,
}

impl OptionSchema {
  fn builtin() -> Self {
    let options = IndexMap::from([
      (AUTOPREFIXER, OptionDefault::feature(true, json!({}))),
      (
        "filters",
        OptionDefault::feature(true, json!({ "oldIE": false })),
      ),
      (
        "rem",
        OptionDefault::feature(true, json!({ "rootValue": "16px" })),
      ),
      ("pseudoElements", OptionDefault::Literal(Value::Bool(true))),
      ("opacity", OptionDefault::Literal(Value::Bool(true))),
      ("vmin", OptionDefault::Literal(Value::Bool(true))),
      ("import", OptionDefault::feature(true, json!({}))),
      ("rebaseUrls", OptionDefault::Literal(Value::Bool(true))),
      (
        "minifier",
        OptionDefault::feature(true, json!({ "preserveHacks": true })),
      ),
      ("mqpacker", OptionDefault::feature(false, json!({}))),
      (
        SOURCEMAPS,
        OptionDefault::feature(false, json!({ "map": { "inline": true } })),
      ),
      // Used to switch on a bundle of future-syntax plugins (customProperties, calc, ...)
      ("next", OptionDefault::Legacy(Value::Bool(false))),
      ("sass", OptionDefault::Literal(Value::Bool(false))),
      ("less", OptionDefault::Literal(Value::Bool(false))),
      ("stylus", OptionDefault::Literal(Value::Bool(false))),
      (BROWSERS, OptionDefault::Unset),
      (INPUT_FILE, OptionDefault::Unset),
      (OUTPUT_FILE, OptionDefault::Unset),
    ]);

    OptionSchema { options }
  }

  pub fn get(&self, name: &str) -> Option<&OptionDefault> {
    self.options.get(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionDefault)> {
    self.options.iter().map(|(name, default)| (*name, default))
  }

  /// A fresh copy of every option that has a built-in value
  pub fn initial_values(&self) -> Map<String, Value> {
    self
      .iter()
      .filter_map(|(name, default)| Some((name.to_string(), default.initial_value()?)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn initial_values_expand_enabled_features() {
    let values = SCHEMA.initial_values();

    assert_eq!(values.get("autoprefixer"), Some(&json!({})));
    assert_eq!(values.get("minifier"), Some(&json!({ "preserveHacks": true })));
    assert_eq!(values.get("rem"), Some(&json!({ "rootValue": "16px" })));
    assert_eq!(values.get("mqpacker"), Some(&json!(false)));
    assert_eq!(values.get("sourcemaps"), Some(&json!(false)));
  }

  #[test]
  fn initial_values_skip_unset_options() {
    let values = SCHEMA.initial_values();

    assert!(!values.contains_key("browsers"));
    assert!(!values.contains_key("in"));
    assert!(!values.contains_key("out"));
  }

  #[test]
  fn initial_values_are_copies() {
    let mut first = SCHEMA.initial_values();
    first.insert("rem".into(), json!(false));

    assert_eq!(
      SCHEMA.initial_values().get("rem"),
      Some(&json!({ "rootValue": "16px" }))
    );
  }

  #[test]
  fn enabled_value_of_literals_and_features() {
    assert_eq!(SCHEMA.get("opacity").unwrap().enabled_value(), json!(true));
    assert_eq!(SCHEMA.get("mqpacker").unwrap().enabled_value(), json!({}));
    assert_eq!(
      SCHEMA.get("rem").unwrap().enabled_value(),
      json!({ "rootValue": "16px" })
    );
  }

  #[test]
  fn every_preprocessor_is_a_disabled_literal() {
    for name in PREPROCESSORS {
      assert_eq!(SCHEMA.get(name), Some(&OptionDefault::Literal(json!(false))));
    }
  }

  #[test]
  fn next_is_legacy() {
    assert!(SCHEMA.get("next").unwrap().is_legacy());
    assert!(!SCHEMA.get("minifier").unwrap().is_legacy());
  }
}
