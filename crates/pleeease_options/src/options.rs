use serde_json::Map;
use serde_json::Value;

use crate::browsers::coverage_level;
use crate::browsers::needs_legacy_fallbacks;
use crate::browsers::BrowsersShorthand;
use crate::error::ConfigError;
use crate::merge::shallow_merge;
use crate::option_value::OptionValue;
use crate::rc::RcSourceRef;
use crate::resolved::is_truthy;
use crate::resolved::ResolvedOptions;
use crate::schema::AUTOPREFIXER;
use crate::schema::BROWSERS;
use crate::schema::BROWSER_DEPENDENT_FEATURES;
use crate::schema::PREPROCESSORS;
use crate::schema::SCHEMA;

/// Options as passed in through the programmatic API
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawOptions {
  #[default]
  Absent,
  Flag(bool),
  Map(Map<String, Value>),
}

impl RawOptions {
  /// Booleans and absent options carry no settings and resolve to the defaults
  pub fn into_map(self) -> Map<String, Value> {
    match self {
      RawOptions::Map(options) => options,
      RawOptions::Absent | RawOptions::Flag(_) => Map::new(),
    }
  }
}

impl From<Map<String, Value>> for RawOptions {
  fn from(options: Map<String, Value>) -> Self {
    RawOptions::Map(options)
  }
}

impl From<bool> for RawOptions {
  fn from(flag: bool) -> Self {
    RawOptions::Flag(flag)
  }
}

impl From<Value> for RawOptions {
  fn from(value: Value) -> Self {
    match value {
      Value::Object(options) => RawOptions::Map(options),
      Value::Bool(flag) => RawOptions::Flag(flag),
      _ => RawOptions::Absent,
    }
  }
}

impl From<Option<Value>> for RawOptions {
  fn from(value: Option<Value>) -> Self {
    value.map(RawOptions::from).unwrap_or_default()
  }
}

impl From<ResolvedOptions> for RawOptions {
  fn from(options: ResolvedOptions) -> Self {
    RawOptions::Map(options.into_map())
  }
}

/// Resolves user supplied options against the built-in option table
#[derive(Clone, Default)]
pub struct Options {
  rc: Option<RcSourceRef>,
}

impl std::fmt::Debug for Options {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Options")
      .field("rc", &self.rc.is_some())
      .finish()
  }
}

impl Options {
  pub fn new() -> Self {
    Options::default()
  }

  /// Merge the rc file supplied by `rc` under the options passed to [`Options::extend`]
  pub fn with_rc_source(mut self, rc: RcSourceRef) -> Self {
    self.rc = Some(rc);
    self
  }

  /// The options every resolution starts from
  pub fn defaults(&self) -> ResolvedOptions {
    ResolvedOptions::default()
  }

  /// Resolves `raw` against a fresh copy of the defaults
  ///
  /// Top-level keys of the rc file apply wherever `raw` does not mention the same key. The rc
  /// source is read once per call, errors reading it are returned unchanged.
  pub fn extend(&self, raw: impl Into<RawOptions>) -> Result<ResolvedOptions, ConfigError> {
    let mut raw = raw.into().into_map();

    if let Some(rc) = &self.rc {
      if let Some(rc_file) = rc.load()? {
        tracing::debug!(path = %rc_file.path.display(), "Merging rc file options");
        raw = shallow_merge(rc_file.contents, raw);
      }
    }

    let options = resolve_over(SCHEMA.initial_values(), &raw)?;

    Ok(ResolvedOptions::from(options))
  }
}

/// Resolves every key of `raw` over `base`, leaving keys `raw` does not mention untouched
pub(crate) fn resolve_over(
  mut base: Map<String, Value>,
  raw: &Map<String, Value>,
) -> Result<Map<String, Value>, ConfigError> {
  let previous_browsers = base.get(BROWSERS).cloned();

  for (name, value) in raw {
    base.insert(name.clone(), resolve_option(name, value.clone()));
  }

  if raw.contains_key(BROWSERS) {
    apply_browsers(&mut base, raw, previous_browsers.as_ref());
  }

  check_preprocessors(&base)?;

  Ok(base)
}

fn resolve_option(name: &str, value: Value) -> Value {
  if name == BROWSERS {
    return match BrowsersShorthand::from_value(&value) {
      Some(browsers) => Value::from(browsers.into_list()),
      None => value,
    };
  }

  match SCHEMA.get(name) {
    Some(default) => {
      if default.is_legacy() && is_truthy(&value) {
        tracing::debug!(option = name, "Legacy option is passed through without expansion");
      }

      OptionValue::from(value).resolve(default)
    }
    None => value,
  }
}

/// The `browsers` shorthand feeds autoprefixer and decides whether the rem, opacity and
/// pseudo-element fallbacks are still needed.
///
/// `previous_browsers` is the shorthand `resolved` was built with, if any.
fn apply_browsers(
  resolved: &mut Map<String, Value>,
  raw: &Map<String, Value>,
  previous_browsers: Option<&Value>,
) {
  let Some(browsers) = resolved
    .get(BROWSERS)
    .and_then(BrowsersShorthand::from_value)
    .map(BrowsersShorthand::into_list)
  else {
    tracing::warn!("Ignoring browsers option, expected a query or a list of queries");
    return;
  };

  let has_own_browsers = match raw.get(AUTOPREFIXER) {
    Some(autoprefixer) => autoprefixer
      .as_object()
      .is_some_and(|autoprefixer| autoprefixer.contains_key(BROWSERS)),
    // Left over from an earlier resolution, only a copy of the old shorthand may be replaced
    None => resolved
      .get(AUTOPREFIXER)
      .and_then(|autoprefixer| autoprefixer.get(BROWSERS))
      .is_some_and(|browsers| Some(browsers) != previous_browsers),
  };

  if !has_own_browsers {
    // A disabled autoprefixer is not an object and stays disabled
    if let Some(Value::Object(autoprefixer)) = resolved.get_mut(AUTOPREFIXER) {
      autoprefixer.insert(BROWSERS.into(), Value::from(browsers.clone()));
    }
  }

  let level = coverage_level(&browsers);
  let keep_fallbacks = needs_legacy_fallbacks(level);

  tracing::debug!(?level, keep_fallbacks, "Applied browsers option");

  for &feature in BROWSER_DEPENDENT_FEATURES {
    if !keep_fallbacks {
      resolved.insert(feature.into(), Value::Bool(false));
      continue;
    }

    let disabled_by_caller = raw.get(feature).is_some_and(|value| !is_truthy(value));
    let enabled = resolved.get(feature).is_some_and(is_truthy);

    if !disabled_by_caller && !enabled {
      let value = SCHEMA
        .get(feature)
        .map(|default| default.enabled_value())
        .unwrap_or(Value::Bool(true));

      resolved.insert(feature.into(), value);
    }
  }
}

fn check_preprocessors(resolved: &Map<String, Value>) -> Result<(), ConfigError> {
  let names: Vec<String> = PREPROCESSORS
    .iter()
    .filter(|name| resolved.get(**name).is_some_and(is_truthy))
    .map(|name| name.to_string())
    .collect();

  if names.len() > 1 {
    return Err(ConfigError::MultiplePreprocessors { names });
  }

  Ok(())
}
