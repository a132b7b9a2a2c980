use serde_json::Map;
use serde_json::Value;

use crate::merge::deep_merge;
use crate::resolved::is_truthy;
use crate::schema::OptionDefault;

/// A user supplied option value, classified by how it combines with the option's default
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
  Disabled,
  EnabledDefault,
  EnabledWithOverrides(Map<String, Value>),
  RawPassthrough(Value),
}

impl From<Value> for OptionValue {
  fn from(value: Value) -> Self {
    match value {
      Value::Bool(false) => OptionValue::Disabled,
      Value::Bool(true) => OptionValue::EnabledDefault,
      Value::Object(overrides) => OptionValue::EnabledWithOverrides(overrides),
      value => OptionValue::RawPassthrough(value),
    }
  }
}

impl OptionValue {
  /// Combine the value with the option's default
  ///
  /// Only features expand: `true` becomes the feature's defaults and an object is deep merged
  /// over them. Any other value given to a feature counts by its truthiness, so a feature always
  /// ends up as `false` or an object. Everything else, legacy options included, is taken as given.
  pub fn resolve(self, default: &OptionDefault) -> Value {
    match (self, default) {
      (OptionValue::Disabled, _) => Value::Bool(false),
      (OptionValue::EnabledDefault, OptionDefault::Feature { defaults, .. }) => {
        Value::Object(defaults.clone())
      }
      (OptionValue::EnabledWithOverrides(overrides), OptionDefault::Feature { defaults, .. }) => {
        deep_merge(Value::Object(defaults.clone()), Value::Object(overrides))
      }
      (OptionValue::RawPassthrough(value), OptionDefault::Feature { defaults, .. }) => {
        if is_truthy(&value) {
          Value::Object(defaults.clone())
        } else {
          Value::Bool(false)
        }
      }
      (OptionValue::EnabledDefault, _) => Value::Bool(true),
      (OptionValue::EnabledWithOverrides(overrides), _) => Value::Object(overrides),
      (OptionValue::RawPassthrough(value), _) => value,
    }
  }
}
