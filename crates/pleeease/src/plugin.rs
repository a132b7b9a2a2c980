use std::fmt::Debug;

use pleeease_options::ResolvedOptions;
use serde::Serialize;
use serde_json::Value;

/// Transforms a parsed stylesheet in place
///
/// Plugins are external to the processor. Each one is registered under the option that switches
/// it on and only receives that option's value plus the shared settings in [`PluginOptions`].
pub trait CssPlugin<R>: Debug + Send + Sync {
  fn id(&self) -> &str;

  fn transform(&self, root: &mut R, options: &PluginOptions) -> Result<(), anyhow::Error>;
}

/// Compiles a preprocessor language (Sass, Less, Stylus) to CSS before it is parsed
pub trait Preprocessor: Debug + Send + Sync {
  fn render(&self, css: &str, options: &PluginOptions) -> Result<String, anyhow::Error>;
}

/// What a single plugin gets to see of the resolved options
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
  /// The plugin's own option, an object for features or the raw value otherwise
  pub options: Value,
  pub sourcemaps: Option<Value>,
  pub input_file: Option<String>,
  pub output_file: Option<String>,
}

impl Default for PluginOptions {
  fn default() -> Self {
    PluginOptions {
      options: Value::Bool(true),
      sourcemaps: None,
      input_file: None,
      output_file: None,
    }
  }
}

impl PluginOptions {
  /// Options for the plugin registered under `name`, `None` when that option is disabled
  pub fn for_option(name: &str, options: &ResolvedOptions) -> Option<Self> {
    let own = options.plugin_options(name)?;

    Some(PluginOptions {
      options: own.clone(),
      sourcemaps: options.sourcemaps().cloned().map(Value::Object),
      input_file: options.input_file().map(String::from),
      output_file: options.output_file().map(String::from),
    })
  }

  /// A setting of the plugin's own option
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.options.get(key)
  }
}

#[cfg(test)]
mod tests {
  use pleeease_options::Options;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn disabled_options_have_no_plugin_options() {
    let options = Options::new().extend(json!({ "minifier": false })).unwrap();

    assert_eq!(PluginOptions::for_option("minifier", &options), None);
    assert_eq!(PluginOptions::for_option("mqpacker", &options), None);
  }

  #[test]
  fn carries_own_and_shared_options() {
    let options = Options::new()
      .extend(json!({
        "rem": { "rootValue": "10px" },
        "sourcemaps": true,
        "in": "input.css",
        "out": "output.css"
      }))
      .unwrap();

    assert_eq!(
      PluginOptions::for_option("rem", &options),
      Some(PluginOptions {
        options: json!({ "rootValue": "10px" }),
        sourcemaps: Some(json!({ "map": { "inline": true } })),
        input_file: Some("input.css".into()),
        output_file: Some("output.css".into()),
      })
    );
  }

  #[test]
  fn reads_own_settings() {
    let options = Options::new().extend(json!({})).unwrap();
    let minifier = PluginOptions::for_option("minifier", &options).unwrap();

    assert_eq!(minifier.get("preserveHacks"), Some(&json!(true)));
    assert_eq!(minifier.get("removeAllComments"), None);
  }
}
