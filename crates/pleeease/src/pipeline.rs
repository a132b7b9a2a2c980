use std::fmt::Debug;
use std::sync::Arc;

use pleeease_options::ResolvedOptions;

use crate::error::ProcessError;
use crate::plugin::CssPlugin;
use crate::plugin::PluginOptions;
use crate::registry::PluginRegistry;

/// Options that map to a plugin, in the order their plugins run
pub const PIPELINE_ORDER: &[&str] = &[
  "import",
  "rebaseUrls",
  "filters",
  "rem",
  "pseudoElements",
  "opacity",
  "vmin",
  "autoprefixer",
  "mqpacker",
  "minifier",
];

struct PipelineStep<R> {
  plugin: Arc<dyn CssPlugin<R>>,
  options: PluginOptions,
}

/// An ordered list of plugins, each paired with the options it runs with
pub struct TransformerPipeline<R> {
  steps: Vec<PipelineStep<R>>,
}

impl<R> Default for TransformerPipeline<R> {
  fn default() -> Self {
    TransformerPipeline { steps: Vec::new() }
  }
}

impl<R> Debug for TransformerPipeline<R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TransformerPipeline")
      .field("plugins", &self.ids())
      .finish()
  }
}

impl<R> TransformerPipeline<R> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a plugin, used to chain the processor with other plugins
  pub fn with(mut self, plugin: Arc<dyn CssPlugin<R>>, options: PluginOptions) -> Self {
    self.steps.push(PipelineStep { plugin, options });
    self
  }

  /// Builds the pipeline for the enabled options, in [`PIPELINE_ORDER`]
  pub fn from_options(registry: &PluginRegistry<R>, options: &ResolvedOptions) -> Self {
    let mut steps = Vec::new();

    for &option in PIPELINE_ORDER {
      let Some(plugin_options) = PluginOptions::for_option(option, options) else {
        continue;
      };

      match registry.get_plugin(option) {
        Some(plugin) => steps.push(PipelineStep {
          plugin: Arc::clone(plugin),
          options: plugin_options,
        }),
        None => tracing::debug!(option, "No plugin registered, skipping"),
      }
    }

    TransformerPipeline { steps }
  }

  pub fn ids(&self) -> Vec<&str> {
    self.steps.iter().map(|step| step.plugin.id()).collect()
  }

  /// Runs every plugin over `root`, stopping at the first failure
  pub fn run(&self, root: &mut R) -> Result<(), ProcessError> {
    for step in &self.steps {
      let id = step.plugin.id();
      tracing::trace!(plugin = id, "Running plugin");

      step
        .plugin
        .transform(root, &step.options)
        .map_err(|error| ProcessError::Plugin {
          id: id.to_string(),
          error,
        })?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pleeease_options::Options;
  use pretty_assertions::assert_eq;
  use serde_json::json;
  use serde_json::Value;

  use super::*;
  use crate::test_utils::FailingPlugin;
  use crate::test_utils::RecordingPlugin;
  use crate::test_utils::TestRoot;

  fn registry() -> PluginRegistry<TestRoot> {
    // Registered out of order on purpose
    PluginRegistry::<TestRoot>::new()
      .plugin("minifier", RecordingPlugin::new("minifier"))
      .plugin("autoprefixer", RecordingPlugin::new("autoprefixer"))
      .plugin("mqpacker", RecordingPlugin::new("mqpacker"))
      .plugin("rem", RecordingPlugin::new("rem"))
      .plugin("next", RecordingPlugin::new("next"))
  }

  fn pipeline(raw: Value) -> TransformerPipeline<TestRoot> {
    TransformerPipeline::from_options(&registry(), &Options::new().extend(raw).unwrap())
  }

  #[test]
  fn runs_enabled_plugins_in_pipeline_order() {
    assert_eq!(pipeline(json!({})).ids(), vec!["rem", "autoprefixer", "minifier"]);
  }

  #[test]
  fn skips_disabled_plugins() {
    assert_eq!(
      pipeline(json!({ "minifier": false, "mqpacker": true })).ids(),
      vec!["rem", "autoprefixer", "mqpacker"]
    );
  }

  #[test]
  fn never_runs_legacy_options() {
    assert_eq!(
      pipeline(json!({ "next": true })).ids(),
      vec!["rem", "autoprefixer", "minifier"]
    );
  }

  #[test]
  fn passes_each_plugin_its_own_options() {
    let mut root = TestRoot::default();

    pipeline(json!({ "rem": { "rootValue": "10px" }, "autoprefixer": false, "minifier": false }))
      .run(&mut root)
      .unwrap();

    assert_eq!(root.applied, vec!["rem"]);
    assert_eq!(root.seen_options, vec![json!({ "rootValue": "10px" })]);
  }

  #[test]
  fn stops_at_the_first_failing_plugin() {
    let registry = registry().plugin("rem", FailingPlugin::new("bad root value"));
    let options = Options::new().extend(json!({})).unwrap();
    let mut root = TestRoot::default();

    let error = TransformerPipeline::from_options(&registry, &options)
      .run(&mut root)
      .unwrap_err();

    assert_eq!(error.to_string(), "failing failed: bad root value");
    assert!(root.applied.is_empty());
  }

  #[test]
  fn chains_plugins_by_hand() {
    let mut root = TestRoot::default();

    TransformerPipeline::<TestRoot>::new()
      .with(RecordingPlugin::new("first"), PluginOptions::default())
      .with(RecordingPlugin::new("second"), PluginOptions::default())
      .run(&mut root)
      .unwrap();

    assert_eq!(root.applied, vec!["first", "second"]);
  }
}
