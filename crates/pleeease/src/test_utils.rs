use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use serde_json::json;
use serde_json::Value;

use crate::engine::CssEngine;
use crate::engine::ParseOptions;
use crate::engine::ProcessResult;
use crate::plugin::CssPlugin;
use crate::plugin::PluginOptions;
use crate::plugin::Preprocessor;

/// A stylesheet kept as text, with a log of the plugins that touched it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestRoot {
  pub css: String,
  pub from: Option<String>,
  pub applied: Vec<String>,
  pub seen_options: Vec<Value>,
}

#[derive(Debug, thiserror::Error)]
#[error("CssSyntaxError: {reason}")]
pub struct CssSyntaxError {
  pub reason: String,
}

/// Only checks that braces are balanced
#[derive(Debug, Default)]
pub struct TestEngine;

impl CssEngine for TestEngine {
  type Root = TestRoot;

  fn parse(&self, css: &str, options: &ParseOptions) -> Result<TestRoot, anyhow::Error> {
    if css.matches('{').count() != css.matches('}').count() {
      return Err(
        CssSyntaxError {
          reason: String::from("Unclosed block"),
        }
        .into(),
      );
    }

    Ok(TestRoot {
      css: css.to_string(),
      from: options.from.clone(),
      ..TestRoot::default()
    })
  }

  fn stringify(&self, root: &TestRoot, options: &ParseOptions) -> Result<ProcessResult, anyhow::Error> {
    let map = options.map.as_ref().map(|_| {
      let source = root.from.clone().unwrap_or_else(|| String::from("<input css 1>"));
      json!({ "version": 3, "sources": [source] }).to_string()
    });

    Ok(ProcessResult {
      css: root.css.clone(),
      map,
    })
  }
}

/// Records its id and options on the root without changing the CSS
#[derive(Debug)]
pub struct RecordingPlugin {
  id: String,
}

impl RecordingPlugin {
  pub fn new(id: &str) -> Arc<dyn CssPlugin<TestRoot>> {
    Arc::new(RecordingPlugin { id: id.to_string() })
  }
}

impl CssPlugin<TestRoot> for RecordingPlugin {
  fn id(&self) -> &str {
    &self.id
  }

  fn transform(&self, root: &mut TestRoot, options: &PluginOptions) -> Result<(), anyhow::Error> {
    root.applied.push(self.id.clone());
    root.seen_options.push(options.options.clone());
    Ok(())
  }
}

/// Drops the whitespace after colons
#[derive(Debug)]
pub struct MinifyPlugin;

impl MinifyPlugin {
  pub fn new() -> Arc<dyn CssPlugin<TestRoot>> {
    Arc::new(MinifyPlugin)
  }
}

impl CssPlugin<TestRoot> for MinifyPlugin {
  fn id(&self) -> &str {
    "minifier"
  }

  fn transform(&self, root: &mut TestRoot, _options: &PluginOptions) -> Result<(), anyhow::Error> {
    root.css = root.css.replace(": ", ":");
    root.applied.push(String::from("minifier"));
    Ok(())
  }
}

#[derive(Debug)]
pub struct FailingPlugin {
  message: String,
}

impl FailingPlugin {
  pub fn new(message: &str) -> Arc<dyn CssPlugin<TestRoot>> {
    Arc::new(FailingPlugin {
      message: message.to_string(),
    })
  }
}

impl CssPlugin<TestRoot> for FailingPlugin {
  fn id(&self) -> &str {
    "failing"
  }

  fn transform(&self, _root: &mut TestRoot, _options: &PluginOptions) -> Result<(), anyhow::Error> {
    Err(anyhow!("{}", self.message))
  }
}

/// Substitutes `$color` and remembers the options it last rendered with
#[derive(Debug, Default)]
pub struct SassPreprocessor {
  pub last_options: Mutex<Option<PluginOptions>>,
}

impl SassPreprocessor {
  pub fn new() -> Arc<SassPreprocessor> {
    Arc::new(SassPreprocessor::default())
  }

  pub fn last_options(&self) -> Option<PluginOptions> {
    self.last_options.lock().unwrap().clone()
  }
}

impl Preprocessor for SassPreprocessor {
  fn render(&self, css: &str, options: &PluginOptions) -> Result<String, anyhow::Error> {
    *self.last_options.lock().unwrap() = Some(options.clone());

    if css.contains("$unknown") {
      return Err(anyhow!("Undefined variable: $unknown"));
    }

    Ok(css.replace("$color", "red"))
  }
}
