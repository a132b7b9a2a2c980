use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::plugin::CssPlugin;
use crate::plugin::Preprocessor;

/// Plugins and preprocessors, keyed by the option that switches them on
pub struct PluginRegistry<R> {
  plugins: IndexMap<String, Arc<dyn CssPlugin<R>>>,
  preprocessors: IndexMap<String, Arc<dyn Preprocessor>>,
}

impl<R> Default for PluginRegistry<R> {
  fn default() -> Self {
    PluginRegistry {
      plugins: IndexMap::new(),
      preprocessors: IndexMap::new(),
    }
  }
}

impl<R> Clone for PluginRegistry<R> {
  fn clone(&self) -> Self {
    PluginRegistry {
      plugins: self.plugins.clone(),
      preprocessors: self.preprocessors.clone(),
    }
  }
}

impl<R> Debug for PluginRegistry<R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PluginRegistry")
      .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
      .field("preprocessors", &self.preprocessors.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl<R> PluginRegistry<R> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `plugin` under `option`, replacing any plugin already registered there
  pub fn plugin(mut self, option: &str, plugin: Arc<dyn CssPlugin<R>>) -> Self {
    self.plugins.insert(option.to_string(), plugin);
    self
  }

  /// Registers `preprocessor` under `option`, replacing any preprocessor already registered there
  pub fn preprocessor(mut self, option: &str, preprocessor: Arc<dyn Preprocessor>) -> Self {
    self.preprocessors.insert(option.to_string(), preprocessor);
    self
  }

  pub fn get_plugin(&self, option: &str) -> Option<&Arc<dyn CssPlugin<R>>> {
    self.plugins.get(option)
  }

  pub fn get_preprocessor(&self, option: &str) -> Option<&Arc<dyn Preprocessor>> {
    self.preprocessors.get(option)
  }
}
