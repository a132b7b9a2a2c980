use pleeease_options::Options;
use pleeease_options::RawOptions;
use pleeease_options::ResolvedOptions;

use crate::engine::CssEngine;
use crate::engine::CssInput;
use crate::engine::ParseOptions;
use crate::engine::ProcessResult;
use crate::error::ProcessError;
use crate::pipeline::TransformerPipeline;
use crate::plugin::CssPlugin;
use crate::plugin::PluginOptions;
use crate::registry::PluginRegistry;

/// Parses, transforms and stringifies CSS according to a set of resolved options
pub struct Processor<E: CssEngine> {
  engine: E,
  registry: PluginRegistry<E::Root>,
  options: ResolvedOptions,
}

impl<E: CssEngine> std::fmt::Debug for Processor<E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Processor")
      .field("engine", &self.engine)
      .field("registry", &self.registry)
      .field("options", &self.options)
      .finish()
  }
}

impl<E: CssEngine> Processor<E> {
  /// Resolves `raw` without reading an rc file
  pub fn new(
    engine: E,
    registry: PluginRegistry<E::Root>,
    raw: impl Into<RawOptions>,
  ) -> Result<Self, ProcessError> {
    Self::with_resolver(engine, registry, &Options::new(), raw)
  }

  /// Resolves `raw` with `resolver`, which may fill omitted options from an rc file
  pub fn with_resolver(
    engine: E,
    registry: PluginRegistry<E::Root>,
    resolver: &Options,
    raw: impl Into<RawOptions>,
  ) -> Result<Self, ProcessError> {
    let options = resolver.extend(raw)?;
    Ok(Self::from_options(engine, registry, options))
  }

  pub fn from_options(
    engine: E,
    registry: PluginRegistry<E::Root>,
    options: ResolvedOptions,
  ) -> Self {
    Processor {
      engine,
      registry,
      options,
    }
  }

  pub fn options(&self) -> &ResolvedOptions {
    &self.options
  }

  /// Re-resolves the options in `partial`, leaving the others as they are
  pub fn set_options(
    &mut self,
    partial: impl Into<RawOptions>,
  ) -> Result<&ResolvedOptions, ProcessError> {
    self.options.set_options(partial)?;
    Ok(&self.options)
  }

  /// Turns the input into an AST, running the enabled preprocessor on CSS text first
  pub fn parse(&self, input: impl Into<CssInput<E::Root>>) -> Result<E::Root, ProcessError> {
    let css = match input.into() {
      CssInput::Ast(root) => return Ok(root),
      CssInput::Css(css) => css,
    };

    let css = match self.options.preprocessor() {
      Some(name) => self.preprocess(name, css)?,
      None => css,
    };

    self
      .engine
      .parse(&css, &ParseOptions::from(&self.options))
      .map_err(ProcessError::Parse)
  }

  fn preprocess(&self, name: &str, css: String) -> Result<String, ProcessError> {
    let Some(preprocessor) = self.registry.get_preprocessor(name) else {
      tracing::debug!(preprocessor = name, "No preprocessor registered, skipping");
      return Ok(css);
    };

    let options = PluginOptions::for_option(name, &self.options).unwrap_or_default();

    preprocessor
      .render(&css, &options)
      .map_err(|error| ProcessError::Preprocessor {
        name: name.to_string(),
        error,
      })
  }

  /// Runs the plugins of every enabled option over `root`
  pub fn transform(&self, root: &mut E::Root) -> Result<(), ProcessError> {
    TransformerPipeline::from_options(&self.registry, &self.options).run(root)
  }

  #[tracing::instrument(level = "debug", skip_all)]
  pub fn process(&self, input: impl Into<CssInput<E::Root>>) -> Result<ProcessResult, ProcessError> {
    let mut root = self.parse(input)?;
    self.transform(&mut root)?;

    self
      .engine
      .stringify(&root, &ParseOptions::from(&self.options))
      .map_err(ProcessError::Stringify)
  }
}

impl<E: CssEngine> CssPlugin<E::Root> for Processor<E> {
  fn id(&self) -> &str {
    "pleeease"
  }

  /// Uses the options the processor was built with, not the ones passed in
  fn transform(&self, root: &mut E::Root, _options: &PluginOptions) -> Result<(), anyhow::Error> {
    Processor::transform(self, root).map_err(anyhow::Error::from)
  }
}
