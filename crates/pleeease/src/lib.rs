//! Runs CSS through preprocessors, a fixed chain of plugins and a stringifier, all configured by
//! a single options object.
//!
//! Parsing, stringifying and the plugins themselves are supplied by the caller through
//! [`CssEngine`], [`Preprocessor`] and [`CssPlugin`].

mod engine;
mod error;
mod pipeline;
mod plugin;
mod processor;
mod registry;
#[cfg(test)]
mod test_utils;

pub use engine::CssEngine;
pub use engine::CssInput;
pub use engine::ParseOptions;
pub use engine::ProcessResult;
pub use error::ProcessError;
pub use pipeline::TransformerPipeline;
pub use pipeline::PIPELINE_ORDER;
pub use plugin::CssPlugin;
pub use plugin::PluginOptions;
pub use plugin::Preprocessor;
pub use processor::Processor;
pub use registry::PluginRegistry;

pub use pleeease_options::ConfigError;
pub use pleeease_options::Options;
pub use pleeease_options::RawOptions;
pub use pleeease_options::ResolvedOptions;
