//! Options resolution for the pleeease CSS pipeline.
//!
//! Turns whatever the user handed over (object literals, booleans, rc file contents) into a
//! normalized [`ResolvedOptions`] that every downstream plugin can consume as-is.

pub mod browsers;
mod error;
pub mod merge;
pub mod option_value;
mod options;
pub mod rc;
mod resolved;
pub mod schema;

pub use browsers::coverage_level;
pub use browsers::BrowsersShorthand;
pub use browsers::CoverageLevel;
pub use error::ConfigError;
pub use option_value::OptionValue;
pub use options::Options;
pub use options::RawOptions;
pub use rc::RcFile;
pub use rc::RcFileError;
pub use rc::RcSource;
pub use rc::RcSourceRef;
pub use resolved::is_truthy;
pub use resolved::ResolvedOptions;
pub use schema::OptionDefault;
pub use schema::OptionSchema;
