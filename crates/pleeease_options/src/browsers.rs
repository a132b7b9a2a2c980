use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The `browsers` option as users write it, either a single query or a list of queries
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BrowsersShorthand {
  List(Vec<String>),
  String(String),
}

impl BrowsersShorthand {
  /// Reads the shorthand from an option value, `None` when it is neither a string nor a list of
  /// strings
  pub fn from_value(value: &Value) -> Option<Self> {
    Self::deserialize(value).ok()
  }

  pub fn into_list(self) -> Vec<String> {
    match self {
      Self::List(list) => list,
      Self::String(string) => vec![string],
    }
  }
}

/// How far back a browsers list reaches
///
/// Ordered so that a wider coverage compares greater.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CoverageLevel {
  /// Every targeted browser understands rem units, `opacity` and `::` pseudo-elements
  Modern,
  /// At least one targeted browser needs fallbacks for them
  Legacy,
}

/// The coverage level from which rem, opacity and pseudo-element fallbacks stay enabled
pub const LEGACY_FALLBACKS_FROM: CoverageLevel = CoverageLevel::Legacy;

/// First Internet Explorer release supporting rem units, `opacity` and `::` pseudo-elements
const FIRST_IE_WITHOUT_FALLBACKS: u32 = 9;

/// Classifies a list of browserslist queries
///
/// Queries that cannot be resolved are treated as targeting modern browsers only.
#[tracing::instrument(level = "debug")]
pub fn coverage_level(browsers: &[String]) -> CoverageLevel {
  let distribs = match browserslist::resolve(browsers, &Default::default()) {
    Ok(distribs) => distribs,
    Err(error) => {
      tracing::warn!(%error, "Unable to resolve browsers, assuming modern browsers only");
      return CoverageLevel::Modern;
    }
  };

  let targets_old_ie = distribs.iter().any(|distrib| {
    distrib.name() == "ie"
      && major_version(&*distrib.version()).is_some_and(|major| major < FIRST_IE_WITHOUT_FALLBACKS)
  });

  if targets_old_ie {
    CoverageLevel::Legacy
  } else {
    CoverageLevel::Modern
  }
}

pub fn needs_legacy_fallbacks(level: CoverageLevel) -> bool {
  level >= LEGACY_FALLBACKS_FROM
}

fn major_version(version: &str) -> Option<u32> {
  version.split(['.', '-']).next()?.parse().ok()
}
