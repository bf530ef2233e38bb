//! Search sources and the environment resolver.
//!
//! A [`SearchSource`] names one of the interchangeable backends queries are
//! sent to. The set is closed: two live backends and one simulated dataset.
//!
//! The default source is read once at startup from [`SEARCH_SOURCE_ENV`]
//! and resolved with [`resolve_search_source`]:
//!
//! | Input | Result |
//! |-------|--------|
//! | unset | [`SearchSource::Azure`] |
//! | `ailab`, `azure`, `static`, `simulated` (any case) | matching source |
//! | anything else, including `""` | [`ConsoleError::InvalidConfiguration`] |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Environment variable naming the default search source.
pub const SEARCH_SOURCE_ENV: &str = "SCON_SEARCH_SOURCE";

/// Alternate spelling accepted for [`SearchSource::Static`].
const SIMULATED_ALIAS: &str = "simulated";

/// A search backend, or the simulated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SearchSource {
    /// Primary AI search backend.
    Ailab,
    /// Secondary cloud search backend. The default.
    Azure,
    /// Simulated dataset backed by static files.
    Static,
}

impl SearchSource {
    /// Every source, in display order.
    pub const ALL: [SearchSource; 3] = [Self::Ailab, Self::Azure, Self::Static];

    /// Source used when no configuration is supplied.
    pub const DEFAULT: SearchSource = Self::Azure;

    /// Canonical lowercase name, used for parsing, serialization, and radio values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ailab => "ailab",
            Self::Azure => "azure",
            Self::Static => "static",
        }
    }

    /// Human-readable label shown next to the radio option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ailab => "Use AI Lab search",
            Self::Azure => "Use Azure AI Search",
            Self::Static => "Use Simulated Data",
        }
    }

    /// Whether this is the simulated dataset.
    pub fn is_simulated(self) -> bool {
        self == Self::Static
    }

    /// Resolves the source from [`SEARCH_SOURCE_ENV`].
    ///
    /// A variable that is set but not valid UTF-8 is treated as an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ConsoleError> {
        match std::env::var(SEARCH_SOURCE_ENV) {
            Ok(value) => resolve_search_source(Some(value.as_str())),
            Err(std::env::VarError::NotPresent) => resolve_search_source(None),
            Err(std::env::VarError::NotUnicode(raw)) => Err(ConsoleError::InvalidConfiguration {
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchSource {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        if wanted == SIMULATED_ALIAS {
            return Ok(Self::Static);
        }
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == wanted)
            .ok_or_else(|| ConsoleError::InvalidConfiguration {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for SearchSource {
    type Error = ConsoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SearchSource> for String {
    fn from(source: SearchSource) -> Self {
        source.as_str().to_string()
    }
}

/// Maps an optional configuration value to a [`SearchSource`].
///
/// Matching is case-insensitive. `None` yields [`SearchSource::DEFAULT`];
/// a present value that matches nothing fails with
/// [`ConsoleError::InvalidConfiguration`] carrying the value verbatim.
/// Callers must treat that error as fatal rather than falling back.
pub fn resolve_search_source(env_value: Option<&str>) -> Result<SearchSource, ConsoleError> {
    match env_value {
        Some(value) => value.parse(),
        None => Ok(SearchSource::DEFAULT),
    }
}
