//! `shapematch.toml` configuration.
//!
//! ```toml
//! [matcher]
//! max_depth = 256        # 0 disables the limit
//!
//! [json]
//! directive_key = "$match"
//! ```
//!
//! Every section and field is optional.

use std::path::Path;

use serde::Deserialize;
use shapematch_core::json::DEFAULT_DIRECTIVE_KEY;
use shapematch_core::{DirectiveReader, Matcher, DEFAULT_MAX_DEPTH};

/// Looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "shapematch.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherSettings,
    #[serde(default)]
    pub json: JsonSettings,
}

/// `[matcher]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherSettings {
    /// Maximum signature nesting depth; `0` means unlimited.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        MatcherSettings {
            max_depth: default_max_depth(),
        }
    }
}

/// `[json]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSettings {
    #[serde(default = "default_directive_key")]
    pub directive_key: String,
}

impl Default for JsonSettings {
    fn default() -> Self {
        JsonSettings {
            directive_key: default_directive_key(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_directive_key() -> String {
    DEFAULT_DIRECTIVE_KEY.to_string()
}

impl Config {
    /// Loads `explicit` if given (it must exist), else `shapematch.toml` in
    /// the current directory if present, else defaults.
    ///
    /// Returns a human-readable error string on failure.
    pub fn load(explicit: Option<&Path>) -> Result<Config, String> {
        match explicit {
            Some(path) => read_config(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    read_config(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn matcher(&self) -> Matcher {
        let limit = match self.matcher.max_depth {
            0 => None,
            n => Some(n),
        };
        Matcher::new().with_max_depth(limit)
    }

    pub fn reader(&self) -> DirectiveReader {
        DirectiveReader::new(self.json.directive_key.clone())
    }
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
