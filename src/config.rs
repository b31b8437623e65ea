//! Rewrite options, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ECMAScript version the rewritten tree is meant to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScriptTarget {
    Es3,
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    EsNext,
}

/// When parameter binding patterns and initializers are moved into the
/// function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterHoisting {
    Never,
    /// Only when a variable was hoisted while visiting the parameter list and
    /// the target is at least ES2015, where parameters get their own scope.
    #[default]
    WhenVariablesHoisted,
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    pub target: ScriptTarget,
    pub parameter_hoisting: ParameterHoisting,
    /// Route token children (`?`, `*`, `=>`, …) through the main visitor.
    pub visit_tokens: bool,
    /// Prepend `"use strict"` to source file statements.
    pub ensure_use_strict: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            target: ScriptTarget::default(),
            parameter_hoisting: ParameterHoisting::default(),
            visit_tokens: false,
            ensure_use_strict: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RewriteOptions {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Decides whether a visited parameter list gets its binding patterns and
    /// initializers moved into the body.
    pub fn hoists_parameters(&self, variables_hoisted: bool) -> bool {
        match self.parameter_hoisting {
            ParameterHoisting::Never => false,
            ParameterHoisting::WhenVariablesHoisted => {
                variables_hoisted && self.target >= ScriptTarget::Es2015
            }
            ParameterHoisting::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RewriteOptions::default();
        assert_eq!(options.target, ScriptTarget::Es5);
        assert_eq!(options.parameter_hoisting, ParameterHoisting::WhenVariablesHoisted);
        assert!(!options.visit_tokens);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options = RewriteOptions::from_json_str(r#"{"target": "ES2017"}"#).unwrap();
        assert_eq!(options.target, ScriptTarget::Es2017);
        assert_eq!(options.parameter_hoisting, ParameterHoisting::WhenVariablesHoisted);
    }

    #[test]
    fn test_hoisting_policy() {
        let mut options = RewriteOptions::default();
        assert!(!options.hoists_parameters(true), "ES5 never needs the rewrite");

        options.target = ScriptTarget::Es2015;
        assert!(options.hoists_parameters(true));
        assert!(!options.hoists_parameters(false));

        options.parameter_hoisting = ParameterHoisting::Always;
        assert!(options.hoists_parameters(false));

        options.parameter_hoisting = ParameterHoisting::Never;
        assert!(!options.hoists_parameters(true));
    }
}
