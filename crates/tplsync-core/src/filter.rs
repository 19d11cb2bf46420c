//! Ordered include/exclude rules over template paths
//!
//! Rules are regular expressions matched against the whole path. The
//! last matching rule decides; when nothing matches, the decision is the
//! opposite of the first rule's polarity, so a policy that starts with
//! an `exclude` keeps everything it does not mention and a policy that
//! starts with an `include` drops everything it does not mention. An
//! empty policy keeps everything.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whether a matching rule keeps or drops a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Include,
    Exclude,
}

impl Polarity {
    pub fn includes(self) -> bool {
        matches!(self, Self::Include)
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Include => write!(f, "include"),
            Self::Exclude => write!(f, "exclude"),
        }
    }
}

/// A rule pattern that failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid {polarity} pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    pub polarity: Polarity,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    regex: Regex,
    polarity: Polarity,
}

/// Ordered rule list deciding which template paths are kept in sync.
#[derive(Debug, Clone, Default)]
pub struct InclusionFilter {
    rules: Vec<Rule>,
}

impl InclusionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    ///
    /// The pattern must match the entire path. On error the rule list
    /// is left unchanged.
    pub fn add_rule(&mut self, pattern: &str, polarity: Polarity) -> Result<(), PatternError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            polarity,
            source,
        })?;
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            regex,
            polarity,
        });
        Ok(())
    }

    pub fn include(&mut self, pattern: &str) -> Result<(), PatternError> {
        self.add_rule(pattern, Polarity::Include)
    }

    pub fn exclude(&mut self, pattern: &str) -> Result<(), PatternError> {
        self.add_rule(pattern, Polarity::Exclude)
    }

    /// Decide whether `path` is kept in sync.
    pub fn decide(&self, path: &str) -> bool {
        let Some(first) = self.rules.first() else {
            return true;
        };

        let mut included = !first.polarity.includes();
        for rule in &self.rules {
            if rule.regex.is_match(path) {
                included = rule.polarity.includes();
            }
        }
        included
    }

    /// The last rule matching `path`, as `(pattern, polarity)`.
    ///
    /// `None` means the path fell through to the default decision.
    pub fn deciding_rule(&self, path: &str) -> Option<(&str, Polarity)> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.regex.is_match(path))
            .map(|rule| (rule.pattern.as_str(), rule.polarity))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
