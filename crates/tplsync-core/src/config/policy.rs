//! Inclusion policy files
//!
//! A policy file holds rule lists grouped by tag. The operator picks a
//! tag per run and only that tag's rules build the filter.
//!
//! INI form, rules in file order:
//!
//! ```text
//! [pvp]
//! exclude = archive/.*
//! include = archive/keep/.*
//! ```
//!
//! TOML form:
//!
//! ```toml
//! [tags.pvp]
//! rules = [{ exclude = "archive/.*" }, { include = "archive/keep/.*" }]
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tplsync_fs::{NormalizedPath, io};

use crate::filter::{InclusionFilter, PatternError, Polarity};
use crate::{Error, Result};

static SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(\w+)\]\s*$").expect("Invalid section regex"));

static KEY_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*=\s*(.*)").expect("Invalid key/value regex"));

/// One `(pattern, polarity)` pair as written in a policy file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub pattern: String,
    pub polarity: Polarity,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            pattern: pattern.into(),
            polarity,
        }
    }
}

/// Supplies the ordered rule list for a tag.
pub trait PolicySource {
    fn rules(&self, tag: &str) -> Vec<RuleSpec>;

    /// Build a filter from the tag's rules.
    ///
    /// Rules whose pattern does not compile are skipped and returned
    /// alongside the filter.
    fn build_filter(&self, tag: &str) -> (InclusionFilter, Vec<PatternError>) {
        let mut filter = InclusionFilter::new();
        let mut rejected = Vec::new();
        for rule in self.rules(tag) {
            if let Err(e) = filter.add_rule(&rule.pattern, rule.polarity) {
                rejected.push(e);
            }
        }
        (filter, rejected)
    }
}

/// Rule lists keyed by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    tags: BTreeMap<String, Vec<RuleSpec>>,
}

impl PolicySource for Policy {
    fn rules(&self, tag: &str) -> Vec<RuleSpec> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    tags: BTreeMap<String, TagRules>,
}

#[derive(Debug, Deserialize)]
struct TagRules {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RuleEntry {
    Include(String),
    Exclude(String),
}

impl From<RuleEntry> for RuleSpec {
    fn from(entry: RuleEntry) -> Self {
        match entry {
            RuleEntry::Include(pattern) => RuleSpec::new(pattern, Polarity::Include),
            RuleEntry::Exclude(pattern) => RuleSpec::new(pattern, Polarity::Exclude),
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to a tag.
    pub fn push(&mut self, tag: &str, rule: RuleSpec) {
        self.tags.entry(tag.to_string()).or_default().push(rule);
    }

    /// Load a policy file.
    ///
    /// Format is detected from file extension:
    /// - `.ini` -> INI
    /// - `.toml` -> TOML
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        let parse_toml = match extension.to_lowercase().as_str() {
            "ini" => false,
            "toml" => true,
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.to_string(),
                });
            }
        };

        let bytes = io::read_bytes(path, None)?;
        let content = String::from_utf8_lossy(&bytes);

        if parse_toml {
            Self::parse_toml(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            })
        } else {
            Ok(Self::parse_ini(&content))
        }
    }

    /// Parse the INI form.
    ///
    /// Only `include` and `exclude` keys (any case) inside a section
    /// produce rules; everything else is ignored. Values are taken
    /// verbatim up to the end of the line.
    pub fn parse_ini(content: &str) -> Self {
        let content = content.replace('\r', "");
        let mut policy = Self::new();
        let mut section: Option<String> = None;

        for line in content.split('\n') {
            if let Some(caps) = SECTION_REGEX.captures(line) {
                section = Some(caps[1].to_string());
                continue;
            }

            let Some(current) = section.as_deref() else {
                continue;
            };
            let Some(caps) = KEY_VALUE_REGEX.captures(line) else {
                continue;
            };

            let key = caps[1].to_lowercase();
            let value = &caps[2];
            match key.as_str() {
                "include" => policy.push(current, RuleSpec::new(value, Polarity::Include)),
                "exclude" => policy.push(current, RuleSpec::new(value, Polarity::Exclude)),
                _ => tracing::debug!("ignoring key `{}` in [{}]", key, current),
            }
        }

        policy
    }

    /// Parse the TOML form.
    pub fn parse_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: PolicyFile = toml::from_str(content)?;
        let tags = file
            .tags
            .into_iter()
            .map(|(tag, rules)| (tag, rules.rules.into_iter().map(RuleSpec::from).collect()))
            .collect();
        Ok(Self { tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ini_rules_in_file_order() {
        let policy = Policy::parse_ini(
            "[pvp]\r\nexclude = archive/.*\r\nINCLUDE = archive/keep/.*\r\n",
        );

        assert_eq!(
            policy.rules("pvp"),
            vec![
                RuleSpec::new("archive/.*", Polarity::Exclude),
                RuleSpec::new("archive/keep/.*", Polarity::Include),
            ]
        );
    }

    #[test]
    fn test_ini_ignores_keys_outside_sections() {
        let policy = Policy::parse_ini("exclude = .*\n[pve]\ninclude = a\\.txt\n");

        assert!(policy.rules("").is_empty());
        assert_eq!(policy.rules("pve"), vec![RuleSpec::new("a\\.txt", Polarity::Include)]);
    }

    #[test]
    fn test_ini_section_names_are_case_sensitive() {
        let policy = Policy::parse_ini("[PvP]\nexclude = x\n");
        assert!(policy.rules("pvp").is_empty());
        assert_eq!(policy.rules("PvP").len(), 1);
    }

    #[test]
    fn test_ini_unknown_keys_ignored() {
        let policy = Policy::parse_ini("[root]\nformat = zip\n[pvp]\nnote = hi\n");
        assert!(policy.rules("root").is_empty());
        assert!(policy.rules("pvp").is_empty());
    }

    #[test]
    fn test_toml_rules_in_order() {
        let policy = Policy::parse_toml(
            r#"
[tags.pvp]
rules = [{ exclude = "archive/.*" }, { include = "archive/keep/.*" }]
"#,
        )
        .unwrap();

        assert_eq!(
            policy.rules("pvp"),
            vec![
                RuleSpec::new("archive/.*", Polarity::Exclude),
                RuleSpec::new("archive/keep/.*", Polarity::Include),
            ]
        );
    }

    #[test]
    fn test_build_filter_skips_bad_patterns() {
        let policy = Policy::parse_ini("[t]\ninclude = *.txt\nexclude = secret/.*\n");

        let (filter, rejected) = policy.build_filter("t");

        assert_eq!(filter.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].pattern, "*.txt");
        assert!(!filter.decide("secret/a.txt"));
        assert!(filter.decide("a.txt"));
    }
}
