//! Deny/allow rule evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::config::FilterConfig;

/// How a rule pattern is compared with a declaration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Name starts with the pattern
    Prefix,
    /// Name equals the pattern
    Exact,
}

/// One name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub kind: RuleKind,
    pub pattern: String,
}

impl FilterRule {
    pub fn prefix(pattern: impl Into<String>) -> Self {
        FilterRule {
            kind: RuleKind::Prefix,
            pattern: pattern.into(),
        }
    }

    pub fn exact(pattern: impl Into<String>) -> Self {
        FilterRule {
            kind: RuleKind::Exact,
            pattern: pattern.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self.kind {
            RuleKind::Prefix => name.starts_with(&self.pattern),
            RuleKind::Exact => name == self.pattern,
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleKind::Prefix => write!(f, "prefix `{}`", self.pattern),
            RuleKind::Exact => write!(f, "exact `{}`", self.pattern),
        }
    }
}

/// Outcome of evaluating one declaration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
    /// Final verdict: exclude the declaration
    pub ignore: bool,
    /// First deny rule that matched
    pub denied_by: Option<&'a FilterRule>,
    /// Allow override that re-admitted the declaration
    pub allowed_by: Option<&'a FilterRule>,
}

impl Decision<'_> {
    /// Denied by a rule but kept by an override.
    pub fn is_override(&self) -> bool {
        self.denied_by.is_some() && self.allowed_by.is_some()
    }
}

impl fmt::Display for Decision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.denied_by, self.allowed_by) {
            (Some(deny), Some(allow)) => {
                write!(f, "retained: denied by {} but allowed by {}", deny, allow)
            }
            (Some(deny), None) => write!(f, "ignored: denied by {}", deny),
            _ => write!(f, "retained: no deny rule matches"),
        }
    }
}

/// Ordered deny rules plus exact-name allow overrides.
///
/// Allow overrides are only consulted once a deny rule has matched, and they
/// always win. An allow entry never admits a declaration on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRules {
    deny: Vec<FilterRule>,
    allow: Vec<FilterRule>,
}

impl FilterRules {
    /// Build from deny rules and the exact names that override them.
    pub fn new<S: Into<String>>(
        deny: impl IntoIterator<Item = FilterRule>,
        allow: impl IntoIterator<Item = S>,
    ) -> Self {
        FilterRules {
            deny: deny.into_iter().collect(),
            allow: allow.into_iter().map(FilterRule::exact).collect(),
        }
    }

    /// Deny entries become prefix rules, allow entries exact overrides.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(
            config.deny.iter().map(FilterRule::prefix),
            config.allow.iter().cloned(),
        )
    }

    pub fn deny(&self) -> &[FilterRule] {
        &self.deny
    }

    pub fn allow(&self) -> &[FilterRule] {
        &self.allow
    }

    /// Decide whether a declaration named `name` is excluded.
    pub fn evaluate(&self, name: &str) -> Decision<'_> {
        let denied_by = self.deny.iter().find(|rule| rule.matches(name));

        let allowed_by = match denied_by {
            Some(_) => self.allow.iter().find(|rule| rule.matches(name)),
            None => None,
        };

        Decision {
            ignore: denied_by.is_some() && allowed_by.is_none(),
            denied_by,
            allowed_by,
        }
    }
}
