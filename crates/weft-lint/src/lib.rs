//! Rule visitors over a finished syntax tree.

mod rules;

use rustc_hash::FxHashMap;
use weft_errors::{Diagnostic, Severity, TextRange};
use weft_syntax::{NodeId, SyntaxTree};

pub use rules::RULES;

pub struct Rule {
    pub name: &'static str,
    pub default_severity: Severity,
    pub message: &'static str,
    visit: fn(&SyntaxTree, NodeId, &mut LintContext<'_>),
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Reporting handle bound to one rule and its configured severity.
pub struct LintContext<'a> {
    rule: &'a Rule,
    severity: Severity,
    entries: &'a mut Vec<Diagnostic>,
}

impl LintContext<'_> {
    pub fn add_entry(&mut self, message: impl Into<String>, range: TextRange) {
        self.entries.push(Diagnostic::new(self.rule.name, message, self.severity, range));
    }

    pub fn report(&mut self, range: TextRange) {
        self.add_entry(self.rule.message, range);
    }
}

/// Per-rule severity overrides on top of each rule's default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    severities: FxHashMap<String, Severity>,
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `rule = "level"` pairs.
    pub fn from_levels<'a>(levels: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::new();
        for (rule, level) in levels {
            config.set(rule, Severity::from_level(level));
        }
        config
    }

    pub fn set(&mut self, rule: &str, severity: Severity) {
        if !RULES.iter().any(|known| known.name == rule) {
            log::warn!("unknown lint rule `{rule}`");
        }
        self.severities.insert(rule.to_owned(), severity);
    }

    pub fn severity(&self, rule: &Rule) -> Severity {
        self.severities.get(rule.name).copied().unwrap_or(rule.default_severity)
    }
}

/// Runs every active rule over `tree` in one pre-order traversal. Rules
/// configured as [`Severity::Ignore`] are never visited.
pub fn lint(tree: &SyntaxTree, config: &LintConfig) -> Vec<Diagnostic> {
    let active = RULES
        .iter()
        .map(|rule| (rule, config.severity(rule)))
        .filter(|&(_, severity)| severity != Severity::Ignore)
        .collect::<Vec<_>>();

    let mut entries = Vec::new();
    if active.is_empty() {
        return entries;
    }

    for id in tree.preorder() {
        for &(rule, severity) in &active {
            let mut cx = LintContext { rule, severity, entries: &mut entries };
            (rule.visit)(tree, id, &mut cx);
        }
    }

    entries
}

#[cfg(test)]
mod tests;
