//! Blacklist text format
//!
//! ```text
//! ; comment
//! # comment
//! [46,tnt,lighter]
//! ignore-groups=admins
//! on-right=builders
//! ```
//!
//! A `[...]` header opens a section shared by every item it names. Option
//! lines below it configure that section. Problems in the text never fail a
//! load; they are logged and collected as [`ParseWarning`]s.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseWarning;
use crate::item::ItemRegistry;
use crate::rules::{ActionKind, RuleId, RuleIndex, RuleIndexBuilder};

use super::resolve::resolve;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]$").unwrap());

/// Recognized option keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    IgnoreGroups,
    OnDestroy,
    OnLeft,
    OnRight,
}

impl OptionKey {
    /// Parse a key, ignoring case and surrounding whitespace
    pub fn from_str(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "ignore-groups" => Some(OptionKey::IgnoreGroups),
            "on-destroy" => Some(OptionKey::OnDestroy),
            "on-left" => Some(OptionKey::OnLeft),
            "on-right" => Some(OptionKey::OnRight),
            _ => None,
        }
    }

    /// Hook configured by this key, `None` for `ignore-groups`
    pub fn action(&self) -> Option<ActionKind> {
        match self {
            OptionKey::IgnoreGroups => None,
            OptionKey::OnDestroy => Some(ActionKind::Destroy),
            OptionKey::OnLeft => Some(ActionKind::LeftClick),
            OptionKey::OnRight => Some(ActionKind::RightClick),
        }
    }
}

/// Outcome of parsing a blacklist
#[derive(Debug)]
pub struct LoadReport {
    /// The index, or `None` when no item was configured
    pub index: Option<RuleIndex>,

    /// Recoverable problems, in line order
    pub warnings: Vec<ParseWarning>,
}

impl LoadReport {
    /// Number of configured items
    pub fn item_count(&self) -> usize {
        self.index.as_ref().map_or(0, RuleIndex::len)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Split a comma-separated value list, dropping blanks
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

struct Parser<'a, R: ?Sized> {
    registry: &'a R,
    source: &'a str,
    builder: RuleIndexBuilder,
    warnings: Vec<ParseWarning>,
}

impl<'a, R> Parser<'a, R>
where
    R: ItemRegistry + ?Sized,
{
    fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!(source = self.source, "{}", warning);
        self.warnings.push(warning);
    }

    /// Register the items of a header and return the section's entry.
    ///
    /// Stops at the first unresolvable token, blank tokens included; items
    /// before it stay registered. Trailing empty tokens are dropped, so
    /// `[1,2,]` is accepted while `[]` and `[1,,2]` warn.
    fn header(&mut self, line: usize, inner: &str) -> Option<RuleId> {
        let mut section = None;

        let mut tokens: Vec<&str> = inner.split(',').collect();
        if !inner.is_empty() {
            while tokens.last() == Some(&"") {
                tokens.pop();
            }
        }

        for token in tokens.into_iter().map(str::trim) {
            let Some(item) = resolve(token, self.registry) else {
                self.warn(ParseWarning::UnknownItem {
                    line,
                    token: token.to_string(),
                });
                break;
            };

            let id = *section.get_or_insert_with(|| self.builder.add_entry());
            self.builder.bind(item, id);
        }

        section
    }

    fn option(&mut self, line: usize, text: &str, section: Option<RuleId>) {
        let Some((key, value)) = text.split_once('=') else {
            self.warn(ParseWarning::MissingValue {
                line,
                text: text.to_string(),
            });
            return;
        };

        if value.trim().is_empty() {
            self.warn(ParseWarning::MissingValue {
                line,
                text: text.to_string(),
            });
            return;
        }

        let Some(key) = OptionKey::from_str(key) else {
            self.warn(ParseWarning::UnknownOption {
                line,
                key: key.trim().to_string(),
            });
            return;
        };

        let Some(entry) = section.and_then(|id| self.builder.entry_mut(id)) else {
            return;
        };

        let values = split_list(value);
        match key.action() {
            Some(action) => entry.set_hook(action, values),
            None => entry.set_ignore_groups(values),
        }
    }

    fn run(mut self, text: &str) -> LoadReport {
        // None until the first header; Some(None) for a header with no items
        let mut section: Option<Option<RuleId>> = None;

        for (n, raw) in text.lines().enumerate() {
            let line = n + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if SECTION_HEADER.is_match(trimmed) {
                let inner = &trimmed[1..trimmed.len() - 1];
                section = Some(self.header(line, inner));
                continue;
            }

            match section {
                Some(current) => self.option(line, trimmed, current),
                None => self.warn(ParseWarning::NoSection {
                    line,
                    text: trimmed.to_string(),
                }),
            }
        }

        LoadReport {
            index: self.builder.build(),
            warnings: self.warnings,
        }
    }
}

/// Parse blacklist text
pub fn parse<R>(text: &str, registry: &R) -> LoadReport
where
    R: ItemRegistry + ?Sized,
{
    parse_source(text, "blacklist", registry)
}

/// Parse blacklist text, naming `source` in logged warnings
pub fn parse_source<R>(text: &str, source: &str, registry: &R) -> LoadReport
where
    R: ItemRegistry + ?Sized,
{
    let parser = Parser {
        registry,
        source,
        builder: RuleIndex::builder(),
        warnings: Vec::new(),
    };
    parser.run(text)
}
