//! Recognition of system notices (group events, encryption banners, ...).
//!
//! WhatsApp writes administrative events on the same kind of line as normal
//! messages, and the phrasing keeps growing with every app release. The
//! phrases are kept as an ordered list of named rules that is compiled once
//! into a [`RegexSet`], so new phrasings are added here (or through
//! [`ParserConfig`](crate::config::ParserConfig)) without touching the parser.
//!
//! Rules are matched against the text after the header prefix, sender
//! included, and are always case-insensitive.

use once_cell::sync::Lazy;
use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ChatviewError, Result};

/// Built-in rules as `(name, pattern)` pairs, in priority order.
///
/// `[\s\u{2000}-\u{206F}]` covers the invisible formatting characters
/// (LRM, RLM, LRE, PDF, ...) WhatsApp sprinkles around names and numbers.
pub const BUILTIN_SYSTEM_RULES: &[(&str, &str)] = &[
    ("encryption_notice", r"^Messages and calls are end-to-end encrypted"),
    ("group_created", r"created this group"),
    ("added", r"added$"),
    ("were_added", r"were added$"),
    ("added_someone", r"added .+$"),
    ("removed_someone", r"removed .+$"),
    ("left", r"left$"),
    ("joined_via_link", r"joined using"),
    ("group_changed", r"changed this group"),
    ("subject_changed", r"changed the subject"),
    ("group_settings_changed", r"changed the group"),
    ("admin_approval_on", r"turned on admin approval"),
    ("admin_approval_off", r"turned off admin approval"),
    ("now_admin", r"is now an admin"),
    ("no_longer_admin", r"is no longer an admin"),
    ("description_changed", r"changed the description"),
    ("group_deleted", r"deleted this group"),
    ("security_code_changed", r"security code changed"),
    ("you_are_admin", r"^You['’]re now an admin"),
    ("phone_number_changed", r"changed their phone number"),
    ("message_deleted", r"This message was deleted"),
    ("media_omitted", r"<Media omitted>"),
    ("tilde_added", r"^~[\s\u{2000}-\u{206F}]*.+[\s\u{2000}-\u{206F}]+added"),
    ("tilde_removed", r"^~[\s\u{2000}-\u{206F}]*.+[\s\u{2000}-\u{206F}]+removed"),
    (
        "tilde_requested_to_add",
        r"^~[\s\u{2000}-\u{206F}]*.+[\s\u{2000}-\u{206F}]+requested to add",
    ),
    ("tilde_left", r"^~[\s\u{2000}-\u{206F}]*.+[\s\u{2000}-\u{206F}]+left"),
    ("phone_left", r"^\+[\d\s\-\u{2000}-\u{206F}]+[\s\u{2000}-\u{206F}]+left$"),
    ("phone_added", r"^\+[\d\s\-\u{2000}-\u{206F}]+[\s\u{2000}-\u{206F}]+added"),
    ("phone_removed", r"^\+[\d\s\-\u{2000}-\u{206F}]+[\s\u{2000}-\u{206F}]+removed"),
    ("requested_to_join", r"requested to join"),
    ("waiting_to_join", r"waiting to join"),
    ("added_marked_member", r".+[\s\u{2000}-\u{206F}]+added[\s\u{2000}-\u{206F}]+[~+]"),
    ("tap_to_see_all", r"Tap to see all"),
];

static BUILTIN: Lazy<SystemRules> = Lazy::new(|| {
    let rules: Vec<SystemRule> = BUILTIN_SYSTEM_RULES
        .iter()
        .map(|&(name, pattern)| SystemRule::new(name, pattern))
        .collect();
    SystemRules::build(rules).expect("built-in system rules are valid")
});

/// A named phrase pattern denoting a system notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRule {
    /// Short identifier, reported by [`SystemRules::matching_rules`].
    pub name: String,
    /// Regular expression (case-insensitive, `regex` crate syntax).
    pub pattern: String,
}

impl SystemRule {
    /// Creates a new rule.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// An ordered, compiled collection of [`SystemRule`]s.
///
/// # Example
///
/// ```rust
/// use chatview::parsing::{SystemRule, SystemRules};
///
/// let rules = SystemRules::builtin()
///     .extended(vec![SystemRule::new("pinned", r"pinned a message")])
///     .unwrap();
///
/// assert!(rules.is_match("Alice created this group"));
/// assert_eq!(rules.matching_rules("Bob pinned a message"), vec!["pinned"]);
/// ```
#[derive(Debug, Clone)]
pub struct SystemRules {
    rules: Vec<SystemRule>,
    set: RegexSet,
}

impl SystemRules {
    /// Returns the built-in rule list.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// A rule list that matches nothing.
    ///
    /// With no rules, only lines lacking a `": "` separator become system
    /// messages.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            set: RegexSet::empty(),
        }
    }

    /// Compiles a rule list from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidPattern`] naming the first rule that
    /// fails to compile.
    pub fn build(rules: Vec<SystemRule>) -> Result<Self> {
        for rule in &rules {
            RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ChatviewError::invalid_pattern(&rule.name, e))?;
        }

        let set = RegexSetBuilder::new(rules.iter().map(|r| r.pattern.as_str()))
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatviewError::invalid_pattern("system rules", e))?;

        Ok(Self { rules, set })
    }

    /// Returns a new list with `extra` appended after the current rules.
    pub fn extended(&self, extra: Vec<SystemRule>) -> Result<Self> {
        if extra.is_empty() {
            return Ok(self.clone());
        }
        let mut rules = self.rules.clone();
        rules.extend(extra);
        Self::build(rules)
    }

    /// Returns `true` if any rule matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Names of every rule matching `text`, in rule order.
    pub fn matching_rules(&self, text: &str) -> Vec<&str> {
        self.set
            .matches(text)
            .into_iter()
            .map(|i| self.rules[i].name.as_str())
            .collect()
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[SystemRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for SystemRules {
    fn default() -> Self {
        Self::builtin()
    }
}
