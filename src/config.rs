//! Configuration types for parsing, rendering and input collection.
//!
//! Plain builder-style structs without CLI framework dependencies, so they
//! can be stored as JSON/TOML by embedding applications.
//!
//! - [`ParserConfig`] - who "me" is, extra system-notice rules
//! - [`RenderConfig`] - clock style, date separators, theme
//! - [`BundleConfig`] - which files count as transcript and images
//!
//! # Example
//!
//! ```rust
//! use chatview::config::ParserConfig;
//! use chatview::parser::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_self_identifier("Adisu")
//!     .with_system_rule("pinned", r"pinned a message");
//!
//! let parser = TranscriptParser::with_config(config)?;
//! let messages = parser.parse_str("3/14/24, 9:05 PM - adisu: hi");
//! assert!(messages[0].is_me);
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::SystemRule;

/// Configuration for the transcript parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Sender names that represent the viewing user (case-insensitive).
    ///
    /// Default: `You`, `Me`.
    pub self_identifiers: Vec<String>,

    /// Use the built-in system-notice rules (default: true)
    pub builtin_system_rules: bool,

    /// Additional system-notice rules, tried after the built-in ones.
    pub extra_system_rules: Vec<SystemRule>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            self_identifiers: vec!["You".to_string(), "Me".to_string()],
            builtin_system_rules: true,
            extra_system_rules: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a self identifier.
    #[must_use]
    pub fn with_self_identifier(mut self, name: impl Into<String>) -> Self {
        self.self_identifiers.push(name.into());
        self
    }

    /// Replaces the self identifiers.
    #[must_use]
    pub fn with_self_identifiers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_identifiers = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables the built-in system rules.
    #[must_use]
    pub fn with_builtin_system_rules(mut self, enabled: bool) -> Self {
        self.builtin_system_rules = enabled;
        self
    }

    /// Appends a system-notice rule.
    #[must_use]
    pub fn with_system_rule(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.extra_system_rules.push(SystemRule::new(name, pattern));
        self
    }

    /// Returns `true` if `sender` is one of the self identifiers.
    pub fn is_self(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        self.self_identifiers
            .iter()
            .any(|id| id.to_lowercase() == sender)
    }
}

/// Color scheme of the HTML view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the lowercase theme name.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: '{}'. Expected one of: light, dark", s)),
        }
    }
}

/// Display settings, read at render time only.
///
/// # Example
///
/// ```rust
/// use chatview::config::{RenderConfig, Theme};
///
/// let config = RenderConfig::new()
///     .with_24_hour(true)
///     .with_dates(false)
///     .with_theme(Theme::Dark);
/// assert!(config.use_24_hour);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Show times as `21:05` instead of `9:05 PM` (default: false)
    pub use_24_hour: bool,

    /// Insert a separator whenever the date changes (default: true)
    pub show_dates: bool,

    /// HTML color scheme (default: light)
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_24_hour: false,
            show_dates: true,
            theme: Theme::Light,
        }
    }
}

impl RenderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses between 24-hour and 12-hour time display.
    #[must_use]
    pub fn with_24_hour(mut self, enabled: bool) -> Self {
        self.use_24_hour = enabled;
        self
    }

    /// Enables or disables date separators.
    #[must_use]
    pub fn with_dates(mut self, enabled: bool) -> Self {
        self.show_dates = enabled;
        self
    }

    /// Sets the HTML theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Rules for picking files out of an exported chat folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Extension of the transcript file, matched case-sensitively (default: `txt`)
    pub transcript_extension: String,

    /// Raster image extensions accepted even without an image MIME type
    /// (case-insensitive).
    pub image_extensions: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            transcript_extension: "txt".to_string(),
            image_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl BundleConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transcript extension (without dot).
    #[must_use]
    pub fn with_transcript_extension(mut self, ext: impl Into<String>) -> Self {
        self.transcript_extension = ext.into();
        self
    }

    /// Adds an accepted image extension (without dot).
    #[must_use]
    pub fn with_image_extension(mut self, ext: impl Into<String>) -> Self {
        self.image_extensions.push(ext.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_defaults() {
        let config = ParserConfig::new();
        assert!(config.builtin_system_rules);
        assert!(config.extra_system_rules.is_empty());
        assert!(config.is_self("You"));
        assert!(config.is_self("me"));
        assert!(!config.is_self("Alice"));
    }

    #[test]
    fn test_self_identifiers_case_insensitive_exact() {
        let config = ParserConfig::new().with_self_identifiers(["Adisu"]);
        assert!(config.is_self("adisu"));
        assert!(config.is_self("ADISU"));
        assert!(!config.is_self("Adisu B"));
        assert!(!config.is_self("You"));
    }

    #[test]
    fn test_parser_config_serde() {
        let config = ParserConfig::new().with_system_rule("pinned", "pinned a message");
        let json = serde_json::to_string(&config).unwrap();
        let back: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_24_hour(true)
            .with_dates(false)
            .with_theme(Theme::Dark);
        assert!(config.use_24_hour);
        assert!(!config.show_dates);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_bundle_config_defaults() {
        let config = BundleConfig::new().with_image_extension("heic");
        assert_eq!(config.transcript_extension, "txt");
        assert!(config.image_extensions.contains(&"webp".to_string()));
        assert!(config.image_extensions.contains(&"heic".to_string()));
    }
}
