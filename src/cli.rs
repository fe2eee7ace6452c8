//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! [`Args`] also knows how to turn itself into the library configuration
//! types, so the binary stays a thin driver.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ParserConfig, RenderConfig, Theme};
use crate::core::{FilterConfig, OutputConfig};
use crate::error::Result;
use crate::message::MessageKind;

/// Default output file name; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "chat.html";

/// Turn an exported WhatsApp chat (the .txt transcript plus its media)
/// into a readable chat view or a structured export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatview \"WhatsApp Chat with Alice\"
    chatview _chat.txt IMG-0001.jpg -o alice.html --theme dark
    chatview export/ --me Bob --24h -f text
    chatview export/ --after 2024-01-01 --no-system -f csv -t")]
pub struct Args {
    /// Transcript files, media files and/or export folders
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format (detected from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Name that identifies you in the transcript (repeatable)
    #[arg(long = "me", value_name = "NAME")]
    pub me: Vec<String>,

    /// Show times on a 24-hour clock
    #[arg(long = "24h")]
    pub twenty_four_hour: bool,

    /// Hide date separators
    #[arg(long)]
    pub no_dates: bool,

    /// Color scheme of the HTML view
    #[arg(long, default_value = "light")]
    pub theme: Theme,

    /// Filter messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Filter messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Filter messages from specific sender
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Only keep these message kinds (repeatable: system, user, image, document, call)
    #[arg(long = "only", value_name = "KIND")]
    pub only: Vec<MessageKind>,

    /// Drop system notices
    #[arg(long)]
    pub no_system: bool,

    /// Include timestamps in structured output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Read the transcript line by line instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Log parser diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the parser configuration from `--me`.
    pub fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::new();
        if self.me.is_empty() {
            config
        } else {
            config.with_self_identifiers(self.me.iter().cloned())
        }
    }

    /// Builds display settings from `--24h`, `--no-dates` and `--theme`.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_24_hour(self.twenty_four_hour)
            .with_dates(!self.no_dates)
            .with_theme(self.theme)
    }

    /// Builds the message filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `--after` or `--before` is not `YYYY-MM-DD`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        if self.no_system {
            filter = filter.without_system();
        }
        if !self.only.is_empty() {
            filter = filter.with_kinds(self.only.iter().copied());
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::new().with_render(self.render_config());
        if self.timestamps {
            config.with_timestamps()
        } else {
            config
        }
    }

    /// Resolves the output format and path.
    ///
    /// An explicit `--format` wins and renames the default output to match.
    /// Otherwise the format is detected from the output extension, falling
    /// back to HTML.
    pub fn resolve_output(&self) -> (crate::format::OutputFormat, String) {
        match self.format {
            Some(format) => {
                let format: crate::format::OutputFormat = format.into();
                (format, adjust_output_extension(&self.output, format))
            }
            None => {
                let format = crate::format::OutputFormat::from_path(&self.output).unwrap_or_default();
                (format, self.output.clone())
            }
        }
    }
}

/// Adjusts the output file extension to the format if using the default output.
pub fn adjust_output_extension(output: &str, format: crate::format::OutputFormat) -> String {
    if output != DEFAULT_OUTPUT {
        return output.to_string();
    }
    Path::new(DEFAULT_OUTPUT)
        .with_extension(format.extension())
        .to_string_lossy()
        .into_owned()
}

/// Output format options.
///
/// - [`Html`](OutputFormat::Html) - Self-contained chat page (default)
/// - [`Text`](OutputFormat::Text) - Plain-text transcript view
/// - [`Json`](OutputFormat::Json) - Structured array, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON per line
/// - [`Csv`](OutputFormat::Csv) - Semicolon-delimited table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    #[value(alias = "txt")]
    Text,
    Json,
    #[value(alias = "ndjson")]
    Jsonl,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| {
            format!(
                "Unknown format: '{}'. Expected one of: html, text, json, jsonl, csv",
                s
            )
        })
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Html => crate::format::OutputFormat::Html,
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat as LibFormat;

    fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatview").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse_args(&["export"]);
        assert_eq!(args.inputs, vec![PathBuf::from("export")]);
        assert_eq!(args.output, DEFAULT_OUTPUT);
        assert_eq!(args.resolve_output(), (LibFormat::Html, "chat.html".to_string()));
        assert_eq!(args.theme, Theme::Light);
        assert!(!args.filter_config().unwrap().is_active());
    }

    #[test]
    fn test_inputs_required() {
        assert!(Args::try_parse_from(["chatview"]).is_err());
    }

    #[test]
    fn test_explicit_format_renames_default_output() {
        let args = parse_args(&["export", "-f", "csv"]);
        assert_eq!(args.resolve_output(), (LibFormat::Csv, "chat.csv".to_string()));

        let args = args_with_output();
        assert_eq!(args.resolve_output(), (LibFormat::Text, "mine.log".to_string()));
    }

    fn args_with_output() -> Args {
        parse_args(&["export", "-o", "mine.log", "--format", "txt"])
    }

    #[test]
    fn test_format_detected_from_output() {
        let args = parse_args(&["export", "-o", "out.jsonl"]);
        assert_eq!(args.resolve_output(), (LibFormat::Jsonl, "out.jsonl".to_string()));

        let args = parse_args(&["export", "-o", "out.unknown"]);
        assert_eq!(args.resolve_output().0, LibFormat::Html);
    }

    #[test]
    fn test_me_overrides_defaults() {
        let config = parse_args(&["x", "--me", "Bob", "--me", "Robert"]).parser_config();
        assert!(config.is_self("bob"));
        assert!(config.is_self("Robert"));
        assert!(!config.is_self("You"));

        assert!(parse_args(&["x"]).parser_config().is_self("You"));
    }

    #[test]
    fn test_render_flags() {
        let render = parse_args(&["x", "--24h", "--no-dates", "--theme", "dark"]).render_config();
        assert!(render.use_24_hour);
        assert!(!render.show_dates);
        assert_eq!(render.theme, Theme::Dark);
    }

    #[test]
    fn test_filter_flags() {
        let filter = parse_args(&["x", "--after", "2024-01-01", "--no-system", "--only", "image", "--only", "call"])
            .filter_config()
            .unwrap();
        assert!(filter.after.is_some());
        assert!(filter.skip_system);
        assert_eq!(filter.kinds, vec![MessageKind::Image, MessageKind::Call]);

        let err = parse_args(&["x", "--before", "01/02/2024"]).filter_config().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_output_config() {
        let config = parse_args(&["x", "-t", "--24h"]).output_config();
        assert!(config.include_timestamps);
        assert!(config.render.use_24_hour);
    }

    #[test]
    fn test_format_conversion_and_display() {
        assert_eq!(LibFormat::from(OutputFormat::Text), LibFormat::Text);
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!("NDJSON".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
