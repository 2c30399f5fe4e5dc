//! Configuration for vargs
//!
//! Command line flags are resolved once into an immutable [`Config`]
//! before any tokenizing starts; nothing reads the flags afterwards.

use clap::Parser;

use crate::error::Result;
use crate::message::MessageTemplate;
use crate::tokenizer::{SeparatorSet, DEFAULT_MAX_TOKEN_SIZE};

/// CLI arguments for vargs
#[derive(Parser, Debug, Clone)]
#[command(name = "vargs")]
#[command(version)]
#[command(
    about = "Split stdin into items and send each one to the terminal as an OSC 51 message",
    long_about = None
)]
pub struct CliArgs {
    /// Change separator to NUL character. This is same as "-s nul"
    #[arg(short = '0', long = "null")]
    pub null: bool,

    /// Change separators with these comma-separated values (available values are "space", "tab", "newline", "nul")
    #[arg(short, long, value_name = "SEPARATORS", default_value = "newline")]
    pub separators: String,

    /// If this replacement string was given, replace arguments by this with each item
    #[arg(short = 'I', long = "replace", value_name = "REPLSTR")]
    pub replace: Option<String>,

    /// Largest item accepted, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_TOKEN_SIZE)]
    pub max_item_size: usize,

    /// Command and arguments each item is sent with (default: drop)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    separators: SeparatorSet,
    template: MessageTemplate,
    max_token_size: usize,
}

impl Config {
    pub fn new(separators: SeparatorSet, template: MessageTemplate) -> Self {
        Self {
            separators,
            template,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }

    pub fn with_max_token_size(mut self, size: usize) -> Self {
        self.max_token_size = size;
        self
    }

    /// Resolve command line arguments, failing on unknown separator names
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let separators = if args.null {
            SeparatorSet::nul()
        } else {
            SeparatorSet::parse(&args.separators)?
        };
        let template = MessageTemplate::new(args.args, args.replace);

        Ok(Self::new(separators, template).with_max_token_size(args.max_item_size))
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn max_token_size(&self) -> usize {
        self.max_token_size
    }

    /// Warning to show when the marker appears in no template slot
    pub fn missing_marker_warning(&self) -> Option<String> {
        if !self.template.missing_marker() {
            return None;
        }
        self.template.marker().map(|marker| {
            format!(
                "warning: -I {0} option was specified but no {0} in arguments",
                marker
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(argv: &[&str]) -> Config {
        let args = CliArgs::try_parse_from(argv.iter().copied()).unwrap();
        Config::from_args(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["vargs"]);
        assert_eq!(config.separators(), &SeparatorSet::default());
        assert_eq!(config.template().args(), &["drop"]);
        assert_eq!(config.template().marker(), None);
        assert_eq!(config.max_token_size(), DEFAULT_MAX_TOKEN_SIZE);
        assert!(config.missing_marker_warning().is_none());
    }

    #[test]
    fn test_separator_flag() {
        let config = parse(&["vargs", "-s", "space,tab"]);
        assert_eq!(config.separators().chars(), &[' ', '\t']);
    }

    #[test]
    fn test_null_flag_overrides_separators() {
        let config = parse(&["vargs", "-s", "space", "-0"]);
        assert_eq!(config.separators(), &SeparatorSet::nul());
    }

    #[test]
    fn test_unknown_separator() {
        let args = CliArgs::try_parse_from(["vargs", "-s", "space,semicolon"]).unwrap();
        assert!(matches!(
            Config::from_args(args),
            Err(Error::UnknownSeparator(name)) if name == "semicolon"
        ));
    }

    #[test]
    fn test_template_args_keep_hyphens() {
        let config = parse(&["vargs", "-I", "{}", "echo", "-n", "{}"]);
        assert_eq!(config.template().args(), &["echo", "-n", "{}"]);
        assert_eq!(config.template().marker(), Some("{}"));
    }

    #[test]
    fn test_default_template_with_marker() {
        let config = parse(&["vargs", "-I", "%"]);
        assert_eq!(config.template().args(), &["drop", "%"]);
        assert!(config.missing_marker_warning().is_none());
    }

    #[test]
    fn test_missing_marker_warning() {
        let config = parse(&["vargs", "-I", "{}", "echo", "x"]);
        assert_eq!(
            config.missing_marker_warning().unwrap(),
            "warning: -I {} option was specified but no {} in arguments"
        );
    }

    #[test]
    fn test_max_item_size() {
        let config = parse(&["vargs", "--max-item-size", "16"]);
        assert_eq!(config.max_token_size(), 16);
    }
}
