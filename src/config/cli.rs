use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the blogkit binary.
#[derive(Debug, Parser)]
#[command(name = "blogkit", version, about = "Blog content formatting helpers")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGKIT_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Format stored content into HTML using the configured parser.
    Render(RenderArgs),
    /// Print a blog wrapper element.
    Tag(TagArgs),
    /// Print the stylesheet matching highlighted code blocks.
    Stylesheet,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the parser used for stored content (markdown|textile|html).
    #[arg(long = "parser", value_name = "PARSER")]
    pub default_parser: Option<String>,

    /// Toggle syntax highlighting of fenced code blocks.
    #[arg(
        long = "highlight",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub highlight_code_syntax: Option<bool>,

    /// Toggle sanitisation of converter output.
    #[arg(
        long = "sanitize",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub sanitize_output: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// File to render; standard input when omitted.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TagArgs {
    /// Element name, e.g. `div` or `li`.
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// Inner markup of the element.
    #[arg(value_name = "CONTENT", default_value = "")]
    pub content: String,

    /// Blog element type (post|comment|status).
    #[arg(long = "type", value_name = "TYPE", default_value = "post")]
    pub kind: String,

    /// Extra CSS classes placed before the generated class.
    #[arg(long = "class", value_name = "CLASS")]
    pub class: Option<String>,

    /// Additional attribute as `name=value`; may be repeated.
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))
}
