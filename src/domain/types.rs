//! Shared domain enumerations used by the blog helpers.

use std::{fmt, str::FromStr};

use super::error::ConfigurationError;

/// Markup language stored content is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Parser {
    #[default]
    Markdown,
    Textile,
    Html,
}

impl Parser {
    pub const ALL: [Parser; 3] = [Parser::Markdown, Parser::Textile, Parser::Html];

    pub fn as_str(self) -> &'static str {
        match self {
            Parser::Markdown => "markdown",
            Parser::Textile => "textile",
            Parser::Html => "html",
        }
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parser {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Parser::ALL
            .into_iter()
            .find(|parser| parser.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::unsupported_parser(value))
    }
}

/// Semantic flavour of a blog element; drives the `blog_<type>_<tag>` class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlogTagType {
    #[default]
    Post,
    Comment,
    Status,
}

impl BlogTagType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlogTagType::Post => "post",
            BlogTagType::Comment => "comment",
            BlogTagType::Status => "status",
        }
    }
}

impl fmt::Display for BlogTagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BlogTagType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "post" => Ok(BlogTagType::Post),
            "comment" => Ok(BlogTagType::Comment),
            "status" => Ok(BlogTagType::Status),
            _ => Err(()),
        }
    }
}
