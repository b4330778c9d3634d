mod config;
mod highlight;
mod rewrite;
mod textile;

use std::sync::Arc;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::Lazy;
use syntect::{dumps::from_uncompressed_data, html::ClassStyle, parsing::SyntaxSet};
use tracing::trace;

use crate::application::render::types::{
    RenderError, RenderOutput, RenderRequest, RenderService,
};
use crate::domain::types::Parser;

use config::{build_sanitizer, default_options};
use rewrite::rewrite_ast;

pub use highlight::HIGHLIGHT_CSS;

/// Default rendering pipeline: Comrak for markdown, the built-in Textile
/// converter, Syntect highlighting and optional Ammonia sanitisation.
pub struct MarkupRenderService {
    options: comrak::Options<'static>,
    syntax_set: SyntaxSet,
    class_style: ClassStyle,
    sanitizer: ammonia::Builder<'static>,
}

impl MarkupRenderService {
    fn new() -> Self {
        Self {
            options: default_options(),
            syntax_set: bundled_syntax_set(),
            class_style: ClassStyle::SpacedPrefixed { prefix: "syntax-" },
            sanitizer: build_sanitizer(),
        }
    }
}

pub(crate) fn bundled_syntax_set() -> SyntaxSet {
    let syntax_bytes = include_bytes!(env!("SYNTAX_PACK_FILE"));
    from_uncompressed_data(syntax_bytes).expect("syntax pack must be valid")
}

static RENDER_SERVICE: Lazy<Arc<MarkupRenderService>> =
    Lazy::new(|| Arc::new(MarkupRenderService::new()));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<MarkupRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for MarkupRenderService {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderService for MarkupRenderService {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        trace!(
            target = "application::render",
            parser = %request.parser,
            bytes = request.source.len(),
            "rendering content"
        );

        let output = match request.parser {
            Parser::Html => return Ok(RenderOutput::plain(request.source.clone())),
            Parser::Textile => RenderOutput::plain(textile::textile_to_html(&request.source)),
            Parser::Markdown => self.render_markdown(request)?,
        };

        Ok(sanitize_stage(output, request, &self.sanitizer))
    }
}

impl MarkupRenderService {
    fn render_markdown(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &request.source, &self.options);

        let contains_code = if request.options.highlight_code_syntax {
            rewrite_ast(root, &self.syntax_set, &self.class_style)?.contains_code
        } else {
            false
        };

        let html = render_html_stage(root, &self.options)?;
        Ok(RenderOutput {
            html,
            contains_code,
        })
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

fn sanitize_stage(
    output: RenderOutput,
    request: &RenderRequest,
    sanitizer: &ammonia::Builder<'static>,
) -> RenderOutput {
    if !request.options.sanitize_output {
        return output;
    }
    RenderOutput {
        html: sanitizer.clean(&output.html).to_string(),
        ..output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::types::RenderOptions;

    fn render(parser: Parser, source: &str, options: RenderOptions) -> RenderOutput {
        render_service()
            .render(&RenderRequest::new(parser, source).with_options(options))
            .expect("render succeeds")
    }

    #[test]
    fn html_is_returned_verbatim_even_when_sanitizing() {
        let source = "<script>alert(1)</script><p>hi</p>";
        let output = render(
            Parser::Html,
            source,
            RenderOptions {
                highlight_code_syntax: true,
                sanitize_output: true,
            },
        );
        assert_eq!(output.html, source);
        assert!(!output.contains_code);
    }

    #[test]
    fn markdown_passes_raw_html_unless_sanitizing() {
        let source = "Hi <span onclick=\"x()\">there</span>";
        let raw = render(Parser::Markdown, source, RenderOptions::default());
        assert!(raw.html.contains("onclick"));

        let clean = render(
            Parser::Markdown,
            source,
            RenderOptions {
                highlight_code_syntax: true,
                sanitize_output: true,
            },
        );
        assert!(!clean.html.contains("onclick"));
        assert!(clean.html.contains("<span>there</span>"));
    }

    #[test]
    fn highlighting_can_be_disabled() {
        let source = "```rust\nfn main() {}\n```";
        let highlighted = render(Parser::Markdown, source, RenderOptions::default());
        assert!(highlighted.contains_code);
        assert!(highlighted.html.contains("syntax-highlight"));

        let plain = render(
            Parser::Markdown,
            source,
            RenderOptions {
                highlight_code_syntax: false,
                sanitize_output: false,
            },
        );
        assert!(!plain.contains_code);
        assert!(plain.html.contains("<pre lang=\"rust\"><code>fn main() {}"));
    }

    #[test]
    fn textile_output_is_sanitized_on_request() {
        let output = render(
            Parser::Textile,
            "\"click\":javascript:alert(1)",
            RenderOptions {
                highlight_code_syntax: true,
                sanitize_output: true,
            },
        );
        assert!(!output.html.contains("javascript:"));
    }
}
