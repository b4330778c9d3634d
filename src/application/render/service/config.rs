use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::{ListStyleType, Options};

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Markup emitted by the Markdown and Textile converters and the highlighter.
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "blockquote", "br", "code", "del", "div", "em", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "img", "input", "ins", "li", "ol", "p", "pre", "section", "span", "strong", "sub",
    "sup", "table", "tbody", "td", "th", "thead", "tr", "ul",
];

const GENERIC_ATTRIBUTES: &[&str] = &[
    "class", "id", "title", "lang", "dir", "aria-hidden", "aria-label", "role",
    "data-footnote-ref", "data-footnotes", "data-footnote-backref",
];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("img", &["title", "width", "height", "alt"]),
    ("code", &["data-meta", "data-language"]),
    ("pre", &["data-language"]),
    ("th", &["align", "colspan", "rowspan", "scope"]),
    ("td", &["align", "colspan", "rowspan"]),
    ("input", &["type", "checked", "disabled"]),
];

/// Sanitiser applied to converter output when `sanitize_output` is enabled.
pub(crate) fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();
    builder.tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>());
    builder.generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect::<HashSet<_>>());

    for (tag, attributes) in TAG_ATTRIBUTES {
        builder.add_tag_attributes(*tag, *attributes);
    }

    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.tasklist_classes = true;
    render.list_style = ListStyleType::Dash;
    // Stored posts may embed raw HTML; the author is trusted.
    render.r#unsafe = true;
    render.sourcepos = false;
}
