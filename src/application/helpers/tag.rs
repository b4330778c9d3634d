//! Blog wrapper elements carrying `blog_<type>_<tag>` classes.

use thiserror::Error;

use crate::domain::types::BlogTagType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("invalid tag name `{0}`")]
    InvalidTagName(String),
    #[error("invalid attribute name `{0}`")]
    InvalidAttributeName(String),
    #[error("unknown blog tag type `{0}` (expected post, comment or status)")]
    UnknownType(String),
}

/// Attributes for [`blog_tag`].
///
/// `type` and `class` are reserved: the type only selects the generated class
/// and is never emitted, and a caller class is merged in front of the
/// generated one. Everything else is emitted in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    kind: BlogTagType,
    /// Unrecognised `type` given through [`attr`](Self::attr), reported by [`blog_tag`].
    unknown_type: Option<String>,
    class: Option<String>,
    attributes: Vec<(String, String)>,
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from ordered key/value pairs, consuming the reserved keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::default(), |options, (key, value)| {
                let key = key.into();
                let value = value.into();
                match key.as_str() {
                    "type" => options.with_type_name(&value),
                    "class" => Ok(options.class(value)),
                    _ => Ok(options.attr(key, value)),
                }
            })
    }

    pub fn kind(mut self, kind: BlogTagType) -> Self {
        self.kind = kind;
        self.unknown_type = None;
        self
    }

    pub fn with_type_name(self, name: &str) -> Result<Self, TagError> {
        let kind =
            BlogTagType::try_from(name).map_err(|_| TagError::UnknownType(name.to_string()))?;
        Ok(self.kind(kind))
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Add an attribute; setting the same name again replaces the value in place.
    /// `class` is routed to [`class`](Self::class) and `type` selects the kind.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "class" => return self.class(value),
            "type" => {
                return match BlogTagType::try_from(value.as_str()) {
                    Ok(kind) => self.kind(kind),
                    Err(()) => {
                        self.unknown_type = Some(value);
                        self
                    }
                };
            }
            _ => {}
        }
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }
}

/// Render `<tag_name class="..." ...>content</tag_name>`.
///
/// Attribute values are escaped; `content` is inserted as-is since it is
/// usually markup produced by another helper.
pub fn blog_tag(tag_name: &str, content: &str, options: &TagOptions) -> Result<String, TagError> {
    if !is_valid_name(tag_name) {
        return Err(TagError::InvalidTagName(tag_name.to_string()));
    }
    if let Some(kind) = &options.unknown_type {
        return Err(TagError::UnknownType(kind.clone()));
    }
    if let Some((name, _)) = options.attributes.iter().find(|(name, _)| !is_valid_name(name)) {
        return Err(TagError::InvalidAttributeName(name.clone()));
    }

    let generated = format!("blog_{}_{}", options.kind, tag_name);
    let class = match options.class.as_deref().map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{extra} {generated}"),
        _ => generated,
    };

    let mut html = format!("<{tag_name} class=\"{}\"", escape_attribute(&class));
    for (name, value) in &options.attributes {
        html.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
    }
    html.push_str(&format!(">{content}</{tag_name}>"));

    Ok(html)
}

/// Wrap the markup produced by `content` in the fixed actions container.
pub fn actions<F, S>(content: F) -> String
where
    F: FnOnce() -> S,
    S: AsRef<str>,
{
    format!("<div class=\"actions\">{}</div>", content().as_ref())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}
