//! Textile to HTML conversion.
//!
//! Covers the block signatures (`hN.`, `p.`, `bq.`, `bc.`, `*`/`#` lists) and
//! the phrase modifiers blog authors actually use. Blocks are separated by
//! blank lines and joined with a single newline in the output.

pub(crate) fn textile_to_html(source: &str) -> String {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");

    split_blocks(&normalized)
        .iter()
        .map(|lines| render_block(lines))
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_blocks(source: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in source.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn render_block(lines: &[&str]) -> String {
    let first = lines[0];

    if let Some((level, rest)) = heading_signature(first) {
        let body = join_with_breaks(rest, &lines[1..]);
        return format!("<h{level}>{body}</h{level}>");
    }
    if let Some(rest) = first.strip_prefix("p. ") {
        return format!("<p>{}</p>", join_with_breaks(rest, &lines[1..]));
    }
    if let Some(rest) = first.strip_prefix("bq. ") {
        return format!(
            "<blockquote>\n<p>{}</p>\n</blockquote>",
            join_with_breaks(rest, &lines[1..])
        );
    }
    if let Some(rest) = first.strip_prefix("bc. ") {
        let mut code = escape_text(rest);
        for line in &lines[1..] {
            code.push('\n');
            code.push_str(&escape_text(line));
        }
        return format!("<pre><code>{code}</code></pre>");
    }
    if let Some(items) = list_items(lines, "* ") {
        return render_list("ul", &items);
    }
    if let Some(items) = list_items(lines, "# ") {
        return render_list("ol", &items);
    }

    format!("<p>{}</p>", join_with_breaks(first, &lines[1..]))
}

fn heading_signature(line: &str) -> Option<(u8, &str)> {
    let rest = line.strip_prefix('h')?;
    let mut chars = rest.chars();
    let level = chars.next()?.to_digit(10)?;
    if !(1..=6).contains(&level) {
        return None;
    }
    let body = rest[1..].strip_prefix(". ")?;
    Some((level as u8, body))
}

fn list_items<'a>(lines: &[&'a str], marker: &str) -> Option<Vec<&'a str>> {
    lines
        .iter()
        .map(|line| line.strip_prefix(marker))
        .collect()
}

fn render_list(tag: &str, items: &[&str]) -> String {
    let mut html = format!("<{tag}>\n");
    for item in items {
        html.push_str(&format!("\t<li>{}</li>\n", render_inline(item.trim())));
    }
    html.push_str(&format!("</{tag}>"));
    html
}

fn join_with_breaks(first: &str, rest: &[&str]) -> String {
    let mut html = render_inline(first.trim());
    for line in rest {
        html.push_str("<br />\n");
        html.push_str(&render_inline(line.trim()));
    }
    html
}

enum Segment<'a> {
    Text(&'a str),
    Code(&'a str),
    Link { text: &'a str, url: &'a str },
}

fn render_inline(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Text(text) => html.push_str(&apply_phrases(&escape_text(text))),
            Segment::Code(code) => {
                html.push_str("<code>");
                html.push_str(&escape_text(code));
                html.push_str("</code>");
            }
            Segment::Link { text, url } => {
                html.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    escape_attribute(url),
                    apply_phrases(&escape_text(text))
                ));
            }
        }
    }
    html
}

/// Split a line into plain text, `@code@` spans and `"text":url` links.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut parts = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        let matched = if rest.starts_with('@') && opens(text, cursor) {
            code_span(rest).map(|(code, len)| (Segment::Code(code), len))
        } else if rest.starts_with('"') {
            link_span(rest).map(|(text, url, len)| (Segment::Link { text, url }, len))
        } else {
            None
        };

        match matched {
            Some((segment, len)) => {
                if plain_start < cursor {
                    parts.push(Segment::Text(&text[plain_start..cursor]));
                }
                parts.push(segment);
                cursor += len;
                plain_start = cursor;
            }
            None => {
                cursor += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    if plain_start < text.len() {
        parts.push(Segment::Text(&text[plain_start..]));
    }
    parts
}

fn code_span(rest: &str) -> Option<(&str, usize)> {
    let end = rest[1..].find('@')? + 1;
    let code = &rest[1..end];
    (!code.is_empty()).then_some((code, end + 1))
}

fn link_span(rest: &str) -> Option<(&str, &str, usize)> {
    let close = rest[1..].find('"')? + 1;
    let text = &rest[1..close];
    let after = rest[close + 1..].strip_prefix(':')?;
    let url_len = after.find(char::is_whitespace).unwrap_or(after.len());
    let url = after[..url_len].trim_end_matches(['.', ',', ';', '!', '?', ')']);
    if text.is_empty() || url.is_empty() {
        return None;
    }
    Some((text, url, close + 2 + url.len()))
}

fn apply_phrases(text: &str) -> String {
    [
        ('*', "strong"),
        ('_', "em"),
        ('-', "del"),
        ('+', "ins"),
    ]
    .into_iter()
    .fold(text.to_string(), |acc, (delimiter, tag)| {
        apply_phrase(&acc, delimiter, tag)
    })
}

fn apply_phrase(text: &str, delimiter: char, tag: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut html = String::with_capacity(text.len());
    let mut index = 0;

    while index < chars.len() {
        if chars[index] == delimiter && opens_chars(&chars, index) {
            if let Some(end) = closing_delimiter(&chars, index, delimiter) {
                let inner: String = chars[index + 1..end].iter().collect();
                html.push_str(&format!("<{tag}>{inner}</{tag}>"));
                index = end + 1;
                continue;
            }
        }
        html.push(chars[index]);
        index += 1;
    }

    html
}

fn opens(text: &str, byte_index: usize) -> bool {
    let before = text[..byte_index].chars().next_back();
    let after = text[byte_index..].chars().nth(1);
    before.is_none_or(is_boundary) && after.is_some_and(|c| !c.is_whitespace())
}

fn opens_chars(chars: &[char], index: usize) -> bool {
    let before_ok = index == 0 || is_boundary(chars[index - 1]);
    let after_ok = chars
        .get(index + 1)
        .is_some_and(|c| !c.is_whitespace() && *c != chars[index]);
    before_ok && after_ok
}

fn closing_delimiter(chars: &[char], open: usize, delimiter: char) -> Option<usize> {
    (open + 2..chars.len()).find(|&candidate| {
        chars[candidate] == delimiter
            && !chars[candidate - 1].is_whitespace()
            && chars.get(candidate + 1).is_none_or(|c| is_boundary(*c))
    })
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
