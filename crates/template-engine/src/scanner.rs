//! Markup-aware placeholder scanning
//!
//! Templates come out of a rich-text editor, so a placeholder's inner text
//! may be wrapped in formatting tags (`{{<a href="#">tenant.name</a>}}`).
//! The scanner tokenizes tags and comments first and only looks for `{{`
//! and `}}` in text content. Markup inside a token is dropped from its path;
//! delimiters inside tag attributes never count.

use std::ops::Range;

/// A `{{ ... }}` token found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole token, delimiters included
    pub span: Range<usize>,
    /// Dotted path with inner markup removed and surrounding whitespace trimmed
    pub path: String,
}

impl Placeholder {
    /// The token exactly as it appears in `source`
    pub fn raw<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Find every placeholder token in `html`, in document order.
///
/// A token opens at the leftmost `{{` and closes at the first `}}` after
/// it. A second `{{` before the close belongs to the captured path, so
/// `{{ {{a}}` is one token with path `{{a`.
pub fn scan_placeholders(html: &str) -> Vec<Placeholder> {
    let text = text_chars(html);
    let mut found = Vec::new();
    // (byte offset of the opening `{{`, index of the first captured char)
    let mut open: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < text.len() {
        let (pos, c) = text[i];
        // Delimiters must be adjacent in the source, not just in the text
        let next = text
            .get(i + 1)
            .filter(|(next_pos, _)| *next_pos == pos + 1)
            .map(|(_, ch)| *ch);

        match (c, next, open) {
            ('{', Some('{'), None) => {
                open = Some((pos, i + 2));
                i += 2;
                continue;
            }
            // Inside an open token a further `{{` is just captured text
            ('{', Some('{'), Some(_)) => {
                i += 2;
                continue;
            }
            ('}', Some('}'), Some((start, from))) => {
                let path: String = text[from..i].iter().map(|(_, ch)| *ch).collect();
                found.push(Placeholder {
                    span: start..pos + 2,
                    path: path.trim().to_string(),
                });
                open = None;
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    found
}

/// Characters of `html` that are text content, paired with their byte offsets
fn text_chars(html: &str) -> Vec<(usize, char)> {
    let markup = markup_ranges(html);
    let mut ranges = markup.iter().peekable();

    html.char_indices()
        .filter(|(pos, _)| {
            while let Some(range) = ranges.peek() {
                if *pos >= range.end {
                    ranges.next();
                } else {
                    return *pos < range.start;
                }
            }
            true
        })
        .collect()
}

/// Byte ranges of tags, comments and declarations in `html`
fn markup_ranges(html: &str) -> Vec<Range<usize>> {
    let bytes = html.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if html[i..].starts_with("<!--") {
                let end = html[i + 4..]
                    .find("-->")
                    .map(|offset| i + 4 + offset + 3)
                    .unwrap_or(bytes.len());
                ranges.push(i..end);
                i = end;
                continue;
            }
            if opens_tag(bytes, i) {
                if let Some(end) = tag_end(bytes, i) {
                    ranges.push(i..end);
                    i = end;
                    continue;
                }
            }
        }
        i += 1;
    }

    ranges
}

/// A `<` only starts markup when followed by a name, `/`, `!` or `?`
fn opens_tag(bytes: &[u8], at: usize) -> bool {
    match bytes.get(at + 1) {
        Some(c) => c.is_ascii_alphabetic() || matches!(c, b'/' | b'!' | b'?'),
        None => false,
    }
}

/// Offset just past the `>` closing the tag at `start`, skipping quoted
/// attribute values. `None` when the tag never closes.
fn tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;

    for (offset, &b) in bytes[start + 1..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(start + 1 + offset + 1),
            None => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(html: &str) -> Vec<String> {
        scan_placeholders(html).into_iter().map(|p| p.path).collect()
    }

    #[test]
    fn test_finds_plain_placeholders() {
        let html = "<p>Locador: {{landlord.name}}, CPF {{ landlord.cpf }}</p>";
        assert_eq!(paths(html), vec!["landlord.name", "landlord.cpf"]);
    }

    #[test]
    fn test_span_covers_delimiters() {
        let html = "Olá {{ tenant.name }}!";
        let found = scan_placeholders(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw(html), "{{ tenant.name }}");
    }

    #[test]
    fn test_strips_markup_inside_token() {
        let html = r##"{{<a href="#">tenant.name</a>}}"##;
        let found = scan_placeholders(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "tenant.name");
        assert_eq!(found[0].span, 0..html.len());
    }

    #[test]
    fn test_nested_formatting_inside_token() {
        let html = "{{ <strong><em>property.address</em>.city</strong> }}";
        assert_eq!(paths(html), vec!["property.address.city"]);
    }

    #[test]
    fn test_ignores_delimiters_inside_attributes() {
        let html = r#"<span data-x="{{not.this}}">{{but.this}}</span>"#;
        assert_eq!(paths(html), vec!["but.this"]);
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let html = r#"<a title="a > b">{{x}}</a>"#;
        assert_eq!(paths(html), vec!["x"]);
    }

    #[test]
    fn test_comments_are_markup() {
        let html = "<!-- {{hidden}} -->{{shown}}";
        assert_eq!(paths(html), vec!["shown"]);
    }

    #[test]
    fn test_lone_less_than_is_text() {
        let html = "valor < 10 e {{a}}";
        assert_eq!(paths(html), vec!["a"]);
    }

    #[test]
    fn test_unclosed_tag_is_text() {
        let html = "{{a}} <b";
        assert_eq!(paths(html), vec!["a"]);
    }

    #[test]
    fn test_delimiters_split_by_markup_do_not_count() {
        let html = "{<b>{a}</b>}";
        assert!(scan_placeholders(html).is_empty());
    }

    #[test]
    fn test_leftmost_opening_wins() {
        let html = "{{ {{a}}";
        let found = scan_placeholders(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw(html), html);
        assert_eq!(found[0].path, "{{a");
    }

    #[test]
    fn test_first_close_wins() {
        let html = "{{a}}}";
        let found = scan_placeholders(html);
        assert_eq!(found[0].raw(html), "{{a}}");
    }

    #[test]
    fn test_unterminated_token_is_ignored() {
        assert!(scan_placeholders("{{tenant.name").is_empty());
        assert!(scan_placeholders("}} {{").is_empty());
    }

    #[test]
    fn test_multibyte_text_offsets() {
        let html = "Cláusula ção: {{imóvel.endereço}} fim";
        let found = scan_placeholders(html);
        assert_eq!(found[0].path, "imóvel.endereço");
        assert_eq!(found[0].raw(html), "{{imóvel.endereço}}");
    }

    #[test]
    fn test_empty_token() {
        let found = scan_placeholders("{{}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "");
    }
}
