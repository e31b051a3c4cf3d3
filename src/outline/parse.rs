//! Split a documentation comment into summary and tag lines

use super::locate::{BLOCK_CLOSE, DOC_OPEN};

const TAG_MARKER: char = '@';

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// First non-empty line that is not a tag
    pub summary: String,
    /// Tag lines (`@param ...`, `@returns ...`) joined with `\n`
    pub tag_block: String,
}

impl DocComment {
    /// Iterate the individual tag lines
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag_block.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.tag_block.is_empty()
    }
}

/// Parse raw comment text as returned by [`super::locate`].
///
/// Tags are not validated; any line starting with `@` is kept verbatim.
pub fn parse(raw: &str) -> DocComment {
    let body = comment_body(raw.trim());

    let mut summary: Option<&str> = None;
    let mut tags: Vec<&str> = Vec::new();

    for line in body.lines().map(strip_decoration) {
        if line.starts_with(TAG_MARKER) {
            tags.push(line);
        } else if summary.is_none() && !line.is_empty() {
            summary = Some(line);
        }
    }

    DocComment {
        summary: summary.unwrap_or_default().to_string(),
        tag_block: tags.join("\n"),
    }
}

/// Text between the `/**` opener and the first `*/` closer
fn comment_body(text: &str) -> &str {
    // `/**/` is an empty block, not an opener followed by `/`
    if text.starts_with("/**/") {
        return "";
    }
    let inner = text.strip_prefix(DOC_OPEN).unwrap_or(text);
    match inner.find(BLOCK_CLOSE) {
        Some(end) => &inner[..end],
        None => inner,
    }
}

/// Drop the leading `*` (and one following space) of a comment line
fn strip_decoration(line: &str) -> &str {
    let line = line.trim_start();
    let line = match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    };
    line.trim()
}
