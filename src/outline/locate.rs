//! Find the documentation comment directly above a declaration

/// Opening delimiter of a documentation block comment
pub(crate) const DOC_OPEN: &str = "/**";
/// Closing delimiter of a block comment
pub(crate) const BLOCK_CLOSE: &str = "*/";

/// Empty block comment; not a documentation opener
const EMPTY_BLOCK: &str = "/**/";
const LINE_COMMENT: &str = "//";
const CONTINUATION: char = '*';

/// Return the documentation comment preceding `symbol_line`, if any.
///
/// Scans upward from the line above the symbol. Blank lines and `//` lines
/// are skipped, block comment lines (leading `*` or `*/`) are skipped until a
/// `/**` opener is found. Any other content, including an empty `/**/`,
/// means the declaration is undocumented. The returned text spans from the opener down to the line
/// above the symbol, each line trimmed, joined with `\n`.
pub fn locate(source_lines: &[&str], symbol_line: usize) -> Option<String> {
    let end = symbol_line.min(source_lines.len());

    for i in (0..end).rev() {
        let text = source_lines[i].trim();

        if text.starts_with(DOC_OPEN) && !text.starts_with(EMPTY_BLOCK) {
            let span: Vec<&str> = source_lines[i..end].iter().map(|l| l.trim()).collect();
            return Some(span.join("\n"));
        }

        if text.is_empty() || text.starts_with(LINE_COMMENT) {
            continue;
        }

        // `*/` also starts with `*`
        if text.starts_with(CONTINUATION) {
            continue;
        }

        return None;
    }

    None
}
