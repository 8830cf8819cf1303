/*!
 * Front matter splitting and re-assembly for Jekyll-style pages.
 *
 * A page may start with a metadata block delimited by `---` lines:
 *
 * ```text
 * ---
 * layout: default
 * lang: en
 * ---
 * <p>Hello</p>
 * ```
 *
 * The block is only recognized when the opening delimiter is the very first
 * line. The scan stops at the first closing delimiter, so `---` lines further
 * down in the body are left alone. The delimiter lines are kept as found, so
 * CRLF pages come back out with CRLF delimiters.
 */

/// Marker line opening and closing a metadata block
pub const DELIMITER: &str = "---";

/// A page split into its optional metadata block and its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    /// Raw metadata lines between the delimiters, each with its line ending.
    /// `None` when the page has no recognizable metadata block.
    pub metadata: Option<String>,

    /// Everything after the closing delimiter, or the whole page
    pub body: String,

    // @field: Opening delimiter line as found, empty without metadata
    opening: String,

    // @field: Closing delimiter line as found, empty without metadata
    closing: String,
}

impl SplitDocument {
    /// Whether a metadata block was found
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// Rebuild the page text from the (possibly modified) parts.
    ///
    /// The original delimiter lines are reused, so an unmodified split
    /// reassembles byte for byte.
    pub fn reassemble(&self) -> String {
        match self.metadata.as_deref() {
            // Metadata added to a page that had none
            Some(metadata) if self.opening.is_empty() => reassemble(Some(metadata), &self.body),
            Some(metadata) => assemble(&self.opening, metadata, &self.closing, &self.body),
            None => self.body.clone(),
        }
    }
}

// A delimiter line may carry trailing whitespace or a CR
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split a page into metadata block and body.
///
/// Scans at most up to the second delimiter line. Never fails: a page that
/// does not open with a delimiter, or whose block is never closed, is all body.
pub fn split(text: &str) -> SplitDocument {
    let whole_body = || SplitDocument {
        metadata: None,
        body: text.to_string(),
        opening: String::new(),
        closing: String::new(),
    };

    let mut lines = text.split_inclusive('\n');
    let opening = match lines.next() {
        Some(line) if is_delimiter(line) && line.ends_with('\n') => line,
        _ => return whole_body(),
    };

    let metadata_start = opening.len();
    let mut offset = metadata_start;
    for line in lines {
        if is_delimiter(line) {
            return SplitDocument {
                metadata: Some(text[metadata_start..offset].to_string()),
                body: text[offset + line.len()..].to_string(),
                opening: opening.to_string(),
                closing: line.to_string(),
            };
        }
        offset += line.len();
    }

    whole_body()
}

/// Join a metadata block and a body back into page text.
///
/// Delimiter lines are written as `---\n`. Use [`SplitDocument::reassemble`]
/// to keep the delimiters of a parsed page.
pub fn reassemble(metadata: Option<&str>, body: &str) -> String {
    let Some(metadata) = metadata else {
        return body.to_string();
    };

    let delimiter_line = format!("{}\n", DELIMITER);
    assemble(&delimiter_line, metadata, &delimiter_line, body)
}

fn assemble(opening: &str, metadata: &str, closing: &str, body: &str) -> String {
    // Lines added here follow the opening delimiter's line ending
    let newline = match line_ending(opening) {
        "" => "\n",
        ending => ending,
    };

    let mut out = String::with_capacity(opening.len() + metadata.len() + closing.len() + body.len() + 2 * newline.len());
    out.push_str(opening);
    out.push_str(metadata);
    if !metadata.is_empty() && !metadata.ends_with('\n') {
        out.push_str(newline);
    }
    out.push_str(closing);
    // A closing delimiter found at EOF has no line ending of its own
    if !closing.ends_with('\n') && !body.is_empty() {
        out.push_str(newline);
    }
    out.push_str(body);
    out
}

/// Set `key: value` inside a metadata block.
///
/// The first top-level line starting with `key:` (case-sensitive) is replaced,
/// keeping its line ending. If there is none, trailing blank lines are
/// trimmed and a new line is appended with the block's line ending.
pub fn set_field(metadata: &str, key: &str, value: &str) -> String {
    let field_line = format!("{}: {}", key, value);

    let mut out = String::with_capacity(metadata.len() + field_line.len() + 1);
    let mut replaced = false;
    for line in metadata.split_inclusive('\n') {
        if !replaced && is_field_line(line, key) {
            out.push_str(&field_line);
            out.push_str(line_ending(line));
            replaced = true;
        } else {
            out.push_str(line);
        }
    }

    if replaced {
        return out;
    }

    let newline = match metadata.split_inclusive('\n').next().map(line_ending) {
        Some("\r\n") => "\r\n",
        _ => "\n",
    };
    let mut out = metadata.trim_end().to_string();
    if !out.is_empty() {
        out.push_str(newline);
    }
    out.push_str(&field_line);
    out.push_str(newline);
    out
}

/// Read the value of the first `key:` line, if any
pub fn get_field<'a>(metadata: &'a str, key: &str) -> Option<&'a str> {
    metadata.lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
    })
}

fn is_field_line(line: &str, key: &str) -> bool {
    !key.is_empty()
        && line
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with(':'))
}

fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
