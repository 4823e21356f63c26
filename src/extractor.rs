//! Descriptor block extraction.
//!
//! A descriptor region starts on a line holding a comment opener followed by the
//! tag word (`/* jsondoc`) and ends on the next line holding the comment closer
//! (`*/`). Everything in between is concatenated into a single
//! [`DescriptorBuffer`]. The values of `example` and `longtext` may span several
//! physical lines; their line breaks are rewritten as the JSON escape `\n` so the
//! buffer becomes one valid JSON document.
//!
//! # Example
//!
//! ```
//! use jsondoc_md::extractor::BlockExtractor;
//!
//! let source = "/* jsondoc\n{\"class\": \"Timer\", \"text\": \"Timers.\"}\n*/\n";
//! let buffers = BlockExtractor::default().extract(source);
//! assert_eq!(buffers.len(), 1);
//! assert_eq!(buffers[0].text, "{\"class\": \"Timer\", \"text\": \"Timers.\"}");
//! ```

use log::{debug, warn};

/// Tag word used when none is configured.
pub const DEFAULT_TAG: &str = "jsondoc";

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";
const ESCAPED_NEWLINE: &str = "\\n";

/// Keys whose string values may contain raw line breaks.
const LONG_TEXT_KEYS: [&str; 2] = ["\"example\":", "\"longtext\":"];

/// Text accumulated from one descriptor region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorBuffer {
    /// 1-based line of the opening marker
    pub line: usize,
    /// Repaired descriptor text, ready for JSON parsing
    pub text: String,
}

/// Position of the scan relative to descriptor regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractState {
    /// Ordinary source text
    Normal,
    /// Inside a region, outside any multi-line value
    InDescriptor,
    /// Inside the open string value of a long-text key
    InLongText,
}

/// Scanner that collects descriptor regions from source text.
///
/// The tag word is configurable so projects can use a marker other than
/// `jsondoc`; see [`BlockExtractor::new`].
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    tag: String,
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl BlockExtractor {
    /// Creates an extractor for regions opened by `/*` followed by `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// The tag word this extractor matches.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Extracts every descriptor region from `source`, in file order.
    ///
    /// Regions that are still open when the input ends are discarded with a
    /// warning.
    ///
    /// When a long-text value already has text after its opening quote on the
    /// key line (`"example": "first`), that line break is kept as `\n`
    /// rather than joining the key line onto the next one. With the usual
    /// layout, where the key line ends at the opening quote, the key line's
    /// break is dropped.
    pub fn extract(&self, source: &str) -> Vec<DescriptorBuffer> {
        let mut buffers = Vec::new();
        let mut state = ExtractState::Normal;
        let mut current = String::new();
        let mut start_line = 0;

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;

            state = match state {
                ExtractState::Normal => match self.marker_end(line) {
                    Some(end) => {
                        let rest = &line[end..];
                        match rest.find(COMMENT_CLOSE) {
                            // Region opened and closed on the same line
                            Some(close) => {
                                debug!("Found single-line descriptor at line {}", line_no);
                                buffers.push(DescriptorBuffer {
                                    line: line_no,
                                    text: rest[..close].trim().to_string(),
                                });
                                ExtractState::Normal
                            }
                            None => {
                                debug!("Descriptor region opened at line {}", line_no);
                                start_line = line_no;
                                ExtractState::InDescriptor
                            }
                        }
                    }
                    None => ExtractState::Normal,
                },
                ExtractState::InDescriptor | ExtractState::InLongText
                    if line.contains(COMMENT_CLOSE) =>
                {
                    debug!(
                        "Descriptor region closed at line {} ({} bytes)",
                        line_no,
                        current.len()
                    );
                    buffers.push(DescriptorBuffer {
                        line: start_line,
                        text: std::mem::take(&mut current),
                    });
                    ExtractState::Normal
                }
                ExtractState::InDescriptor => {
                    current.push_str(line);
                    enter_long_text(line, &mut current)
                }
                ExtractState::InLongText => {
                    current.push_str(line);
                    continue_long_text(line, &mut current)
                }
            };
        }

        if state != ExtractState::Normal {
            warn!(
                "Descriptor region opened at line {} is never closed; discarding it",
                start_line
            );
        }

        debug!("Extracted {} descriptor regions", buffers.len());
        buffers
    }

    /// Returns the byte offset just past the opening marker, if `line` has one.
    ///
    /// The tag must follow the comment opener (spaces allowed in between) and
    /// must not run on into a longer word.
    fn marker_end(&self, line: &str) -> Option<usize> {
        if self.tag.is_empty() {
            return None;
        }

        let mut search = 0;
        while let Some(found) = line[search..].find(COMMENT_OPEN) {
            let after_open = search + found + COMMENT_OPEN.len();
            let candidate = line[after_open..].trim_start();
            if let Some(tail) = candidate.strip_prefix(self.tag.as_str()) {
                let continues_word = tail
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_');
                if !continues_word {
                    return Some(line.len() - tail.len());
                }
            }
            search = after_open;
        }

        None
    }
}

/// Handles a line appended while outside any multi-line value.
fn enter_long_text(fragment: &str, current: &mut String) -> ExtractState {
    if !LONG_TEXT_KEYS.iter().any(|key| fragment.contains(key)) {
        return ExtractState::InDescriptor;
    }

    match open_string_tail(fragment) {
        Some(tail) => {
            // Text after the opening quote is already part of the value
            if !fragment[tail..].trim().is_empty() {
                current.push_str(ESCAPED_NEWLINE);
            }
            ExtractState::InLongText
        }
        None => ExtractState::InDescriptor,
    }
}

/// Handles a line appended while a long-text value is open.
fn continue_long_text(line: &str, current: &mut String) -> ExtractState {
    match closing_quote(line) {
        Some(pos) => enter_long_text(&line[pos + 1..], current),
        None => {
            current.push_str(ESCAPED_NEWLINE);
            ExtractState::InLongText
        }
    }
}

/// Finds the first unescaped `"` in text that starts inside a string literal.
fn closing_quote(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (pos, ch) in text.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(pos),
            _ => {}
        }
    }
    None
}

/// Scans `text`, which starts outside any string literal, and returns the
/// offset just past the opening quote of a string left open at the end.
fn open_string_tail(text: &str) -> Option<usize> {
    let mut idx = 0;
    loop {
        let start = idx + text[idx..].find('"')? + 1;
        match closing_quote(&text[start..]) {
            Some(end) => idx = start + end + 1,
            None => return Some(start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMER_SOURCE: &str = r#"
var timers = [];

/* jsondoc
{
"class": "Timer",
"text": "A basic timer library."
}
*/

/* jsondoc
{
"name": "cancelTimer",
"args": [],
"text": "Delete timer.",
"example": "
var id = setTimer(x, 1000);
cancelTimer(id);
"
}
*/
function cancelTimer(id) {
    __timersRemove(id);
}
"#;

    #[test]
    fn test_extract_regions_in_file_order() {
        let buffers = BlockExtractor::default().extract(TIMER_SOURCE);

        assert_eq!(buffers.len(), 2);
        assert_eq!(buffers[0].line, 4);
        assert_eq!(
            buffers[0].text,
            r#"{"class": "Timer","text": "A basic timer library."}"#
        );
        assert_eq!(buffers[1].line, 11);
    }

    #[test]
    fn test_multiline_example_gets_escaped_newlines() {
        let buffers = BlockExtractor::default().extract(TIMER_SOURCE);

        assert_eq!(
            buffers[1].text,
            r#"{"name": "cancelTimer","args": [],"text": "Delete timer.","example": "var id = setTimer(x, 1000);\ncancelTimer(id);\n"}"#
        );

        // Three physical lines of value text carry two escapes
        let value: serde_json::Value = serde_json::from_str(&buffers[1].text).unwrap();
        assert_eq!(
            value["example"],
            "var id = setTimer(x, 1000);\ncancelTimer(id);\n"
        );
    }

    #[test]
    fn test_longtext_with_blank_lines() {
        let source = "/* jsondoc\n{\n\"class\": \"Fs\",\n\"longtext\": \"\nFirst paragraph.\n\nSecond paragraph.\n\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(buffers.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&buffers[0].text).unwrap();
        assert_eq!(value["longtext"], "First paragraph.\n\nSecond paragraph.\n");
    }

    #[test]
    fn test_single_line_example_is_left_alone() {
        let source = "/* jsondoc\n{\"name\": \"f\",\n\"example\": \"f()\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(buffers[0].text, r#"{"name": "f","example": "f()"}"#);
    }

    #[test]
    fn test_value_started_on_key_line_keeps_its_break() {
        let source = "/* jsondoc\n{\"name\": \"f\",\n\"example\": \"first\nsecond\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(
            buffers[0].text,
            r#"{"name": "f","example": "first\nsecond"}"#
        );
    }

    #[test]
    fn test_escaped_quote_does_not_end_long_text() {
        let source = "/* jsondoc\n{\"name\": \"say\",\n\"example\": \"\nsay(\\\"hi\\\");\n\\\"quoted\\\" start\n\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        let value: serde_json::Value = serde_json::from_str(&buffers[0].text).unwrap();
        assert_eq!(value["example"], "say(\"hi\");\n\"quoted\" start\n");
    }

    #[test]
    fn test_following_key_after_closing_quote() {
        let source = "/* jsondoc\n{\"name\": \"f\",\n\"example\": \"\nf();\n\", \"return\": \"nothing\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        let value: serde_json::Value = serde_json::from_str(&buffers[0].text).unwrap();
        assert_eq!(value["example"], "f();\n");
        assert_eq!(value["return"], "nothing");
    }

    #[test]
    fn test_long_text_closed_and_reopened_on_one_line() {
        let source = "/* jsondoc\n{\"class\": \"Chain\",\n\"longtext\": \"\nLong A\n\", \"example\": \"\nex1\nex2\n\"\n}\n*/\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(buffers.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&buffers[0].text).unwrap();
        assert_eq!(value["longtext"], "Long A\n");
        assert_eq!(value["example"], "ex1\nex2\n");
    }

    #[test]
    fn test_ignores_other_comments() {
        let source = "/* plain comment */\n/**\n * jsondoc is mentioned here\n */\n/* jsondocs\n{}\n*/\nint x;\n";
        let buffers = BlockExtractor::default().extract(source);

        assert!(buffers.is_empty());
    }

    #[test]
    fn test_unclosed_region_is_discarded() {
        let source = "/* jsondoc\n{\"class\": \"Lost\"}\n*/\n/* jsondoc\n{\"name\": \"never\"}\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].text, r#"{"class": "Lost"}"#);
    }

    #[test]
    fn test_single_line_region() {
        let source = "x = 1; /* jsondoc {\"class\": \"Tiny\", \"text\": \"t\"} */\n";
        let buffers = BlockExtractor::default().extract(source);

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].line, 1);
        assert_eq!(buffers[0].text, r#"{"class": "Tiny", "text": "t"}"#);
    }

    #[test]
    fn test_custom_tag() {
        let source = "/*apidoc\n{\"class\": \"Api\"}\n*/\n/* jsondoc\n{\"class\": \"Other\"}\n*/\n";
        let extractor = BlockExtractor::new("apidoc");
        let buffers = extractor.extract(source);

        assert_eq!(extractor.tag(), "apidoc");
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].text, r#"{"class": "Api"}"#);
    }

    #[test]
    fn test_open_string_tail() {
        assert_eq!(open_string_tail(r#""example": ""#), Some(12));
        assert_eq!(open_string_tail(r#""example": "done""#), None);
        assert_eq!(open_string_tail(r#""a": "b\"c"#), Some(6));
        assert_eq!(open_string_tail("no quotes"), None);
    }
}
