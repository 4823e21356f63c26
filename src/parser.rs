use crate::error::{Error, Result};
use crate::extractor::DescriptorBuffer;
use crate::model::{ClassEntry, Entry, FunctionEntry};
use log::debug;
use serde_json::Value;

/// Parser turning repaired descriptor buffers into typed entries.
///
/// A descriptor whose top-level object has a `class` key is a [`ClassEntry`];
/// anything else must have the shape of a [`FunctionEntry`].
///
/// # Example
///
/// ```
/// use jsondoc_md::extractor::DescriptorBuffer;
/// use jsondoc_md::model::Entry;
/// use jsondoc_md::parser::DescriptorParser;
///
/// let buffer = DescriptorBuffer {
///     line: 1,
///     text: r#"{"name": "reset", "text": "Reset the board."}"#.to_string(),
/// };
/// let entry = DescriptorParser::parse(&buffer).unwrap();
/// assert!(matches!(entry, Entry::Function(f) if f.name == "reset"));
/// ```
pub struct DescriptorParser;

impl DescriptorParser {
    /// Parses a single descriptor buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] carrying the raw buffer if the text
    /// is not valid JSON or lacks a required field.
    pub fn parse(buffer: &DescriptorBuffer) -> Result<Entry> {
        let malformed = |err: serde_json::Error| Error::MalformedDescriptor {
            line: buffer.line,
            buffer: buffer.text.clone(),
            message: err.to_string(),
        };

        let value: Value = serde_json::from_str(&buffer.text).map_err(malformed)?;

        let is_class = value.get("class").is_some();
        let entry = if is_class {
            let class: ClassEntry = serde_json::from_value(value).map_err(malformed)?;
            debug!("Parsed class descriptor '{}' (line {})", class.class, buffer.line);
            Entry::Class(class)
        } else {
            let function: FunctionEntry = serde_json::from_value(value).map_err(malformed)?;
            debug!(
                "Parsed function descriptor '{}' with {} args (line {})",
                function.name,
                function.args.len(),
                buffer.line
            );
            Entry::Function(function)
        };

        Ok(entry)
    }

    /// Parses every buffer, stopping at the first malformed one.
    ///
    /// No partial result is returned: a single bad descriptor fails the whole
    /// batch.
    pub fn parse_all(buffers: &[DescriptorBuffer]) -> Result<Vec<Entry>> {
        debug!("Parsing {} descriptors", buffers.len());

        buffers.iter().map(Self::parse).collect()
    }
}
