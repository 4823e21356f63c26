//! jsondoc-md - Markdown API references from JSON descriptors in source comments.
//!
//! Functions and classes are documented with a JSON descriptor placed inside a
//! tagged comment:
//!
//! ```text
//! /* jsondoc
//! {
//! "name": "setTimeout",
//! "args": [{"name": "func", "vtype": "function", "text": "callback"}],
//! "text": "Call a function later.",
//! "example": "
//! setTimeout(function() {}, 500);
//! "
//! }
//! */
//! ```
//!
//! # Architecture
//!
//! 1. [`extractor`] - Finds descriptor regions and repairs multi-line values
//! 2. [`parser`] - Parses each region into a typed [`model::Entry`]
//! 3. [`orderer`] - Puts the class descriptor first and sorts functions by name
//! 4. [`renderer`] - Renders the ordered [`model::Document`] as Markdown
//!
//! # Example Usage
//!
//! ```
//! use jsondoc_md::{generate, GenerateOptions};
//!
//! let source = "/* jsondoc\n{\"class\": \"Timer\", \"text\": \"Timers.\"}\n*/\n";
//! let markdown = generate(source, &GenerateOptions::default()).unwrap();
//! assert_eq!(markdown, "# Timer\n\nTimers.\n");
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod error;
pub mod extractor;
pub mod model;
pub mod orderer;
pub mod output;
pub mod parser;
pub mod renderer;

use crate::extractor::{BlockExtractor, DEFAULT_TAG};
use crate::model::Document;
use crate::orderer::order_entries;
use crate::parser::DescriptorParser;
use crate::renderer::render_markdown;

/// Options shared by [`generate`] and [`check`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Tag word following the comment opener
    pub tag: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

/// Counts reported by [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Descriptor regions found in the source
    pub regions: usize,
    /// Whether a class descriptor heads the document
    pub has_class: bool,
    /// Distinct documented functions
    pub functions: usize,
}

/// Extracts, parses and orders the descriptors in `source`.
///
/// # Errors
///
/// Returns [`error::Error::MalformedDescriptor`] for the first region that
/// does not parse.
pub fn build_document(source: &str, options: &GenerateOptions) -> error::Result<(usize, Document)> {
    let buffers = BlockExtractor::new(options.tag.as_str()).extract(source);
    let entries = DescriptorParser::parse_all(&buffers)?;
    Ok((buffers.len(), order_entries(entries)))
}

/// Runs the whole pipeline and returns the Markdown document.
pub fn generate(source: &str, options: &GenerateOptions) -> error::Result<String> {
    let (_, document) = build_document(source, options)?;
    Ok(render_markdown(&document))
}

/// Validates every descriptor in `source` without rendering.
pub fn check(source: &str, options: &GenerateOptions) -> error::Result<Summary> {
    let (regions, document) = build_document(source, options)?;
    Ok(Summary {
        regions,
        has_class: document.class.is_some(),
        functions: document.functions.len(),
    })
}
