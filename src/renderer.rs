//! Markdown rendering of an ordered [`Document`].
//!
//! The layout is fixed: a class header with a method index, then one section
//! per function with its signature, description, arguments, return value and
//! example. The whole document is built in memory so callers can emit it in
//! one write.

use crate::model::{ClassEntry, Document, FunctionEntry};
use log::debug;

/// Renders `doc` as Markdown.
///
/// The output depends only on `doc`; rendering the same document twice gives
/// byte-identical text.
///
/// # Example
///
/// ```
/// use jsondoc_md::model::{Document, FunctionEntry};
/// use jsondoc_md::renderer::render_markdown;
///
/// let doc = Document {
///     class: None,
///     functions: vec![FunctionEntry {
///         name: "reset".to_string(),
///         args: vec![],
///         text: Some("Reset the board.".to_string()),
///         longtext: None,
///         returns: None,
///         example: "reset();".to_string(),
///     }],
/// };
/// let markdown = render_markdown(&doc);
/// assert!(markdown.starts_with("## reset()\n\nReset the board.\n\n"));
/// ```
pub fn render_markdown(doc: &Document) -> String {
    let mut output = String::new();

    if let Some(class) = &doc.class {
        render_class(&mut output, class, doc);
    }

    for function in &doc.functions {
        render_function(&mut output, function);
    }

    debug!("Rendered {} bytes of Markdown", output.len());
    output
}

/// Header, description and, when there is anything to list, the method index.
fn render_class(output: &mut String, class: &ClassEntry, doc: &Document) {
    output.push_str(&format!("# {}\n\n", class.class));
    output.push_str(class.description());
    output.push('\n');

    if doc.len() > 1 {
        output.push_str("## Methods\n\n");
        for function in &doc.functions {
            output.push_str(&format!("- [{}](#{})\n", function.name, function.anchor()));
        }
        output.push_str("\n---\n\n");
    }
}

fn render_function(output: &mut String, function: &FunctionEntry) {
    output.push_str(&format!("## {}\n\n", function.signature()));
    output.push_str(function.description());
    output.push_str("\n\n");

    for arg in &function.args {
        output.push_str(&format!("- {}\n\n", arg.name));
        output.push_str(&format!("  type: {}\n\n", arg.vtype));
        output.push_str(&format!("  {}\n\n", arg.text));
    }

    if let Some(returns) = &function.returns {
        output.push_str(&format!("**Returns:** {}\n\n", returns));
    }

    output.push_str(&format!("```\n{}\n```\n\n", function.example));
}
