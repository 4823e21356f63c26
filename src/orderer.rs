//! Arranges parsed entries into a [`Document`].

use crate::model::{Document, Entry};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Builds the document from entries in file order.
///
/// The first class descriptor becomes the document header and later ones are
/// dropped. Functions are sorted by name using plain byte ordering; when a
/// name repeats, the entry seen last replaces the earlier one.
pub fn order_entries(entries: Vec<Entry>) -> Document {
    let mut class = None;
    let mut functions = BTreeMap::new();

    for entry in entries {
        match entry {
            Entry::Class(c) => {
                if class.is_none() {
                    class = Some(c);
                } else {
                    warn!("Ignoring additional class descriptor '{}'", c.class);
                }
            }
            Entry::Function(f) => {
                if let Some(previous) = functions.insert(f.name.clone(), f) {
                    warn!(
                        "Duplicate function descriptor '{}'; keeping the last one",
                        previous.name
                    );
                }
            }
        }
    }

    let functions: Vec<_> = functions.into_values().collect();
    debug!(
        "Ordered {} functions (class descriptor: {})",
        functions.len(),
        class.is_some()
    );

    Document { class, functions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassEntry, FunctionEntry};

    fn class(name: &str) -> Entry {
        Entry::Class(ClassEntry {
            class: name.to_string(),
            text: None,
            longtext: None,
        })
    }

    fn function(name: &str, text: &str) -> Entry {
        Entry::Function(FunctionEntry {
            name: name.to_string(),
            args: Vec::new(),
            text: Some(text.to_string()),
            longtext: None,
            returns: None,
            example: String::new(),
        })
    }

    fn names(doc: &Document) -> Vec<&str> {
        doc.functions.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_class_first_functions_sorted() {
        let doc = order_entries(vec![
            function("zeta", ""),
            class("Widget"),
            function("alpha", ""),
        ]);

        assert_eq!(doc.class.as_ref().map(|c| c.class.as_str()), Some("Widget"));
        assert_eq!(names(&doc), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_sort_is_case_sensitive_byte_order() {
        let doc = order_entries(vec![
            function("write", ""),
            function("Write", ""),
            function("write&nbsp;", ""),
            function("_private", ""),
        ]);

        assert_eq!(names(&doc), vec!["Write", "_private", "write", "write&nbsp;"]);
    }

    #[test]
    fn test_first_class_wins() {
        let doc = order_entries(vec![class("First"), class("Second")]);

        assert_eq!(doc.class.unwrap().class, "First");
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let doc = order_entries(vec![function("open", "old"), function("open", "new")]);

        assert_eq!(doc.functions.len(), 1);
        assert_eq!(doc.functions[0].description(), "new");
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let doc = order_entries(vec![
            function("b", ""),
            function("c", ""),
            function("a", ""),
        ]);

        let again = order_entries(
            doc.functions
                .iter()
                .cloned()
                .map(Entry::Function)
                .collect(),
        );

        assert_eq!(again, doc);
    }

    #[test]
    fn test_empty_input() {
        let doc = order_entries(Vec::new());

        assert!(doc.is_empty());
    }
}
