//! Typed documentation entries.

use serde::Deserialize;

/// A parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Class or module level description, rendered as the document header
    Class(ClassEntry),
    /// A single documented function or method
    Function(FunctionEntry),
}

/// Descriptor carrying a top-level `class` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassEntry {
    pub class: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub longtext: Option<String>,
}

/// Descriptor for one function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionEntry {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub longtext: Option<String>,
    /// Description of the return value
    #[serde(rename = "return", default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub example: String,
}

/// One function argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Argument {
    pub name: String,
    /// Declared type, free-form
    pub vtype: String,
    #[serde(default)]
    pub text: String,
}

/// Entries arranged for rendering.
///
/// Holds at most one class descriptor; `functions` is sorted by name and
/// free of duplicate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub class: Option<ClassEntry>,
    pub functions: Vec<FunctionEntry>,
}

/// Picks `longtext` over `text`, falling back to an empty description.
fn description<'a>(longtext: &'a Option<String>, text: &'a Option<String>) -> &'a str {
    longtext.as_deref().or(text.as_deref()).unwrap_or("")
}

impl ClassEntry {
    pub fn description(&self) -> &str {
        description(&self.longtext, &self.text)
    }
}

impl FunctionEntry {
    pub fn description(&self) -> &str {
        description(&self.longtext, &self.text)
    }

    /// Call signature, e.g. `setTimeout(func,delay)`.
    pub fn signature(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(|a| a.name.as_str()).collect();
        format!("{}({})", self.name, args.join(","))
    }

    /// Link target for this function's section: the name followed by every
    /// argument name, lower-cased, with no separators.
    pub fn anchor(&self) -> String {
        let mut anchor = self.name.clone();
        for arg in &self.args {
            anchor.push_str(&arg.name);
        }
        anchor.to_lowercase()
    }
}

impl Document {
    /// Number of entries, counting the class descriptor.
    pub fn len(&self) -> usize {
        self.functions.len() + usize::from(self.class.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
