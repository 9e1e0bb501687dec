//! Naming rules for generated code: per-component variable allocation,
//! component type and constructor names, identifier checks.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Kind used for text-content literal bindings.
pub const STRING_LITERAL_KIND: &str = "stringliteral";

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
    static ref NON_IDENTIFIER_CHAR_RE: Regex = Regex::new(r"[^A-Za-z0-9_$]").unwrap();

    /// Reserved words of the generated language (ECMAScript reserved words,
    /// strict-mode reserved words and the TypeScript declaration keywords).
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        for kw in [
            "break", "case", "catch", "class", "const", "continue", "debugger", "default",
            "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
            "function", "if", "import", "in", "instanceof", "new", "null", "return", "super",
            "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
            // strict mode
            "implements", "interface", "let", "package", "private", "protected", "public",
            "static", "yield", "await",
            // TypeScript declarations
            "declare", "namespace", "module", "type", "abstract", "readonly",
        ] {
            s.insert(kw);
        }
        s
    };
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

/// True if `name` is usable as an identifier in generated code.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name) && !is_keyword(name)
}

/// Successive variable names for one component's constructor function.
#[derive(Debug, Default)]
pub struct VarNames {
    counters: HashMap<String, usize>,
}

impl VarNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `kind` followed by the next unused ordinal for that kind.
    ///
    /// Characters that cannot appear in an identifier are replaced by `_`,
    /// and a kind ending in a digit gets a `_` before the ordinal. Counters
    /// are keyed by that final prefix, which never ends in a digit, so a
    /// name splits back into exactly one prefix and ordinal.
    pub fn next(&mut self, kind: &str) -> String {
        let mut prefix = sanitize_kind(kind);
        if prefix.ends_with(|c: char| c.is_ascii_digit()) {
            prefix.push('_');
        }
        let counter = self.counters.entry(prefix.clone()).or_insert(0);
        let n = *counter;
        *counter += 1;
        format!("{}{}", prefix, n)
    }
}

fn sanitize_kind(kind: &str) -> String {
    let mut s = NON_IDENTIFIER_CHAR_RE.replace_all(kind, "_").into_owned();
    if s.is_empty() || s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, '_');
    }
    s
}

/// Component type name: the file name with its final extension removed.
pub fn component_type_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

pub fn is_exported_name(name: &str) -> bool {
    name.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn to_upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `New<Type>` for exported types, `new<Type>` (first letter raised) otherwise.
pub fn constructor_func_name(type_name: &str) -> String {
    if is_exported_name(type_name) {
        format!("New{}", type_name)
    } else {
        format!("new{}", to_upper_first(type_name))
    }
}
