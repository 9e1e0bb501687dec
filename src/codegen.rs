//! Codegen module for the component compiler
//!
//! Writes the TypeScript text for headers, component interfaces and
//! constructor functions, and runs the final formatting pass with oxc.

use crate::bindings::ElementBindings;
use crate::error::{CompileError, Result};
use crate::refs::{RefRegistry, ROOTS_FIELD};
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

pub const GENERATED_BY: &str = "viewforge";

// ═══════════════════════════════════════════════════════════════════════════════
// LITERALS
// ═══════════════════════════════════════════════════════════════════════════════

/// Double-quoted string literal; JSON string syntax is valid in TypeScript.
pub fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// HEADERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Opens the generated namespace. Closed by `views_footer`.
pub fn views_header(package_name: &str, bindings: &dyn ElementBindings) -> String {
    format!(
        "// Code generated by {}. DO NOT EDIT.\n\nexport namespace {} {{\n{}\n\n",
        GENERATED_BY,
        package_name,
        bindings.prelude()
    )
}

pub fn views_footer() -> &'static str {
    "}\n"
}

pub fn styles_header() -> String {
    format!("/* Code generated by {}. DO NOT EDIT. */\n\n", GENERATED_BY)
}

/// One stylesheet block, tagged with the component it came from.
pub fn style_block(path: &Path, body: &str) -> String {
    format!("/* source: {} */\n{}\n\n", path.display(), body.trim())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTRUCTOR BODY
// ═══════════════════════════════════════════════════════════════════════════════

/// A root of a component: an element variable, or an included component
/// whose own roots are spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    Element(String),
    Include(String),
}

/// Statements of one constructor function, in document order.
#[derive(Debug, Default)]
pub struct ConstructorBody {
    code: String,
}

impl ConstructorBody {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, stmt: &str) {
        self.code.push_str("  ");
        self.code.push_str(stmt);
        self.code.push('\n');
    }

    pub fn create_element(&mut self, var_name: &str, tag_name: &str) {
        self.line(&format!(
            "const {} = _document.createElement({});",
            var_name,
            js_string(tag_name)
        ));
    }

    pub fn set_attribute(&mut self, var_name: &str, key: &str, value: &str) {
        self.line(&format!(
            "{}.setAttribute({}, {});",
            var_name,
            js_string(key),
            js_string(value)
        ));
    }

    pub fn set_text_content(&mut self, parent_var: &str, literal_var: &str, text: &str) {
        self.line(&format!("const {} = {};", literal_var, js_string(text)));
        self.line(&format!("{}.textContent = {};", parent_var, literal_var));
    }

    pub fn construct_include(&mut self, var_name: &str, constructor_name: &str) {
        self.line(&format!("const {} = {}();", var_name, constructor_name));
    }

    pub fn append_child(&mut self, parent_var: &str, child_var: &str) {
        self.line(&format!("{}.appendChild({});", parent_var, child_var));
    }

    /// Appends every root of an included component to `parent_var`.
    pub fn append_include_roots(&mut self, parent_var: &str, include_var: &str) {
        self.line(&format!(
            "for (const root of {}.{}) {{",
            include_var, ROOTS_FIELD
        ));
        self.line(&format!("  {}.appendChild(root);", parent_var));
        self.line("}");
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT DECLARATIONS
// ═══════════════════════════════════════════════════════════════════════════════

fn export_prefix(exported: bool) -> &'static str {
    if exported {
        "export "
    } else {
        ""
    }
}

/// The component interface: one field per ref, then the roots.
pub fn type_definition(
    source: &Path,
    type_name: &str,
    exported: bool,
    refs: &RefRegistry,
    bindings: &dyn ElementBindings,
) -> String {
    let mut out = format!(
        "// source: {}\n{}interface {} {{\n",
        source.display(),
        export_prefix(exported),
        type_name
    );
    for (ref_id, entry) in refs.iter() {
        let field_type = match &entry.included_type {
            Some(t) => t.as_str(),
            None => bindings
                .lookup(&entry.tag_name)
                .unwrap_or_else(|| bindings.generic_element()),
        };
        out.push_str(&format!("  {}: {};\n", ref_id, field_type));
    }
    out.push_str(&format!(
        "  readonly {}: {}[];\n}}\n\n",
        ROOTS_FIELD,
        bindings.generic_element()
    ));
    out
}

/// The constructor function wrapping `body` and returning the component.
pub fn constructor_function(
    type_name: &str,
    func_name: &str,
    exported: bool,
    body: &ConstructorBody,
    refs: &RefRegistry,
    roots: &[Root],
    bindings: &dyn ElementBindings,
) -> String {
    let mut out = format!(
        "{}function {}(): {} {{\n",
        export_prefix(exported),
        func_name,
        type_name
    );
    out.push_str(body.as_str());

    out.push_str("  return {\n");
    for (ref_id, entry) in refs.iter() {
        let value = if entry.included_type.is_some() {
            entry.var_name.clone()
        } else {
            bindings.convert(&entry.tag_name, &entry.var_name)
        };
        out.push_str(&format!("    {}: {},\n", ref_id, value));
    }
    let roots: Vec<String> = roots
        .iter()
        .map(|r| match r {
            Root::Element(v) => v.clone(),
            Root::Include(v) => format!("...{}.{}", v, ROOTS_FIELD),
        })
        .collect();
    out.push_str(&format!("    {}: [{}],\n", ROOTS_FIELD, roots.join(", ")));
    out.push_str("  };\n}\n\n");
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// FORMATTING
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses the generated TypeScript and prints it back out. A parse failure
/// means the generator emitted invalid code.
pub fn format_views(source: &str) -> Result<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_typescript(true)
        .with_module(true);

    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(CompileError::Formatter {
            diagnostics: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    Ok(Codegen::new().build(&ret.program).code)
}

/// Trailing whitespace removed from every line, exactly one final newline.
pub fn format_styles(css: &str) -> String {
    let mut out: String = css
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}
