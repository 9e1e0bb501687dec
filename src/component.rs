//! Compiles one component file: walks its tokens, tracks the open-element
//! scope, resolves includes and collects refs, then appends the component's
//! interface and constructor to the generator's output.

use crate::codegen::{constructor_function, style_block, type_definition, ConstructorBody, Root};
use crate::error::{CompileError, Location, Result};
use crate::generator::Generator;
use crate::include::{resolve_include_path, IncludeHistory, IncludeRequest, INCLUDE_TAG};
use crate::names::{
    component_type_name, constructor_func_name, is_exported_name, is_identifier, VarNames,
    STRING_LITERAL_KIND,
};
use crate::refs::{check_ref_name, RefRegistry};
use crate::scope::{Frame, ScopeStack};
use crate::tokenizer::{is_void_element, Attr, TokenKind, TokenStream};
use std::path::Path;

const STYLE_TAG: &str = "style";
const REF_ATTR: &str = "ref";

fn is_space_except_nbsp(c: char) -> bool {
    c != '\u{A0}' && c.is_whitespace()
}

/// Newlines removed, surrounding whitespace trimmed (no-break spaces kept).
pub fn normalize_text(text: &str) -> String {
    let joined: String = text.chars().filter(|&c| c != '\n').collect();
    joined.trim_matches(is_space_except_nbsp).to_string()
}

/// Base name of a component path, as used for its type name.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Mutable state for one component compilation. Dropped when it finishes.
struct ComponentState<'p> {
    path: &'p Path,
    names: VarNames,
    scope: ScopeStack,
    refs: RefRegistry,
    roots: Vec<Root>,
    body: ConstructorBody,
}

impl<'p> ComponentState<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            names: VarNames::new(),
            scope: ScopeStack::new(),
            refs: RefRegistry::new(),
            roots: Vec::new(),
            body: ConstructorBody::new(),
        }
    }

    fn at(&self, line: u64) -> Location {
        Location::new(self.path, Some(line))
    }

    /// Fails when the innermost open element is an `<include>`.
    fn ensure_not_inside_include(&self, line: u64) -> Result<()> {
        match self.scope.peek() {
            Some(parent) if parent.tag_name == INCLUDE_TAG => {
                Err(CompileError::ContentInsideInclude { at: self.at(line) })
            }
            _ => Ok(()),
        }
    }

    fn handle_text(&mut self, text: &str, line: u64) -> Result<()> {
        let text = normalize_text(text);
        let parent_var = match self.scope.peek() {
            Some(parent) => parent.var_name.clone(),
            None => {
                if !text.is_empty() {
                    log::debug!("{}: dropping text outside any element", self.at(line));
                }
                return Ok(());
            }
        };
        if text.is_empty() {
            return Ok(());
        }
        self.ensure_not_inside_include(line)?;

        let literal_var = self.names.next(STRING_LITERAL_KIND);
        self.body.set_text_content(&parent_var, &literal_var, &text);
        Ok(())
    }

    fn open_regular(&mut self, tag_name: &str, attrs: &[Attr], line: u64) -> Result<()> {
        self.ensure_not_inside_include(line)?;

        let var_name = self.names.next(tag_name);
        self.body.create_element(&var_name, tag_name);
        for attr in attrs {
            if attr.key == REF_ATTR {
                let at = self.at(line);
                self.refs
                    .register(&at, &attr.value, tag_name, &var_name, None)?;
            } else {
                self.body.set_attribute(&var_name, &attr.key, &attr.value);
            }
        }

        self.scope.push(Frame {
            tag_name: tag_name.to_string(),
            var_name,
            line,
        });
        Ok(())
    }

    /// Pops the innermost frame and attaches it to its parent, or records
    /// it as a root when nothing encloses it.
    fn close_top(&mut self, line: u64, tag_name: &str) -> Result<()> {
        let frame = match self.scope.pop() {
            Some(frame) => frame,
            None => {
                return Err(CompileError::UnexpectedEndTag {
                    at: self.at(line),
                    tag: tag_name.to_string(),
                })
            }
        };
        if frame.tag_name != tag_name {
            return Err(CompileError::MismatchedEndTag {
                at: self.at(line),
                expected: frame.tag_name,
                found: tag_name.to_string(),
            });
        }

        let is_include = frame.tag_name == INCLUDE_TAG;
        match self.scope.peek() {
            None => {
                let root = if is_include {
                    Root::Include(frame.var_name)
                } else {
                    Root::Element(frame.var_name)
                };
                self.roots.push(root);
            }
            Some(parent) => {
                let parent_var = parent.var_name.clone();
                if is_include {
                    self.body.append_include_roots(&parent_var, &frame.var_name);
                } else {
                    self.body.append_child(&parent_var, &frame.var_name);
                }
            }
        }
        Ok(())
    }
}

impl Generator {
    /// Compiles the component at `path` from its already-read `source`.
    pub(crate) fn compile_component(
        &mut self,
        source: &[u8],
        path: &Path,
        history: &mut IncludeHistory,
    ) -> Result<()> {
        let name = file_name(path);
        let type_name = component_type_name(&name).to_string();
        if !is_identifier(&type_name) {
            return Err(CompileError::InvalidComponentName {
                at: Location::new(path, None),
                name: type_name,
            });
        }
        let func_name = constructor_func_name(&type_name);
        let exported = is_exported_name(&type_name);

        let mut tokens = TokenStream::new(source).map_err(|message| CompileError::Tokenizer {
            at: Location::new(path, None),
            message,
        })?;
        let mut state = ComponentState::new(path);
        let mut style_line = None;

        while let Some(token) = tokens.next() {
            let line = token.line;
            match token.kind {
                TokenKind::Text(text) => state.handle_text(&text, line)?,

                TokenKind::StartTag { name, attrs } => {
                    if name == STYLE_TAG && state.scope.is_empty() {
                        style_line = Some(line);
                        break;
                    }
                    self.open_element(&mut state, &name, &attrs, line, history)?;
                    if is_void_element(&name) {
                        state.close_top(line, &name)?;
                    }
                }

                TokenKind::EndTag { name } => {
                    if is_void_element(&name) {
                        // Void elements were closed at their start tag.
                        continue;
                    }
                    state.close_top(line, &name)?;
                }

                TokenKind::SelfClosingTag { name, attrs } => {
                    self.open_element(&mut state, &name, &attrs, line, history)?;
                    state.close_top(line, &name)?;
                }

                TokenKind::Comment | TokenKind::Doctype => {}
            }
        }

        let style = match style_line {
            Some(line) => Some(drain_style(&mut tokens, state.at(line))?),
            None => {
                if let Some(open) = state.scope.peek() {
                    return Err(CompileError::UnclosedElement {
                        at: state.at(open.line),
                        tag: open.tag_name.clone(),
                    });
                }
                None
            }
        };

        self.views.push_str(&type_definition(
            path,
            &type_name,
            exported,
            &state.refs,
            self.bindings.as_ref(),
        ));
        self.views.push_str(&constructor_function(
            &type_name,
            &func_name,
            exported,
            &state.body,
            &state.refs,
            &state.roots,
            self.bindings.as_ref(),
        ));
        if let Some(body) = style {
            self.css.push_str(&style_block(path, &body));
        }

        log::debug!(
            "compiled {} as {} ({} refs, {} roots)",
            path.display(),
            type_name,
            state.refs.len(),
            state.roots.len()
        );
        Ok(())
    }

    fn open_element(
        &mut self,
        state: &mut ComponentState<'_>,
        tag_name: &str,
        attrs: &[Attr],
        line: u64,
        history: &mut IncludeHistory,
    ) -> Result<()> {
        if tag_name == INCLUDE_TAG {
            self.open_include(state, attrs, line, history)
        } else {
            state.open_regular(tag_name, attrs, line)
        }
    }

    fn open_include(
        &mut self,
        state: &mut ComponentState<'_>,
        attrs: &[Attr],
        line: u64,
        history: &mut IncludeHistory,
    ) -> Result<()> {
        state.ensure_not_inside_include(line)?;

        let at = state.at(line);
        let request = IncludeRequest::from_attrs(&at, attrs)?;
        if let Some(ref_id) = &request.ref_id {
            check_ref_name(&at, ref_id)?;
        }

        let target = resolve_include_path(state.path, &request.path, &self.options.root_directory);
        log::debug!(
            "{}: including {} (depth {})",
            at,
            target.display(),
            history.len()
        );
        self.compile_file(&target, history)?;

        let included_name = file_name(&target);
        let included_type = component_type_name(&included_name);
        let var_name = state.names.next(INCLUDE_TAG);
        state
            .body
            .construct_include(&var_name, &constructor_func_name(included_type));

        if let Some(ref_id) = &request.ref_id {
            state
                .refs
                .register(&at, ref_id, INCLUDE_TAG, &var_name, Some(included_type))?;
        }

        state.scope.push(Frame {
            tag_name: INCLUDE_TAG.to_string(),
            var_name,
            line,
        });
        Ok(())
    }
}

/// Takes the raw body following a top-level `<style>` start tag. Anything
/// after the body is ignored; no closing tag is required.
fn drain_style(tokens: &mut TokenStream, at: Location) -> Result<String> {
    let body = match tokens.next() {
        Some(token) => match token.kind {
            TokenKind::Text(text) => text,
            _ => return Err(CompileError::MissingStyleBody { at }),
        },
        None => return Err(CompileError::MissingStyleBody { at }),
    };

    let ignored = tokens.any(|t| match &t.kind {
        TokenKind::EndTag { name } => name != STYLE_TAG,
        TokenKind::Text(text) => !text.trim().is_empty(),
        TokenKind::Comment => false,
        _ => true,
    });
    if ignored {
        log::warn!("{}: content after top-level <style> is ignored", at);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("\n   Hello world  \n"), "Hello world");
        assert_eq!(normalize_text("a\nb"), "ab");
        assert_eq!(normalize_text("\u{A0}x\u{A0} "), "\u{A0}x\u{A0}");
        assert_eq!(normalize_text(" \t\n "), "");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("a/b/Card.html")), "Card.html");
        assert_eq!(file_name(Path::new("Card.html")), "Card.html");
    }
}
