//! Top-level generation run: seeds the output buffers, compiles each input
//! (and, through includes, everything it references) exactly once, and
//! formats the result.

use crate::bindings::{DomBindings, ElementBindings};
use crate::codegen::{format_styles, format_views, styles_header, views_footer, views_header};
use crate::error::{CompileError, Result};
use crate::include::{normalize_path, IncludeHistory};
use crate::names::is_identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

fn default_package_name() -> String {
    "views".to_string()
}

fn default_root_directory() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Namespace the generated code is declared in.
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Base for `<include path="/...">` paths.
    #[serde(default = "default_root_directory")]
    pub root_directory: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            root_directory: default_root_directory(),
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Formatted results of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub views: String,
    pub css: String,
}

pub struct Generator {
    pub(crate) options: Options,
    pub(crate) bindings: Box<dyn ElementBindings>,
    /// Paths compiled so far in this run.
    seen: HashSet<PathBuf>,
    pub(crate) views: String,
    pub(crate) css: String,
}

impl Generator {
    pub fn new(options: Options) -> Self {
        Self::with_bindings(options, Box::new(DomBindings))
    }

    pub fn with_bindings(options: Options, bindings: Box<dyn ElementBindings>) -> Self {
        Self {
            options,
            bindings,
            seen: HashSet::new(),
            views: String::new(),
            css: String::new(),
        }
    }

    fn reset(&mut self) {
        self.seen.clear();
        self.views.clear();
        self.css.clear();
    }

    /// Compiles `inputs` in order. Any error aborts the run with no output.
    pub fn run<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<Output> {
        self.reset();

        let package_name = &self.options.package_name;
        if !is_identifier(package_name) {
            return Err(CompileError::InvalidPackageName {
                name: package_name.clone(),
            });
        }

        self.views = views_header(package_name, self.bindings.as_ref());
        self.css = styles_header();

        for input in inputs {
            // Cycle detection is scoped to one top-level input.
            let mut history = IncludeHistory::new();
            self.compile_file(input.as_ref(), &mut history)?;
        }
        self.views.push_str(views_footer());

        let views = format_views(&self.views)?;
        let css = format_styles(&self.css);
        log::debug!(
            "generated {} components from {} inputs",
            self.seen.len(),
            inputs.len()
        );
        Ok(Output { views, css })
    }

    /// Compiles one component unless this run already has.
    pub(crate) fn compile_file(&mut self, path: &Path, history: &mut IncludeHistory) -> Result<()> {
        let path = normalize_path(path);
        if self.seen.contains(&path) {
            log::trace!("{} already generated", path.display());
            return Ok(());
        }

        history.enter(&path)?;
        let result = fs::read(&path)
            .map_err(|source| CompileError::FileOpen {
                path: path.clone(),
                source,
            })
            .and_then(|source| self.compile_component(&source, &path, history));
        history.exit(&path);
        result?;

        self.seen.insert(path);
        Ok(())
    }
}

/// Compiles `inputs` with the default DOM bindings.
pub fn generate<P: AsRef<Path>>(inputs: &[P], options: &Options) -> Result<Output> {
    Generator::new(options.clone()).run(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = Options::from_json("{}").unwrap();
        assert_eq!(opts, Options::default());
        assert_eq!(opts.package_name, "views");
        assert_eq!(opts.root_directory, PathBuf::from("."));
    }

    #[test]
    fn test_options_camel_case() {
        let opts = Options::from_json(r#"{"packageName": "ui", "rootDirectory": "/r"}"#).unwrap();
        assert_eq!(opts.package_name, "ui");
        assert_eq!(opts.root_directory, PathBuf::from("/r"));
    }

    #[test]
    fn test_invalid_package_name() {
        let opts = Options {
            package_name: "my-ui".to_string(),
            ..Options::default()
        };
        let err = generate::<&str>(&[], &opts).unwrap_err();
        assert!(matches!(err, CompileError::InvalidPackageName { .. }));
    }

    #[test]
    fn test_empty_run_has_headers() {
        let out = generate::<&str>(&[], &Options::default()).unwrap();
        assert!(out.views.contains("namespace views"));
        assert!(out.views.contains("_document"));
        assert_eq!(out.css, "/* Code generated by viewforge. DO NOT EDIT. */\n");
    }
}
