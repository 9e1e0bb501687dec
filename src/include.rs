//! `<include>` support: attribute validation, path resolution and the
//! include history used for cycle detection.

use crate::error::{CompileError, Location, Result};
use crate::tokenizer::Attr;
use indexmap::IndexSet;
use std::path::{Component, Path, PathBuf};

pub const INCLUDE_TAG: &str = "include";

/// Validated attributes of one `<include>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRequest {
    pub path: String,
    pub ref_id: Option<String>,
}

impl IncludeRequest {
    /// Accepts exactly `path` (required) and `ref` (optional).
    pub fn from_attrs(at: &Location, attrs: &[Attr]) -> Result<Self> {
        let mut path = None;
        let mut ref_id = None;

        for attr in attrs {
            match attr.key.as_str() {
                "path" => path = Some(attr.value.clone()),
                "ref" => ref_id = Some(attr.value.clone()),
                other => {
                    return Err(CompileError::InvalidIncludeAttribute {
                        at: at.clone(),
                        attribute: other.to_string(),
                    })
                }
            }
        }

        match path {
            Some(path) => Ok(Self { path, ref_id }),
            None => Err(CompileError::MissingPathAttribute { at: at.clone() }),
        }
    }
}

/// Lexically normalizes a path: drops `.` and folds `..` into its parent.
/// The filesystem is not consulted, so missing files normalize too.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolves an include `path` value. Rooted values are taken relative to
/// `root_directory`; everything else relative to the including file.
pub fn resolve_include_path(including: &Path, value: &str, root_directory: &Path) -> PathBuf {
    let target = Path::new(value);
    let joined = if target.has_root() {
        let relative = value.trim_start_matches(['/', '\\']);
        root_directory.join(relative)
    } else {
        including
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(target)
    };
    normalize_path(&joined)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Paths currently being compiled along the active include chain, oldest
/// first. Scoped to one top-level input.
#[derive(Debug, Default)]
pub struct IncludeHistory {
    paths: IndexSet<PathBuf>,
}

impl IncludeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as in flight, failing if it already is.
    pub fn enter(&mut self, path: &Path) -> Result<()> {
        if self.paths.contains(path) {
            let mut cycle: Vec<String> = self.paths.iter().map(|p| base_name(p)).collect();
            cycle.push(base_name(path));
            return Err(CompileError::IncludeCycle {
                at: Location::new(path, None),
                cycle,
            });
        }
        self.paths.insert(path.to_path_buf());
        Ok(())
    }

    pub fn exit(&mut self, path: &Path) {
        self.paths.shift_remove(path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
