//! Per-component registry of user-declared refs.
//!
//! A ref names a generated element (or included component) and becomes a
//! field on the component's interface. Entries keep declaration order so the
//! generated fields are deterministic.

use crate::error::{CompileError, DisallowedReason, Location, Result};
use crate::names::{is_keyword, is_identifier};
use indexmap::IndexMap;

/// Field holding a component's root elements; never usable as a ref.
pub const ROOTS_FIELD: &str = "roots";

/// Object-literal key that sets the prototype instead of defining a field.
const PROTO_KEY: &str = "__proto__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub tag_name: String,
    pub var_name: String,
    /// Type name of the included component, for refs on `<include>`.
    pub included_type: Option<String>,
}

/// Checks a ref identifier against the denylist.
pub fn check_ref_name(at: &Location, name: &str) -> Result<()> {
    let reason = if is_keyword(name) {
        Some(DisallowedReason::Keyword)
    } else if name == ROOTS_FIELD || name == PROTO_KEY {
        Some(DisallowedReason::Internal)
    } else if !is_identifier(name) {
        Some(DisallowedReason::NotIdentifier)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CompileError::DisallowedRefName {
            at: at.clone(),
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Default)]
pub struct RefRegistry {
    entries: IndexMap<String, RefEntry>,
}

impl RefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        at: &Location,
        ref_id: &str,
        tag_name: &str,
        var_name: &str,
        included_type: Option<&str>,
    ) -> Result<()> {
        check_ref_name(at, ref_id)?;

        if let Some(prev) = self.entries.get(ref_id) {
            return Err(CompileError::DuplicateRefName {
                at: at.clone(),
                name: ref_id.to_string(),
                previous_tag: prev.tag_name.clone(),
            });
        }

        self.entries.insert(
            ref_id.to_string(),
            RefEntry {
                tag_name: tag_name.to_string(),
                var_name: var_name.to_string(),
                included_type: included_type.map(str::to_string),
            },
        );
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RefEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Location {
        Location::new("c.html", Some(1))
    }

    #[test]
    fn test_register_and_order() {
        let mut refs = RefRegistry::new();
        refs.register(&at(), "title", "h1", "h1_0", None).unwrap();
        refs.register(&at(), "footer", "include", "include0", Some("Footer"))
            .unwrap();

        let names: Vec<&str> = refs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["title", "footer"]);
        let (_, footer) = refs.iter().nth(1).unwrap();
        assert_eq!(footer.included_type.as_deref(), Some("Footer"));
    }

    #[test]
    fn test_duplicate_names_previous_tag() {
        let mut refs = RefRegistry::new();
        refs.register(&at(), "foo", "div", "div0", None).unwrap();
        let err = refs.register(&at(), "foo", "span", "span0", None).unwrap_err();
        match err {
            CompileError::DuplicateRefName { name, previous_tag, .. } => {
                assert_eq!(name, "foo");
                assert_eq!(previous_tag, "div");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_disallowed_names() {
        let mut refs = RefRegistry::new();
        for (name, expected) in [
            ("class", DisallowedReason::Keyword),
            ("roots", DisallowedReason::Internal),
            ("__proto__", DisallowedReason::Internal),
            ("my-ref", DisallowedReason::NotIdentifier),
        ] {
            match refs.register(&at(), name, "div", "div0", None) {
                Err(CompileError::DisallowedRefName { reason, .. }) => assert_eq!(reason, expected),
                other => panic!("unexpected result for {}: {:?}", name, other),
            }
        }
        assert!(refs.is_empty());
    }
}
