//! # viewforge
//!
//! Compiles HTML component files into TypeScript that builds the same element
//! tree through the DOM, plus one stylesheet collected from the components'
//! top-level `<style>` blocks.
//!
//! ## Compilation Invariants
//!
//! 1. **One component per file**: `Card.html` becomes `interface Card` and
//!    `function NewCard(): Card`. Lower-case names give unexported
//!    `newCard`-style constructors.
//!
//! 2. **Emit once**: a file is compiled at most once per run, no matter how
//!    many components include it. Components appear in the order their
//!    compilation completes, so an include always precedes its includer.
//!
//! 3. **No cycles**: `<include>` chains are tracked per top-level input and a
//!    path re-entered on the active chain is an error (`A -> B -> A`).
//!
//! 4. **Refs**: `ref="name"` exposes an element (or included component) as a
//!    field. Names are unique per component and never a keyword or `roots`.
//!
//! 5. **All or nothing**: any error aborts the run; no partial output.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod bindings;
mod codegen;
mod component;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod include;
pub mod names;
pub mod refs;
pub mod scope;
pub mod tokenizer;


pub use bindings::{DomBindings, ElementBindings};
pub use error::{CompileError, Result};
pub use generator::{generate, Generator, Options, Output};

#[cfg(feature = "napi")]
#[napi(object)]
pub struct GeneratedOutput {
    pub views: String,
    pub css: String,
}

/// Node entry point. `options_json` uses the camelCase `Options` fields.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_native(
    inputs: Vec<String>,
    options_json: Option<String>,
) -> napi::Result<GeneratedOutput> {
    let options = match options_json {
        Some(json) => {
            Options::from_json(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => Options::default(),
    };
    let output = generate(&inputs, &options).map_err(|e| {
        napi::Error::from_reason(format!("[{}] {}", e.code(), e))
    })?;
    Ok(GeneratedOutput {
        views: output.views,
        css: output.css,
    })
}
