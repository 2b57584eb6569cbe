/*
Copyright 2020 Google LLC

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    https://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The error taxonomy: `ParseError`, `GraphError` and `GenerationError`
//! cover the three stages that can fail for reasons specific to this tool;
//! `IoError` covers everything that reaches out to the filesystem. All four
//! are folded into one top-level [`Error`] so a caller that only wants to
//! print and exit (the CLI) can match on nothing and a caller that wants to
//! distinguish failure modes (tests) still can.

use std::fmt;
use std::path::PathBuf;

use proc_macro2::LineColumn;

/// A location in a source file, used to annotate diagnostics. Computed from
/// `proc_macro2`/`syn` spans against the original file text; since this tool
/// never actually runs inside a `proc_macro` invocation, spans only carry
/// real line/column information when the `span-locations` feature is
/// enabled, which the workspace does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub file: Option<PathBuf>,
    pub start: LineColumn,
    pub end: LineColumn,
}

impl SourceSpan {
    pub fn new(file: Option<PathBuf>, span: proc_macro2::Span) -> Self {
        SourceSpan {
            file,
            start: span.start(),
            end: span.end(),
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_owned());
        write!(
            f,
            "{file}:{}:{}",
            self.start.line, self.start.column
        )
    }
}

/// Failure parsing a source file's `safedi` annotations (§4.1, §7).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{span}: {message}")]
    MalformedAttribute { span: SourceSpan, message: String },
    #[error("{span}: unknown annotation argument `{argument}` on `{attribute}`")]
    UnknownArgument {
        span: SourceSpan,
        attribute: String,
        argument: String,
    },
    #[error("{span}: `#[safedi::instantiable]` on `{name}` is nested inside another item; nested instantiables are not supported")]
    NestedInstantiable { span: SourceSpan, name: String },
    #[error("{span}: extension instantiable `{function}` must have signature `pub fn instantiate() -> {for_type}` with no generics and no `async`")]
    MalformedExtensionSignature {
        span: SourceSpan,
        function: String,
        for_type: String,
    },
    #[error("{span}: property `{label}` has more than one lifecycle attribute")]
    MultipleLifecycleAttributes { span: SourceSpan, label: String },
    #[error("{span}: `{name}` has more than one forwarded property")]
    MultipleForwardedProperties { span: SourceSpan, name: String },
    #[error("{span}: `{label}` uses `fulfilled_by_type` but its declared type is not an erased instantiator")]
    FulfilledByTypeOnNonErased { span: SourceSpan, label: String },
    #[error("{span}: `{label}` is an erased instantiator but has no `fulfilled_by_type`")]
    ErasedInstantiatorWithoutFulfilledByType { span: SourceSpan, label: String },
    #[error("{span}: `{name}` has no usable initializer and property `{label}` has no lifecycle attribute and no default")]
    UnfulfillableProperty {
        span: SourceSpan,
        name: String,
        label: String,
    },
    #[error("failed to parse source as Rust: {0}")]
    Syn(#[from] syn::Error),
}

/// Failure building or validating the dependency graph (§4.3, §4.4, §7).
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate fulfillment: both `{first}` and `{second}` fulfill `{fulfilled_type}`")]
    DuplicateFulfillment {
        fulfilled_type: String,
        first: String,
        second: String,
    },
    #[error("`{instantiable}.{property}` is declared `#[safedi::instantiated]` but no instantiable fulfills `{fulfilling_type}`")]
    MissingFulfillment {
        instantiable: String,
        property: String,
        fulfilling_type: String,
    },
    #[error("cyclic dependency detected: {0}")]
    Cycle(String),
    #[error("property `{property}` of `{instantiable}` is not received from any ancestor")]
    UnreceivedProperty {
        instantiable: String,
        property: String,
    },
    #[error("erased instantiator `{property}` of `{instantiable}` has generic argument `{found}`, expected one matching its forwarded properties ({expected})")]
    ErasedInstantiatorGenericMismatch {
        instantiable: String,
        property: String,
        found: String,
        expected: String,
    },
}

/// Failure generating code for a validated graph (§4.5, §7).
///
/// `Clone` lets [`crate::codegen::GenerationContext`] cache a
/// `Result<String, GenerationError>` behind a `tokio::sync::OnceCell` and
/// hand every concurrent reader its own copy of the cached outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("`{instantiable}` has no initializer that can fulfill its declared dependencies")]
    NoFulfillingInitializer { instantiable: String },
}

/// I/O failure from the file enumerator, artifact reader or output writer
/// (§7).
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to enumerate {path}: {source}")]
    Enumerate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Codec(#[from] safedi_model::codec::CodecError),
}

/// The union of everything this crate can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Renders the tool's standard "A -> B -> C -> A" cycle description from the
/// chain of instantiable names currently being descended into, plus the one
/// that was about to be re-entered.
pub fn cycle_path(ancestors: &[String], reentered: &str) -> String {
    let start = ancestors
        .iter()
        .position(|name| name == reentered)
        .unwrap_or(0);
    let mut path: Vec<&str> = ancestors[start..].iter().map(String::as_str).collect();
    path.push(reentered);
    path.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_path_renders_arrow_chain_starting_at_the_reentered_node() {
        let ancestors = vec!["A".to_owned(), "B".to_owned(), "C".to_owned()];
        assert_eq!(cycle_path(&ancestors, "B"), "B -> C -> B");
    }

    #[test]
    fn cycle_path_handles_self_cycle() {
        let ancestors = vec!["A".to_owned()];
        assert_eq!(cycle_path(&ancestors, "A"), "A -> A");
    }
}
