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

use serde::{Deserialize, Serialize};

/// The shape of a single `use` item: a plain path, a glob (`use foo::*`), or
/// a brace list (`use foo::{a, b}`), each optionally renamed with `as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportKind {
    Simple,
    Glob,
    Renamed,
    Braced,
}

/// A `use` statement carried through from a parsed source file so that code
/// generated against its instantiables still compiles.
///
/// `submodule` holds everything after the top-level crate/module name
/// (`collections::HashMap` in `use std::collections::HashMap`), so that two
/// imports of different items from the same crate can still be told apart
/// and deduplicated correctly when merging imports across files (§4.3's
/// driver-level union).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportStatement {
    pub module_name: String,
    pub submodule: Option<String>,
    pub kind: ImportKind,
    pub attributes: Vec<String>,
    pub is_pub: bool,
}

impl ImportStatement {
    pub fn new(module_name: impl Into<String>) -> Self {
        ImportStatement {
            module_name: module_name.into(),
            submodule: None,
            kind: ImportKind::Simple,
            attributes: Vec::new(),
            is_pub: false,
        }
    }

    /// The full path this import resolves to, used as the dedupe key when
    /// merging imports from multiple files.
    pub fn full_path(&self) -> String {
        match &self.submodule {
            Some(submodule) => format!("{}::{submodule}", self.module_name),
            None => self.module_name.clone(),
        }
    }
}

impl PartialOrd for ImportStatement {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImportStatement {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.full_path().cmp(&other.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_includes_submodule_when_present() {
        let mut import = ImportStatement::new("std");
        import.submodule = Some("collections::HashMap".to_owned());
        assert_eq!(import.full_path(), "std::collections::HashMap");
    }

    #[test]
    fn sorts_by_full_path() {
        let mut imports = vec![ImportStatement::new("std"), ImportStatement::new("anyhow")];
        imports.sort();
        assert_eq!(imports[0].module_name, "anyhow");
    }
}
