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

use crate::import::ImportStatement;
use crate::instantiable::Instantiable;

/// The serialized artifact produced per module: exactly the information a
/// downstream crate's build needs to merge this module's instantiables with
/// its own, and nothing else (no source spans, no diagnostics — see the
/// codec's module doc).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub imports: Vec<ImportStatement>,
    pub instantiables: Vec<Instantiable>,
}

impl ModuleInfo {
    pub fn new() -> Self {
        ModuleInfo::default()
    }

    /// Merges `other` into `self`, keeping this module's instantiables
    /// first and appending the other module's. Imports are merged and
    /// deduplicated by `ImportStatement::full_path`, matching the driver's
    /// union-of-imports step (§4.3).
    pub fn merge(mut self, other: ModuleInfo) -> Self {
        self.instantiables.extend(other.instantiables);
        for import in other.imports {
            if !self
                .imports
                .iter()
                .any(|existing| existing.full_path() == import.full_path())
            {
                self.imports.push(import);
            }
        }
        self
    }
}
