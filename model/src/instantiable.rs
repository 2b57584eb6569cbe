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

use crate::dependency::Dependency;
use crate::initializer::Initializer;
use crate::type_description::TypeDescription;

/// How an instantiable type was declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationType {
    Struct,
    Enum,
    /// A free function tagged `#[safedi::instantiable_extension(for_type =
    /// ...)]`: the instantiable's constructor lives outside the type itself.
    Extension,
}

/// One type the graph builder and code generator know how to construct.
///
/// `additional_types_fulfilled` lets one concrete type stand in for a
/// supertype or trait: the core only enforces that the combination of
/// `concrete_type` and every entry here is injective across the whole
/// fulfillment map (§4.3); that `concrete_type` actually implements each
/// named type is left to the Rust compiler when the generated code is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instantiable {
    pub concrete_type: TypeDescription,
    pub additional_types_fulfilled: Vec<TypeDescription>,
    pub initializer: Option<Initializer>,
    pub dependencies: Vec<Dependency>,
    pub declaration_type: DeclarationType,
    pub is_root: bool,
}

impl Instantiable {
    pub fn new(concrete_type: TypeDescription, declaration_type: DeclarationType) -> Self {
        Instantiable {
            concrete_type,
            additional_types_fulfilled: Vec::new(),
            initializer: None,
            dependencies: Vec::new(),
            declaration_type,
            is_root: false,
        }
    }

    /// Every type that resolves to this instantiable in the fulfillment map:
    /// its own concrete type plus every additional type it stands in for.
    pub fn fulfilled_types(&self) -> impl Iterator<Item = &TypeDescription> {
        std::iter::once(&self.concrete_type).chain(self.additional_types_fulfilled.iter())
    }

    pub fn dependencies_requiring_ancestor(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.source.requires_ancestor())
    }

    pub fn forwarded_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.source.is_forwarded())
    }

    /// The initializer to use when generating code: the declared one if it
    /// is valid for this instantiable's dependencies, otherwise a
    /// synthesized one (§4.1, §9).
    pub fn effective_initializer(&self) -> Initializer {
        if let Some(initializer) = &self.initializer {
            if initializer.is_valid_for_fulfilling(&self.dependencies) {
                return initializer.clone();
            }
        }
        Initializer::synthesize(&self.dependencies)
    }
}
