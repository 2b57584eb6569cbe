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

//! The data model shared by every stage of the dependency graph pipeline,
//! plus the `.safedi` module artifact codec.
//!
//! Nothing in this crate parses source or builds a graph; it only describes
//! the shapes that the annotation parser produces, the graph builder
//! consumes, and the `.safedi` codec serializes. `safedi-core` depends on
//! this crate; this crate depends on nothing project-specific.

pub mod codec;
pub mod dependency;
pub mod import;
pub mod initializer;
pub mod instantiable;
pub mod module_info;
pub mod property;
pub mod type_description;

pub use dependency::{Dependency, DependencySource};
pub use import::{ImportKind, ImportStatement};
pub use initializer::{Argument, Initializer};
pub use instantiable::{DeclarationType, Instantiable};
pub use module_info::ModuleInfo;
pub use property::{Property, PropertyType};
pub use type_description::{ExistentialKind, TupleElement, TypeDescription};
