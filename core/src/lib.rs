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

//! Everything between "I have some source files" and "here is generated
//! code and a DOT graph": parsing annotated types out of source text,
//! solving the dependency graph those types describe, validating it, and
//! generating the code and diagnostics the CLI writes out.

pub mod annotation;
pub mod codegen;
pub mod dot;
pub mod error;
pub mod graph;
pub mod validate;

pub use annotation::{parse_source, ParsedFile};
pub use codegen::{generate, GenerationContext};
pub use error::{cycle_path, Error, GenerationError, GraphError, IoError, ParseError, SourceSpan};
pub use graph::{build_scope, FulfillmentMap, Scope, ScopeChild};
pub use validate::validate;

use safedi_model::{Instantiable, ModuleInfo};

/// Runs the whole pipeline for one root: resolves, builds and validates its
/// `Scope`, then renders its `impl` block. Convenience wrapper around
/// [`FulfillmentMap::build`], [`build_scope`], [`validate`] and [`generate`]
/// for callers (tests, the CLI) that just want one root's generated text.
pub async fn generate_root(
    context: &GenerationContext,
    map: &FulfillmentMap,
    root: &Instantiable,
) -> Result<String, Error> {
    let scope = build_scope(map, root)?;
    validate(map, &scope)?;
    let generated = generate(context, &scope).await?;
    Ok(generated)
}

/// Builds the fulfillment map from every instantiable discovered across a
/// set of parsed modules, merging their `ModuleInfo` first.
pub fn fulfillment_map_from_modules(modules: &[ModuleInfo]) -> Result<FulfillmentMap, Error> {
    let mut merged = ModuleInfo::default();
    for module in modules {
        merged = merged.merge(module.clone());
    }
    FulfillmentMap::build(merged.instantiables).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safedi_model::{DeclarationType, Dependency, Property, TypeDescription};

    fn leaf(name: &str) -> Instantiable {
        Instantiable::new(TypeDescription::simple(name), DeclarationType::Struct)
    }

    #[tokio::test]
    async fn generate_root_runs_the_whole_pipeline() {
        let mut root = leaf("Boiler");
        root.is_root = true;
        root.dependencies.push(Dependency::instantiated(Property::new(
            "heater",
            TypeDescription::simple("Heater"),
        )));
        let heater = leaf("Heater");
        let map = FulfillmentMap::build(vec![root.clone(), heater]).expect("no duplicates");
        let context = GenerationContext::new();
        let generated = generate_root(&context, &map, &root).await.expect("generates");
        assert!(generated.contains("impl Boiler"));
    }

    #[test]
    fn fulfillment_map_from_modules_merges_instantiables() {
        let mut module_a = ModuleInfo::default();
        module_a.instantiables.push(leaf("A"));
        let mut module_b = ModuleInfo::default();
        module_b.instantiables.push(leaf("B"));
        let map = fulfillment_map_from_modules(&[module_a, module_b]).expect("no duplicates");
        assert!(map.get_by_name("A").is_some());
        assert!(map.get_by_name("B").is_some());
    }
}
