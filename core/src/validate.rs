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

//! Checks that run over an already-built `Scope` tree, before code
//! generation: property-fulfilment propagation and the erased-instantiator
//! generic check (§4.4). Cycle detection and fulfillment-map uniqueness are
//! both enforced earlier, while the graph itself is being built
//! ([`crate::graph`]), since both are properties of construction rather than
//! of a finished tree.

use std::collections::HashSet;

use safedi_model::{Dependency, DependencySource, TupleElement, TypeDescription};

use crate::error::GraphError;
use crate::graph::{FulfillmentMap, Scope, ScopeChild};

/// Runs every post-construction validator over `scope`.
pub fn validate(map: &FulfillmentMap, scope: &Scope) -> Result<(), GraphError> {
    validate_received_propagation(scope, &HashSet::new())?;
    validate_erased_instantiators(map, scope)?;
    Ok(())
}

fn validate_received_propagation(
    scope: &Scope,
    produced_by_ancestors: &HashSet<String>,
) -> Result<(), GraphError> {
    for dependency in &scope.instantiable.dependencies {
        match &dependency.source {
            DependencySource::Received => {
                if !produced_by_ancestors.contains(&dependency.property.label) {
                    return Err(GraphError::UnreceivedProperty {
                        instantiable: scope.name(),
                        property: dependency.property.label.clone(),
                    });
                }
            }
            DependencySource::Aliased {
                fulfilling_property, ..
            } => {
                if !produced_by_ancestors.contains(fulfilling_property) {
                    return Err(GraphError::UnreceivedProperty {
                        instantiable: scope.name(),
                        property: dependency.property.label.clone(),
                    });
                }
            }
            DependencySource::Instantiated | DependencySource::Forwarded => {}
        }
    }

    let mut produced_here = produced_by_ancestors.clone();
    for dependency in &scope.instantiable.dependencies {
        match dependency.source {
            DependencySource::Instantiated
            | DependencySource::Forwarded
            | DependencySource::Aliased { .. } => {
                produced_here.insert(dependency.property.label.clone());
            }
            DependencySource::Received => {}
        }
    }

    for child in &scope.properties_to_instantiate {
        if let ScopeChild::Instantiated(_, child_scope) = child {
            validate_received_propagation(child_scope, &produced_here)?;
        }
    }
    Ok(())
}

fn validate_erased_instantiators(map: &FulfillmentMap, scope: &Scope) -> Result<(), GraphError> {
    for dependency in &scope.instantiable.dependencies {
        if !dependency.property.property_type().is_erased() {
            continue;
        }
        let provider = match map.resolve(dependency) {
            Some(provider) => provider,
            None => continue, // already reported as a missing-fulfillment error during scope construction
        };

        // Sorted by label, matching `codegen.rs`'s `forwarded_closure_params`: this
        // tuple shape has to agree with the one codegen actually emits, not some
        // other order that happens to also be deterministic.
        let mut forwarded: Vec<&Dependency> = provider.forwarded_dependencies().collect();
        forwarded.sort_by_key(|dependency| dependency.property.label.clone());

        let expected = match forwarded.len() {
            0 => TypeDescription::Void,
            1 => forwarded[0].property.type_description.clone(),
            _ => TypeDescription::Tuple {
                elements: forwarded
                    .into_iter()
                    .map(|dependency| TupleElement {
                        label: None,
                        type_description: Box::new(dependency.property.type_description.clone()),
                    })
                    .collect(),
            },
        };

        let found = dependency
            .property
            .type_description
            .generic_args()
            .first()
            .cloned()
            .unwrap_or(TypeDescription::Void);

        if found != expected {
            return Err(GraphError::ErasedInstantiatorGenericMismatch {
                instantiable: scope.name(),
                property: dependency.property.label.clone(),
                found: found.to_string(),
                expected: expected.to_string(),
            });
        }
    }

    for child in &scope.properties_to_instantiate {
        if let ScopeChild::Instantiated(_, child_scope) = child {
            validate_erased_instantiators(map, child_scope)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_scope;
    use safedi_model::{DeclarationType, Dependency, Instantiable, Property};

    fn leaf(name: &str) -> Instantiable {
        Instantiable::new(TypeDescription::simple(name), DeclarationType::Struct)
    }

    #[test]
    fn received_property_without_an_ancestor_is_rejected() {
        let mut root = leaf("Boiler");
        root.is_root = true;
        root.dependencies.push(Dependency::received(Property::new(
            "shared",
            TypeDescription::simple("Shared"),
        )));
        let map = FulfillmentMap::build(vec![root.clone()]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");
        let result = validate(&map, &scope);
        assert!(matches!(result, Err(GraphError::UnreceivedProperty { .. })));
    }

    #[test]
    fn received_property_produced_by_an_ancestor_is_accepted() {
        let mut root = leaf("App");
        root.is_root = true;
        root.dependencies.push(Dependency::forwarded(Property::new(
            "shared",
            TypeDescription::simple("Shared"),
        )));
        root.dependencies.push(Dependency::instantiated(Property::new(
            "widget",
            TypeDescription::simple("Widget"),
        )));
        let mut widget = leaf("Widget");
        widget.dependencies.push(Dependency::received(Property::new(
            "shared",
            TypeDescription::simple("Shared"),
        )));
        let map = FulfillmentMap::build(vec![root.clone(), widget]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");
        validate(&map, &scope).expect("should validate cleanly");
    }

    #[test]
    fn erased_instantiator_generic_mismatch_is_rejected() {
        let mut root = leaf("App");
        root.is_root = true;
        root.dependencies.push(Dependency::instantiated(Property::new(
            "make_greeting",
            TypeDescription::Simple {
                name: "ErasedInstantiator".to_owned(),
                generic_args: vec![
                    TypeDescription::simple("u32"),
                    TypeDescription::simple("Greeting"),
                ],
            },
        )));
        root.dependencies[0].fulfilling_type = Some(TypeDescription::simple("Greeting"));
        let mut greeting = leaf("Greeting");
        greeting
            .dependencies
            .push(Dependency::forwarded(Property::new(
                "name",
                TypeDescription::simple("String"),
            )));
        let map = FulfillmentMap::build(vec![root.clone(), greeting]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");
        let result = validate(&map, &scope);
        assert!(matches!(
            result,
            Err(GraphError::ErasedInstantiatorGenericMismatch { .. })
        ));
    }
}
