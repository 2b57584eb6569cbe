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

//! Builds the fulfillment map and, for each root instantiable, the `Scope`
//! tree the code generator walks.

use std::collections::{HashMap, HashSet};

use safedi_model::{Dependency, DependencySource, Instantiable, Property};

use crate::error::{cycle_path, GraphError};

/// Maps every type an instantiable fulfills (its own concrete type, plus
/// `additional_types_fulfilled`) to that instantiable. Built once per run
/// and treated as immutable afterward (§5).
#[derive(Debug)]
pub struct FulfillmentMap {
    instantiables: Vec<Instantiable>,
    index: HashMap<String, usize>,
}

impl FulfillmentMap {
    pub fn build(instantiables: Vec<Instantiable>) -> Result<Self, GraphError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, instantiable) in instantiables.iter().enumerate() {
            for fulfilled_type in instantiable.fulfilled_types() {
                let key = fulfilled_type.to_string();
                if let Some(&existing) = index.get(&key) {
                    return Err(GraphError::DuplicateFulfillment {
                        fulfilled_type: key,
                        first: instantiables[existing].concrete_type.to_string(),
                        second: instantiable.concrete_type.to_string(),
                    });
                }
                index.insert(key, position);
            }
        }
        Ok(FulfillmentMap { instantiables, index })
    }

    pub fn get(&self, key: &str) -> Option<&Instantiable> {
        self.index.get(key).map(|&position| &self.instantiables[position])
    }

    pub fn resolve(&self, dependency: &Dependency) -> Option<&Instantiable> {
        self.get(&dependency.effective_fulfilling_type().to_string())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Instantiable> {
        self.instantiables
            .iter()
            .find(|instantiable| instantiable.concrete_type.outer_name() == Some(name))
    }

    pub fn all(&self) -> impl Iterator<Item = &Instantiable> {
        self.instantiables.iter()
    }

    /// Instantiables with no provider above them: either explicitly marked
    /// `is_root`, or simply never named as the fulfiller of an `instantiated`
    /// dependency anywhere in the map (§4.3 step 2).
    pub fn roots(&self) -> Vec<&Instantiable> {
        let mut referenced: HashSet<usize> = HashSet::new();
        for instantiable in &self.instantiables {
            for dependency in &instantiable.dependencies {
                if !dependency.source.is_instantiated() {
                    continue;
                }
                if let Some(provider) = self.resolve(dependency) {
                    if let Some(&position) = self
                        .index
                        .get(&provider.concrete_type.to_string())
                    {
                        referenced.insert(position);
                    }
                }
            }
        }
        self.instantiables
            .iter()
            .enumerate()
            .filter(|(position, instantiable)| instantiable.is_root || !referenced.contains(position))
            .map(|(_, instantiable)| instantiable)
            .collect()
    }
}

/// One child of a [`Scope`]: either a dependency this scope instantiates
/// itself (recursively, via its own sub-scope), or one that re-introduces an
/// ancestor-provided property under a new label/type.
#[derive(Debug, Clone)]
pub enum ScopeChild {
    Instantiated(Property, Box<Scope>),
    Aliased {
        property: Property,
        fulfilling_property: String,
        erased_to_concrete_existential: bool,
    },
}

impl ScopeChild {
    pub fn property(&self) -> &Property {
        match self {
            ScopeChild::Instantiated(property, _) => property,
            ScopeChild::Aliased { property, .. } => property,
        }
    }
}

/// A graph node owned by one [`Instantiable`]: transient, built by the
/// graph builder and consumed by the code generator.
#[derive(Debug, Clone)]
pub struct Scope {
    pub instantiable: Instantiable,
    pub properties_to_instantiate: Vec<ScopeChild>,
}

impl Scope {
    pub fn name(&self) -> String {
        self.instantiable
            .concrete_type
            .outer_name()
            .unwrap_or_default()
            .to_owned()
    }
}

/// Builds the `Scope` tree rooted at `root`, running cycle detection as it
/// descends (§4.4).
pub fn build_scope(map: &FulfillmentMap, root: &Instantiable) -> Result<Scope, GraphError> {
    let mut ancestors = Vec::new();
    build_scope_inner(map, root, &mut ancestors)
}

fn build_scope_inner(
    map: &FulfillmentMap,
    instantiable: &Instantiable,
    ancestors: &mut Vec<String>,
) -> Result<Scope, GraphError> {
    let name = instantiable
        .concrete_type
        .outer_name()
        .unwrap_or_default()
        .to_owned();

    if ancestors.contains(&name) {
        return Err(GraphError::Cycle(cycle_path(ancestors, &name)));
    }
    ancestors.push(name);

    let mut properties_to_instantiate = Vec::new();
    for dependency in &instantiable.dependencies {
        match &dependency.source {
            DependencySource::Instantiated => {
                let provider = map.resolve(dependency).ok_or_else(|| GraphError::MissingFulfillment {
                    instantiable: instantiable.concrete_type.to_string(),
                    property: dependency.property.label.clone(),
                    fulfilling_type: dependency.effective_fulfilling_type().to_string(),
                })?;
                let child = build_scope_inner(map, provider, ancestors)?;
                properties_to_instantiate.push(ScopeChild::Instantiated(
                    dependency.property.clone(),
                    Box::new(child),
                ));
            }
            DependencySource::Aliased {
                fulfilling_property,
                erased_to_concrete_existential,
            } => {
                properties_to_instantiate.push(ScopeChild::Aliased {
                    property: dependency.property.clone(),
                    fulfilling_property: fulfilling_property.clone(),
                    erased_to_concrete_existential: *erased_to_concrete_existential,
                });
            }
            DependencySource::Received | DependencySource::Forwarded => {
                // Resolved by label against an ancestor scope; produces no
                // child of its own.
            }
        }
    }

    ancestors.pop();
    Ok(Scope {
        instantiable: instantiable.clone(),
        properties_to_instantiate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use safedi_model::{DeclarationType, Property, TypeDescription};

    fn leaf(name: &str) -> Instantiable {
        Instantiable::new(TypeDescription::simple(name), DeclarationType::Struct)
    }

    #[test]
    fn detects_fulfillment_duplicates() {
        let mut a = leaf("Shared");
        a.is_root = true;
        let mut b = leaf("Shared");
        b.is_root = true;
        let result = FulfillmentMap::build(vec![a, b]);
        assert!(matches!(result, Err(GraphError::DuplicateFulfillment { .. })));
    }

    #[test]
    fn roots_exclude_instantiables_referenced_as_providers() {
        let mut root = leaf("Boiler");
        root.dependencies.push(Dependency::instantiated(Property::new(
            "heater",
            TypeDescription::simple("Heater"),
        )));
        let heater = leaf("Heater");
        let map = FulfillmentMap::build(vec![root, heater]).expect("no duplicates");
        let roots: Vec<&str> = map
            .roots()
            .iter()
            .map(|instantiable| instantiable.concrete_type.outer_name().unwrap())
            .collect();
        assert_eq!(roots, vec!["Boiler"]);
    }

    #[test]
    fn builds_scope_with_instantiated_child() {
        let mut root = leaf("Boiler");
        root.dependencies.push(Dependency::instantiated(Property::new(
            "heater",
            TypeDescription::simple("Heater"),
        )));
        let heater = leaf("Heater");
        let map = FulfillmentMap::build(vec![root.clone(), heater]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");
        assert_eq!(scope.properties_to_instantiate.len(), 1);
    }

    #[test]
    fn detects_cycle() {
        let mut a = leaf("A");
        a.dependencies
            .push(Dependency::instantiated(Property::new("b", TypeDescription::simple("B"))));
        let mut b = leaf("B");
        b.dependencies
            .push(Dependency::instantiated(Property::new("a", TypeDescription::simple("A"))));
        let map = FulfillmentMap::build(vec![a.clone(), b]).expect("no duplicates");
        let result = build_scope(&map, &a);
        assert!(matches!(result, Err(GraphError::Cycle(_))));
    }

    #[test]
    fn missing_fulfillment_is_an_error() {
        let mut root = leaf("Boiler");
        root.dependencies.push(Dependency::instantiated(Property::new(
            "heater",
            TypeDescription::simple("Heater"),
        )));
        let map = FulfillmentMap::build(vec![root.clone()]).expect("no duplicates");
        let result = build_scope(&map, &root);
        assert!(matches!(result, Err(GraphError::MissingFulfillment { .. })));
    }
}
