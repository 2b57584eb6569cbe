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

use crate::property::Property;
use crate::type_description::TypeDescription;

/// Where a [`Dependency`]'s value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencySource {
    /// `#[safedi::instantiated]`: built by the owning scope itself, by
    /// recursing into whichever `Instantiable` fulfills the property's type.
    Instantiated,
    /// `#[safedi::received]` with no rename: supplied by an ancestor scope
    /// under the same label and type.
    Received,
    /// `#[safedi::forwarded]`: supplied by the caller at the moment the
    /// owning scope is constructed, rather than by any ancestor.
    Forwarded,
    /// `#[safedi::received(fulfilled_by_dependency_named = ..., of_type =
    /// ..., erased_to_concrete_existential = ...)]`: this property
    /// re-introduces an ancestor property under a new label and/or type.
    Aliased {
        fulfilling_property: String,
        erased_to_concrete_existential: bool,
    },
}

impl DependencySource {
    pub fn is_instantiated(&self) -> bool {
        matches!(self, DependencySource::Instantiated)
    }

    pub fn is_forwarded(&self) -> bool {
        matches!(self, DependencySource::Forwarded)
    }

    /// `true` for anything that must resolve to something an ancestor scope
    /// produces: plain `received` and `aliased` both do, `forwarded` does
    /// not (it comes from the caller, not an ancestor), and `instantiated`
    /// does not (the scope builds it itself).
    pub fn requires_ancestor(&self) -> bool {
        matches!(self, DependencySource::Received | DependencySource::Aliased { .. })
    }
}

/// One dependency of an [`crate::Instantiable`]: a [`Property`] together with
/// where its value comes from, and (when known) the concrete type that
/// fulfills it.
///
/// `fulfilling_type` starts out as whatever `fulfilled_by_type`/`of_type`
/// the annotation parser read off the attribute, and is filled in by the
/// graph builder for plain `instantiated` dependencies once the fulfillment
/// map is known. It stays `None` for `received` and `forwarded` dependencies,
/// which are resolved by label instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub property: Property,
    pub source: DependencySource,
    pub fulfilling_type: Option<TypeDescription>,
}

impl Dependency {
    pub fn instantiated(property: Property) -> Self {
        Dependency {
            property,
            source: DependencySource::Instantiated,
            fulfilling_type: None,
        }
    }

    pub fn received(property: Property) -> Self {
        Dependency {
            property,
            source: DependencySource::Received,
            fulfilling_type: None,
        }
    }

    pub fn forwarded(property: Property) -> Self {
        Dependency {
            property,
            source: DependencySource::Forwarded,
            fulfilling_type: None,
        }
    }

    pub fn aliased(
        property: Property,
        fulfilling_property: impl Into<String>,
        erased_to_concrete_existential: bool,
    ) -> Self {
        Dependency {
            property,
            source: DependencySource::Aliased {
                fulfilling_property: fulfilling_property.into(),
                erased_to_concrete_existential,
            },
            fulfilling_type: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.property.label
    }

    /// The type to look up in the fulfillment map for an `instantiated`
    /// dependency: the explicit `fulfilled_by_type` override when present,
    /// otherwise the property's own declared type.
    pub fn effective_fulfilling_type(&self) -> &TypeDescription {
        self.fulfilling_type
            .as_ref()
            .unwrap_or(&self.property.type_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliased_requires_ancestor_plain_received_does_too() {
        let property = Property::new("shared", TypeDescription::simple("Shared"));
        let aliased = Dependency::aliased(property.clone(), "shared", true);
        assert!(aliased.source.requires_ancestor());

        let received = Dependency::received(property);
        assert!(received.source.requires_ancestor());
    }

    #[test]
    fn forwarded_and_instantiated_do_not_require_ancestor() {
        let property = Property::new("name", TypeDescription::simple("String"));
        assert!(!Dependency::forwarded(property.clone()).source.requires_ancestor());
        assert!(!Dependency::instantiated(property).source.requires_ancestor());
    }
}
