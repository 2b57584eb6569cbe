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

use crate::type_description::TypeDescription;

/// A named, typed field on an [`crate::Instantiable`].
///
/// Equality and ordering are both driven by `label` and `type_description`
/// alone; ordering is used to keep generated `let` bindings and serialized
/// output in a deterministic, file-order-independent sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    pub label: String,
    pub type_description: TypeDescription,
}

impl Property {
    pub fn new(label: impl Into<String>, type_description: TypeDescription) -> Self {
        Property {
            label: label.into(),
            type_description,
        }
    }

    /// The [`PropertyType`] this property's declared type implies.
    pub fn property_type(&self) -> PropertyType {
        PropertyType::derive(&self.type_description)
    }
}

impl PartialOrd for Property {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Property {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.label.cmp(&other.label)
    }
}

/// What shape of value a [`Property`] holds, derived purely from its
/// [`TypeDescription`] by recognizing the four handle types `safedi`'s
/// runtime crate exports plus their `Sendable` counterparts. Anything else is
/// a `Constant`: a value built once, at the moment its owning scope is
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Constant,
    Instantiator,
    ErasedInstantiator,
    SendableInstantiator,
    SendableErasedInstantiator,
}

impl PropertyType {
    pub fn derive(type_description: &TypeDescription) -> Self {
        match type_description.outer_name() {
            Some("Instantiator") => PropertyType::Instantiator,
            Some("ErasedInstantiator") => PropertyType::ErasedInstantiator,
            Some("SendableInstantiator") => PropertyType::SendableInstantiator,
            Some("SendableErasedInstantiator") => PropertyType::SendableErasedInstantiator,
            _ => PropertyType::Constant,
        }
    }

    /// `true` for the two variants whose first generic argument is the
    /// forwarded-arguments type rather than the constructed type, and which
    /// therefore require a `fulfilled_by_type` annotation (§4.1) to name the
    /// concrete provider.
    pub fn is_erased(self) -> bool {
        matches!(
            self,
            PropertyType::ErasedInstantiator | PropertyType::SendableErasedInstantiator
        )
    }

    /// `true` for either `Instantiator`-family variant: the value is not
    /// built until its `get()`/`get(args)` is called.
    pub fn is_deferred(self) -> bool {
        !matches!(self, PropertyType::Constant)
    }

    pub fn must_be_send_sync(self) -> bool {
        matches!(
            self,
            PropertyType::SendableInstantiator | PropertyType::SendableErasedInstantiator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_constant_for_plain_types() {
        let property = Property::new("logger", TypeDescription::simple("Logger"));
        assert_eq!(property.property_type(), PropertyType::Constant);
    }

    #[test]
    fn derives_instantiator_family_by_outer_name() {
        let instantiator = TypeDescription::Simple {
            name: "Instantiator".to_owned(),
            generic_args: vec![TypeDescription::simple("Boiler")],
        };
        assert_eq!(PropertyType::derive(&instantiator), PropertyType::Instantiator);

        let erased = TypeDescription::Simple {
            name: "ErasedInstantiator".to_owned(),
            generic_args: vec![
                TypeDescription::simple("String"),
                TypeDescription::simple("Greeting"),
            ],
        };
        assert_eq!(PropertyType::derive(&erased), PropertyType::ErasedInstantiator);
        assert!(PropertyType::derive(&erased).is_erased());
    }

    #[test]
    fn orders_by_label() {
        let mut properties = vec![
            Property::new("zeta", TypeDescription::simple("Z")),
            Property::new("alpha", TypeDescription::simple("A")),
        ];
        properties.sort();
        assert_eq!(properties[0].label, "alpha");
    }
}
