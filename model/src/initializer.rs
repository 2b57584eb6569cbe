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
use crate::type_description::TypeDescription;

/// One parameter of an [`Initializer`].
///
/// `outer_label` mirrors the distinction some source languages make between
/// the label used at the call site and the one bound inside the function
/// body; in Rust source both are always the same identifier, so
/// `outer_label` is `None` for everything the annotation parser produces and
/// exists only so the model can still represent an initializer synthesized
/// for, or imported from, a non-Rust caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    pub outer_label: Option<String>,
    pub inner_label: String,
    pub type_description: TypeDescription,
    pub has_default: bool,
}

impl Argument {
    pub fn new(inner_label: impl Into<String>, type_description: TypeDescription) -> Self {
        Argument {
            outer_label: None,
            inner_label: inner_label.into(),
            type_description,
            has_default: false,
        }
    }

    pub fn with_default(mut self, has_default: bool) -> Self {
        self.has_default = has_default;
        self
    }
}

/// A constructor: an ordered list of [`Argument`]s, plus whether invoking it
/// can fail and whether it is async.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Initializer {
    pub arguments: Vec<Argument>,
    pub is_async: bool,
    pub is_fallible: bool,
}

impl Initializer {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Initializer {
            arguments,
            is_async: false,
            is_fallible: false,
        }
    }

    /// An initializer is valid for fulfilling `dependencies` iff every
    /// dependency's property appears as an argument with a matching
    /// `inner_label` and `type_description`, and every argument *not*
    /// matched by a dependency has a default.
    pub fn is_valid_for_fulfilling(&self, dependencies: &[Dependency]) -> bool {
        for dependency in dependencies {
            let matched = self.arguments.iter().any(|argument| {
                argument.inner_label == dependency.property.label
                    && argument.type_description == dependency.property.type_description
            });
            if !matched {
                return false;
            }
        }
        self.arguments.iter().all(|argument| {
            let is_a_dependency = dependencies.iter().any(|dependency| {
                dependency.property.label == argument.inner_label
                    && dependency.property.type_description == argument.type_description
            });
            is_a_dependency || argument.has_default
        })
    }

    /// Builds the initializer the graph builder synthesizes when an
    /// instantiable declares no usable constructor of its own: exactly the
    /// dependency arguments, in lexicographic order by label.
    pub fn synthesize(dependencies: &[Dependency]) -> Self {
        let mut arguments: Vec<Argument> = dependencies
            .iter()
            .map(|dependency| {
                Argument::new(
                    dependency.property.label.clone(),
                    dependency.property.type_description.clone(),
                )
            })
            .collect();
        arguments.sort_by(|a, b| a.inner_label.cmp(&b.inner_label));
        Initializer::new(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    fn dependency(label: &str, type_name: &str) -> Dependency {
        Dependency::instantiated(Property::new(label, TypeDescription::simple(type_name)))
    }

    #[test]
    fn valid_when_every_dependency_matched_and_extras_have_defaults() {
        let dependencies = vec![dependency("heater", "Heater")];
        let initializer = Initializer::new(vec![
            Argument::new("heater", TypeDescription::simple("Heater")),
            Argument::new("retries", TypeDescription::simple("u32")).with_default(true),
        ]);
        assert!(initializer.is_valid_for_fulfilling(&dependencies));
    }

    #[test]
    fn invalid_when_an_extra_argument_has_no_default() {
        let dependencies = vec![dependency("heater", "Heater")];
        let initializer = Initializer::new(vec![
            Argument::new("heater", TypeDescription::simple("Heater")),
            Argument::new("retries", TypeDescription::simple("u32")),
        ]);
        assert!(!initializer.is_valid_for_fulfilling(&dependencies));
    }

    #[test]
    fn invalid_when_a_dependency_is_not_an_argument() {
        let dependencies = vec![dependency("heater", "Heater")];
        let initializer = Initializer::new(vec![]);
        assert!(!initializer.is_valid_for_fulfilling(&dependencies));
    }

    #[test]
    fn synthesized_initializer_is_sorted_and_covers_every_dependency() {
        let dependencies = vec![dependency("zeta", "Z"), dependency("alpha", "A")];
        let synthesized = Initializer::synthesize(&dependencies);
        assert_eq!(synthesized.arguments[0].inner_label, "alpha");
        assert_eq!(synthesized.arguments[1].inner_label, "zeta");
        assert!(synthesized.is_valid_for_fulfilling(&dependencies));
    }
}
