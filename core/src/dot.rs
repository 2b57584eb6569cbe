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

//! Renders a `Scope` tree as a Graphviz `digraph` for `--dot-file-output`
//! (§4.6). Purely descriptive: no part of code generation reads this back.

use std::fmt::Write as _;

use crate::graph::{Scope, ScopeChild};

/// Renders `scope` and everything beneath it as one `digraph` block.
pub fn render(scope: &Scope) -> String {
    let mut out = String::new();
    out.push_str("digraph {\n");
    out.push_str("    ranksep=2;\n");
    render_scope(scope, &mut out);
    out.push_str("}\n");
    out
}

fn render_scope(scope: &Scope, out: &mut String) {
    let parent = scope.name();
    for child in &scope.properties_to_instantiate {
        match child {
            ScopeChild::Instantiated(property, child_scope) => {
                let label = format!("{} : {}", property.label, property.type_description);
                writeln!(out, "    \"{parent}\" -> \"{label}\";").unwrap();
                let child_name = child_scope.name();
                writeln!(out, "    \"{label}\" -> \"{child_name}\";").unwrap();
                render_scope(child_scope, out);
            }
            ScopeChild::Aliased {
                property,
                fulfilling_property,
                ..
            } => {
                writeln!(
                    out,
                    "    \"{parent}\" -> \"{} <- {fulfilling_property}\";",
                    property.label
                )
                .unwrap();
            }
        }
    }
    for dependency in scope.instantiable.forwarded_dependencies() {
        writeln!(
            out,
            "    \"{parent}\" -> \"{} : {}\" [style=dashed];",
            dependency.property.label, dependency.property.type_description
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_scope, FulfillmentMap};
    use safedi_model::{DeclarationType, Dependency, Instantiable, Property, TypeDescription};

    fn leaf(name: &str) -> Instantiable {
        Instantiable::new(TypeDescription::simple(name), DeclarationType::Struct)
    }

    #[test]
    fn renders_instantiated_child_edges() {
        let mut root = leaf("Boiler");
        root.is_root = true;
        root.dependencies.push(Dependency::instantiated(Property::new(
            "heater",
            TypeDescription::simple("Heater"),
        )));
        let heater = leaf("Heater");
        let map = FulfillmentMap::build(vec![root.clone(), heater]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");

        let rendered = render(&scope);
        assert!(rendered.starts_with("digraph {\n"));
        assert!(rendered.contains("ranksep=2;"));
        assert!(rendered.contains("\"Boiler\" -> \"heater : Heater\";"));
        assert!(rendered.contains("\"heater : Heater\" -> \"Heater\";"));
    }

    #[test]
    fn renders_alias_edges() {
        let mut root = leaf("App");
        root.is_root = true;
        root.dependencies.push(Dependency::aliased(
            Property::new("shared_handle", TypeDescription::simple("Shared")),
            "shared",
            false,
        ));
        let map = FulfillmentMap::build(vec![root.clone()]).expect("no duplicates");
        let scope = build_scope(&map, &root).expect("builds");

        let rendered = render(&scope);
        assert!(rendered.contains("\"App\" -> \"shared_handle <- shared\";"));
    }
}
