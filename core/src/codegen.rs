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

//! Walks a solved `Scope` tree and produces the `impl` block text for its
//! root (§4.5). Each root's generation is memoised behind a
//! `tokio::sync::OnceCell` keyed by the root's type name, so concurrently
//! generating several roots that happen to share a descendant still computes
//! that descendant's text only as many times as it is actually the root of a
//! *different* generation request, not once per occurrence in a tree.
//!
//! Within one root, sibling properties have no binding-order dependency on
//! each other under this model: a property's construction closure only ever
//! references its own child scope, never a sibling's, so the "topologically
//! sort, then break ties by label" rule from §4.5 collapses to a plain sort
//! by label (there is nothing to order beyond that, since the DAG among
//! siblings is always empty).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use safedi_model::{DeclarationType, Dependency, Instantiable, Property, PropertyType, TypeDescription};
use tokio::sync::OnceCell;

use crate::error::GenerationError;
use crate::graph::{FulfillmentMap, Scope, ScopeChild};

const INDENT_UNIT: &str = "    ";

/// Shared memoization state for one driver invocation. Cheap to clone
/// (`Arc`-backed); pass the same instance to every [`generate`] call so
/// roots that share a descendant instantiable reuse its generated text.
#[derive(Clone, Default)]
pub struct GenerationContext {
    cache: Arc<Mutex<HashMap<String, Arc<OnceCell<Result<String, GenerationError>>>>>>,
}

impl GenerationContext {
    pub fn new() -> Self {
        GenerationContext::default()
    }

    fn cell_for(&self, name: &str) -> Arc<OnceCell<Result<String, GenerationError>>> {
        let mut cache = self.cache.lock().expect("generation cache poisoned");
        cache
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

/// Generates the `impl` block for `scope`'s root, memoised by
/// `scope.name()` in `context`.
pub async fn generate(context: &GenerationContext, scope: &Scope) -> Result<String, GenerationError> {
    let cell = context.cell_for(&scope.name());
    let computed = cell.get_or_init(|| async { emit_root(scope) }).await;
    computed.clone()
}

fn emit_root(scope: &Scope) -> Result<String, GenerationError> {
    let instantiable = &scope.instantiable;
    let type_name = scope.name();

    let forwarded_params: Vec<String> = instantiable
        .forwarded_dependencies()
        .map(|dependency| {
            format!(
                "__safedi_{}: {}",
                dependency.property.label,
                render_rust_type(&dependency.property.type_description)
            )
        })
        .collect();

    let mut body = String::new();
    let mut construction = emit_bindings(scope, 1, &mut body)?;

    let is_fallible = instantiable.effective_initializer().is_fallible;
    let signature = if is_fallible {
        construction.push('?');
        format!("pub fn try_new({}) -> Result<Self, Box<dyn std::error::Error>>", forwarded_params.join(", "))
    } else {
        format!("pub fn new({}) -> Self", forwarded_params.join(", "))
    };

    let mut rendered = String::new();
    rendered.push_str(&format!("impl {type_name} {{\n"));
    rendered.push_str(&format!("{INDENT_UNIT}{signature} {{\n"));
    rendered.push_str(&body);
    rendered.push_str(&format!("{INDENT_UNIT}{INDENT_UNIT}{construction}\n"));
    rendered.push_str(&format!("{INDENT_UNIT}}}\n"));
    rendered.push_str("}\n");
    Ok(rendered)
}

/// Emits one `let` binding per local property (sorted by label), appending
/// to `out`, and returns the expression that constructs `scope`'s own type
/// out of those bindings.
fn emit_bindings(scope: &Scope, depth: usize, out: &mut String) -> Result<String, GenerationError> {
    let indent = INDENT_UNIT.repeat(depth + 1);
    let mut children: Vec<&ScopeChild> = scope.properties_to_instantiate.iter().collect();
    children.sort_by_key(|child| child.property().label.clone());

    for child in children {
        match child {
            ScopeChild::Instantiated(property, child_scope) => {
                out.push_str(&emit_instantiated_binding(property, child_scope, depth)?);
            }
            ScopeChild::Aliased {
                property,
                fulfilling_property,
                erased_to_concrete_existential,
            } => {
                let expr = if *erased_to_concrete_existential {
                    format!("Box::new({fulfilling_property})")
                } else {
                    fulfilling_property.clone()
                };
                out.push_str(&format!(
                    "{indent}let __safedi_{} = {expr};\n",
                    property.label
                ));
            }
        }
    }

    emit_construction_expr(&scope.instantiable)
}

fn emit_instantiated_binding(
    property: &Property,
    child_scope: &Scope,
    depth: usize,
) -> Result<String, GenerationError> {
    let indent = INDENT_UNIT.repeat(depth + 1);
    let property_type = property.property_type();
    let binding_name = format!("__safedi_{}", property.label);

    if property_type == PropertyType::Constant {
        let mut nested = String::new();
        let construction = emit_bindings(child_scope, depth + 1, &mut nested)?;
        let mut text = String::new();
        text.push_str(&format!("{indent}let {binding_name} = {{\n"));
        text.push_str(&nested);
        text.push_str(&format!("{}{construction}\n", INDENT_UNIT.repeat(depth + 2)));
        text.push_str(&format!("{indent}}};\n"));
        return Ok(text);
    }

    let wrapper = match property_type {
        PropertyType::Instantiator => "Instantiator",
        PropertyType::ErasedInstantiator => "ErasedInstantiator",
        PropertyType::SendableInstantiator => "SendableInstantiator",
        PropertyType::SendableErasedInstantiator => "SendableErasedInstantiator",
        PropertyType::Constant => unreachable!("handled above"),
    };

    let closure_params = if property_type.is_erased() {
        forwarded_closure_params(&child_scope.instantiable)
    } else {
        String::new()
    };

    let mut nested = String::new();
    let construction = emit_bindings(child_scope, depth + 1, &mut nested)?;
    let mut text = String::new();
    text.push_str(&format!(
        "{indent}let {binding_name} = {wrapper}::new(move |{closure_params}| {{\n"
    ));
    text.push_str(&nested);
    text.push_str(&format!("{}{construction}\n", INDENT_UNIT.repeat(depth + 2)));
    text.push_str(&format!("{indent}}});\n"));
    Ok(text)
}

/// Closure parameters for an erased instantiator: the provider's forwarded
/// properties, in lexicographic order. Zero means no arguments; one binds
/// that single property's type directly; more than one is modeled as a
/// single tuple parameter (matching the `Tuple` shape the generic-argument
/// check in `validate.rs` expects), its element order documented in a
/// generated comment since Rust closures have no named tuple fields.
///
/// Bound under the same `__safedi_<label>` name `binding_reference` expects,
/// the same as a forwarded root parameter (`emit_root`) or a locally
/// instantiated/aliased property (`emit_bindings`): a `received` property
/// several scopes down resolves to whichever of those bound it, by ordinary
/// Rust lexical scoping, and that only works if all three use one naming
/// convention.
fn forwarded_closure_params(provider: &Instantiable) -> String {
    let mut forwarded: Vec<&Dependency> = provider.forwarded_dependencies().collect();
    forwarded.sort_by_key(|dependency| dependency.property.label.clone());

    match forwarded.len() {
        0 => String::new(),
        1 => format!(
            "__safedi_{}: {}",
            forwarded[0].property.label,
            render_rust_type(&forwarded[0].property.type_description)
        ),
        _ => {
            let labels: Vec<String> = forwarded
                .iter()
                .map(|dependency| format!("__safedi_{}", dependency.property.label))
                .collect();
            let types: Vec<String> = forwarded
                .iter()
                .map(|dependency| render_rust_type(&dependency.property.type_description))
                .collect();
            format!("({}): ({})", labels.join(", "), types.join(", "))
        }
    }
}

fn emit_construction_expr(instantiable: &Instantiable) -> Result<String, GenerationError> {
    let type_name = instantiable
        .concrete_type
        .outer_name()
        .unwrap_or_default()
        .to_owned();

    if instantiable.declaration_type == DeclarationType::Extension {
        return Ok(format!("{type_name}::instantiate()"));
    }

    let uses_declared_initializer = instantiable
        .initializer
        .as_ref()
        .is_some_and(|initializer| initializer.is_valid_for_fulfilling(&instantiable.dependencies));

    if instantiable.declaration_type == DeclarationType::Enum && !uses_declared_initializer {
        return Err(GenerationError::NoFulfillingInitializer {
            instantiable: type_name,
        });
    }

    if uses_declared_initializer {
        let initializer = instantiable.initializer.as_ref().unwrap();
        let args = initializer
            .arguments
            .iter()
            .map(|argument| binding_reference(&argument.inner_label))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{type_name}::new({args})"))
    } else {
        let synthesized = instantiable.effective_initializer();
        let fields = synthesized
            .arguments
            .iter()
            .map(|argument| {
                format!(
                    "{}: {}",
                    argument.inner_label,
                    binding_reference(&argument.inner_label)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{type_name} {{ {fields} }}"))
    }
}

/// The expression that refers to a dependency's bound value from inside the
/// owning scope's construction call. Every binding this code generator
/// produces — a locally instantiated or aliased property, a forwarded root
/// parameter, a forwarded instantiator closure parameter — is named
/// `__safedi_<label>`, so a `received` property (which introduces no binding
/// of its own) resolves to whichever enclosing one of those actually bound
/// its label, via plain Rust lexical scoping.
fn binding_reference(label: &str) -> String {
    format!("__safedi_{label}")
}

/// Renders a [`TypeDescription`] as Rust type syntax for generated code,
/// distinct from its canonical round-trip string (which uses spellings like
/// `Type?` that are not valid Rust).
pub fn render_rust_type(type_description: &TypeDescription) -> String {
    match type_description {
        TypeDescription::Simple { name, generic_args } => {
            format!("{name}{}", render_generic_args(generic_args))
        }
        TypeDescription::Nested {
            parent,
            name,
            generic_args,
        } => format!(
            "{}::{name}{}",
            render_rust_type(parent),
            render_generic_args(generic_args)
        ),
        TypeDescription::Composed { types } => types
            .iter()
            .map(render_rust_type)
            .collect::<Vec<_>>()
            .join(" + "),
        TypeDescription::Tuple { elements } => {
            let rendered: Vec<String> = elements
                .iter()
                .map(|element| render_rust_type(&element.type_description))
                .collect();
            format!("({})", rendered.join(", "))
        }
        TypeDescription::Closure {
            parameters,
            return_type,
            ..
        } => {
            let rendered: Vec<String> = parameters.iter().map(render_rust_type).collect();
            format!("fn({}) -> {}", rendered.join(", "), render_rust_type(return_type))
        }
        TypeDescription::Optional(inner) | TypeDescription::ImplicitlyUnwrappedOptional(inner) => {
            format!("Option<{}>", render_rust_type(inner))
        }
        TypeDescription::Array(inner) => format!("Vec<{}>", render_rust_type(inner)),
        TypeDescription::Dictionary { key, value } => format!(
            "std::collections::HashMap<{}, {}>",
            render_rust_type(key),
            render_rust_type(value)
        ),
        TypeDescription::Metatype(inner) => format!("std::marker::PhantomData<{}>", render_rust_type(inner)),
        TypeDescription::Attributed { base, attributes } => {
            format!("{} {}", attributes.join(" "), render_rust_type(base))
        }
        TypeDescription::Existential { base, kind } => {
            let keyword = match kind {
                safedi_model::ExistentialKind::Some => "impl",
                safedi_model::ExistentialKind::Any => "dyn",
            };
            format!("{keyword} {}", render_rust_type(base))
        }
        TypeDescription::Void => "()".to_owned(),
        TypeDescription::Unknown(text) => text.clone(),
    }
}

fn render_generic_args(generic_args: &[TypeDescription]) -> String {
    if generic_args.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = generic_args.iter().map(render_rust_type).collect();
    format!("<{}>", rendered.join(", "))
}
