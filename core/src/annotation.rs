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

//! Reads one source file's text and extracts the `safedi` annotation
//! vocabulary from it: imports, instantiables and the diagnostics produced
//! along the way. Does not look at any other file; merging across files is
//! the driver's job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use syn::spanned::Spanned;

use safedi_model::{
    Argument, DeclarationType, Dependency, ImportKind, ImportStatement, Initializer, Instantiable,
    Property, PropertyType, TypeDescription,
};

use crate::error::{ParseError, SourceSpan};

/// Everything the annotation parser extracted from one file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub imports: Vec<ImportStatement>,
    pub instantiables: Vec<Instantiable>,
    /// Names of types that carried `#[safedi::instantiable]` but were
    /// declared somewhere other than module top level.
    pub rejected: Vec<String>,
    pub diagnostics: Vec<ParseError>,
}

/// Parses `text` (the contents of `file_path`, when known) for the `safedi`
/// annotation vocabulary.
pub fn parse_source(file_path: Option<&Path>, text: &str) -> Result<ParsedFile, ParseError> {
    let file = syn::parse_file(text)?;
    let mut parser = FileParser {
        file_path: file_path.map(PathBuf::from),
        parsed: ParsedFile::default(),
        pending_default_checks: Vec::new(),
    };
    parser.visit_items(&file.items, true);
    parser.check_pending_defaults();
    Ok(parser.parsed)
}

struct FileParser {
    file_path: Option<PathBuf>,
    parsed: ParsedFile,
    /// Fields with no lifecycle attribute and no `#[safedi::default]`
    /// marker, deferred until every `impl` block has been visited so the
    /// check can see whether a usable initializer exists (name, label,
    /// span).
    pending_default_checks: Vec<(String, String, proc_macro2::Span)>,
}

impl FileParser {
    fn span(&self, span: proc_macro2::Span) -> SourceSpan {
        SourceSpan::new(self.file_path.clone(), span)
    }

    /// `top_level` is `true` for file scope and for the contents of a `mod
    /// { ... }` block (§4.1 counts both as "module top level"); it is
    /// `false` once we have descended into a function body, where an
    /// instantiable declaration is rejected as nested.
    fn visit_items(&mut self, items: &[syn::Item], top_level: bool) {
        for item in items {
            match item {
                syn::Item::Use(item_use) => {
                    if top_level {
                        self.parsed
                            .imports
                            .extend(imports_from_use_tree(&item_use.tree, item_use, &[]));
                    }
                }
                syn::Item::Mod(item_mod) => {
                    if let Some((_, items)) = &item_mod.content {
                        self.visit_items(items, top_level);
                    }
                }
                syn::Item::Struct(item_struct) => {
                    self.visit_struct(item_struct, top_level);
                }
                syn::Item::Enum(item_enum) => {
                    self.visit_enum(item_enum, top_level);
                }
                syn::Item::Fn(item_fn) => {
                    self.visit_extension_fn(item_fn);
                    let nested_items: Vec<syn::Item> = item_fn
                        .block
                        .stmts
                        .iter()
                        .filter_map(|stmt| match stmt {
                            syn::Stmt::Item(item) => Some(item.clone()),
                            _ => None,
                        })
                        .collect();
                    self.visit_items(&nested_items, false);
                }
                syn::Item::Impl(item_impl) => {
                    self.visit_impl(item_impl);
                }
                _ => {}
            }
        }
    }

    fn visit_struct(&mut self, item_struct: &syn::ItemStruct, top_level: bool) {
        if !has_marker(&item_struct.attrs, "instantiable") {
            return;
        }
        if !top_level {
            self.parsed.rejected.push(item_struct.ident.to_string());
            self.parsed.diagnostics.push(ParseError::NestedInstantiable {
                span: self.span(item_struct.span()),
                name: item_struct.ident.to_string(),
            });
            return;
        }
        match self.build_instantiable(
            &item_struct.ident,
            &item_struct.attrs,
            struct_fields(item_struct),
            DeclarationType::Struct,
        ) {
            Ok(instantiable) => self.parsed.instantiables.push(instantiable),
            Err(diagnostic) => self.parsed.diagnostics.push(diagnostic),
        }
    }

    fn visit_enum(&mut self, item_enum: &syn::ItemEnum, top_level: bool) {
        if !has_marker(&item_enum.attrs, "instantiable") {
            return;
        }
        if !top_level {
            self.parsed.rejected.push(item_enum.ident.to_string());
            self.parsed.diagnostics.push(ParseError::NestedInstantiable {
                span: self.span(item_enum.span()),
                name: item_enum.ident.to_string(),
            });
            return;
        }
        // An enum instantiable has no stored fields of its own; its
        // dependencies come entirely from its declared initializer.
        match self.build_instantiable(&item_enum.ident, &item_enum.attrs, Vec::new(), DeclarationType::Enum)
        {
            Ok(instantiable) => self.parsed.instantiables.push(instantiable),
            Err(diagnostic) => self.parsed.diagnostics.push(diagnostic),
        }
    }

    fn visit_extension_fn(&mut self, item_fn: &syn::ItemFn) {
        let Some(attribute) = find_attribute(&item_fn.attrs, "instantiable_extension") else {
            return;
        };
        let args = match parse_attribute_args(attribute) {
            Ok(args) => args,
            Err(message) => {
                self.parsed.diagnostics.push(ParseError::MalformedAttribute {
                    span: self.span(attribute.span()),
                    message,
                });
                return;
            }
        };
        let for_type = match args.get("for_type") {
            Some(AttributeArg::Path(path)) => TypeDescription::from_path(path),
            _ => {
                self.parsed.diagnostics.push(ParseError::MalformedAttribute {
                    span: self.span(attribute.span()),
                    message: "`instantiable_extension` requires `for_type = <Type>`".to_owned(),
                });
                return;
            }
        };

        let is_valid_signature = item_fn.sig.ident == "instantiate"
            && item_fn.sig.generics.params.is_empty()
            && item_fn.sig.asyncness.is_none()
            && item_fn.sig.inputs.is_empty()
            && matches!(item_fn.vis, syn::Visibility::Public(_));
        if !is_valid_signature {
            self.parsed
                .diagnostics
                .push(ParseError::MalformedExtensionSignature {
                    span: self.span(item_fn.span()),
                    function: item_fn.sig.ident.to_string(),
                    for_type: for_type.to_string(),
                });
            return;
        }

        let mut instantiable = Instantiable::new(for_type, DeclarationType::Extension);
        instantiable.is_root = false;
        self.parsed.instantiables.push(instantiable);
    }

    fn visit_impl(&mut self, item_impl: &syn::ItemImpl) {
        let Some(name) = simple_type_name(&item_impl.self_ty) else {
            return;
        };
        let Some(instantiable) = self
            .parsed
            .instantiables
            .iter_mut()
            .find(|instantiable| instantiable.concrete_type.outer_name() == Some(name.as_str()))
        else {
            return;
        };
        for impl_item in &item_impl.items {
            let syn::ImplItem::Fn(method) = impl_item else {
                continue;
            };
            let is_initializer = method.sig.ident == "new" || has_marker(&method.attrs, "initializer");
            if !is_initializer {
                continue;
            }
            let arguments: Vec<Argument> = method
                .sig
                .inputs
                .iter()
                .filter_map(|input| match input {
                    syn::FnArg::Typed(pat_type) => {
                        let label = match pat_type.pat.as_ref() {
                            syn::Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                            _ => return None,
                        };
                        let type_description = TypeDescription::from_syn_type(&pat_type.ty);
                        let has_default = matches!(type_description, TypeDescription::Optional(_));
                        Some(Argument {
                            outer_label: None,
                            inner_label: label,
                            type_description,
                            has_default,
                        })
                    }
                    syn::FnArg::Receiver(_) => None,
                })
                .collect();
            let mut initializer = Initializer::new(arguments);
            initializer.is_async = method.sig.asyncness.is_some();
            initializer.is_fallible = matches!(
                &method.sig.output,
                syn::ReturnType::Type(_, ty) if is_result_type(ty)
            );
            let should_replace = match &instantiable.initializer {
                None => true,
                Some(existing) => {
                    !existing.is_valid_for_fulfilling(&instantiable.dependencies)
                        && initializer.is_valid_for_fulfilling(&instantiable.dependencies)
                }
            };
            if should_replace {
                instantiable.initializer = Some(initializer);
            }
        }
    }

    fn check_pending_defaults(&mut self) {
        let pending = std::mem::take(&mut self.pending_default_checks);
        for (type_name, label, span) in pending {
            let has_usable_initializer = self
                .parsed
                .instantiables
                .iter()
                .find(|instantiable| instantiable.concrete_type.outer_name() == Some(type_name.as_str()))
                .map(|instantiable| {
                    instantiable
                        .initializer
                        .as_ref()
                        .is_some_and(|initializer| initializer.is_valid_for_fulfilling(&instantiable.dependencies))
                })
                .unwrap_or(false);
            if !has_usable_initializer {
                self.parsed.diagnostics.push(ParseError::UnfulfillableProperty {
                    span: self.span(span),
                    name: type_name,
                    label,
                });
            }
        }
    }

    fn build_instantiable(
        &mut self,
        ident: &syn::Ident,
        attrs: &[syn::Attribute],
        fields: Vec<&syn::Field>,
        declaration_type: DeclarationType,
    ) -> Result<Instantiable, ParseError> {
        let marker = find_attribute(attrs, "instantiable").expect("checked by caller");
        let args = parse_attribute_args(marker).map_err(|message| ParseError::MalformedAttribute {
            span: self.span(marker.span()),
            message,
        })?;

        let mut instantiable = Instantiable::new(
            TypeDescription::simple(ident.to_string()),
            declaration_type,
        );
        instantiable.is_root = matches!(args.get("is_root"), Some(AttributeArg::Flag));
        if let Some(AttributeArg::Array(types)) = args.get("fulfilling_additional_types") {
            for arg in types {
                if let AttributeArg::Path(path) = arg {
                    instantiable
                        .additional_types_fulfilled
                        .push(TypeDescription::from_path(path));
                }
            }
        } else if let Some(AttributeArg::Path(path)) = args.get("fulfilling_additional_types") {
            instantiable
                .additional_types_fulfilled
                .push(TypeDescription::from_path(path));
        }
        // `conforms_elsewhere` only suppresses a downstream trait-conformance
        // lint that this core never performs; recognised and ignored.

        for field in fields {
            if let Some(dependency) = self.build_dependency(&ident.to_string(), field)? {
                instantiable.dependencies.push(dependency);
            }
        }
        instantiable
            .dependencies
            .sort_by(|a, b| a.property.label.cmp(&b.property.label));

        if instantiable
            .dependencies
            .iter()
            .filter(|dependency| dependency.source.is_forwarded())
            .count()
            > 1
        {
            return Err(ParseError::MultipleForwardedProperties {
                span: self.span(ident.span()),
                name: ident.to_string(),
            });
        }

        Ok(instantiable)
    }

    fn build_dependency(
        &mut self,
        type_name: &str,
        field: &syn::Field,
    ) -> Result<Option<Dependency>, ParseError> {
        let label = field
            .ident
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let lifecycle_attrs: Vec<&syn::Attribute> = field
            .attrs
            .iter()
            .filter(|attr| {
                marker_name(attr)
                    .map(|name| matches!(name.as_str(), "instantiated" | "received" | "forwarded"))
                    .unwrap_or(false)
            })
            .collect();

        if lifecycle_attrs.len() > 1 {
            return Err(ParseError::MultipleLifecycleAttributes {
                span: self.span(field.span()),
                label,
            });
        }
        let Some(attribute) = lifecycle_attrs.first() else {
            if !has_marker(&field.attrs, "default") {
                self.pending_default_checks
                    .push((type_name.to_owned(), label, field.span()));
            }
            return Ok(None);
        };

        let type_description = TypeDescription::from_syn_type(&field.ty);
        let property = Property::new(label.clone(), type_description.clone());
        let kind = marker_name(attribute).unwrap_or_default();
        let args = parse_attribute_args(attribute).map_err(|message| ParseError::MalformedAttribute {
            span: self.span(attribute.span()),
            message,
        })?;

        let dependency = match kind.as_str() {
            "forwarded" => Dependency::forwarded(property),
            "instantiated" => {
                let mut dependency = Dependency::instantiated(property);
                if let Some(AttributeArg::StringLiteral(name)) = args.get("fulfilled_by_type") {
                    if !type_description.property_type_requires_fulfilled_by_type() {
                        return Err(ParseError::FulfilledByTypeOnNonErased {
                            span: self.span(attribute.span()),
                            label,
                        });
                    }
                    let fulfilling_type = parse_type_name(name).map_err(|_| ParseError::MalformedAttribute {
                        span: self.span(attribute.span()),
                        message: format!("`fulfilled_by_type` is not a valid type name: {name}"),
                    })?;
                    if !matches!(
                        fulfilling_type,
                        TypeDescription::Simple { .. } | TypeDescription::Nested { .. }
                    ) {
                        return Err(ParseError::MalformedAttribute {
                            span: self.span(attribute.span()),
                            message: format!("`fulfilled_by_type` must name a simple or nested type, found `{name}`"),
                        });
                    }
                    dependency.fulfilling_type = Some(fulfilling_type);
                } else if type_description.property_type_requires_fulfilled_by_type() {
                    return Err(ParseError::ErasedInstantiatorWithoutFulfilledByType {
                        span: self.span(attribute.span()),
                        label,
                    });
                } else if let Some(constructed_type) = deferred_constructed_type(&type_description) {
                    // `Instantiator<T>`/`SendableInstantiator<T>` name the
                    // constructed type directly in their one generic argument;
                    // unlike the erased variants there is nothing else it
                    // could mean, so no explicit `fulfilled_by_type` is
                    // required.
                    dependency.fulfilling_type = Some(constructed_type);
                }
                dependency
            }
            "received" => {
                if let Some(AttributeArg::StringLiteral(name)) = args.get("fulfilled_by_dependency_named")
                {
                    let erased = matches!(
                        args.get("erased_to_concrete_existential"),
                        Some(AttributeArg::BoolLiteral(true))
                    );
                    Dependency::aliased(property, name.clone(), erased)
                } else {
                    Dependency::received(property)
                }
            }
            other => {
                return Err(ParseError::MalformedAttribute {
                    span: self.span(attribute.span()),
                    message: format!("unrecognised lifecycle attribute `{other}`"),
                });
            }
        };
        Ok(Some(dependency))
    }
}

trait RequiresFulfilledByType {
    fn property_type_requires_fulfilled_by_type(&self) -> bool;
}

impl RequiresFulfilledByType for TypeDescription {
    fn property_type_requires_fulfilled_by_type(&self) -> bool {
        matches!(
            self.outer_name(),
            Some("ErasedInstantiator") | Some("SendableErasedInstantiator")
        )
    }
}

/// The constructed type named by a non-erased `Instantiator`/
/// `SendableInstantiator` property's single generic argument, or `None` for
/// any other shape (including the erased variants, which are handled by
/// [`RequiresFulfilledByType`] instead).
fn deferred_constructed_type(type_description: &TypeDescription) -> Option<TypeDescription> {
    match PropertyType::derive(type_description) {
        PropertyType::Instantiator | PropertyType::SendableInstantiator => {
            type_description.generic_args().first().cloned()
        }
        _ => None,
    }
}

fn parse_type_name(name: &str) -> Result<TypeDescription, syn::Error> {
    let path: syn::Path = syn::parse_str(name)?;
    Ok(TypeDescription::from_path(&path))
}

fn is_result_type(ty: &syn::Type) -> bool {
    matches!(TypeDescription::from_syn_type(ty).outer_name(), Some("Result"))
}

fn simple_type_name(ty: &syn::Type) -> Option<String> {
    TypeDescription::from_syn_type(ty)
        .outer_name()
        .map(ToString::to_string)
}

fn struct_fields(item_struct: &syn::ItemStruct) -> Vec<&syn::Field> {
    item_struct.fields.iter().collect()
}

fn marker_name(attr: &syn::Attribute) -> Option<String> {
    let segments: Vec<String> = attr
        .path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    match segments.as_slice() {
        [first, second] if first == "safedi" => Some(second.clone()),
        _ => None,
    }
}

fn has_marker(attrs: &[syn::Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| marker_name(attr).as_deref() == Some(name))
}

fn find_attribute<'a>(attrs: &'a [syn::Attribute], name: &str) -> Option<&'a syn::Attribute> {
    attrs.iter().find(|attr| marker_name(attr).as_deref() == Some(name))
}

/// One argument inside a `#[safedi::...(...)]` attribute, grounded on the
/// same literal/path/array vocabulary the rest of this codebase uses for
/// attribute arguments, but parsed as a comma-separated list of `syn::Meta`
/// items rather than struct-literal field values, since this vocabulary
/// mixes bare flags (`is_root`) with `key = value` pairs.
#[derive(Debug, Clone)]
enum AttributeArg {
    Flag,
    StringLiteral(String),
    BoolLiteral(bool),
    Path(syn::Path),
    Array(Vec<AttributeArg>),
}

fn parse_attribute_args(attr: &syn::Attribute) -> Result<HashMap<String, AttributeArg>, String> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(HashMap::new()),
        syn::Meta::List(list) => {
            use syn::parse::Parser;
            let parser = syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated;
            let metas = parser
                .parse2(list.tokens.clone())
                .map_err(|error| error.to_string())?;
            let mut map = HashMap::new();
            for meta in metas {
                match meta {
                    syn::Meta::Path(path) => {
                        let name = path
                            .get_ident()
                            .map(ToString::to_string)
                            .ok_or_else(|| "expected a bare identifier".to_owned())?;
                        map.insert(name, AttributeArg::Flag);
                    }
                    syn::Meta::NameValue(name_value) => {
                        let name = name_value
                            .path
                            .get_ident()
                            .map(ToString::to_string)
                            .ok_or_else(|| "expected `name = value`".to_owned())?;
                        map.insert(name, attribute_arg_from_expr(&name_value.value)?);
                    }
                    syn::Meta::List(_) => {
                        return Err("nested attribute lists are not part of this vocabulary".to_owned())
                    }
                }
            }
            Ok(map)
        }
        syn::Meta::NameValue(_) => Err("expected a parenthesized attribute list".to_owned()),
    }
}

fn attribute_arg_from_expr(expr: &syn::Expr) -> Result<AttributeArg, String> {
    match expr {
        syn::Expr::Lit(lit) => match &lit.lit {
            syn::Lit::Str(value) => Ok(AttributeArg::StringLiteral(value.value())),
            syn::Lit::Bool(value) => Ok(AttributeArg::BoolLiteral(value.value())),
            other => Err(format!("unsupported literal {other:?}")),
        },
        syn::Expr::Path(path) => Ok(AttributeArg::Path(path.path.clone())),
        syn::Expr::Array(array) => {
            let values = array
                .elems
                .iter()
                .map(attribute_arg_from_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AttributeArg::Array(values))
        }
        other => Err(format!("unsupported attribute value {other:?}")),
    }
}

fn imports_from_use_tree(
    tree: &syn::UseTree,
    item_use: &syn::ItemUse,
    prefix: &[String],
) -> Vec<ImportStatement> {
    match tree {
        syn::UseTree::Path(path) => {
            let mut next_prefix = prefix.to_vec();
            next_prefix.push(path.ident.to_string());
            imports_from_use_tree(&path.tree, item_use, &next_prefix)
        }
        syn::UseTree::Name(name) => {
            vec![finish_import(prefix, &name.ident.to_string(), ImportKind::Simple, item_use)]
        }
        syn::UseTree::Rename(rename) => vec![finish_import(
            prefix,
            &format!("{} as {}", rename.ident, rename.rename),
            ImportKind::Renamed,
            item_use,
        )],
        syn::UseTree::Glob(_) => vec![finish_import(prefix, "*", ImportKind::Glob, item_use)],
        syn::UseTree::Group(group) => group
            .items
            .iter()
            .flat_map(|tree| imports_from_use_tree(tree, item_use, prefix))
            .collect(),
    }
}

fn finish_import(
    prefix: &[String],
    leaf: &str,
    kind: ImportKind,
    item_use: &syn::ItemUse,
) -> ImportStatement {
    let module_name = prefix.first().cloned().unwrap_or_else(|| leaf.to_owned());
    let submodule = if prefix.len() > 1 || (!prefix.is_empty() && leaf != "*") {
        let mut parts = prefix[1.min(prefix.len())..].to_vec();
        if leaf != "*" || kind != ImportKind::Glob {
            parts.push(leaf.to_owned());
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("::"))
        }
    } else {
        None
    };
    ImportStatement {
        module_name,
        submodule,
        kind,
        attributes: Vec::new(),
        is_pub: matches!(item_use.vis, syn::Visibility::Public(_)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_instantiated_and_forwarded_properties() {
        let source = r#"
            #[safedi::instantiable(is_root)]
            pub struct Boiler {
                #[safedi::instantiated]
                pub heater: Heater,
                #[safedi::forwarded]
                pub name: String,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        assert_eq!(parsed.instantiables.len(), 1);
        let boiler = &parsed.instantiables[0];
        assert!(boiler.is_root);
        assert_eq!(boiler.dependencies.len(), 2);
    }

    #[test]
    fn rejects_more_than_one_forwarded_property_on_an_instantiable() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Greeting {
                #[safedi::forwarded]
                pub first_name: String,
                #[safedi::forwarded]
                pub last_name: String,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        assert!(parsed.instantiables.is_empty());
        assert!(parsed
            .diagnostics
            .iter()
            .any(|diagnostic| matches!(diagnostic, ParseError::MultipleForwardedProperties { .. })));
    }

    #[test]
    fn rejects_nested_instantiable() {
        let source = r#"
            pub fn make() {
                #[safedi::instantiable]
                struct Inner;
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        assert_eq!(parsed.rejected, vec!["Inner".to_owned()]);
        assert!(parsed
            .diagnostics
            .iter()
            .any(|diagnostic| matches!(diagnostic, ParseError::NestedInstantiable { .. })));
    }

    #[test]
    fn requires_fulfilled_by_type_on_erased_instantiator() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Factory {
                #[safedi::instantiated]
                pub make: ErasedInstantiator<String, Greeting>,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        assert!(parsed.diagnostics.iter().any(|diagnostic| matches!(
            diagnostic,
            ParseError::ErasedInstantiatorWithoutFulfilledByType { .. }
        )));
    }

    #[test]
    fn parses_aliased_received_dependency() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Widget {
                #[safedi::received(fulfilled_by_dependency_named = "shared", of_type = Shared, erased_to_concrete_existential = true)]
                pub any_shared: Box<dyn Shared>,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        let dependency = &parsed.instantiables[0].dependencies[0];
        match &dependency.source {
            safedi_model::DependencySource::Aliased {
                fulfilling_property,
                erased_to_concrete_existential,
            } => {
                assert_eq!(fulfilling_property, "shared");
                assert!(*erased_to_concrete_existential);
            }
            other => panic!("expected an aliased dependency, found {other:?}"),
        }
    }

    #[test]
    fn collects_new_as_initializer() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Boiler {
                #[safedi::instantiated]
                pub heater: Heater,
            }

            impl Boiler {
                pub fn new(heater: Heater) -> Self {
                    Boiler { heater }
                }
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        let boiler = &parsed.instantiables[0];
        let initializer = boiler.initializer.as_ref().expect("initializer collected");
        assert_eq!(initializer.arguments.len(), 1);
        assert_eq!(initializer.arguments[0].inner_label, "heater");
    }

    #[test]
    fn rejects_fulfilled_by_type_on_a_non_erased_instantiator() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Factory {
                #[safedi::instantiated(fulfilled_by_type = "Greeting")]
                pub make: Instantiator<Greeting>,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        assert!(parsed
            .diagnostics
            .iter()
            .any(|diagnostic| matches!(diagnostic, ParseError::FulfilledByTypeOnNonErased { .. })));
    }

    #[test]
    fn instantiator_property_infers_fulfilling_type_from_its_generic_argument() {
        let source = r#"
            #[safedi::instantiable]
            pub struct Factory {
                #[safedi::instantiated]
                pub make: Instantiator<Greeting>,
            }
        "#;
        let parsed = parse_source(None, source).expect("parses");
        let dependency = &parsed.instantiables[0].dependencies[0];
        assert_eq!(
            dependency.fulfilling_type,
            Some(TypeDescription::simple("Greeting"))
        );
    }

    #[test]
    fn parses_simple_use_statement() {
        let source = "use std::collections::HashMap;";
        let parsed = parse_source(None, source).expect("parses");
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.imports[0].module_name, "std");
        assert_eq!(
            parsed.imports[0].submodule.as_deref(),
            Some("collections::HashMap")
        );
    }
}
