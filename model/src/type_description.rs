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

//! The type model: a structural description of a Rust type that is equal,
//! hashable and round-trips through a canonical string, independent of the
//! span and whitespace of the source it was parsed from.
//!
//! [`TypeDescription::from_syn_type`] builds one out of whatever `syn` parsed
//! out of source text; [`TypeDescription::to_string`] and
//! [`TypeDescription::parse`] move it to and from the canonical string that
//! is what actually gets written into a `.safedi` artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether an existential is a caller-chosen concrete type behind an opaque
/// handle (`some`, i.e. Rust's `impl Trait`) or a type-erased box chosen at
/// runtime (`any`, i.e. Rust's `dyn Trait`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExistentialKind {
    Some,
    Any,
}

/// One element of a [`TypeDescription::Tuple`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleElement {
    pub label: Option<String>,
    pub type_description: Box<TypeDescription>,
}

/// A structural description of a type, built from parsed source and
/// independent of it.
///
/// This is a sum type rather than the teacher's flat struct-with-flags shape
/// because the properties a dependency can be declared with are genuinely
/// disjoint: a closure has parameters and a return type, a dictionary has a
/// key and a value, an array has neither. Matching on the variant is how
/// every later stage (property type derivation, codegen, DOT labels) reads
/// it back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescription {
    /// `Foo` or `Foo<A, B>`. `name` is the canonical dotted path, e.g.
    /// `std.collections.HashMap`.
    Simple {
        name: String,
        generic_args: Vec<TypeDescription>,
    },
    /// A type nested inside another, e.g. `<Foo as Trait>::Bar`.
    Nested {
        parent: Box<TypeDescription>,
        name: String,
        generic_args: Vec<TypeDescription>,
    },
    /// A trait-object bound combining more than one trait, e.g. `A + B`.
    Composed { types: Vec<TypeDescription> },
    /// `(A, B)`, optionally with per-element labels preserved from source
    /// comments or attribute metadata (Rust tuple types carry no labels of
    /// their own, but the model keeps the slot so a label can still be
    /// attached out of band and survive a round trip).
    Tuple { elements: Vec<TupleElement> },
    /// `fn(A, B) -> C`, or the `dyn Fn(A, B) -> C` spelling of the same
    /// shape.
    Closure {
        parameters: Vec<TypeDescription>,
        is_async: bool,
        throws: bool,
        return_type: Box<TypeDescription>,
    },
    /// `Option<T>`.
    Optional(Box<TypeDescription>),
    /// A marker wrapper recognized only by the `safedi::ImplicitlyUnwrapped`
    /// path, for annotation authors porting declarations from a source
    /// language that distinguishes implicitly- from explicitly-unwrapped
    /// optionals. See `SPEC_FULL.md` Open Questions.
    ImplicitlyUnwrappedOptional(Box<TypeDescription>),
    /// `[T]`, `[T; N]` or `Vec<T>`; the element count, if any, is not
    /// preserved.
    Array(Box<TypeDescription>),
    /// `HashMap<K, V>` or `BTreeMap<K, V>`.
    Dictionary {
        key: Box<TypeDescription>,
        value: Box<TypeDescription>,
    },
    /// `PhantomData<T>`, standing in for a reference to the type object
    /// itself rather than an instance of it.
    Metatype(Box<TypeDescription>),
    /// A base type modified by reference/mutability markers, e.g. `&Foo` or
    /// `&mut Foo`.
    Attributed {
        base: Box<TypeDescription>,
        attributes: Vec<String>,
    },
    /// `impl Trait` (`Some`) or `dyn Trait` (`Any`).
    Existential {
        base: Box<TypeDescription>,
        kind: ExistentialKind,
    },
    /// `()`.
    Void,
    /// Anything the parser could not make sense of; carries the original
    /// token text so a diagnostic can still quote it.
    Unknown(String),
}

impl TypeDescription {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeDescription::Simple {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    /// The outermost name, ignoring wrappers like `Optional`/`Array`. Used
    /// to recognize well-known generic shells (`Instantiator`,
    /// `ErasedInstantiator`, `SendableInstantiator`, ...) when deriving a
    /// [`crate::property::PropertyType`].
    pub fn outer_name(&self) -> Option<&str> {
        match self {
            TypeDescription::Simple { name, .. } => Some(name),
            TypeDescription::Nested { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn generic_args(&self) -> &[TypeDescription] {
        match self {
            TypeDescription::Simple { generic_args, .. }
            | TypeDescription::Nested { generic_args, .. } => generic_args,
            _ => &[],
        }
    }

    /// Builds a [`TypeDescription`] out of a parsed `syn::Type`.
    pub fn from_syn_type(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(type_path) => Self::from_type_path(type_path),
            syn::Type::Tuple(type_tuple) => {
                if type_tuple.elems.is_empty() {
                    TypeDescription::Void
                } else {
                    TypeDescription::Tuple {
                        elements: type_tuple
                            .elems
                            .iter()
                            .map(|elem| TupleElement {
                                label: None,
                                type_description: Box::new(Self::from_syn_type(elem)),
                            })
                            .collect(),
                    }
                }
            }
            syn::Type::Array(type_array) => {
                TypeDescription::Array(Box::new(Self::from_syn_type(&type_array.elem)))
            }
            syn::Type::Slice(type_slice) => {
                TypeDescription::Array(Box::new(Self::from_syn_type(&type_slice.elem)))
            }
            syn::Type::Reference(type_reference) => {
                let attribute = if type_reference.mutability.is_some() {
                    "&mut"
                } else {
                    "&"
                };
                TypeDescription::Attributed {
                    base: Box::new(Self::from_syn_type(&type_reference.elem)),
                    attributes: vec![attribute.to_owned()],
                }
            }
            syn::Type::BareFn(bare_fn) => TypeDescription::Closure {
                parameters: bare_fn
                    .inputs
                    .iter()
                    .map(|arg| Self::from_syn_type(&arg.ty))
                    .collect(),
                is_async: false,
                throws: false,
                return_type: Box::new(match &bare_fn.output {
                    syn::ReturnType::Default => TypeDescription::Void,
                    syn::ReturnType::Type(_, ty) => Self::from_syn_type(ty),
                }),
            },
            syn::Type::TraitObject(trait_object) => {
                Self::from_bounds(&trait_object.bounds, ExistentialKind::Any)
            }
            syn::Type::ImplTrait(impl_trait) => {
                Self::from_bounds(&impl_trait.bounds, ExistentialKind::Some)
            }
            syn::Type::Paren(type_paren) => Self::from_syn_type(&type_paren.elem),
            syn::Type::Group(type_group) => Self::from_syn_type(&type_group.elem),
            other => TypeDescription::Unknown(quote::quote!(#other).to_string()),
        }
    }

    fn from_bounds(
        bounds: &syn::punctuated::Punctuated<syn::TypeParamBound, syn::token::Plus>,
        kind: ExistentialKind,
    ) -> Self {
        let traits: Vec<TypeDescription> = bounds
            .iter()
            .filter_map(|bound| match bound {
                syn::TypeParamBound::Trait(trait_bound) => {
                    Some(Self::from_path(&trait_bound.path))
                }
                _ => None,
            })
            .collect();
        let base = match traits.len() {
            0 => TypeDescription::Unknown(quote::quote!(#bounds).to_string()),
            1 => traits.into_iter().next().unwrap(),
            _ => TypeDescription::Composed { types: traits },
        };
        TypeDescription::Existential {
            base: Box::new(base),
            kind,
        }
    }

    fn from_type_path(type_path: &syn::TypePath) -> Self {
        if let Some(qself) = &type_path.qself {
            let parent = Self::from_syn_type(&qself.ty);
            let last = type_path.path.segments.last().expect("non-empty path");
            return TypeDescription::Nested {
                parent: Box::new(parent),
                name: last.ident.to_string(),
                generic_args: Self::generic_args_of(last),
            };
        }
        Self::from_path(&type_path.path)
    }

    /// Builds a [`TypeDescription`] out of a parsed `syn::Path`, e.g. a
    /// string-literal type name decoded by `fulfilled_by_type`.
    pub fn from_path(path: &syn::Path) -> Self {
        let last = path.segments.last().expect("non-empty path");
        let name = last.ident.to_string();
        let args = Self::generic_args_of(last);

        match name.as_str() {
            "Option" if args.len() == 1 => {
                return TypeDescription::Optional(Box::new(args.into_iter().next().unwrap()));
            }
            "Vec" if args.len() == 1 => {
                return TypeDescription::Array(Box::new(args.into_iter().next().unwrap()));
            }
            "HashMap" | "BTreeMap" if args.len() == 2 => {
                let mut iter = args.into_iter();
                let key = iter.next().unwrap();
                let value = iter.next().unwrap();
                return TypeDescription::Dictionary {
                    key: Box::new(key),
                    value: Box::new(value),
                };
            }
            "PhantomData" if args.len() == 1 => {
                return TypeDescription::Metatype(Box::new(args.into_iter().next().unwrap()));
            }
            "ImplicitlyUnwrapped" if args.len() == 1 => {
                return TypeDescription::ImplicitlyUnwrappedOptional(Box::new(
                    args.into_iter().next().unwrap(),
                ));
            }
            _ => {}
        }

        let full_name = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join(".");

        if path.segments.len() > 1 {
            TypeDescription::Nested {
                parent: Box::new(TypeDescription::Simple {
                    name: path
                        .segments
                        .iter()
                        .rev()
                        .skip(1)
                        .rev()
                        .map(|segment| segment.ident.to_string())
                        .collect::<Vec<_>>()
                        .join("."),
                    generic_args: Vec::new(),
                }),
                name,
                generic_args: args,
            }
            .simplify_nested_to_simple(full_name)
        } else {
            TypeDescription::Simple {
                name,
                generic_args: args,
            }
        }
    }

    /// `syn` resolves ordinary multi-segment module paths (`std::io::Error`)
    /// the same way it resolves nested-type projections; the former is the
    /// overwhelmingly common case, so fold it back down to a dotted
    /// [`TypeDescription::Simple`] and reserve [`TypeDescription::Nested`]
    /// for the explicit `qself` projection form recognized above.
    fn simplify_nested_to_simple(self, full_name: String) -> Self {
        match self {
            TypeDescription::Nested { generic_args, .. } => TypeDescription::Simple {
                name: full_name,
                generic_args,
            },
            other => other,
        }
    }

    fn generic_args_of(segment: &syn::PathSegment) -> Vec<TypeDescription> {
        match &segment.arguments {
            syn::PathArguments::AngleBracketed(angle_bracketed) => angle_bracketed
                .args
                .iter()
                .filter_map(|arg| match arg {
                    syn::GenericArgument::Type(ty) => Some(Self::from_syn_type(ty)),
                    _ => None,
                })
                .collect(),
            syn::PathArguments::Parenthesized(parenthesized) => {
                let parameters = parenthesized
                    .inputs
                    .iter()
                    .map(Self::from_syn_type)
                    .collect::<Vec<_>>();
                let return_type = Box::new(match &parenthesized.output {
                    syn::ReturnType::Default => TypeDescription::Void,
                    syn::ReturnType::Type(_, ty) => Self::from_syn_type(ty),
                });
                vec![TypeDescription::Closure {
                    parameters,
                    is_async: false,
                    throws: false,
                    return_type,
                }]
            }
            syn::PathArguments::None => Vec::new(),
        }
    }
}

impl fmt::Display for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescription::Simple { name, generic_args } => {
                write!(f, "{name}")?;
                write_generic_args(f, generic_args)
            }
            TypeDescription::Nested {
                parent,
                name,
                generic_args,
            } => {
                write!(f, "{parent}::{name}")?;
                write_generic_args(f, generic_args)
            }
            TypeDescription::Composed { types } => {
                let rendered: Vec<String> = types.iter().map(ToString::to_string).collect();
                write!(f, "{}", rendered.join(" + "))
            }
            TypeDescription::Tuple { elements } => {
                write!(f, "(")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(label) = &element.label {
                        write!(f, "{label}: ")?;
                    }
                    write!(f, "{}", element.type_description)?;
                }
                write!(f, ")")
            }
            TypeDescription::Closure {
                parameters,
                is_async,
                throws,
                return_type,
            } => {
                if *is_async {
                    write!(f, "async ")?;
                }
                write!(f, "fn(")?;
                for (index, parameter) in parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ")")?;
                if *throws {
                    write!(f, " throws")?;
                }
                write!(f, " -> {return_type}")
            }
            TypeDescription::Optional(inner) => write!(f, "{inner}?"),
            TypeDescription::ImplicitlyUnwrappedOptional(inner) => write!(f, "{inner}!"),
            TypeDescription::Array(inner) => write!(f, "[{inner}]"),
            TypeDescription::Dictionary { key, value } => write!(f, "[{key}: {value}]"),
            TypeDescription::Metatype(inner) => write!(f, "{inner}.Type"),
            TypeDescription::Attributed { base, attributes } => {
                for attribute in attributes {
                    write!(f, "{attribute} ")?;
                }
                write!(f, "{base}")
            }
            TypeDescription::Existential { base, kind } => {
                let keyword = match kind {
                    ExistentialKind::Some => "some",
                    ExistentialKind::Any => "any",
                };
                write!(f, "{keyword} {base}")
            }
            TypeDescription::Void => write!(f, "()"),
            TypeDescription::Unknown(text) => write!(f, "{text}"),
        }
    }
}

fn write_generic_args(f: &mut fmt::Formatter<'_>, generic_args: &[TypeDescription]) -> fmt::Result {
    if generic_args.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    for (index, arg) in generic_args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ">")
}

/// Error parsing a canonical [`TypeDescription`] string, as produced by
/// [`TypeDescription::from_str`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("malformed type description: {message} (at {remainder:?})")]
pub struct TypeDescriptionParseError {
    message: String,
    remainder: String,
}

impl FromStr for TypeDescription {
    type Err = TypeDescriptionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = CanonicalParser { rest: input.trim() };
        let parsed = parser.parse_type()?;
        if !parser.rest.is_empty() {
            return Err(TypeDescriptionParseError {
                message: "trailing input after a complete type".to_owned(),
                remainder: parser.rest.to_owned(),
            });
        }
        Ok(parsed)
    }
}

/// A minimal recursive-descent parser for the canonical string grammar
/// produced by [`TypeDescription`]'s `Display` impl. It only needs to invert
/// that one grammar, not general Rust syntax, so it stays small.
struct CanonicalParser<'a> {
    rest: &'a str,
}

impl<'a> CanonicalParser<'a> {
    fn error(&self, message: impl Into<String>) -> TypeDescriptionParseError {
        TypeDescriptionParseError {
            message: message.into(),
            remainder: self.rest.to_owned(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn try_consume(&mut self, token: &str) -> bool {
        self.skip_ws();
        if let Some(stripped) = self.rest.strip_prefix(token) {
            self.rest = stripped;
            true
        } else {
            false
        }
    }

    fn consume(&mut self, token: &str) -> Result<(), TypeDescriptionParseError> {
        if self.try_consume(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`")))
        }
    }

    fn parse_ident(&mut self) -> Result<String, TypeDescriptionParseError> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == ':'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error("expected an identifier"));
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(ident.trim_end_matches(':').to_owned())
    }

    fn parse_generic_args(
        &mut self,
    ) -> Result<Vec<TypeDescription>, TypeDescriptionParseError> {
        if !self.try_consume("<") {
            return Ok(Vec::new());
        }
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            if self.try_consume(",") {
                continue;
            }
            self.consume(">")?;
            break;
        }
        Ok(args)
    }

    fn parse_atom(&mut self) -> Result<TypeDescription, TypeDescriptionParseError> {
        self.skip_ws();
        if self.try_consume("&mut") {
            let base = self.parse_atom()?;
            return Ok(TypeDescription::Attributed {
                base: Box::new(base),
                attributes: vec!["&mut".to_owned()],
            });
        }
        if self.try_consume("&") {
            let base = self.parse_atom()?;
            return Ok(TypeDescription::Attributed {
                base: Box::new(base),
                attributes: vec!["&".to_owned()],
            });
        }
        if self.try_consume("some ") {
            let base = self.parse_atom()?;
            return Ok(TypeDescription::Existential {
                base: Box::new(base),
                kind: ExistentialKind::Some,
            });
        }
        if self.try_consume("any ") {
            let base = self.parse_atom()?;
            return Ok(TypeDescription::Existential {
                base: Box::new(base),
                kind: ExistentialKind::Any,
            });
        }
        if self.try_consume("async ") || self.rest.starts_with("fn(") {
            let is_async = self.rest.starts_with("fn(");
            self.consume("fn")?;
            self.consume("(")?;
            let mut parameters = Vec::new();
            if !self.rest.trim_start().starts_with(')') {
                loop {
                    parameters.push(self.parse_type()?);
                    if self.try_consume(",") {
                        continue;
                    }
                    break;
                }
            }
            self.consume(")")?;
            let throws = self.try_consume("throws");
            self.consume("->")?;
            let return_type = self.parse_type()?;
            return Ok(TypeDescription::Closure {
                parameters,
                is_async,
                throws,
                return_type: Box::new(return_type),
            });
        }
        if self.try_consume("(") {
            if self.try_consume(")") {
                return Ok(TypeDescription::Void);
            }
            let mut elements = Vec::new();
            loop {
                let start = self.rest;
                let label = self
                    .parse_ident()
                    .ok()
                    .filter(|_| self.try_consume(":"))
                    .filter(|ident| !ident.is_empty());
                if label.is_none() {
                    self.rest = start;
                }
                let element_type = self.parse_type()?;
                elements.push(TupleElement {
                    label,
                    type_description: Box::new(element_type),
                });
                if self.try_consume(",") {
                    continue;
                }
                break;
            }
            self.consume(")")?;
            return Ok(TypeDescription::Tuple { elements });
        }
        if self.try_consume("[") {
            let key_or_elem = self.parse_type()?;
            if self.try_consume(":") {
                let value = self.parse_type()?;
                self.consume("]")?;
                return Ok(TypeDescription::Dictionary {
                    key: Box::new(key_or_elem),
                    value: Box::new(value),
                });
            }
            self.consume("]")?;
            return Ok(TypeDescription::Array(Box::new(key_or_elem)));
        }
        if self.rest.starts_with("()") {
            self.rest = &self.rest[2..];
            return Ok(TypeDescription::Void);
        }

        let name = self.parse_ident()?;
        let generic_args = self.parse_generic_args()?;
        Ok(TypeDescription::Simple { name, generic_args })
    }

    fn parse_postfix(&mut self) -> Result<TypeDescription, TypeDescriptionParseError> {
        let mut described = self.parse_atom()?;
        loop {
            if self.try_consume("::") {
                let name = self.parse_ident()?;
                let generic_args = self.parse_generic_args()?;
                described = TypeDescription::Nested {
                    parent: Box::new(described),
                    name,
                    generic_args,
                };
            } else if self.try_consume(".Type") {
                described = TypeDescription::Metatype(Box::new(described));
            } else if self.try_consume("?") {
                described = TypeDescription::Optional(Box::new(described));
            } else if self.try_consume("!") {
                described = TypeDescription::ImplicitlyUnwrappedOptional(Box::new(described));
            } else {
                break;
            }
        }
        Ok(described)
    }

    fn parse_type(&mut self) -> Result<TypeDescription, TypeDescriptionParseError> {
        let first = self.parse_postfix()?;
        self.skip_ws();
        if self.try_consume("+") {
            let mut types = vec![first];
            loop {
                types.push(self.parse_postfix()?);
                if self.try_consume("+") {
                    continue;
                }
                break;
            }
            return Ok(TypeDescription::Composed { types });
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(description: TypeDescription) {
        let rendered = description.to_string();
        let parsed: TypeDescription = rendered.parse().unwrap_or_else(|error| {
            panic!("failed to parse canonical string {rendered:?}: {error}")
        });
        assert_eq!(description, parsed, "round trip mismatch for {rendered:?}");
    }

    #[test]
    fn roundtrips_simple_and_generic() {
        roundtrip(TypeDescription::simple("Logger"));
        roundtrip(TypeDescription::Simple {
            name: "HashMap".to_owned(),
            generic_args: vec![
                TypeDescription::simple("String"),
                TypeDescription::simple("Logger"),
            ],
        });
    }

    #[test]
    fn roundtrips_optional_and_array() {
        roundtrip(TypeDescription::Optional(Box::new(
            TypeDescription::simple("Logger"),
        )));
        roundtrip(TypeDescription::Array(Box::new(TypeDescription::simple(
            "Logger",
        ))));
        roundtrip(TypeDescription::Dictionary {
            key: Box::new(TypeDescription::simple("String")),
            value: Box::new(TypeDescription::simple("Logger")),
        });
    }

    #[test]
    fn roundtrips_closure() {
        roundtrip(TypeDescription::Closure {
            parameters: vec![TypeDescription::simple("String")],
            is_async: true,
            throws: true,
            return_type: Box::new(TypeDescription::simple("Logger")),
        });
    }

    #[test]
    fn roundtrips_existential_and_composed() {
        roundtrip(TypeDescription::Existential {
            base: Box::new(TypeDescription::simple("Logger")),
            kind: ExistentialKind::Any,
        });
        roundtrip(TypeDescription::Composed {
            types: vec![
                TypeDescription::simple("Logger"),
                TypeDescription::simple("Sendable"),
            ],
        });
    }

    #[test]
    fn roundtrips_attributed_reference() {
        roundtrip(TypeDescription::Attributed {
            base: Box::new(TypeDescription::simple("Logger")),
            attributes: vec!["&mut".to_owned()],
        });
    }

    #[test]
    fn roundtrips_void_and_unknown() {
        roundtrip(TypeDescription::Void);
        roundtrip(TypeDescription::Unknown("dyn (Fn() -> !) + 'static".to_owned()));
    }

    #[test]
    fn from_syn_recognizes_option_as_optional() {
        let ty: syn::Type = syn::parse_str("Option<Logger>").unwrap();
        assert_eq!(
            TypeDescription::from_syn_type(&ty),
            TypeDescription::Optional(Box::new(TypeDescription::simple("Logger")))
        );
    }

    #[test]
    fn from_syn_recognizes_hashmap_as_dictionary() {
        let ty: syn::Type = syn::parse_str("HashMap<String, Logger>").unwrap();
        assert_eq!(
            TypeDescription::from_syn_type(&ty),
            TypeDescription::Dictionary {
                key: Box::new(TypeDescription::simple("String")),
                value: Box::new(TypeDescription::simple("Logger")),
            }
        );
    }

    #[test]
    fn from_syn_recognizes_dyn_trait_as_existential() {
        let ty: syn::Type = syn::parse_str("dyn Logger").unwrap();
        assert_eq!(
            TypeDescription::from_syn_type(&ty),
            TypeDescription::Existential {
                base: Box::new(TypeDescription::simple("Logger")),
                kind: ExistentialKind::Any,
            }
        );
    }

    #[test]
    fn from_syn_folds_module_path_into_simple() {
        let ty: syn::Type = syn::parse_str("std::io::Error").unwrap();
        assert_eq!(
            TypeDescription::from_syn_type(&ty),
            TypeDescription::simple("std.io.Error")
        );
    }
}
