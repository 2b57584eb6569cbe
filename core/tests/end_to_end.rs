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

//! Drives whole source snippets through parsing, graph solving and code
//! generation, the way the CLI does for one file at a time.

use safedi_core::{dot, fulfillment_map_from_modules, generate_root, graph, validate, GenerationContext};
use safedi_model::ModuleInfo;

fn parse(source: &str) -> ModuleInfo {
    let parsed = safedi_core::parse_source(None, source).expect("parses");
    assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
    ModuleInfo {
        imports: parsed.imports,
        instantiables: parsed.instantiables,
    }
}

#[tokio::test]
async fn single_root_with_one_instantiated_child_generates_a_constructor() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct Boiler {
            #[safedi::instantiated]
            pub heater: Heater,
        }

        #[safedi::instantiable]
        pub struct Heater {}
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("Boiler").expect("Boiler registered");
    let context = GenerationContext::new();
    let generated = generate_root(&context, &map, root).await.expect("generates");
    assert!(generated.contains("impl Boiler"));
    assert!(generated.contains("pub fn new"));
    assert!(generated.contains("Heater"));
}

#[tokio::test]
async fn received_property_propagates_from_an_ancestor() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct App {
            #[safedi::forwarded]
            pub name: String,
            #[safedi::instantiated]
            pub widget: Widget,
        }

        #[safedi::instantiable]
        pub struct Widget {
            #[safedi::received]
            pub name: String,
        }
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("App").expect("App registered");
    let scope = graph::build_scope(&map, root).expect("builds");
    validate::validate(&map, &scope).expect("validates cleanly");

    let context = GenerationContext::new();
    let generated = generate_root(&context, &map, root).await.expect("generates");
    assert!(generated.contains("Widget"));
}

#[tokio::test]
async fn cyclic_instantiation_is_rejected_before_generation() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct A {
            #[safedi::instantiated]
            pub b: B,
        }

        #[safedi::instantiable]
        pub struct B {
            #[safedi::instantiated]
            pub a: A,
        }
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("A").expect("A registered");
    let error = graph::build_scope(&map, root).expect_err("cycle must be rejected");
    assert!(error.to_string().contains("A -> B -> A"));
}

#[tokio::test]
async fn aliased_dependency_renders_as_an_existential_binding() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct App {
            #[safedi::instantiated]
            pub shared: Shared,
            #[safedi::instantiated]
            pub widget: Widget,
        }

        #[safedi::instantiable]
        pub struct Shared {}

        #[safedi::instantiable]
        pub struct Widget {
            #[safedi::received(fulfilled_by_dependency_named = "shared", erased_to_concrete_existential = true)]
            pub any_shared: Box<dyn SharedTrait>,
        }
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("App").expect("App registered");
    let scope = graph::build_scope(&map, root).expect("builds");
    validate::validate(&map, &scope).expect("validates cleanly");

    let rendered = dot::render(&scope);
    assert!(rendered.contains("any_shared <- shared"));
}

#[tokio::test]
async fn leaf_dependency_is_deferred_through_a_plain_instantiator() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct App {
            #[safedi::instantiated]
            pub factory: Factory,
        }

        #[safedi::instantiable]
        pub struct Factory {
            #[safedi::instantiated]
            pub make_heater: Instantiator<Heater>,
        }

        #[safedi::instantiable]
        pub struct Heater {}
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("App").expect("App registered");
    let context = GenerationContext::new();
    let generated = generate_root(&context, &map, root).await.expect("generates");
    assert!(generated.contains("Instantiator::new(move ||"));
    assert!(generated.contains("Heater"));
}

#[tokio::test]
async fn forwarded_dependency_is_reachable_through_an_erased_instantiator() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct App {
            #[safedi::instantiated]
            pub factory: GreetingFactory,
        }

        #[safedi::instantiable]
        pub struct GreetingFactory {
            #[safedi::instantiated(fulfilled_by_type = "Greeting")]
            pub make_greeting: ErasedInstantiator<String, Greeting>,
        }

        #[safedi::instantiable]
        pub struct Greeting {
            #[safedi::forwarded]
            pub name: String,
        }
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("App").expect("App registered");
    let scope = graph::build_scope(&map, root).expect("builds");
    validate::validate(&map, &scope).expect("validates cleanly");

    let context = GenerationContext::new();
    let generated = generate_root(&context, &map, root).await.expect("generates");
    assert!(generated.contains("ErasedInstantiator::new(move |__safedi_name: String|"));
    assert!(generated.contains("Greeting"));
}

#[tokio::test]
async fn erased_instantiator_with_mismatched_generic_argument_is_rejected() {
    let module = parse(
        r#"
        #[safedi::instantiable(is_root)]
        pub struct App {
            #[safedi::instantiated(fulfilled_by_type = "Greeting")]
            pub make_greeting: ErasedInstantiator<u32, Greeting>,
        }

        #[safedi::instantiable]
        pub struct Greeting {
            #[safedi::forwarded]
            pub name: String,
        }
        "#,
    );
    let map = fulfillment_map_from_modules(&[module]).expect("builds");
    let root = map.get_by_name("App").expect("App registered");
    let scope = graph::build_scope(&map, root).expect("builds");
    let error = validate::validate(&map, &scope).expect_err("generic mismatch must be rejected");
    assert!(matches!(
        error,
        safedi_core::GraphError::ErasedInstantiatorGenericMismatch { .. }
    ));
}

/// The cardinality invariant that only one `forwarded` property may appear
/// per instantiable is enforced at the annotation parser boundary (see
/// `annotation.rs`'s `MultipleForwardedProperties` diagnostic), not in the
/// graph/codegen layer itself, which stays generic over whatever
/// `Instantiable`s a frontend hands it. Built directly through the model
/// API, the same way `validate.rs`'s and `codegen.rs`'s own unit tests
/// exercise this layer, with two forwarded properties whose labels and
/// rendered type names sort in opposite orders (`alpha: Zebra` sorts before
/// `beta: Apple` by label, but after it by rendered type string).
#[tokio::test]
async fn erased_instantiator_tuple_argument_order_matches_codegens_label_order() {
    use safedi_model::{DeclarationType, Dependency, Instantiable, Property, TypeDescription};

    let mut app = Instantiable::new(TypeDescription::simple("App"), DeclarationType::Struct);
    app.is_root = true;
    let mut make_greeting = Dependency::instantiated(Property::new(
        "make_greeting",
        TypeDescription::Simple {
            name: "ErasedInstantiator".to_owned(),
            generic_args: vec![
                TypeDescription::Tuple {
                    elements: vec![
                        safedi_model::TupleElement {
                            label: None,
                            type_description: Box::new(TypeDescription::simple("Zebra")),
                        },
                        safedi_model::TupleElement {
                            label: None,
                            type_description: Box::new(TypeDescription::simple("Apple")),
                        },
                    ],
                },
                TypeDescription::simple("Greeting"),
            ],
        },
    ));
    make_greeting.fulfilling_type = Some(TypeDescription::simple("Greeting"));
    app.dependencies.push(make_greeting);

    let mut greeting = Instantiable::new(TypeDescription::simple("Greeting"), DeclarationType::Struct);
    greeting.dependencies.push(Dependency::forwarded(Property::new(
        "alpha",
        TypeDescription::simple("Zebra"),
    )));
    greeting.dependencies.push(Dependency::forwarded(Property::new(
        "beta",
        TypeDescription::simple("Apple"),
    )));

    let map = safedi_core::FulfillmentMap::build(vec![app.clone(), greeting]).expect("no duplicates");
    let scope = graph::build_scope(&map, &app).expect("builds");
    validate::validate(&map, &scope).expect("label-ordered tuple matches what codegen emits");

    let context = GenerationContext::new();
    let generated = generate_root(&context, &map, &app).await.expect("generates");
    assert!(generated.contains("(__safedi_alpha, __safedi_beta): (Zebra, Apple)"));
}
