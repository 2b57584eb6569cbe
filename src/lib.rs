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

//! Runtime support for code generated by `safedi-core`.
//!
//! Generated `impl` blocks name exactly the types in this crate: plain
//! values are bound with an ordinary `let`, and anything whose property
//! type was `instantiator`/`erasedInstantiator` (or their `sendable`
//! variants) is bound to one of the handles below instead.

mod erased_instantiator;
mod instantiator;
mod sendable;

pub use erased_instantiator::ErasedInstantiator;
pub use instantiator::Instantiator;
pub use sendable::{SendableErasedInstantiator, SendableInstantiator};
