/*
Copyright 2021 Google LLC

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

/// A deferred-construction handle for a dependency whose `source` is
/// `instantiated` but whose property type names an `Instantiator`.
///
/// `T` is not built when the owning scope is constructed; it is built the
/// first time [`Instantiator::get`] is called, and built again on every
/// subsequent call. This lets a scope depend on something expensive or
/// conditionally-used without paying for it unless it is actually needed,
/// and lets forwarding dependencies receive caller-supplied arguments at the
/// moment of construction rather than at scope-build time.
///
/// ```
/// # use safedi::Instantiator;
/// struct Boiler;
/// let make_boiler = Instantiator::new(|| Boiler);
/// let _boiler = make_boiler.get();
/// ```
pub struct Instantiator<'a, T> {
    f: Box<dyn Fn() -> T + 'a>,
}

impl<'a, T> Instantiator<'a, T> {
    pub fn new(f: impl Fn() -> T + 'a) -> Self {
        Instantiator { f: Box::new(f) }
    }

    /// Constructs a new `T`. Called once per logical use; nothing is cached.
    pub fn get(&self) -> T {
        (self.f)()
    }
}
