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

/// Like [`Instantiator`](crate::Instantiator), but the type being built also
/// has one or more `#[safedi::forwarded]` properties that must be supplied
/// by the caller at the moment of construction.
///
/// `Args` is a single type (when there is exactly one forwarded property) or
/// a tuple (when there are more than one, in lexicographic label order).
///
/// ```
/// # use safedi::ErasedInstantiator;
/// struct Greeting(String);
/// let make_greeting = ErasedInstantiator::new(|name: String| Greeting(name));
/// let greeting = make_greeting.get("Ada".to_owned());
/// assert_eq!(greeting.0, "Ada");
/// ```
pub struct ErasedInstantiator<'a, Args, T> {
    f: Box<dyn Fn(Args) -> T + 'a>,
}

impl<'a, Args, T> ErasedInstantiator<'a, Args, T> {
    pub fn new(f: impl Fn(Args) -> T + 'a) -> Self {
        ErasedInstantiator { f: Box::new(f) }
    }

    pub fn get(&self, args: Args) -> T {
        (self.f)(args)
    }
}
