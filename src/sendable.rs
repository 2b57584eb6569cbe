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

/// A [`Instantiator`](crate::Instantiator) whose closure is additionally
/// required to be `Send + Sync`, for dependencies that must be movable
/// across threads. The `fulfilledByType` / construction contract is
/// otherwise identical; only the bound on the boxed closure differs.
pub struct SendableInstantiator<'a, T> {
    f: Box<dyn Fn() -> T + Send + Sync + 'a>,
}

impl<'a, T> SendableInstantiator<'a, T> {
    pub fn new(f: impl Fn() -> T + Send + Sync + 'a) -> Self {
        SendableInstantiator { f: Box::new(f) }
    }

    pub fn get(&self) -> T {
        (self.f)()
    }
}

/// The `Send + Sync` counterpart of
/// [`ErasedInstantiator`](crate::ErasedInstantiator).
pub struct SendableErasedInstantiator<'a, Args, T> {
    f: Box<dyn Fn(Args) -> T + Send + Sync + 'a>,
}

impl<'a, Args, T> SendableErasedInstantiator<'a, Args, T> {
    pub fn new(f: impl Fn(Args) -> T + Send + Sync + 'a) -> Self {
        SendableErasedInstantiator { f: Box::new(f) }
    }

    pub fn get(&self, args: Args) -> T {
        (self.f)(args)
    }
}

fn _assert_bounds() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SendableInstantiator<'static, u8>>();
    assert_send_sync::<SendableErasedInstantiator<'static, u8, u8>>();
}
