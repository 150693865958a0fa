//! Marker types for builders written in the type-state pattern. A field that
//! must be set before `build`, or must not be set twice, is enforced by the
//! compiler instead of checked at runtime.

use std::marker::PhantomData;

/// A builder field that has not been set.
#[derive(Debug, Clone, Copy)]
pub struct Undefined<T = ()>(PhantomData<T>);

impl<T> Undefined<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Undefined<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A builder field that has been set.
#[derive(Debug, Clone, Copy)]
pub struct Defined<T>(T);

impl<T> Defined<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Read a builder field regardless of whether it has been set.
pub trait MaybeDefined<T> {
    fn maybe_inner(&self) -> Option<&T>;

    fn maybe_into_inner(self) -> Option<T>;
}

impl<T> MaybeDefined<T> for Defined<T> {
    fn maybe_inner(&self) -> Option<&T> {
        Some(self.inner())
    }

    fn maybe_into_inner(self) -> Option<T> {
        Some(self.into_inner())
    }
}

impl<T> MaybeDefined<T> for Undefined<T> {
    fn maybe_inner(&self) -> Option<&T> {
        None
    }

    fn maybe_into_inner(self) -> Option<T> {
        None
    }
}
