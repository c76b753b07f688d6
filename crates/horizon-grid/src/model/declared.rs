//! Column declarations that are either fixed or computed.
//!
//! Many column settings can be given as a plain value or as a function of
//! the row, the form state, or both. [`Declared`] captures that choice as a
//! tagged union, and [`Declared::resolve_with`] is the one place where a
//! computed declaration is invoked.

use std::fmt;
use std::sync::Arc;

/// A setting given either as a value or as a function producing one.
///
/// `F` is the (unsized) function type, for example
/// `dyn Fn(Option<&R>) -> ValueEnum + Send + Sync`.
pub enum Declared<T, F: ?Sized> {
    /// A fixed value.
    Static(T),
    /// A value computed at render time.
    Computed(Arc<F>),
}

impl<T, F: ?Sized> Declared<T, F> {
    /// Returns `true` if the value is computed at render time.
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, Declared::Computed(_))
    }

    /// The fixed value, if this declaration is static.
    #[inline]
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Declared::Static(value) => Some(value),
            Declared::Computed(_) => None,
        }
    }

    /// Resolve the declaration to a value.
    ///
    /// Static values are cloned; computed ones are handed to `call`, which
    /// invokes the function with whatever arguments the call site has.
    pub fn resolve_with<C>(&self, call: C) -> T
    where
        T: Clone,
        C: FnOnce(&F) -> T,
    {
        match self {
            Declared::Static(value) => value.clone(),
            Declared::Computed(compute) => call(compute),
        }
    }
}

impl<T: Clone, F: ?Sized> Clone for Declared<T, F> {
    fn clone(&self) -> Self {
        match self {
            Declared::Static(value) => Declared::Static(value.clone()),
            Declared::Computed(compute) => Declared::Computed(Arc::clone(compute)),
        }
    }
}

impl<T, F: ?Sized> From<T> for Declared<T, F> {
    fn from(value: T) -> Self {
        Declared::Static(value)
    }
}

impl<T: fmt::Debug, F: ?Sized> fmt::Debug for Declared<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declared::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Declared::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Doubler = dyn Fn(i32) -> i32 + Send + Sync;

    #[test]
    fn test_static_resolves_without_calling() {
        let declared: Declared<i32, Doubler> = Declared::Static(7);
        let value = declared.resolve_with(|_| panic!("static values are not computed"));
        assert_eq!(value, 7);
        assert!(!declared.is_computed());
        assert_eq!(declared.as_static(), Some(&7));
    }

    #[test]
    fn test_computed_resolves_through_call() {
        let declared: Declared<i32, Doubler> = Declared::Computed(Arc::new(|n| n * 2));
        assert!(declared.is_computed());
        assert_eq!(declared.resolve_with(|f| f(21)), 42);
        assert!(declared.as_static().is_none());
    }

    #[test]
    fn test_debug_hides_function() {
        let declared: Declared<i32, Doubler> = Declared::Computed(Arc::new(|n| n));
        assert_eq!(format!("{declared:?}"), "Computed(..)");
        let declared: Declared<i32, Doubler> = 3.into();
        assert_eq!(format!("{declared:?}"), "Static(3)");
    }
}
