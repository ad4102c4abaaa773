//! The opt-in trait through which types describe themselves.

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::descriptor::TypeDescriptor;

/// A type that can take part in structural comparison.
///
/// `describe` is called at most once per concrete type per process (racing
/// first calls may both run; one result is kept). The remaining methods are
/// the type's native contracts and are only consulted when the type is
/// compared as a terminal value.
///
/// ```
/// use deepeq_core::{Inspect, TypeDescriptor};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Inspect for Point {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::composite::<Self>()
///             .property("x", |p| &p.x)
///             .property("y", |p| &p.y)
///             .finish()
///     }
/// }
/// ```
pub trait Inspect: Any + Sized {
    /// How values of this type are compared.
    fn describe() -> TypeDescriptor;

    /// Native value equality, or `None` if the type has no equality contract.
    ///
    /// A terminal type that keeps the default compares by identity only:
    /// equal values held in distinct instances are reported as different.
    fn native_eq(&self, _other: &Self) -> Option<bool> {
        None
    }

    /// Hash consistent with [`Inspect::native_eq`]. Enables the multiset
    /// fast path for collections of this type.
    fn native_hash(&self) -> Option<u64> {
        None
    }

    /// Readable form used in difference messages.
    fn render(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Process-stable hash of `value`.
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
