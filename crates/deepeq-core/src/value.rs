//! Erased values the engine walks.
//!
//! [`Node`] is the object-safe view of any [`Inspect`] type. [`Value`] is what
//! an accessor hands back: nothing, a plain borrow, a borrow held open by a
//! `RefCell`/lock guard, or an owned value computed on the fly.

use std::any::{Any, TypeId};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use deepeq_types::{ReadError, TypeInfo};

use crate::descriptor::{Shape, TypeDescriptor};
use crate::inspect::Inspect;
use crate::registry;

/// Object-safe view of an [`Inspect`] value. Implemented for every
/// `Inspect` type; never implement it directly.
pub trait Node: Any + 'static {
    fn as_any(&self) -> &dyn Any;

    fn type_info(&self) -> TypeInfo;

    /// The cached descriptor of the concrete type.
    fn descriptor(&self) -> Arc<TypeDescriptor>;

    /// Native equality against a value of the same concrete type.
    fn eq_dyn(&self, other: &dyn Node) -> Option<bool>;

    fn hash_dyn(&self) -> Option<u64>;

    fn render_dyn(&self) -> String;
}

impl<T: Inspect> Node for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn descriptor(&self) -> Arc<TypeDescriptor> {
        registry::descriptor_of::<T>()
    }

    fn eq_dyn(&self, other: &dyn Node) -> Option<bool> {
        let other = other.as_any().downcast_ref::<T>()?;
        Inspect::native_eq(self, other)
    }

    fn hash_dyn(&self) -> Option<u64> {
        Inspect::native_hash(self)
    }

    fn render_dyn(&self) -> String {
        Inspect::render(self)
    }
}

impl fmt::Debug for dyn Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.type_info())
    }
}

/// Stable per-instance identity: address plus concrete type.
///
/// The type is part of the key because a struct and its first member can
/// share an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity {
    address: usize,
    type_id: TypeId,
}

impl Identity {
    pub fn of(node: &dyn Node) -> Self {
        Self {
            address: node as *const dyn Node as *const () as usize,
            type_id: node.as_any().type_id(),
        }
    }
}

/// A member or element read from a value.
pub enum Value<'a> {
    /// No value (`None`, or an empty wrapper).
    Absent,
    Borrowed(&'a dyn Node),
    /// A borrow kept alive by a guard such as `cell::Ref` or `MutexGuard`.
    Held(Box<dyn Deref<Target = dyn Node> + 'a>),
    /// A value computed by the accessor.
    Owned(Box<dyn Node>),
}

impl<'a> Value<'a> {
    pub fn owned<T: Inspect>(value: T) -> Self {
        Value::Owned(Box::new(value))
    }

    pub fn held<G>(guard: G) -> Self
    where
        G: Deref + 'a,
        G::Target: Inspect,
    {
        Value::Held(Box::new(Guarded(guard)))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The value as a node, without unwrapping wrapper types.
    pub fn node(&self) -> Option<&dyn Node> {
        match self {
            Value::Absent => None,
            Value::Borrowed(node) => Some(*node),
            Value::Held(guard) => Some(&***guard),
            Value::Owned(node) => Some(&**node),
        }
    }

    /// Take the owned payload, if any.
    pub fn into_owned(self) -> Option<Box<dyn Node>> {
        match self {
            Value::Owned(node) => Some(node),
            _ => None,
        }
    }
}

impl<'a, T: Inspect> From<&'a T> for Value<'a> {
    fn from(value: &'a T) -> Self {
        Value::Borrowed(value)
    }
}

impl<'a, T: Inspect> From<Option<&'a T>> for Value<'a> {
    fn from(value: Option<&'a T>) -> Self {
        match value {
            Some(v) => Value::Borrowed(v),
            None => Value::Absent,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Borrowed(node) => write!(f, "Borrowed({})", node.type_info()),
            Value::Held(guard) => write!(f, "Held({})", guard.type_info()),
            Value::Owned(node) => write!(f, "Owned({})", node.type_info()),
        }
    }
}

struct Guarded<G>(G);

impl<G> Deref for Guarded<G>
where
    G: Deref,
    G::Target: Inspect,
{
    type Target = dyn Node;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Follow wrapper types (`Option`, `Box`, `Rc`, `RefCell`, ...) down to the
/// value they hold and hand it to `f`. Absent values reach `f` as `None`.
///
/// Fails if a wrapper cannot be read (a `RefCell` already mutably borrowed,
/// a poisoned or contended lock).
pub fn with_resolved<R>(
    value: &Value<'_>,
    f: impl FnOnce(Option<&dyn Node>) -> R,
) -> Result<R, ReadError> {
    let Some(node) = value.node() else {
        return Ok(f(None));
    };
    let descriptor = node.descriptor();
    match descriptor.shape() {
        Shape::Wrapper { unwrap, .. } => {
            let inner = unwrap(node.as_any())?;
            with_resolved(&inner, f)
        }
        _ => Ok(f(Some(node))),
    }
}
