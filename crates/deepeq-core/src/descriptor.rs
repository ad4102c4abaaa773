//! Per-type comparison descriptors.
//!
//! A [`TypeDescriptor`] records how values of one concrete type are compared:
//! as a terminal value, member by member, element by element, or by looking
//! through to a wrapped value. Descriptors are built once by
//! [`Inspect::describe`](crate::Inspect::describe) and cached process-wide.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use deepeq_types::{ReadError, TypeInfo};

use crate::inspect::Inspect;
use crate::registry;
use crate::value::Value;

/// Erased member or wrapper accessor.
pub type Getter =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<Value<'a>, ReadError> + Send + Sync>;

/// Erased element enumerator of a natively iterable type.
pub type Elements =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<Vec<Value<'a>>, ReadError> + Send + Sync>;

/// Lazily resolved descriptor of a member's declared type.
pub type DeclaredType = fn() -> Arc<TypeDescriptor>;

/// Why a type is compared by direct value equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Primitive,
    Enumeration,
    Text,
    Decimal,
    Temporal,
    Identifier,
    /// Plain value aggregate (no reference semantics).
    Aggregate,
    /// Type with a total ordering contract.
    Ordered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    NonPublic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// An accessor-style member.
    Property,
    /// Plain storage, included only when the policy asks for fields.
    Field,
}

/// One declared member of a composite type.
#[derive(Clone)]
pub struct MemberDef {
    pub(crate) name: &'static str,
    pub(crate) kind: MemberKind,
    pub(crate) visibility: Visibility,
    pub(crate) ignored: bool,
    pub(crate) getter: Getter,
    pub(crate) declared: DeclaredType,
}

impl MemberDef {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` if the member carries the ignore marker.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Descriptor of the member's declared type.
    pub fn declared_type(&self) -> Arc<TypeDescriptor> {
        (self.declared)()
    }
}

impl fmt::Debug for MemberDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("ignored", &self.ignored)
            .finish_non_exhaustive()
    }
}

/// The comparison strategy of a type.
#[derive(Clone)]
pub enum Shape {
    /// Compared with native value equality.
    Terminal(ValueKind),
    /// Compared member by member, in declaration order.
    Composite(Vec<MemberDef>),
    /// Natively iterable; compared as an unordered collection.
    Sequence(Elements),
    /// Transparent indirection. `inner` is the wrapped type when it is
    /// statically known.
    Wrapper {
        unwrap: Getter,
        inner: Option<DeclaredType>,
    },
    /// Non-owning reference; never traversed.
    Weak,
    /// Function kind; excluded as a member.
    Callable,
}

impl Shape {
    fn label(&self) -> &'static str {
        match self {
            Shape::Terminal(_) => "terminal",
            Shape::Composite(_) => "composite",
            Shape::Sequence(_) => "sequence",
            Shape::Wrapper { .. } => "wrapper",
            Shape::Weak => "weak",
            Shape::Callable => "callable",
        }
    }
}

/// How values of one concrete type are compared.
#[derive(Clone)]
pub struct TypeDescriptor {
    info: TypeInfo,
    shape: Shape,
}

impl TypeDescriptor {
    /// A value compared whole through [`Inspect::native_eq`].
    ///
    /// Without a `native_eq` override two distinct instances never compare
    /// equal; only the same instance does.
    pub fn terminal<T: Any>(kind: ValueKind) -> Self {
        Self::new::<T>(Shape::Terminal(kind))
    }

    /// Start describing a composite type member by member.
    pub fn composite<T: Any>() -> CompositeBuilder<T> {
        CompositeBuilder {
            members: Vec::new(),
            _owner: PhantomData,
        }
    }

    /// A collection whose elements are compared without regard to order.
    pub fn sequence<T: Any>(
        elements: impl for<'a> Fn(&'a T) -> Vec<Value<'a>> + Send + Sync + 'static,
    ) -> Self {
        let elements = erase_elements(move |any| Ok(elements(downcast::<T>(any)?)));
        Self::new::<T>(Shape::Sequence(elements))
    }

    /// A wrapper around a statically known `U`.
    pub fn wrapper<T: Any, U: Inspect>(
        unwrap: impl for<'a> Fn(&'a T) -> Result<Value<'a>, ReadError> + Send + Sync + 'static,
    ) -> Self {
        Self::new::<T>(Shape::Wrapper {
            unwrap: erase_getter(unwrap),
            inner: Some(registry::descriptor_of::<U>),
        })
    }

    /// A wrapper whose payload type is only known at runtime.
    pub fn dynamic<T: Any>(
        unwrap: impl for<'a> Fn(&'a T) -> Result<Value<'a>, ReadError> + Send + Sync + 'static,
    ) -> Self {
        Self::new::<T>(Shape::Wrapper {
            unwrap: erase_getter(unwrap),
            inner: None,
        })
    }

    /// A non-owning reference, skipped during comparison.
    pub fn weak<T: Any>() -> Self {
        Self::new::<T>(Shape::Weak)
    }

    /// A function value. Members of this type are never compared.
    pub fn callable<T: Any>() -> Self {
        Self::new::<T>(Shape::Callable)
    }

    fn new<T: Any>(shape: Shape) -> Self {
        Self {
            info: TypeInfo::of::<T>(),
            shape,
        }
    }

    /// The described type.
    pub fn info(&self) -> TypeInfo {
        self.info
    }

    /// How the described values are compared.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        match self.shape {
            Shape::Terminal(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.shape, Shape::Terminal(_))
    }

    pub fn is_weak(&self) -> bool {
        matches!(self.shape, Shape::Weak)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.shape, Shape::Callable)
    }

    /// Declared members; empty unless the type is composite.
    pub fn members(&self) -> &[MemberDef] {
        match &self.shape {
            Shape::Composite(members) => members,
            _ => &[],
        }
    }

    /// Follow statically known wrappers to the descriptor of the wrapped
    /// type. Runtime-typed wrappers resolve to themselves.
    pub fn resolved(self: Arc<Self>) -> Arc<Self> {
        let mut current = self;
        while let Shape::Wrapper {
            inner: Some(inner), ..
        } = &current.shape
        {
            let next = inner();
            current = next;
        }
        current
    }

    /// Returns `true` if the type, seen through its wrappers, is natively
    /// iterable.
    pub fn declares_sequence(self: Arc<Self>) -> bool {
        matches!(self.resolved().shape, Shape::Sequence(_))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypeDescriptor");
        s.field("type", &self.info.name())
            .field("shape", &self.shape.label());
        match &self.shape {
            Shape::Terminal(kind) => s.field("kind", kind),
            Shape::Composite(members) => s.field("members", members),
            _ => &mut s,
        };
        s.finish()
    }
}

/// Builder returned by [`TypeDescriptor::composite`].
///
/// Members are compared in the order they are added. `non_public` and
/// `ignored` modify the most recently added member.
pub struct CompositeBuilder<T> {
    members: Vec<MemberDef>,
    _owner: PhantomData<fn(&T)>,
}

impl<T: Any> CompositeBuilder<T> {
    /// A public property borrowed from the owner.
    pub fn property<U: Inspect>(
        self,
        name: &'static str,
        read: impl Fn(&T) -> &U + Send + Sync + 'static,
    ) -> Self {
        let getter = erase_getter(move |owner: &T| Ok(Value::Borrowed(read(owner))));
        self.push::<U>(name, MemberKind::Property, getter)
    }

    /// A storage field, only compared when the policy includes fields.
    pub fn field<U: Inspect>(
        self,
        name: &'static str,
        read: impl Fn(&T) -> &U + Send + Sync + 'static,
    ) -> Self {
        let getter = erase_getter(move |owner: &T| Ok(Value::Borrowed(read(owner))));
        self.push::<U>(name, MemberKind::Field, getter)
    }

    /// A property computed on read. `U` is the declared type; the getter
    /// may fail, in which case the member is skipped for that comparison.
    pub fn computed<U: Inspect>(
        self,
        name: &'static str,
        read: impl for<'a> Fn(&'a T) -> Result<Value<'a>, ReadError> + Send + Sync + 'static,
    ) -> Self {
        self.push::<U>(name, MemberKind::Property, erase_getter(read))
    }

    pub fn non_public(mut self) -> Self {
        if let Some(member) = self.members.last_mut() {
            member.visibility = Visibility::NonPublic;
        }
        self
    }

    /// Mark the last member as excluded from comparison.
    pub fn ignored(mut self) -> Self {
        if let Some(member) = self.members.last_mut() {
            member.ignored = true;
        }
        self
    }

    pub fn finish(self) -> TypeDescriptor {
        TypeDescriptor::new::<T>(Shape::Composite(self.members))
    }

    fn push<U: Inspect>(mut self, name: &'static str, kind: MemberKind, getter: Getter) -> Self {
        self.members.push(MemberDef {
            name,
            kind,
            visibility: Visibility::Public,
            ignored: false,
            getter,
            declared: registry::descriptor_of::<U>,
        });
        self
    }
}

fn erase_getter<T: Any>(
    read: impl for<'a> Fn(&'a T) -> Result<Value<'a>, ReadError> + Send + Sync + 'static,
) -> Getter {
    getter(move |any| read(downcast::<T>(any)?))
}

// Pins the closure to the higher-ranked signature before it is boxed.
fn getter<F>(f: F) -> Getter
where
    F: for<'a> Fn(&'a dyn Any) -> Result<Value<'a>, ReadError> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn erase_elements<F>(f: F) -> Elements
where
    F: for<'a> Fn(&'a dyn Any) -> Result<Vec<Value<'a>>, ReadError> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn downcast<T: Any>(any: &dyn Any) -> Result<&T, ReadError> {
    any.downcast_ref::<T>().ok_or(ReadError::TypeMismatch {
        expected: std::any::type_name::<T>(),
    })
}
