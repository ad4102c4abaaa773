//! Test models shared by the engine's unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use deepeq_types::ReadError;

use crate::descriptor::TypeDescriptor;
use crate::inspect::{hash_of, Inspect};
use crate::value::Value;

pub struct Person {
    pub name: String,
    pub age: u32,
    pub friends: Vec<Rc<RefCell<Person>>>,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            friends: Vec::new(),
        }
    }

    pub fn shared(name: impl Into<String>, age: u32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(name, age)))
    }

    /// Two people who are each other's only friend.
    pub fn cycle(first: &str, second: &str) -> Rc<RefCell<Self>> {
        let a = Self::shared(first, 30);
        let b = Self::shared(second, 30);
        a.borrow_mut().friends.push(Rc::clone(&b));
        b.borrow_mut().friends.push(Rc::clone(&a));
        a
    }
}

impl Inspect for Person {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("name", |p| &p.name)
            .property("age", |p| &p.age)
            .property("friends", |p| &p.friends)
            .finish()
    }
}

/// Singly linked chain node.
pub struct Link {
    pub value: i32,
    pub next: Option<Box<Link>>,
}

impl Link {
    /// A chain of `len` nodes valued `0..len`. The node at `diverge_at`, if
    /// any, holds the negated value instead.
    pub fn chain(len: usize, diverge_at: Option<usize>) -> Self {
        let mut next = None;
        for i in (0..len).rev() {
            let value = i as i32;
            let value = if diverge_at == Some(i) { -value } else { value };
            next = Some(Box::new(Link { value, next }));
        }
        match next {
            Some(head) => *head,
            None => Link {
                value: 0,
                next: None,
            },
        }
    }
}

impl Inspect for Link {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("value", |l| &l.value)
            .property("next", |l| &l.next)
            .finish()
    }
}

pub struct WithVisibility {
    pub public_int: i32,
    private_int: i32,
    protected_string: String,
}

impl WithVisibility {
    pub fn new(public_int: i32, private_int: i32, protected_string: &str) -> Self {
        Self {
            public_int,
            private_int,
            protected_string: protected_string.to_string(),
        }
    }
}

impl Inspect for WithVisibility {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("public_int", |v| &v.public_int)
            .property("private_int", |v| &v.private_int)
            .non_public()
            .property("protected_string", |v| &v.protected_string)
            .non_public()
            .finish()
    }
}

pub struct WithFields {
    pub public_field: i32,
    private_field: i32,
}

impl WithFields {
    pub fn new(public_field: i32, private_field: i32) -> Self {
        Self {
            public_field,
            private_field,
        }
    }
}

impl Inspect for WithFields {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .field("public_field", |v| &v.public_field)
            .field("private_field", |v| &v.private_field)
            .non_public()
            .finish()
    }
}

pub struct WithIgnore {
    pub visible: String,
    pub secret: String,
}

impl WithIgnore {
    pub fn new(visible: &str, secret: &str) -> Self {
        Self {
            visible: visible.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl Inspect for WithIgnore {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("visible", |v| &v.visible)
            .property("secret", |v| &v.secret)
            .ignored()
            .finish()
    }
}

pub struct WithWeak {
    pub id: i32,
    pub parent: Weak<RefCell<Person>>,
}

impl WithWeak {
    pub fn new(id: i32, parent: Weak<RefCell<Person>>) -> Self {
        Self { id, parent }
    }
}

impl Inspect for WithWeak {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("id", |w| &w.id)
            .property("parent", |w| &w.parent)
            .finish()
    }
}

/// Adapter exposing its elements through an `items` accessor.
pub struct FakeSourceList {
    pub items: Vec<String>,
}

impl FakeSourceList {
    pub fn new<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            items: items.into_iter().map(str::to_string).collect(),
        }
    }
}

impl Inspect for FakeSourceList {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("items", |l| &l.items)
            .finish()
    }
}

/// Keyed cache exposing its entries through a computed `values` accessor.
pub struct FakeSourceCache {
    inner: HashMap<i32, String>,
}

impl FakeSourceCache {
    pub fn new<'a>(entries: impl IntoIterator<Item = (i32, &'a str)>) -> Self {
        Self {
            inner: entries
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        }
    }
}

impl Inspect for FakeSourceCache {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .field("inner", |c| &c.inner)
            .non_public()
            .computed::<Vec<String>>("values", |c| {
                Ok(Value::owned(c.inner.values().cloned().collect::<Vec<_>>()))
            })
            .finish()
    }
}

pub struct WithCollections {
    pub numbers: Vec<i32>,
    pub tags: HashSet<String>,
    pub scores: HashMap<String, i32>,
    pub fake_list: FakeSourceList,
    pub fake_cache: FakeSourceCache,
}

impl WithCollections {
    pub fn sample() -> Self {
        Self {
            numbers: vec![1, 2, 3, 5, 8],
            tags: HashSet::from(["red".to_string(), "blue".to_string()]),
            scores: HashMap::from([("alice".to_string(), 3), ("bob".to_string(), 5)]),
            fake_list: FakeSourceList::new(["x", "y", "z"]),
            fake_cache: FakeSourceCache::new([(1, "one"), (2, "two")]),
        }
    }
}

impl Inspect for WithCollections {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("numbers", |c| &c.numbers)
            .property("tags", |c| &c.tags)
            .property("scores", |c| &c.scores)
            .property("fake_list", |c| &c.fake_list)
            .property("fake_cache", |c| &c.fake_cache)
            .finish()
    }
}

/// Composite whose native equality looks at `id` only.
pub struct ComplexType {
    pub id: u32,
    pub label: String,
}

impl ComplexType {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

impl Inspect for ComplexType {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("id", |c| &c.id)
            .property("label", |c| &c.label)
            .finish()
    }

    fn native_eq(&self, other: &Self) -> Option<bool> {
        Some(self.id == other.id)
    }

    fn native_hash(&self) -> Option<u64> {
        Some(hash_of(&self.id))
    }

    fn render(&self) -> String {
        format!("ComplexType#{}", self.id)
    }
}

/// Has one member whose accessor always fails.
pub struct Flaky {
    pub value: i32,
}

impl Flaky {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl Inspect for Flaky {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("value", |f| &f.value)
            .computed::<i32>("broken", |_| Err(ReadError::accessor("backing store offline")))
            .finish()
    }
}

/// Tree node whose children form a collection.
pub struct Tree {
    pub value: i32,
    pub children: Vec<Tree>,
}

impl Tree {
    /// A degenerate tree of `len` nodes, each with a single child.
    pub fn chain(len: usize) -> Self {
        let mut node = Tree {
            value: 0,
            children: Vec::new(),
        };
        for value in 1..len {
            node = Tree {
                value: value as i32,
                children: vec![node],
            };
        }
        node
    }
}

impl Inspect for Tree {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .property("value", |t| &t.value)
            .property("children", |t| &t.children)
            .finish()
    }
}

/// Collection adapter whose `items` accessor fails while `online` is false.
pub struct Source {
    pub online: bool,
    entries: Vec<i32>,
}

impl Source {
    pub fn new(online: bool, entries: Vec<i32>) -> Self {
        Self { online, entries }
    }
}

impl Inspect for Source {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .computed::<Vec<i32>>("items", |s| {
                if s.online {
                    Ok(Value::Borrowed(&s.entries))
                } else {
                    Err(ReadError::accessor("source offline"))
                }
            })
            .finish()
    }
}

/// Holds a collection in a field, not a property, named `items`.
pub struct FieldBacked {
    items: Vec<i32>,
}

impl FieldBacked {
    pub fn new(items: Vec<i32>) -> Self {
        Self { items }
    }
}

impl Inspect for FieldBacked {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>()
            .field("items", |f| &f.items)
            .finish()
    }
}
