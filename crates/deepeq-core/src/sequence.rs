//! Decides whether a value is compared as a collection.

use std::fmt;

use deepeq_types::ReadError;
use tracing::warn;

use crate::descriptor::{Elements, Getter, MemberKind, Shape, TypeDescriptor, Visibility};
use crate::registry;
use crate::value::{with_resolved, Node, Value};

/// Public properties probed, in order, on composite types that wrap a
/// collection.
pub const SEQUENCE_ACCESSORS: [&str; 2] = ["items", "values"];

/// How to obtain the elements of a type. Decided once per type.
#[derive(Clone)]
pub enum SequenceStrategy {
    NotASequence,
    /// The type is itself iterable.
    Native(Elements),
    /// The elements live behind a conventionally named accessor.
    Accessor { name: &'static str, getter: Getter },
}

impl SequenceStrategy {
    pub fn is_sequence(&self) -> bool {
        !matches!(self, SequenceStrategy::NotASequence)
    }
}

impl fmt::Debug for SequenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence => f.write_str("NotASequence"),
            Self::Native(_) => f.write_str("Native"),
            Self::Accessor { name, .. } => write!(f, "Accessor({name})"),
        }
    }
}

/// The cached sequence strategy of `node`'s type.
pub fn strategy_of(node: &dyn Node) -> SequenceStrategy {
    registry::SEQUENCES.get_or_insert_with(node.type_info().id(), || decide(&node.descriptor()))
}

fn decide(descriptor: &TypeDescriptor) -> SequenceStrategy {
    match descriptor.shape() {
        Shape::Sequence(elements) => SequenceStrategy::Native(elements.clone()),
        Shape::Composite(members) => SEQUENCE_ACCESSORS
            .iter()
            .find_map(|name| {
                members.iter().find(|m| {
                    m.name == *name
                        && m.kind == MemberKind::Property
                        && m.visibility == Visibility::Public
                        && m.declared_type().declares_sequence()
                })
            })
            .map_or(SequenceStrategy::NotASequence, |m| {
                SequenceStrategy::Accessor {
                    name: m.name,
                    getter: m.getter.clone(),
                }
            }),
        // Text and every other terminal are never sequences.
        _ => SequenceStrategy::NotASequence,
    }
}

/// Realize the elements of `node` and hand them to `f`.
///
/// `f` sees `None` when the type is not a sequence or the elements could not
/// be read. Values the accessor computed on the fly are returned so the
/// caller can keep them alive for the rest of the comparison.
pub(crate) fn with_sequence<R>(
    node: &dyn Node,
    strategy: &SequenceStrategy,
    mut f: impl FnMut(Option<&[Value<'_>]>) -> R,
) -> (R, Vec<Box<dyn Node>>) {
    match strategy {
        SequenceStrategy::NotASequence => (f(None), Vec::new()),
        SequenceStrategy::Native(elements) => match elements(node.as_any()) {
            Ok(items) => settle(items, &mut f),
            Err(err) => {
                warn!(type_name = %node.type_info(), error = %err, "could not enumerate elements");
                (f(None), Vec::new())
            }
        },
        SequenceStrategy::Accessor { name, getter } => {
            let source = match getter(node.as_any()) {
                Ok(source) => source,
                Err(err) => {
                    warn!(accessor = *name, error = %err, "sequence accessor failed");
                    return (f(None), Vec::new());
                }
            };
            let outcome = with_resolved(&source, |inner| match inner.map(native_elements) {
                Some(Some(Ok(items))) => Ok(settle(items, &mut f)),
                Some(Some(Err(err))) => Err(err),
                _ => Ok((f(None), Vec::new())),
            });
            let (result, mut owned) = match outcome.and_then(|r| r) {
                Ok(settled) => settled,
                Err(err) => {
                    warn!(accessor = *name, error = %err, "sequence accessor failed");
                    (f(None), Vec::new())
                }
            };
            owned.extend(source.into_owned());
            (result, owned)
        }
    }
}

fn native_elements(node: &dyn Node) -> Option<Result<Vec<Value<'_>>, ReadError>> {
    match node.descriptor().shape() {
        Shape::Sequence(elements) => Some(elements(node.as_any())),
        _ => None,
    }
}

fn settle<R>(
    items: Vec<Value<'_>>,
    f: &mut impl FnMut(Option<&[Value<'_>]>) -> R,
) -> (R, Vec<Box<dyn Node>>) {
    let result = f(Some(&items));
    let owned = items.into_iter().filter_map(Value::into_owned).collect();
    (result, owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FakeSourceCache, FakeSourceList, FieldBacked, Person};
    use std::collections::{BTreeMap, HashSet};

    fn len_of(node: &dyn Node) -> Option<usize> {
        let strategy = strategy_of(node);
        with_sequence(node, &strategy, |items| items.map(<[_]>::len)).0
    }

    #[test]
    fn text_is_not_a_sequence() {
        assert!(!strategy_of(&String::from("abc")).is_sequence());
        assert!(!strategy_of(&"abc").is_sequence());
        assert_eq!(len_of(&String::from("abc")), None);
    }

    #[test]
    fn native_collections() {
        assert_eq!(len_of(&vec![1, 2, 3]), Some(3));
        assert_eq!(len_of(&HashSet::from([1_u8, 2])), Some(2));
        assert_eq!(len_of(&[0_u16; 4]), Some(4));
    }

    #[test]
    fn map_entries_are_owned_pairs() {
        let map = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let strategy = strategy_of(&map);
        let (len, owned) = with_sequence(&map, &strategy, |items| items.map(<[_]>::len));
        assert_eq!(len, Some(2));
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn items_accessor_is_probed_first() {
        let list = FakeSourceList::new(["x", "y"]);
        assert!(matches!(
            strategy_of(&list),
            SequenceStrategy::Accessor { name: "items", .. }
        ));
        assert_eq!(len_of(&list), Some(2));
    }

    #[test]
    fn computed_values_accessor_is_retained() {
        let cache = FakeSourceCache::new([(1, "one"), (2, "two"), (3, "three")]);
        let strategy = strategy_of(&cache);
        assert!(matches!(
            strategy,
            SequenceStrategy::Accessor { name: "values", .. }
        ));
        let (len, owned) = with_sequence(&cache, &strategy, |items| items.map(<[_]>::len));
        assert_eq!(len, Some(3));
        assert_eq!(owned.len(), 1);
    }

    #[test]
    fn plain_records_are_not_sequences() {
        let p = Person::new("Ada", 36);
        assert!(!strategy_of(&p).is_sequence());
    }

    #[test]
    fn fields_named_items_are_not_probed() {
        let backed = FieldBacked::new(vec![1, 2]);
        assert!(!strategy_of(&backed).is_sequence());
        assert_eq!(len_of(&backed), None);
    }
}
