//! Standard collections. Maps iterate `(key, value)` pairs, copied out of
//! the map and compared as 2-tuples, so map keys and values must be
//! `Clone`. Maps holding non-`Clone` values (locks, most user records)
//! cannot be compared.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use crate::descriptor::TypeDescriptor;
use crate::inspect::Inspect;
use crate::value::Value;

macro_rules! iterable {
    ($($ty:ident),+) => {
        $(impl<T: Inspect> Inspect for $ty<T> {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::sequence::<Self>(|items| items.iter().map(Value::from).collect())
            }
        })+
    };
}

iterable!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(|items| items.iter().map(Value::from).collect())
    }
}

impl<T: Inspect, S: 'static> Inspect for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(|items| items.iter().map(Value::from).collect())
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S>
where
    K: Inspect + Clone,
    V: Inspect + Clone,
    S: 'static,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(|map| {
            map.iter()
                .map(|(k, v)| Value::owned((k.clone(), v.clone())))
                .collect()
        })
    }
}

impl<K, V> Inspect for BTreeMap<K, V>
where
    K: Inspect + Clone,
    V: Inspect + Clone,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(|map| {
            map.iter()
                .map(|(k, v)| Value::owned((k.clone(), v.clone())))
                .collect()
        })
    }
}
