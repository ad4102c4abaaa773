//! Process-wide memo tables.
//!
//! Every table is keyed by type (and policy, for member lists), written at
//! most once per key and never invalidated. Values are built outside the
//! lock; when two threads race on the same key the first insert wins and
//! the duplicate is dropped.

use std::any::TypeId;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use deepeq_types::MemberPolicy;
use tracing::{debug, warn};

use crate::descriptor::TypeDescriptor;
use crate::inspect::Inspect;
use crate::members::MemberAccessor;
use crate::sequence::SequenceStrategy;

pub(crate) struct Memo<K, V> {
    name: &'static str,
    map: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            map: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get_or_insert_with(&self, key: K, build: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.map.read().unwrap_or_else(|e| self.recover(e)).get(&key) {
            return hit.clone();
        }
        let value = build();
        self.map
            .write()
            .unwrap_or_else(|e| self.recover(e))
            .entry(key)
            .or_insert(value)
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.map.read().unwrap_or_else(|e| self.recover(e)).len()
    }

    // Entries are immutable once written, so a poisoned table is still sound.
    fn recover<G>(&self, err: PoisonError<G>) -> G {
        warn!(cache = self.name, "cache lock poisoned; recovering");
        err.into_inner()
    }
}

pub(crate) static DESCRIPTORS: LazyLock<Memo<TypeId, Arc<TypeDescriptor>>> =
    LazyLock::new(|| Memo::new("descriptors"));

pub(crate) static TERMINALS: LazyLock<Memo<TypeId, bool>> =
    LazyLock::new(|| Memo::new("terminal_types"));

pub(crate) static MEMBERS: LazyLock<Memo<(TypeId, MemberPolicy), Arc<[MemberAccessor]>>> =
    LazyLock::new(|| Memo::new("member_lists"));

pub(crate) static SEQUENCES: LazyLock<Memo<TypeId, SequenceStrategy>> =
    LazyLock::new(|| Memo::new("sequence_strategies"));

/// The cached descriptor of `T`, built on first use.
pub fn descriptor_of<T: Inspect>() -> Arc<TypeDescriptor> {
    DESCRIPTORS.get_or_insert_with(TypeId::of::<T>(), || {
        let descriptor = Arc::new(T::describe());
        debug!(type_name = std::any::type_name::<T>(), ?descriptor, "registered descriptor");
        descriptor
    })
}

/// Entry counts of the process-wide caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub descriptors: usize,
    pub terminal_types: usize,
    pub member_lists: usize,
    pub sequence_strategies: usize,
}

pub fn cache_stats() -> CacheStats {
    CacheStats {
        descriptors: DESCRIPTORS.len(),
        terminal_types: TERMINALS.len(),
        member_lists: MEMBERS.len(),
        sequence_strategies: SEQUENCES.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn memo_builds_once_per_key() {
        let memo: Memo<u32, u32> = Memo::new("test");
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            7
        };
        assert_eq!(memo.get_or_insert_with(1, build), 7);
        assert_eq!(memo.get_or_insert_with(1, || 99), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn first_insert_wins_under_contention() {
        let memo: Arc<Memo<&'static str, usize>> = Arc::new(Memo::new("race"));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let memo = Arc::clone(&memo);
                thread::spawn(move || memo.get_or_insert_with("key", || i))
            })
            .collect();
        let seen: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seen.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn descriptor_is_shared() {
        let a = descriptor_of::<String>();
        let b = descriptor_of::<String>();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(cache_stats().descriptors >= 1);
    }
}
