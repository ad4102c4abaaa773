//! Order-insensitive sequence comparison.
//!
//! When every element on both sides is a terminal value the sequences are
//! compared as multisets. Otherwise elements are matched greedily: each
//! left element takes the first unused right element it structurally
//! equals.

use std::any::TypeId;
use std::collections::HashMap;

use deepeq_types::DifferenceKind;

use crate::classify::{classify, Classification};
use crate::context::CompareContext;
use crate::descriptor::Shape;
use crate::engine::{compare_values, handle_max_depth};
use crate::value::{Identity, Node, Value};

pub(crate) fn compare_unordered(
    ctx: &mut CompareContext<'_>,
    a: &[Value<'_>],
    b: &[Value<'_>],
    path: &str,
    depth: usize,
) -> bool {
    if let Some(max) = ctx.depth_limit_exceeded(depth) {
        return handle_max_depth(ctx, path, max);
    }
    if a.len() != b.len() {
        ctx.record(path, || DifferenceKind::CountsDiffer {
            left: a.len(),
            right: b.len(),
        });
        return false;
    }
    if a.is_empty() {
        return true;
    }

    if let Some(equal) = compare_multisets(ctx, a, b) {
        if !equal {
            ctx.record(path, || DifferenceKind::ItemsDiffer);
        }
        return equal;
    }
    compare_greedy(ctx, a, b, path, depth)
}

/// Multiset key: absent elements share one key; values bucket by type and
/// native hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    Absent,
    Value { type_id: TypeId, hash: Option<u64> },
}

struct Class<'n> {
    representative: Option<&'n dyn Node>,
    left: usize,
    right: usize,
}

/// `None` unless every element on both sides resolves to a terminal value
/// without holding a borrow open.
fn compare_multisets(
    ctx: &CompareContext<'_>,
    a: &[Value<'_>],
    b: &[Value<'_>],
) -> Option<bool> {
    let left = terminal_nodes(ctx, a)?;
    let right = terminal_nodes(ctx, b)?;

    let mut classes: Vec<Class<'_>> = Vec::new();
    let mut buckets: HashMap<Key, Vec<usize>> = HashMap::new();
    for (node, from_left) in left
        .iter()
        .map(|n| (*n, true))
        .chain(right.iter().map(|n| (*n, false)))
    {
        let bucket = buckets.entry(key_of(node)).or_default();
        let found = bucket
            .iter()
            .copied()
            .find(|&i| same_value(classes[i].representative, node));
        let index = found.unwrap_or_else(|| {
            classes.push(Class {
                representative: node,
                left: 0,
                right: 0,
            });
            bucket.push(classes.len() - 1);
            classes.len() - 1
        });
        if from_left {
            classes[index].left += 1;
        } else {
            classes[index].right += 1;
        }
    }
    Some(classes.iter().all(|c| c.left == c.right))
}

fn terminal_nodes<'v>(
    ctx: &CompareContext<'_>,
    values: &'v [Value<'_>],
) -> Option<Vec<Option<&'v dyn Node>>> {
    values
        .iter()
        .map(|value| {
            let node = settle(value)?;
            match node {
                Some(n) if classify(n, ctx.options()) != Classification::Terminal => None,
                _ => Some(node),
            }
        })
        .collect()
}

/// Resolve wrappers as long as each step yields a plain borrow. `None` means
/// the value cannot be pinned down without a guard or a read failure.
fn settle<'v>(value: &'v Value<'_>) -> Option<Option<&'v dyn Node>> {
    let mut current = match value.node() {
        Some(node) => node,
        None => return Some(None),
    };
    loop {
        let descriptor = current.descriptor();
        let Shape::Wrapper { unwrap, .. } = descriptor.shape() else {
            return Some(Some(current));
        };
        match unwrap(current.as_any()).ok()? {
            Value::Absent => return Some(None),
            Value::Borrowed(inner) => current = inner,
            Value::Held(_) | Value::Owned(_) => return None,
        }
    }
}

fn key_of(node: Option<&dyn Node>) -> Key {
    match node {
        None => Key::Absent,
        Some(n) => Key::Value {
            type_id: n.as_any().type_id(),
            hash: n.hash_dyn(),
        },
    }
}

fn same_value(a: Option<&dyn Node>, b: Option<&dyn Node>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Identity::of(a) == Identity::of(b) || a.eq_dyn(b) == Some(true),
        _ => false,
    }
}

fn compare_greedy(
    ctx: &mut CompareContext<'_>,
    a: &[Value<'_>],
    b: &[Value<'_>],
    path: &str,
    depth: usize,
) -> bool {
    let mut used = vec![false; b.len()];
    let mut equal = true;
    for (i, left) in a.iter().enumerate() {
        let item_path = format!("{path}[{i}]");
        // Depth limits hit by the first failing candidate explain the miss.
        let mut depth_notes = Vec::new();
        let found = (0..b.len()).find(|&j| {
            if used[j] {
                return false;
            }
            let trial = ctx.trial(|ctx| compare_values(ctx, left, &b[j], &item_path, depth + 1));
            if !trial.matched && depth_notes.is_empty() {
                depth_notes = trial.depth_notes;
            }
            trial.matched
        });
        match found {
            Some(j) => used[j] = true,
            None => {
                ctx.extend(depth_notes);
                ctx.record(&item_path, || DifferenceKind::NoMatchingItem);
                equal = false;
                if !ctx.is_exhaustive() {
                    break;
                }
            }
        }
    }
    equal
}
