//! Recursive structural comparison.
//!
//! Each node pair goes through, in order: depth check, wrapper resolution,
//! absence, identity, type, weak references, terminal equality, sequence
//! matching, the cycle guard and finally member-by-member traversal.

use deepeq_types::{CompareOptions, CompareReport, DepthBehavior, DifferenceKind, MemberPolicy};
use tracing::{debug, warn};

use crate::classify::{classify, Classification};
use crate::context::CompareContext;
use crate::inspect::Inspect;
use crate::matcher;
use crate::members::members_of;
use crate::sequence::{self, SequenceStrategy};
use crate::value::{with_resolved, Identity, Node, Value};

/// Path label of the two values passed to an entry point.
pub const ROOT: &str = "root";

/// Structural equality of `a` and `b`.
///
/// Stops at the first difference; mismatches are only visible as `debug`
/// events.
pub fn compare<T: Inspect>(
    a: &T,
    b: &T,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> bool {
    compare_dyn(a, b, policy, options)
}

/// Structural equality of `a` and `b` with every difference recorded.
pub fn compare_report<T: Inspect>(
    a: &T,
    b: &T,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> CompareReport {
    compare_report_dyn(a, b, policy, options)
}

/// Like [`compare`], for values whose types are only known at runtime. Values
/// of different concrete types are never equal.
pub fn compare_dyn(
    a: &dyn Node,
    b: &dyn Node,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> bool {
    let mut ctx = CompareContext::new(policy, options, false);
    compare_values(&mut ctx, &Value::Borrowed(a), &Value::Borrowed(b), ROOT, 0)
}

pub fn compare_report_dyn(
    a: &dyn Node,
    b: &dyn Node,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> CompareReport {
    let mut ctx = CompareContext::new(policy, options, true);
    let equal = compare_values(&mut ctx, &Value::Borrowed(a), &Value::Borrowed(b), ROOT, 0);
    let differences = ctx.into_differences();
    debug!(equal, differences = differences.len(), "comparison finished");
    CompareReport::new(equal, differences)
}

pub(crate) fn compare_values(
    ctx: &mut CompareContext<'_>,
    a: &Value<'_>,
    b: &Value<'_>,
    path: &str,
    depth: usize,
) -> bool {
    if let Some(max) = ctx.depth_limit_exceeded(depth) {
        return handle_max_depth(ctx, path, max);
    }
    let outcome = with_resolved(a, |na| {
        with_resolved(b, |nb| compare_nodes(ctx, na, nb, path, depth))
    });
    match outcome.and_then(|inner| inner) {
        Ok(equal) => equal,
        Err(err) => {
            warn!(path, error = %err, "could not read value; skipping");
            true
        }
    }
}

pub(crate) fn handle_max_depth(ctx: &mut CompareContext<'_>, path: &str, max: usize) -> bool {
    match ctx.options().on_max_depth {
        DepthBehavior::TreatAsEqual => {
            debug!(path, max, "depth limit reached; treating as equal");
            true
        }
        DepthBehavior::TreatAsDifferent => {
            ctx.record(path, || DifferenceKind::DepthLimit { max });
            false
        }
        DepthBehavior::LogAndContinue => {
            ctx.record(path, || DifferenceKind::DepthLimit { max });
            true
        }
    }
}

fn compare_nodes(
    ctx: &mut CompareContext<'_>,
    a: Option<&dyn Node>,
    b: Option<&dyn Node>,
    path: &str,
    depth: usize,
) -> bool {
    let (a, b) = match (a, b) {
        (None, None) => return true,
        (Some(a), Some(b)) => (a, b),
        _ => {
            ctx.record(path, || DifferenceKind::OneAbsent);
            return false;
        }
    };
    if Identity::of(a) == Identity::of(b) {
        return true;
    }

    let (left, right) = (a.type_info(), b.type_info());
    if left != right {
        ctx.record(path, || DifferenceKind::TypesDiffer {
            left: left.name().to_string(),
            right: right.name().to_string(),
        });
        return false;
    }

    if a.descriptor().is_weak() {
        return true;
    }

    if classify(a, ctx.options()) == Classification::Terminal {
        return compare_terminals(ctx, a, b, path);
    }

    let strategy = sequence::strategy_of(a);
    if let Some(equal) = compare_sequences(ctx, a, b, &strategy, path, depth) {
        return equal;
    }

    if !ctx.mark_visited(a, b) {
        return true;
    }
    compare_members(ctx, a, b, path, depth)
}

fn compare_terminals(ctx: &mut CompareContext<'_>, a: &dyn Node, b: &dyn Node, path: &str) -> bool {
    // Without a native equality only identity counts, and identity already
    // failed.
    if a.eq_dyn(b) == Some(true) {
        return true;
    }
    ctx.record(path, || DifferenceKind::ValuesDiffer {
        left: a.render_dyn(),
        right: b.render_dyn(),
    });
    false
}

/// `None` when neither side yields a sequence; member traversal then
/// takes over.
fn compare_sequences(
    ctx: &mut CompareContext<'_>,
    a: &dyn Node,
    b: &dyn Node,
    strategy: &SequenceStrategy,
    path: &str,
    depth: usize,
) -> Option<bool> {
    if !strategy.is_sequence() {
        return None;
    }
    let ((verdict, owned_b), owned_a) = sequence::with_sequence(a, strategy, |left| {
        sequence::with_sequence(b, strategy, |right| match (left, right) {
            (None, None) => None,
            (Some(left), Some(right)) => Some(matcher::compare_unordered(
                ctx,
                left,
                right,
                path,
                depth + 1,
            )),
            _ => {
                ctx.record(path, || DifferenceKind::OneNotCollection);
                Some(false)
            }
        })
    });
    ctx.retain_all(owned_a);
    ctx.retain_all(owned_b);
    verdict
}

fn compare_members(
    ctx: &mut CompareContext<'_>,
    a: &dyn Node,
    b: &dyn Node,
    path: &str,
    depth: usize,
) -> bool {
    let members = members_of(a, ctx.policy());
    if members.is_empty() {
        debug!(path, type_name = %a.type_info(), "no comparable members; treating as equal");
        return true;
    }

    let mut equal = true;
    for member in members.iter() {
        let child = format!("{path}.{}", member.name());
        let (left, right) = match (member.read(a), member.read(b)) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(err), _) | (_, Err(err)) => {
                warn!(path = %child, error = %err, "member read failed; skipping");
                continue;
            }
        };
        if is_weak(&left) || is_weak(&right) {
            continue;
        }
        let member_equal = compare_values(ctx, &left, &right, &child, depth + 1);
        ctx.retain(left);
        ctx.retain(right);
        if !member_equal {
            equal = false;
            if !ctx.is_exhaustive() {
                break;
            }
        }
    }
    equal
}

fn is_weak(value: &Value<'_>) -> bool {
    with_resolved(value, |node| node.is_some_and(|n| n.descriptor().is_weak())).unwrap_or(false)
}
