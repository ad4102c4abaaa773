//! Terminal vs. composite decision per concrete type.

use deepeq_types::CompareOptions;

use crate::registry;
use crate::value::Node;

/// Whether a type is compared by value or traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Compared with the type's native value equality.
    Terminal,
    /// Traversed: members, or elements for sequences.
    Composite,
}

/// Classify the concrete type of `node`.
///
/// The call's custom predicate is consulted first and never cached. The
/// built-in rule (the type's descriptor is terminal) is memoized per type.
/// Wrappers such as `Option` are resolved before classification, so a
/// nullable terminal classifies as its payload.
pub fn classify(node: &dyn Node, options: &CompareOptions) -> Classification {
    if options.promotes(&node.type_info()) || is_builtin_terminal(node) {
        Classification::Terminal
    } else {
        Classification::Composite
    }
}

pub fn is_builtin_terminal(node: &dyn Node) -> bool {
    registry::TERMINALS.get_or_insert_with(node.type_info().id(), || {
        node.descriptor().is_terminal()
    })
}
