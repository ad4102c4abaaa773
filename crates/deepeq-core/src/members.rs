//! Member discovery for composite types.

use std::fmt;
use std::sync::Arc;

use deepeq_types::{MemberPolicy, ReadError};
use tracing::debug;

use crate::descriptor::{Getter, MemberDef, MemberKind, Visibility};
use crate::registry;
use crate::value::{Node, Value};

/// A named, reusable reader for one member.
#[derive(Clone)]
pub struct MemberAccessor {
    name: &'static str,
    getter: Getter,
}

impl MemberAccessor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read this member from `owner`.
    pub fn read<'a>(&self, owner: &'a dyn Node) -> Result<Value<'a>, ReadError> {
        (self.getter)(owner.as_any())
    }
}

impl fmt::Debug for MemberAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberAccessor({})", self.name)
    }
}

/// The members of `node`'s type that take part in a comparison under
/// `policy`, in declaration order. Cached per `(type, policy)`.
pub fn members_of(node: &dyn Node, policy: MemberPolicy) -> Arc<[MemberAccessor]> {
    let info = node.type_info();
    registry::MEMBERS.get_or_insert_with((info.id(), policy), || {
        let descriptor = node.descriptor();
        let accessors: Arc<[MemberAccessor]> = descriptor
            .members()
            .iter()
            .filter(|m| is_eligible(m, policy))
            .map(|m| MemberAccessor {
                name: m.name,
                getter: Arc::clone(&m.getter),
            })
            .collect();
        debug!(
            type_name = info.name(),
            declared = descriptor.members().len(),
            eligible = accessors.len(),
            ?policy,
            "cached member accessors"
        );
        accessors
    })
}

fn is_eligible(member: &MemberDef, policy: MemberPolicy) -> bool {
    if member.kind == MemberKind::Field && !policy.include_fields {
        return false;
    }
    if member.visibility == Visibility::NonPublic && !policy.include_non_public {
        return false;
    }
    if member.ignored && policy.honor_ignore {
        return false;
    }
    // Function-typed members have no value equality.
    !member.declared_type().resolved().is_callable()
}
