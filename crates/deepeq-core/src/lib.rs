//! Structural deep-equality engine.
//!
//! Compares two object graphs of the same declared type member by member,
//! without requiring the types to implement `PartialEq`. Types opt in by
//! implementing [`Inspect`], which describes how their values are compared.
//!
//! # Architecture
//!
//! - [`descriptor`]: per-type comparison descriptors and their builder
//! - [`registry`]: process-wide, write-once memo tables
//! - [`classify`]: terminal vs. composite decision
//! - [`members`]: eligible members under a [`MemberPolicy`](deepeq_types::MemberPolicy)
//! - [`sequence`]: collection detection (native or via an `items`/`values` accessor)
//! - `matcher`: order-insensitive sequence comparison
//! - [`engine`]: recursive traversal with depth and cycle control
//!
//! Implementations for std, chrono and uuid types live in `impls`.

pub mod classify;
mod context;
pub mod descriptor;
pub mod engine;
mod impls;
pub mod inspect;
mod matcher;
pub mod members;
pub mod registry;
pub mod sequence;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use classify::{classify, Classification};
pub use descriptor::{
    CompositeBuilder, MemberDef, MemberKind, Shape, TypeDescriptor, ValueKind, Visibility,
};
pub use engine::{compare, compare_dyn, compare_report, compare_report_dyn, ROOT};
pub use impls::DynValue;
pub use inspect::{hash_of, Inspect};
pub use members::{members_of, MemberAccessor};
pub use registry::{cache_stats, descriptor_of, CacheStats};
pub use sequence::{strategy_of, SequenceStrategy, SEQUENCE_ACCESSORS};
pub use value::{with_resolved, Identity, Node, Value};
