//! Structural deep equality.
//!
//! Compares two values of the same type member by member, looking through
//! `Option`/`Box`/`Rc`/`RefCell`/locks, treating collections as unordered,
//! and terminating on cyclic graphs. Types opt in by implementing
//! [`Inspect`].
//!
//! ```
//! use deepeq::{deep_equal, deep_equal_report, Inspect, TypeDescriptor};
//!
//! struct Team {
//!     name: String,
//!     members: Vec<String>,
//! }
//!
//! impl Inspect for Team {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::composite::<Self>()
//!             .property("name", |t| &t.name)
//!             .property("members", |t| &t.members)
//!             .finish()
//!     }
//! }
//!
//! let a = Team { name: "core".into(), members: vec!["ann".into(), "bo".into()] };
//! let b = Team { name: "core".into(), members: vec!["bo".into(), "ann".into()] };
//! assert!(deep_equal(&a, &b));
//!
//! let c = Team { name: "infra".into(), members: vec![] };
//! let report = deep_equal_report(&a, &c);
//! assert!(!report.is_equal());
//! assert!(report.mentions("root.name"));
//! ```

pub mod comparer;

pub use comparer::Comparer;

pub use deepeq_core::{
    cache_stats, descriptor_of, hash_of, CacheStats, CompositeBuilder, DynValue, Inspect,
    MemberKind, Node, Shape, TypeDescriptor, Value, ValueKind, Visibility, ROOT,
};
pub use deepeq_types::{
    CompareConfig, CompareOptions, CompareReport, ConfigError, ConfigResult, DepthBehavior,
    Difference, DifferenceKind, MemberPolicy, ReadError, TypeInfo, DEFAULT_MAX_DEPTH,
};

/// Compare with the default policy and options: public properties only,
/// ignore markers honored, depth limit 20 treated as a difference.
pub fn deep_equal<T: Inspect>(a: &T, b: &T) -> bool {
    deep_equal_with(a, b, MemberPolicy::default(), &CompareOptions::default())
}

/// Like [`deep_equal`], returning every difference found.
pub fn deep_equal_report<T: Inspect>(a: &T, b: &T) -> CompareReport {
    deep_equal_report_with(a, b, MemberPolicy::default(), &CompareOptions::default())
}

/// Compare under an explicit policy and options.
pub fn deep_equal_with<T: Inspect>(
    a: &T,
    b: &T,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> bool {
    deepeq_core::compare(a, b, policy, options)
}

/// Like [`deep_equal_with`], returning every difference found.
pub fn deep_equal_report_with<T: Inspect>(
    a: &T,
    b: &T,
    policy: MemberPolicy,
    options: &CompareOptions,
) -> CompareReport {
    deepeq_core::compare_report(a, b, policy, options)
}
