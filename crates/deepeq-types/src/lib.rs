//! Boundary types for structural deep-equality comparison.
//!
//! This crate holds the records that cross the comparison engine's boundary:
//! the member policy and comparison options that configure a call, the report
//! a call produces, and the error types. Every other deepeq crate depends on
//! `deepeq-types`.
//!
//! # Key Types
//!
//! - [`MemberPolicy`]: Which data members participate (visibility, kind, ignore marker)
//! - [`CompareOptions`]: Depth limit, depth-exceeded behavior, custom terminal predicate
//! - [`DepthBehavior`]: Action taken once recursion exceeds the depth limit
//! - [`TypeInfo`]: Identity and readable name of a concrete type
//! - [`CompareReport`] / [`Difference`]: Verdict plus path-qualified differences
//! - [`CompareConfig`]: TOML-loadable policy + options pair

pub mod config;
pub mod error;
pub mod options;
pub mod policy;
pub mod report;
pub mod type_info;

pub use config::CompareConfig;
pub use error::{ConfigError, ConfigResult, ReadError};
pub use options::{CompareOptions, DepthBehavior, TerminalPredicate, DEFAULT_MAX_DEPTH};
pub use policy::MemberPolicy;
pub use report::{CompareReport, Difference, DifferenceKind};
pub use type_info::TypeInfo;
