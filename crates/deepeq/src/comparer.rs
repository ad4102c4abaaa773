//! Reusable comparison settings.

use std::path::Path;

use deepeq_core::{Inspect, Node};
use deepeq_types::{CompareConfig, CompareOptions, CompareReport, ConfigResult, MemberPolicy};
use tracing::debug;

/// A reusable policy and option set.
///
/// ```
/// use deepeq::{Comparer, CompareOptions, DepthBehavior, MemberPolicy};
///
/// let comparer = Comparer::new(
///     MemberPolicy::default().with_non_public(true),
///     CompareOptions::default().with_depth_behavior(DepthBehavior::LogAndContinue),
/// );
/// assert!(comparer.equal(&vec![1, 2], &vec![2, 1]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Comparer {
    policy: MemberPolicy,
    options: CompareOptions,
}

impl Comparer {
    /// Create a comparer from a policy and options.
    pub fn new(policy: MemberPolicy, options: CompareOptions) -> Self {
        Self { policy, options }
    }

    /// Create a comparer from a loaded config.
    pub fn from_config(config: CompareConfig) -> Self {
        Self::new(config.policy, config.options)
    }

    /// Build from a TOML file; see [`CompareConfig`] for the format.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = CompareConfig::load(path)?;
        debug!(path = %path.display(), ?config, "loaded comparison config");
        Ok(Self::from_config(config))
    }

    /// Install a custom terminal predicate.
    pub fn with_terminal_predicate(
        mut self,
        predicate: impl Fn(&deepeq_types::TypeInfo) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.options = self.options.with_terminal_predicate(predicate);
        self
    }

    /// Get the member policy.
    pub fn policy(&self) -> MemberPolicy {
        self.policy
    }

    /// Get the comparison options.
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Returns `true` if `a` and `b` are structurally equal.
    pub fn equal<T: Inspect>(&self, a: &T, b: &T) -> bool {
        deepeq_core::compare(a, b, self.policy, &self.options)
    }

    /// Compare and collect every difference.
    pub fn report<T: Inspect>(&self, a: &T, b: &T) -> CompareReport {
        deepeq_core::compare_report(a, b, self.policy, &self.options)
    }

    /// Compare values whose types are only known at runtime.
    pub fn equal_dyn(&self, a: &dyn Node, b: &dyn Node) -> bool {
        deepeq_core::compare_dyn(a, b, self.policy, &self.options)
    }

    /// Like [`Comparer::report`] for runtime-typed values.
    pub fn report_dyn(&self, a: &dyn Node, b: &dyn Node) -> CompareReport {
        deepeq_core::compare_report_dyn(a, b, self.policy, &self.options)
    }
}
