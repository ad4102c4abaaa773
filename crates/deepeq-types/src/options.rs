//! Comparison options: depth limit, depth behavior and terminal predicate.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::type_info::TypeInfo;

/// Default recursion limit. The root comparison starts at depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Action taken once recursion exceeds the configured maximum depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthBehavior {
    /// Return equal without recording anything.
    TreatAsEqual,
    /// Return not equal and record a depth-limit difference.
    #[default]
    TreatAsDifferent,
    /// Record a depth-limit difference but return equal.
    LogAndContinue,
}

/// Call-scoped predicate promoting additional types to terminal.
///
/// Evaluated fresh on every classification and never folded into any
/// process-wide cache.
#[derive(Clone)]
pub struct TerminalPredicate(Arc<dyn Fn(&TypeInfo) -> bool + Send + Sync>);

impl TerminalPredicate {
    pub fn new(f: impl Fn(&TypeInfo) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Returns `true` if the predicate promotes `info` to terminal.
    pub fn matches(&self, info: &TypeInfo) -> bool {
        (self.0)(info)
    }
}

impl fmt::Debug for TerminalPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TerminalPredicate(..)")
    }
}

/// Tuning knobs for one comparison call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Maximum recursion depth; `None` means unbounded.
    pub max_depth: Option<usize>,
    /// What to do once `max_depth` is exceeded.
    pub on_max_depth: DepthBehavior,
    /// Optional predicate promoting additional types to terminal.
    #[serde(skip)]
    pub terminal_predicate: Option<TerminalPredicate>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            on_max_depth: DepthBehavior::default(),
            terminal_predicate: None,
        }
    }
}

impl CompareOptions {
    /// Options without a depth limit.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_depth_behavior(mut self, behavior: DepthBehavior) -> Self {
        self.on_max_depth = behavior;
        self
    }

    pub fn with_terminal_predicate(
        mut self,
        predicate: impl Fn(&TypeInfo) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.terminal_predicate = Some(TerminalPredicate::new(predicate));
        self
    }

    /// Returns `true` if the custom predicate promotes `info` to terminal.
    pub fn promotes(&self, info: &TypeInfo) -> bool {
        self.terminal_predicate
            .as_ref()
            .is_some_and(|p| p.matches(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let o = CompareOptions::default();
        assert_eq!(o.max_depth, Some(20));
        assert_eq!(o.on_max_depth, DepthBehavior::TreatAsDifferent);
        assert!(o.terminal_predicate.is_none());
    }

    #[test]
    fn unbounded_has_no_limit() {
        assert_eq!(CompareOptions::unbounded().max_depth, None);
    }

    #[test]
    fn predicate_is_consulted() {
        let o = CompareOptions::default().with_terminal_predicate(|t| t.is::<u8>());
        assert!(o.promotes(&TypeInfo::of::<u8>()));
        assert!(!o.promotes(&TypeInfo::of::<u16>()));
        assert!(!CompareOptions::default().promotes(&TypeInfo::of::<u8>()));
    }

    #[test]
    fn depth_behavior_serde_names() {
        let json = serde_json::to_string(&DepthBehavior::LogAndContinue).unwrap();
        assert_eq!(json, "\"log-and-continue\"");
        let parsed: DepthBehavior = serde_json::from_str("\"treat-as-equal\"").unwrap();
        assert_eq!(parsed, DepthBehavior::TreatAsEqual);
    }
}
