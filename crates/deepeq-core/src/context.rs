//! Per-call comparison state: visited pairs, recorded differences and
//! speculative trials.

use std::collections::HashSet;

use deepeq_types::{CompareOptions, Difference, DifferenceKind, MemberPolicy};
use tracing::{debug, Level};

use crate::value::{Identity, Node, Value};

/// State of one top-level comparison call.
///
/// Owned by the call and dropped when it returns; nothing in here is shared
/// between calls or threads.
pub(crate) struct CompareContext<'o> {
    policy: MemberPolicy,
    options: &'o CompareOptions,
    /// Unordered identity pairs already entered. Only ever grows.
    visited: HashSet<(Identity, Identity)>,
    /// `None` in boolean mode.
    differences: Option<Vec<Difference>>,
    /// Keep scanning after the first mismatch.
    exhaustive: bool,
    /// Values computed by accessors. Held until the call ends so their
    /// addresses stay unique while they may appear in `visited`.
    retained: Vec<Box<dyn Node>>,
}

/// Outcome of [`CompareContext::trial`].
pub(crate) struct Trial {
    pub(crate) matched: bool,
    /// Depth-limit records of a failed trial, empty otherwise.
    pub(crate) depth_notes: Vec<Difference>,
}

impl<'o> CompareContext<'o> {
    pub(crate) fn new(policy: MemberPolicy, options: &'o CompareOptions, report: bool) -> Self {
        Self {
            policy,
            options,
            visited: HashSet::new(),
            differences: report.then(Vec::new),
            exhaustive: report,
            retained: Vec::new(),
        }
    }

    pub(crate) fn policy(&self) -> MemberPolicy {
        self.policy
    }

    pub(crate) fn options(&self) -> &'o CompareOptions {
        self.options
    }

    pub(crate) fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// The configured limit, if `depth` goes past it.
    pub(crate) fn depth_limit_exceeded(&self, depth: usize) -> Option<usize> {
        self.options.max_depth.filter(|&max| depth > max)
    }

    /// Mark the pair visited. Returns `false` if it already was.
    pub(crate) fn mark_visited(&mut self, a: &dyn Node, b: &dyn Node) -> bool {
        let (a, b) = (Identity::of(a), Identity::of(b));
        let key = if a <= b { (a, b) } else { (b, a) };
        self.visited.insert(key)
    }

    pub(crate) fn record(&mut self, path: &str, kind: impl FnOnce() -> DifferenceKind) {
        match &mut self.differences {
            Some(list) => list.push(Difference::new(path, kind())),
            None => {
                if tracing::enabled!(Level::DEBUG) {
                    debug!(path, reason = %kind(), "mismatch");
                }
            }
        }
    }

    pub(crate) fn retain(&mut self, value: Value<'_>) {
        self.retained.extend(value.into_owned());
    }

    pub(crate) fn retain_all(&mut self, values: Vec<Box<dyn Node>>) {
        self.retained.extend(values);
    }

    /// Run a speculative comparison in boolean mode.
    ///
    /// Mismatches found inside never reach the report. If the trial
    /// succeeds, notes it recorded (log-and-continue depth notes) are kept;
    /// if it fails, its depth-limit records are handed back to the caller.
    pub(crate) fn trial(&mut self, f: impl FnOnce(&mut Self) -> bool) -> Trial {
        let scratch = self.differences.is_some().then(Vec::new);
        let outer = std::mem::replace(&mut self.differences, scratch);
        let exhaustive = std::mem::replace(&mut self.exhaustive, false);
        let matched = f(self);
        let notes = std::mem::replace(&mut self.differences, outer).unwrap_or_default();
        self.exhaustive = exhaustive;
        if matched {
            self.extend(notes);
            return Trial {
                matched,
                depth_notes: Vec::new(),
            };
        }
        Trial {
            matched,
            depth_notes: notes.into_iter().filter(Difference::is_depth_limit).collect(),
        }
    }

    /// Append already-built records. A no-op in boolean mode.
    pub(crate) fn extend(&mut self, records: Vec<Difference>) {
        if let Some(list) = self.differences.as_mut() {
            list.extend(records);
        }
    }

    pub(crate) fn into_differences(self) -> Vec<Difference> {
        self.differences.unwrap_or_default()
    }
}
