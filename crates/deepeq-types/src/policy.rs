//! Which data members take part in a comparison.

use serde::{Deserialize, Serialize};

/// Which data members of a composite type participate in a comparison.
///
/// The policy is part of the member cache key, so two policies never share
/// a cached member list for the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberPolicy {
    /// Include members declared non-public.
    pub include_non_public: bool,
    /// Include plain storage fields in addition to properties.
    pub include_fields: bool,
    /// Skip members carrying the ignore marker.
    pub honor_ignore: bool,
}

impl Default for MemberPolicy {
    fn default() -> Self {
        Self {
            include_non_public: false,
            include_fields: false,
            honor_ignore: true,
        }
    }
}

impl MemberPolicy {
    /// Every declared member, ignore markers included.
    pub fn everything() -> Self {
        Self {
            include_non_public: true,
            include_fields: true,
            honor_ignore: false,
        }
    }

    pub fn with_non_public(mut self, include: bool) -> Self {
        self.include_non_public = include;
        self
    }

    pub fn with_fields(mut self, include: bool) -> Self {
        self.include_fields = include;
        self
    }

    pub fn with_ignore_marker(mut self, honor: bool) -> Self {
        self.honor_ignore = honor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let p = MemberPolicy::default();
        assert!(!p.include_non_public);
        assert!(!p.include_fields);
        assert!(p.honor_ignore);
    }

    #[test]
    fn builders_toggle_single_flag() {
        let p = MemberPolicy::default().with_fields(true);
        assert!(p.include_fields);
        assert!(!p.include_non_public);
        assert_ne!(p, MemberPolicy::default());
        assert!(MemberPolicy::everything().with_ignore_marker(true).honor_ignore);
    }
}
