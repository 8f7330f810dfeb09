/// Inclusion policy and entry classification.
use crate::platform::EntryAttributes;

/// Whether hidden/system entries count toward totals. Fixed for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InclusionPolicy {
    pub include_system_and_hidden: bool,
}

impl InclusionPolicy {
    pub fn new(include_system_and_hidden: bool) -> Self {
        Self {
            include_system_and_hidden,
        }
    }

    /// Include every entry regardless of attributes.
    pub fn everything() -> Self {
        Self::new(true)
    }
}

/// Decide whether an entry with `attrs` counts under `policy`.
#[inline]
pub fn is_included(attrs: EntryAttributes, policy: InclusionPolicy) -> bool {
    policy.include_system_and_hidden || !(attrs.hidden || attrs.system)
}
