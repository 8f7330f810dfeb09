/// Platform-specific functionality — entry attribute lookup and
/// privilege checks.

pub mod attributes;
pub mod permissions;

pub use attributes::{entry_attributes, EntryAttributes};
pub use permissions::{privilege_check, NoPrivilegeModel, PrivilegeCheck};

#[cfg(windows)]
pub use permissions::TokenElevationCheck;
