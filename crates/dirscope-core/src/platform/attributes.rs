/// Hidden/system attribute lookup for directory entries.
///
/// Windows stores both flags in the entry's attribute word. Elsewhere there
/// is no system flag and "hidden" is the dot-prefix naming convention.
use std::ffi::OsStr;
use std::fs::Metadata;

/// The attribute flags the inclusion policy looks at.
///
/// `Default` (neither flag) is also the fail-open value used when the
/// attributes cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryAttributes {
    pub hidden: bool,
    pub system: bool,
}

/// Read the attributes of an entry from its name and (if available) its
/// metadata.
#[cfg(windows)]
pub fn entry_attributes(_name: &OsStr, metadata: Option<&Metadata>) -> EntryAttributes {
    use std::os::windows::fs::MetadataExt;
    use windows::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_SYSTEM};

    let Some(meta) = metadata else {
        return EntryAttributes::default();
    };
    let bits = meta.file_attributes();
    EntryAttributes {
        hidden: bits & FILE_ATTRIBUTE_HIDDEN.0 != 0,
        system: bits & FILE_ATTRIBUTE_SYSTEM.0 != 0,
    }
}

/// Read the attributes of an entry from its name and (if available) its
/// metadata.
#[cfg(not(windows))]
pub fn entry_attributes(name: &OsStr, _metadata: Option<&Metadata>) -> EntryAttributes {
    EntryAttributes {
        hidden: name.as_encoded_bytes().first() == Some(&b'.'),
        system: false,
    }
}
