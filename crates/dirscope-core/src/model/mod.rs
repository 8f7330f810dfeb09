/// Data model for scan results.
///
/// Re-exports the per-folder record and the concurrent result map.
pub mod folder_record;
pub mod result_map;

pub use folder_record::{extension_key, FileTypeCounts, FolderRecord};
pub use result_map::{ResultMap, SubtreeTotal};
