/// Analysis modules — post-scan ranking.

pub mod top_folders;

pub use top_folders::{top_n, top_n_by, RankedFolder, SizeBasis};
