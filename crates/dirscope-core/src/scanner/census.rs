/// Upfront folder census.
///
/// A separate `jwalk` walk that only counts directories, so the progress
/// display has a fixed denominator before aggregation starts. Links are not
/// followed and the inclusion policy is not applied. Directories that cannot
/// be listed are still counted (they are visible in their parent's
/// listing); only their contents are missing.
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Count `root` and every directory below it.
///
/// `root` itself always counts: callers validate it as a directory first,
/// and a root that is a link to a directory reports a link file type.
pub fn count_folders(root: &Path, parallelism: usize) -> u64 {
    let start = Instant::now();
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(parallelism.max(1)));

    let mut folders: u64 = 0;
    let mut unreadable: u64 = 0;
    for entry in walker {
        match entry {
            Ok(e) if e.depth == 0 || e.file_type().is_dir() => folders += 1,
            Ok(_) => {}
            Err(_) => unreadable += 1,
        }
    }

    debug!(
        "Census of {}: {folders} folders ({unreadable} unreadable) in {:?}",
        root.display(),
        start.elapsed()
    );
    folders
}
