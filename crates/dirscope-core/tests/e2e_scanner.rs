/// End-to-end scanner integration tests.
///
/// These run the real coordinator (census, rayon pool, aggregation tasks)
/// against temporary directory trees built with `tempfile`, and inspect the
/// published records, counters, journals and progress messages.
use dirscope_core::analysis::{top_n, top_n_by, SizeBasis};
use dirscope_core::journal::{JournalPaths, ScanJournal};
use dirscope_core::scanner::{
    start_scan, InclusionPolicy, ScanCoordinator, ScanOptions, ScanProgress, ScanReport,
};
use dirscope_core::ScanError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// ```text
/// root/
///   a/
///     x.txt   (1000 bytes)
///   b/
///   y.log     (2000 bytes)
/// ```
fn build_scenario_tree(root: &Path) {
    fs::create_dir(root.join("a")).unwrap();
    fs::create_dir(root.join("b")).unwrap();
    write_bytes(&root.join("a").join("x.txt"), 1_000);
    write_bytes(&root.join("y.log"), 2_000);
}

fn options(include_hidden: bool) -> ScanOptions {
    ScanOptions {
        policy: InclusionPolicy::new(include_hidden),
        max_workers: 4,
    }
}

fn scan(root: &Path, include_hidden: bool) -> ScanReport {
    ScanCoordinator::new(options(include_hidden))
        .scan(root)
        .expect("scan failed")
}

/// True if the current user can still list a directory we made unreadable
/// (e.g. tests running as root), in which case access-denied tests skip.
#[cfg(unix)]
fn permissions_are_enforced(dir: &Path) -> bool {
    fs::read_dir(dir).is_err()
}

#[cfg(unix)]
fn set_mode(dir: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(mode)).unwrap();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn scenario_records_match_immediate_files() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());

    let report = scan(tmp.path(), true);
    let root = report.root.clone();
    assert_eq!(report.results.len(), 3);

    let a = report.results.get(&root.join("a")).expect("record for a");
    assert_eq!(a.total_size(), 1_000);
    assert_eq!(a.file_type_counts().len(), 1);
    assert_eq!(a.file_type_counts()[".txt"], 1);

    let b = report.results.get(&root.join("b")).expect("record for b");
    assert_eq!(b.total_size(), 0);
    assert!(b.file_type_counts().is_empty());

    let top = report.results.get(&root).expect("record for root");
    assert_eq!(top.total_size(), 2_000);
    assert_eq!(top.file_type_counts().len(), 1);
    assert_eq!(top.file_type_counts()[".log"], 1);
}

#[test]
fn counters_match_published_records() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    fs::create_dir_all(tmp.path().join("b").join("c").join("d")).unwrap();

    let report = scan(tmp.path(), true);
    assert_eq!(report.folders_total, 5);
    assert_eq!(report.folders_completed, 5);
    assert_eq!(report.folders_completed, report.results.len() as u64);
    assert_eq!(report.error_count, 0);
}

#[test]
fn empty_root_yields_one_empty_record() {
    let tmp = TempDir::new().unwrap();
    let report = scan(tmp.path(), true);
    assert_eq!(report.results.len(), 1);
    let record = report.results.get(&report.root).unwrap();
    assert_eq!(record.total_size(), 0);
    assert!(record.file_type_counts().is_empty());
}

#[cfg(unix)]
#[test]
fn hidden_files_excluded_by_default_policy() {
    let tmp = TempDir::new().unwrap();
    let c = tmp.path().join("c");
    fs::create_dir(&c).unwrap();
    write_bytes(&c.join(".hidden"), 500);
    write_bytes(&c.join("visible.dat"), 100);
    fs::create_dir(tmp.path().join(".cache")).unwrap();

    let report = scan(tmp.path(), false);
    let record = report.results.get(&report.root.join("c")).unwrap();
    assert_eq!(record.total_size(), 100);
    // Hidden directories are not descended into either.
    assert!(!report.results.contains(&report.root.join(".cache")));

    let report = scan(tmp.path(), true);
    let record = report.results.get(&report.root.join("c")).unwrap();
    assert_eq!(record.total_size(), 600);
    assert!(report.results.contains(&report.root.join(".cache")));
}

/// An unreadable directory drops out with its whole subtree; its siblings
/// and parent are still published and the error is journalled.
#[cfg(unix)]
#[test]
fn access_denied_is_contained() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    let locked = root.join("locked");
    fs::create_dir_all(locked.join("inner")).unwrap();
    fs::create_dir_all(root.join("open")).unwrap();
    write_bytes(&locked.join("inner").join("deep.txt"), 10);
    write_bytes(&root.join("open").join("ok.txt"), 10);

    set_mode(&locked, 0o000);
    if !permissions_are_enforced(&locked) {
        set_mode(&locked, 0o755);
        eprintln!("skipping: running with privileges that bypass permissions");
        return;
    }

    let logs = TempDir::new().unwrap();
    let paths = JournalPaths {
        errors: logs.path().join("errors.log"),
        progress: logs.path().join("progress.log"),
    };
    let report = ScanCoordinator::new(options(true))
        .with_journal(ScanJournal::open(&paths).unwrap())
        .scan(&root)
        .unwrap();
    set_mode(&locked, 0o755);

    assert!(!report.results.contains(&report.root.join("locked")));
    assert!(!report
        .results
        .contains(&report.root.join("locked").join("inner")));
    assert!(report.results.contains(&report.root.join("open")));
    assert!(report.results.contains(&report.root));
    assert_eq!(report.error_count, 1);
    assert_eq!(report.folders_completed, report.results.len() as u64);
    assert!(report.folders_completed < report.folders_total);

    let errors = fs::read_to_string(&paths.errors).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.contains("AccessDenied"));
    assert!(errors.contains("locked"));
}

/// `levels` nested directories named `name` under `base`; returns the
/// deepest one.
#[cfg(target_os = "linux")]
fn nest(base: &Path, name: &str, levels: usize) -> std::path::PathBuf {
    let deepest = (0..levels).fold(base.to_path_buf(), |dir, _| dir.join(name));
    fs::create_dir_all(&deepest).unwrap();
    deepest
}

/// A chain deeper than PATH_MAX fails with a name-too-long error partway
/// down. The failure is contained like any other: the deep tail is
/// missing, everything above it and the sibling are published.
#[cfg(target_os = "linux")]
#[test]
fn path_too_long_is_contained() {
    const HALF: usize = 12;
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    let name = "d".repeat(200);
    fs::create_dir_all(root.join("sibling")).unwrap();

    // No single call may exceed PATH_MAX, so build two halves and move the
    // second under the first: HALF + 1 + HALF levels.
    let upper = nest(&root, &name, HALF);
    let lower = tmp.path().join(&name);
    nest(&lower, &name, HALF);
    fs::rename(&lower, upper.join(&name)).unwrap();

    let logs = TempDir::new().unwrap();
    let paths = JournalPaths {
        errors: logs.path().join("errors.log"),
        progress: logs.path().join("progress.log"),
    };
    let report = ScanCoordinator::new(options(true))
        .with_journal(ScanJournal::open(&paths).unwrap())
        .scan(&root)
        .unwrap();

    let bottom = (0..2 * HALF + 1).fold(report.root.clone(), |dir, _| dir.join(&name));
    assert!(!report.results.contains(&bottom));
    assert!(report
        .results
        .records()
        .iter()
        .all(|r| r.path().as_os_str().len() < 4_096));
    assert!(report.results.contains(&report.root.join("sibling")));
    assert!(report.results.contains(&report.root.join(&name)));
    assert_eq!(report.error_count, 1);
    assert_eq!(report.folders_completed, report.results.len() as u64);
    assert!(report.folders_completed < report.folders_total);

    let errors = fs::read_to_string(&paths.errors).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.contains("PathTooLong"));
}

/// Links are never followed: a link to a sibling directory and a loop back
/// to the root are both plain files of their own size.
#[cfg(unix)]
#[test]
fn symlinks_are_counted_not_followed() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    let real = tmp.path().join("real");
    fs::create_dir(&real).unwrap();
    write_bytes(&real.join("f.bin"), 5_000);
    symlink(&real, tmp.path().join("link")).unwrap();
    symlink(tmp.path(), real.join("loop")).unwrap();
    let link_size = fs::symlink_metadata(tmp.path().join("link")).unwrap().len();
    let loop_size = fs::symlink_metadata(real.join("loop")).unwrap().len();

    let report = scan(tmp.path(), true);
    assert_eq!(report.results.len(), 2);
    assert!(!report.results.contains(&report.root.join("link")));
    assert!(!report.results.contains(&report.root.join("real").join("loop")));
    assert_eq!(report.folders_total, 2);
    assert_eq!(report.error_count, 0);

    let root = report.results.get(&report.root).unwrap();
    assert_eq!(root.total_size(), link_size);
    assert_eq!(root.file_type_counts().get(""), Some(&1));
    assert_eq!(root.file_type_counts().len(), 1);

    let real = report.results.get(&report.root.join("real")).unwrap();
    assert_eq!(real.total_size(), 5_000 + loop_size);
    assert_eq!(real.file_type_counts().get(""), Some(&1));
    assert_eq!(real.file_type_counts().get(".bin"), Some(&1));
}

/// A root that is itself a link is listed through the link, and the census
/// counts it, so completed never runs past total.
#[cfg(unix)]
#[test]
fn linked_root_keeps_counters_consistent() {
    let tmp = TempDir::new().unwrap();
    let real = tmp.path().join("real");
    for sub in ["a", "b", "c/d"] {
        fs::create_dir_all(real.join(sub)).unwrap();
    }
    let link = tmp.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let report = scan(&link, true);
    assert_eq!(report.folders_total, 5);
    assert_eq!(report.folders_completed, 5);
    assert!(report.results.contains(&report.root.join("c").join("d")));
}

#[test]
fn milestones_are_journalled_every_hundred_folders() {
    let tmp = TempDir::new().unwrap();
    for i in 0..249 {
        fs::create_dir(tmp.path().join(format!("d{i:03}"))).unwrap();
    }
    let logs = TempDir::new().unwrap();
    let paths = JournalPaths {
        errors: logs.path().join("errors.log"),
        progress: logs.path().join("progress.log"),
    };

    let report = ScanCoordinator::new(options(true))
        .with_journal(ScanJournal::open(&paths).unwrap())
        .scan(tmp.path())
        .unwrap();
    assert_eq!(report.folders_completed, 250);

    let progress = fs::read_to_string(&paths.progress).unwrap();
    let lines: Vec<&str> = progress.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("100 folders processed"));
    assert!(lines[1].ends_with("200 folders processed"));
    assert!(fs::read_to_string(&paths.errors).unwrap().is_empty());
}

#[test]
fn ranking_after_scan() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    let report = scan(tmp.path(), true);

    let own = top_n(&report.results, 2);
    assert_eq!(own.len(), 2);
    assert_eq!(own[0].path(), report.root.as_path());
    assert_eq!(own[1].total_size(), 1_000);

    let subtree = top_n_by(&report.results, 100, SizeBasis::Subtree);
    assert_eq!(subtree.len(), 3);
    assert_eq!(subtree[0].size, 3_000);
    assert_eq!(subtree[0].file_type_counts[".txt"], 1);
    assert_eq!(subtree[0].file_type_counts[".log"], 1);
}

#[test]
fn invalid_roots_are_fatal() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 1);

    let coordinator = ScanCoordinator::new(options(true));
    assert!(matches!(
        coordinator.scan(&file),
        Err(ScanError::InvalidRoot { .. })
    ));
    assert!(matches!(
        coordinator.scan(&tmp.path().join("missing")),
        Err(ScanError::InvalidRoot { .. })
    ));
}

/// The background form reports Started, then Complete, then hands back
/// the same report `scan` would.
#[test]
fn background_scan_reports_progress() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());

    let handle = start_scan(tmp.path().to_path_buf(), options(true), ScanJournal::disabled())
        .expect("spawn scanner");
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    let mut started = None;
    let mut completed = None;
    while completed.is_none() {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner did not complete within 30 seconds"
        );
        match handle.progress_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(ScanProgress::Started { folders_total }) => started = Some(folders_total),
            Ok(ScanProgress::Complete {
                folders_completed, ..
            }) => completed = Some(folders_completed),
            Ok(_) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }

    assert_eq!(started, Some(3));
    assert_eq!(completed, Some(3));
    let report = handle.join().unwrap();
    assert_eq!(report.results.len(), 3);
}
