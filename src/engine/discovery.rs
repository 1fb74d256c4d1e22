//! File discovery under the configured roots.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Outcome of walking the roots.
#[derive(Debug, Default)]
pub struct Discovered {
    /// Files accepted for analysis, in walk order.
    pub files: Vec<PathBuf>,
    /// Files rejected by exclude patterns, extension filter, or the
    /// test-file policy.
    pub skipped: usize,
}

/// Walk every configured root and partition files into accepted and
/// skipped.
///
/// A root that does not exist contributes zero files; that is not an
/// error. Hidden directories and anything matching an exclude pattern are
/// pruned during the walk.
pub fn discover(config: &ScanConfig) -> Discovered {
    let extensions = config.accepted_extensions();
    let excludes = config.exclude_matcher();
    let skip_tests = config.should_skip_test_files();
    let test_patterns = config.test_patterns();

    let mut discovered = Discovered::default();

    for root in &config.roots {
        if !root.exists() {
            log::warn!("root path does not exist: {}", root.display());
            continue;
        }

        // A root can be a single file.
        if root.is_file() {
            classify(
                root,
                &extensions,
                &excludes,
                skip_tests,
                &test_patterns,
                &mut discovered,
            );
            continue;
        }

        let walker = WalkDir::new(root).follow_links(true).into_iter();
        for entry in walker.filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && name.starts_with('.'))
        }) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("walk error under {}: {}", root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            classify(
                entry.path(),
                &extensions,
                &excludes,
                skip_tests,
                &test_patterns,
                &mut discovered,
            );
        }
    }

    discovered
}

fn classify(
    path: &Path,
    extensions: &[String],
    excludes: &GlobSet,
    skip_tests: bool,
    test_patterns: &[String],
    discovered: &mut Discovered,
) {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !extensions.iter().any(|e| e == ext) {
        discovered.skipped += 1;
        return;
    }

    if excludes.is_match(path) {
        discovered.skipped += 1;
        return;
    }

    if skip_tests && is_test_file(path, test_patterns) {
        discovered.skipped += 1;
        return;
    }

    discovered.files.push(path.to_path_buf());
}

/// Whether a file name matches any test-file pattern.
///
/// Patterns are plain substrings of the file name; "test_" also anchors to
/// the start so "latest_news.py" is not a test file.
fn is_test_file(path: &Path, patterns: &[String]) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    patterns.iter().any(|pattern| {
        if let Some(prefix) = pattern.strip_suffix('_').filter(|_| !pattern.contains('.')) {
            // Prefix-style pattern like "test_".
            name.starts_with(&format!("{}_", prefix))
        } else {
            name.contains(pattern.as_str())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> ScanConfig {
        ScanConfig {
            roots: vec![root.to_path_buf()],
            ..Default::default()
        }
    }

    #[test]
    fn test_nonexistent_root_contributes_zero_files() {
        let config = config_for(Path::new("/definitely/not/a/real/path"));
        let discovered = discover(&config);
        assert!(discovered.files.is_empty());
        assert_eq!(discovered.skipped, 0);
    }

    #[test]
    fn test_extension_filter() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.go"), "package main\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "notes\n").unwrap();

        let discovered = discover(&config_for(temp.path()));
        assert_eq!(discovered.files.len(), 1);
        assert_eq!(discovered.skipped, 1);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        let vendor = temp.path().join("vendor");
        fs::create_dir(&vendor).unwrap();
        fs::write(vendor.join("dep.go"), "package dep\n").unwrap();
        fs::write(temp.path().join("main.go"), "package main\n").unwrap();

        let mut config = config_for(temp.path());
        config.exclude_patterns.push("**/vendor/**".to_string());

        let discovered = discover(&config);
        assert_eq!(discovered.files.len(), 1);
        assert_eq!(discovered.skipped, 1);
        assert!(discovered.files[0].ends_with("main.go"));
    }

    #[test]
    fn test_test_file_policy() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("store.go"), "package s\n").unwrap();
        fs::write(temp.path().join("store_test.go"), "package s\n").unwrap();
        fs::write(temp.path().join("test_store.py"), "x = 1\n").unwrap();
        fs::write(temp.path().join("latest_news.py"), "x = 1\n").unwrap();

        let config = config_for(temp.path());
        let discovered = discover(&config);
        assert_eq!(discovered.files.len(), 2);
        assert_eq!(discovered.skipped, 2);

        // Aggressive mode turns skipping off entirely.
        let mut aggressive = config_for(temp.path());
        aggressive.aggressive = Some(true);
        let discovered = discover(&aggressive);
        assert_eq!(discovered.files.len(), 4);
        assert_eq!(discovered.skipped, 0);
    }

    #[test]
    fn test_custom_test_patterns_additive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("fixture_data.py"), "x = 1\n").unwrap();
        fs::write(temp.path().join("main.py"), "x = 1\n").unwrap();

        let mut config = config_for(temp.path());
        config.test_file_patterns.push("fixture_".to_string());

        let discovered = discover(&config);
        assert_eq!(discovered.files.len(), 1);
        assert!(discovered.files[0].ends_with("main.py"));
    }

    #[test]
    fn test_hidden_directories_pruned() {
        let temp = TempDir::new().unwrap();
        let hidden = temp.path().join(".git");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("hook.go"), "package hooks\n").unwrap();
        fs::write(temp.path().join("main.go"), "package main\n").unwrap();

        let discovered = discover(&config_for(temp.path()));
        assert_eq!(discovered.files.len(), 1);
    }

    #[test]
    fn test_single_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.go");
        fs::write(&file, "package main\n").unwrap();

        let discovered = discover(&config_for(&file));
        assert_eq!(discovered.files.len(), 1);
    }
}
