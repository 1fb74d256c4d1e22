//! End-to-end scans over real temporary source trees.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use cleancheck::{ScanConfig, ScanEngine, ScanOutcome, ViolationKind};

fn config_for(root: &Path) -> ScanConfig {
    ScanConfig {
        roots: vec![root.to_path_buf()],
        ..Default::default()
    }
}

fn scan(config: ScanConfig) -> ScanOutcome {
    ScanEngine::new(config).unwrap().scan().unwrap()
}

/// A Go function declaration spanning exactly `total_lines` source lines.
fn go_func_of(name: &str, total_lines: usize) -> String {
    assert!(total_lines >= 5);
    let mut src = format!("func {}() int {{\n\tx := 0\n", name);
    for _ in 0..total_lines - 4 {
        src.push_str("\tx++\n");
    }
    src.push_str("\treturn x\n}\n");
    src
}

#[test]
fn scan_mixed_language_tree() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("server.go"),
        r#"package main

// TODO: add graceful shutdown
func startServer(port int) error {
    return nil
}
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("util.py"),
        r#"def cfg_mgr(path):
    # FIXME: handle missing file
    return path
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("store.rs"),
        r#"pub fn open_store(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("empty path".to_string());
    }
    Ok(())
}
"#,
    )
    .unwrap();
    fs::write(temp.path().join("README.md"), "# readme\n").unwrap();

    let outcome = scan(config_for(temp.path()));

    assert_eq!(outcome.summary.scanned_files, 3);
    assert_eq!(outcome.summary.skipped_files, 1);
    assert_eq!(outcome.summary.total_files, 4);

    // One TODO in Go, one FIXME in Python, one bad name in Python.
    assert_eq!(outcome.summary.count_for(ViolationKind::TodoMarker), 2);
    assert_eq!(outcome.summary.count_for(ViolationKind::Naming), 1);

    for result in &outcome.results {
        assert!(result.file.error.is_none(), "{:?}", result.file);
    }
}

#[test]
fn severity_escalates_with_overrun_ratio() {
    let temp = TempDir::new().unwrap();
    let source = format!(
        "package main\n\n{}\n{}",
        go_func_of("collectValues", 30),
        go_func_of("buildReport", 51),
    );
    fs::write(temp.path().join("metrics.go"), source).unwrap();

    let mut config = config_for(temp.path());
    config.thresholds.function_lines = 25;
    let outcome = scan(config);

    let length_violations: Vec<_> = outcome
        .results
        .iter()
        .flat_map(|r| r.violations.iter())
        .filter(|v| v.kind == ViolationKind::FunctionLength)
        .collect();
    assert_eq!(length_violations.len(), 2);

    let by_name = |name: &str| {
        length_violations
            .iter()
            .find(|v| v.message.contains(name))
            .unwrap()
    };
    // 30 lines at threshold 25 is 1.2x: Low. 51 lines is 2.04x: High.
    assert_eq!(by_name("collectValues").severity, cleancheck::Severity::Low);
    assert_eq!(by_name("buildReport").severity, cleancheck::Severity::High);
}

#[test]
fn nesting_depth_is_exact() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("deep.go"),
        r#"package main

func checkLimits(a, b, c, d int) int {
    if a > 0 {
        if b > 0 {
            if c > 0 {
                if d > 0 {
                    return 1
                }
            }
        }
    }
    return 0
}

func pickSide(x int) int {
    if x > 0 {
        return 1
    } else {
        return 2
    }
}
"#,
    )
    .unwrap();

    let mut config = config_for(temp.path());
    config.thresholds.nesting_depth = 3;
    let outcome = scan(config);

    let nesting: Vec<_> = outcome
        .results
        .iter()
        .flat_map(|r| r.violations.iter())
        .filter(|v| v.kind == ViolationKind::NestingDepth)
        .collect();

    // Four sequentially nested ifs report depth 4; the if/else pair sits at
    // depth 1 and stays clean.
    assert_eq!(nesting.len(), 1);
    assert!(nesting[0].message.contains("checkLimits"));
    assert!(nesting[0].message.contains("nests 4 levels"));
}

#[test]
fn complexity_increases_by_one_per_branch() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("a.go"),
        "package main\n\nfunc route(x int) int {\n\tif x > 0 {\n\t\treturn 1\n\t}\n\treturn 0\n}\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("b.go"),
        "package main\n\nfunc route(x int) int {\n\tif x > 0 {\n\t\treturn 1\n\t}\n\tif x < 0 {\n\t\treturn -1\n\t}\n\treturn 0\n}\n",
    )
    .unwrap();

    let mut config = config_for(temp.path());
    config.thresholds.complexity = 1;
    let outcome = scan(config);

    let complexity_of = |file: &str| {
        outcome
            .results
            .iter()
            .find(|r| r.file.path.ends_with(file))
            .unwrap()
            .violations
            .iter()
            .find(|v| v.kind == ViolationKind::Complexity)
            .map(|v| v.message.clone())
            .unwrap()
    };

    assert!(complexity_of("a.go").contains("complexity 2"));
    assert!(complexity_of("b.go").contains("complexity 3"));
}

#[test]
fn second_scan_hits_the_cache() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("main.go"),
        "package main\n\nfunc main() {}\n",
    )
    .unwrap();

    let engine = ScanEngine::new(config_for(temp.path())).unwrap();
    let first = engine.scan().unwrap();
    assert_eq!(first.cache_stats.hits, 0);
    assert_eq!(first.cache_stats.misses, 1);

    let second = engine.scan().unwrap();
    assert_eq!(second.cache_stats.hits, 1);

    // Identical analysis both times.
    assert_eq!(
        first.results[0].metrics.function_count,
        second.results[0].metrics.function_count
    );
}

#[test]
fn modified_file_misses_the_cache() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("main.go");
    fs::write(&path, "package main\n\nfunc main() {}\n").unwrap();

    let engine = ScanEngine::new(config_for(temp.path())).unwrap();
    engine.scan().unwrap();

    fs::write(&path, "package main\n\nfunc main() { println(1) }\n").unwrap();
    let outcome = engine.scan().unwrap();
    assert_eq!(outcome.cache_stats.hits, 0);
    assert_eq!(outcome.cache_stats.misses, 2);
}

#[test]
fn test_files_skipped_unless_aggressive() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("store.go"), "package s\n\nfunc a() {}\n").unwrap();
    fs::write(
        temp.path().join("store_test.go"),
        "package s\n\nfunc TestA(t int) {}\n",
    )
    .unwrap();

    let outcome = scan(config_for(temp.path()));
    assert_eq!(outcome.summary.scanned_files, 1);
    assert_eq!(outcome.summary.skipped_files, 1);

    let mut aggressive = config_for(temp.path());
    aggressive.aggressive = Some(true);
    let outcome = scan(aggressive);
    assert_eq!(outcome.summary.scanned_files, 2);
    assert_eq!(outcome.summary.skipped_files, 0);
}

#[test]
fn unparseable_file_is_isolated() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("good.go"), "package main\n\nfunc main() {}\n").unwrap();
    fs::write(temp.path().join("bad.go"), "package main\n\nfunc bad( {\n").unwrap();

    let outcome = scan(config_for(temp.path()));
    assert_eq!(outcome.summary.scanned_files, 2);

    let bad = outcome
        .results
        .iter()
        .find(|r| r.file.path.ends_with("bad.go"))
        .unwrap();
    assert!(bad.file.error.is_some());
    assert!(bad.violations.is_empty());

    let good = outcome
        .results
        .iter()
        .find(|r| r.file.path.ends_with("good.go"))
        .unwrap();
    assert!(good.file.error.is_none());
}

#[test]
fn violation_multiset_stable_across_worker_counts() {
    let temp = TempDir::new().unwrap();
    for i in 0..8 {
        fs::write(
            temp.path().join(format!("mod{}.go", i)),
            format!(
                "package main\n\n// TODO: item {}\n{}",
                i,
                go_func_of("drainQueue", 40)
            ),
        )
        .unwrap();
    }

    let keys = |workers: usize| {
        let mut config = config_for(temp.path());
        config.performance.concurrent_files = workers;
        config.thresholds.function_lines = 30;
        let outcome = scan(config);
        let mut keys: Vec<(PathBuf, usize, String)> = outcome
            .results
            .iter()
            .flat_map(|r| r.violations.iter())
            .map(|v| (PathBuf::from(&v.file), v.line, v.kind.to_string()))
            .collect();
        keys.sort();
        keys
    };

    let sequential = keys(1);
    assert!(!sequential.is_empty());
    assert_eq!(sequential, keys(4));
    assert_eq!(sequential, keys(8));
}
