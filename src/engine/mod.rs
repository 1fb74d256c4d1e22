//! Scan orchestration: discovery, worker pool, aggregation.
//!
//! The engine walks the configured roots, fans the accepted files out to a
//! bounded worker pool, and folds the per-file results into a `ScanSummary`.
//! Workers share nothing mutable except the AST cache and the progress
//! counter; a single file failing to parse is recorded on its `FileInfo`
//! and never aborts the run.

mod discovery;
mod types;

pub use discovery::{discover, Discovered};
pub use types::{FileInfo, FileMetrics, ScanResult, ScanSummary};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use chrono::Utc;
use rayon::prelude::*;

use crate::analysis::{AnalysisContext, CacheStats, Language, SourceInfo};
use crate::config::{ConfigError, ScanConfig};
use crate::detect::DetectorRegistry;

/// Observational progress callback; messages are display-only.
pub type ProgressFn = dyn Fn(&str) + Send + Sync;

/// Everything a scan produces for downstream reporters.
pub struct ScanOutcome {
    pub summary: ScanSummary,
    /// Per-file results, sorted by file path.
    pub results: Vec<ScanResult>,
    /// AST cache diagnostics for the run.
    pub cache_stats: CacheStats,
}

/// The scanning pipeline, configured once per run.
pub struct ScanEngine {
    config: ScanConfig,
    context: AnalysisContext,
    registry: DetectorRegistry,
    progress: Option<Box<ProgressFn>>,
    cancelled: Arc<AtomicBool>,
}

impl ScanEngine {
    /// Build an engine from a validated configuration.
    ///
    /// Validation failure is the only hard error in the system; everything
    /// after this point degrades per file.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let context = AnalysisContext::new(
            config.performance.cache_capacity,
            config.cache_ttl(),
        );
        let registry = DetectorRegistry::from_config(&config);
        Ok(Self {
            config,
            context,
            registry,
            progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Attach a progress callback, invoked after discovery and after each
    /// file completes.
    pub fn with_progress(mut self, progress: Box<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Shared cancellation flag. Setting it stops new files from being
    /// dispatched; in-flight files finish normally.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn report(&self, message: &str) {
        if let Some(progress) = &self.progress {
            progress(message);
        }
    }

    /// Run the scan: discover, analyze with bounded parallelism, aggregate.
    ///
    /// Only worker-pool construction can fail here; per-file problems are
    /// recorded on the affected file and the scan always completes.
    pub fn scan(&self) -> anyhow::Result<ScanOutcome> {
        let started_at = Utc::now();
        let start = Instant::now();

        self.report(&format!("scanning {} root(s)", self.config.roots.len()));
        let discovered = discovery::discover(&self.config);
        let candidates = discovered.files.len();
        self.report(&format!(
            "discovered {} file(s), {} skipped by filters",
            candidates, discovered.skipped
        ));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .build()
            .context("building scan worker pool")?;

        let completed = AtomicUsize::new(0);
        let outcomes: Vec<Option<(ScanResult, bool)>> = pool.install(|| {
            discovered
                .files
                .par_iter()
                .map(|path| {
                    if self.cancelled.load(Ordering::Relaxed) {
                        return None;
                    }
                    let outcome = self.process_file(path);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    self.report(&format!("[{}/{}] {}", done, candidates, path.display()));
                    Some(outcome)
                })
                .collect()
        });

        let cancelled_files = outcomes.iter().filter(|o| o.is_none()).count();

        let mut results = Vec::with_capacity(candidates);
        let mut scanned_files = 0;
        let mut guarded_files = 0;
        for (result, scanned) in outcomes.into_iter().flatten() {
            if scanned {
                scanned_files += 1;
            } else {
                guarded_files += 1;
            }
            results.push(result);
        }

        // Deterministic presentation order regardless of worker scheduling.
        results.sort_by(|a, b| a.file.path.cmp(&b.file.path));

        let mut violations_by_kind = BTreeMap::new();
        let mut total_violations = 0;
        for result in &results {
            for violation in &result.violations {
                total_violations += 1;
                *violations_by_kind
                    .entry(violation.kind.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }

        let finished_at = Utc::now();
        let summary = ScanSummary {
            total_files: candidates + discovered.skipped,
            scanned_files,
            skipped_files: discovered.skipped + guarded_files + cancelled_files,
            total_violations,
            violations_by_kind,
            started_at,
            finished_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        Ok(ScanOutcome {
            summary,
            results,
            cache_stats: self.context.cache_stats(),
        })
    }

    /// Run the per-file pipeline on one worker.
    ///
    /// Returns the result and whether the file counts as scanned; files
    /// rejected by the size guard count as skipped instead.
    fn process_file(&self, path: &Path) -> (ScanResult, bool) {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let language = Language::from_extension(&extension);
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        let mut file = FileInfo {
            path: path.to_path_buf(),
            extension,
            size,
            line_count: 0,
            language,
            error: None,
        };

        let max_size = self.config.performance.max_file_size;
        if size > max_size {
            file.error = Some(format!(
                "file size {} exceeds maximum {} bytes",
                size, max_size
            ));
            return (
                ScanResult {
                    file,
                    metrics: FileMetrics::default(),
                    violations: Vec::new(),
                },
                false,
            );
        }

        let source = match fs::read(path) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("failed to read {}: {}", path.display(), err);
                file.error = Some(format!("read failed: {}", err));
                return (
                    ScanResult {
                        file,
                        metrics: FileMetrics::default(),
                        violations: Vec::new(),
                    },
                    true,
                );
            }
        };
        file.line_count = count_lines(&source);

        match self.context.extract(path, &source) {
            Ok(analysis) => {
                let violations = self.registry.run(&file, &analysis);
                let metrics = build_metrics(&source, analysis.source());
                (
                    ScanResult {
                        file,
                        metrics,
                        violations,
                    },
                    true,
                )
            }
            Err(err) => {
                log::warn!("analysis failed for {}: {:#}", path.display(), err);
                file.error = Some(format!("{:#}", err));
                (
                    ScanResult {
                        file,
                        metrics: build_metrics(&source, None),
                        violations: Vec::new(),
                    },
                    true,
                )
            }
        }
    }
}

fn count_lines(source: &[u8]) -> usize {
    if source.is_empty() {
        return 0;
    }
    let newlines = source.iter().filter(|&&b| b == b'\n').count();
    // A trailing fragment without a newline is still a line.
    if source.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

/// Per-file counts for reporters, from raw content plus extracted facts.
fn build_metrics(source: &[u8], info: Option<&SourceInfo>) -> FileMetrics {
    let text = String::from_utf8_lossy(source);
    let total_lines = count_lines(source);
    let blank_lines = text.lines().filter(|l| l.trim().is_empty()).count();

    let (comment_lines, function_count, type_count) = match info {
        Some(info) => (
            info.comments.iter().map(|c| c.span.line_count()).sum(),
            info.functions.len(),
            info.types.len(),
        ),
        None => (0, 0, 0),
    };

    FileMetrics {
        total_lines,
        blank_lines,
        comment_lines,
        function_count,
        type_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const MESSY_GO: &str = r#"package main

// TODO: split this up
func cfgMgr(a, b, c int) int {
    if a > 0 {
        if b > 0 {
            if c > 0 {
                if a > b {
                    return a
                }
            }
        }
    }
    return 0
}
"#;

    const CLEAN_GO: &str = r#"package main

func main() {
    println("ready")
}
"#;

    fn write_tree(temp: &TempDir) -> PathBuf {
        fs::write(temp.path().join("messy.go"), MESSY_GO).unwrap();
        fs::write(temp.path().join("clean.go"), CLEAN_GO).unwrap();
        temp.path().to_path_buf()
    }

    fn config_for(root: PathBuf) -> ScanConfig {
        let mut config = ScanConfig {
            roots: vec![root],
            ..Default::default()
        };
        config.thresholds.nesting_depth = 3;
        config
    }

    fn scan(config: ScanConfig) -> ScanOutcome {
        ScanEngine::new(config).unwrap().scan().unwrap()
    }

    #[test]
    fn test_scan_finds_violations() {
        let temp = TempDir::new().unwrap();
        let config = config_for(write_tree(&temp));
        let outcome = scan(config);

        assert_eq!(outcome.summary.scanned_files, 2);
        assert!(outcome.summary.total_violations > 0);
        assert!(outcome.summary.count_for(crate::detect::ViolationKind::NestingDepth) >= 1);
        assert!(outcome.summary.count_for(crate::detect::ViolationKind::TodoMarker) >= 1);
        assert!(outcome.summary.count_for(crate::detect::ViolationKind::Naming) >= 1);

        let clean = outcome
            .results
            .iter()
            .find(|r| r.file.path.ends_with("clean.go"))
            .unwrap();
        assert!(clean.violations.is_empty());
        assert!(clean.file.error.is_none());
        assert_eq!(clean.metrics.function_count, 1);
    }

    #[test]
    fn test_violations_invariant_under_worker_count() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);

        let collect = |workers: usize| {
            let mut config = config_for(root.clone());
            config.performance.concurrent_files = workers;
            let outcome = scan(config);
            let mut keys: Vec<_> = outcome
                .results
                .iter()
                .flat_map(|r| r.violations.iter())
                .map(|v| (v.file.clone(), v.line, v.kind.as_str()))
                .collect();
            keys.sort();
            keys
        };

        assert_eq!(collect(1), collect(4));
    }

    #[test]
    fn test_nonexistent_root_is_empty_success() {
        let config = ScanConfig {
            roots: vec![PathBuf::from("/definitely/not/a/real/path")],
            ..Default::default()
        };
        let outcome = scan(config);
        assert_eq!(outcome.summary.total_files, 0);
        assert_eq!(outcome.summary.total_violations, 0);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_idempotent_summaries() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);

        let first = scan(config_for(root.clone())).summary;
        let second = scan(config_for(root)).summary;

        assert_eq!(first.total_files, second.total_files);
        assert_eq!(first.scanned_files, second.scanned_files);
        assert_eq!(first.skipped_files, second.skipped_files);
        assert_eq!(first.total_violations, second.total_violations);
        assert_eq!(first.violations_by_kind, second.violations_by_kind);
    }

    #[test]
    fn test_broken_file_does_not_abort_scan() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);
        fs::write(temp.path().join("broken.go"), "package main\n\nfunc broken( {\n").unwrap();

        let outcome = scan(config_for(root));
        assert_eq!(outcome.summary.scanned_files, 3);

        let broken = outcome
            .results
            .iter()
            .find(|r| r.file.path.ends_with("broken.go"))
            .unwrap();
        assert!(broken.file.error.is_some());
        assert!(broken.violations.is_empty());
    }

    #[test]
    fn test_size_guard_skips_with_recorded_error() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);

        let mut config = config_for(root);
        config.performance.max_file_size = 64;
        let outcome = scan(config);

        // messy.go is over the guard, clean.go under it.
        assert_eq!(outcome.summary.scanned_files, 1);
        assert_eq!(outcome.summary.skipped_files, 1);
        let guarded = outcome
            .results
            .iter()
            .find(|r| r.file.path.ends_with("messy.go"))
            .unwrap();
        assert!(guarded.file.error.as_deref().unwrap().contains("maximum"));
        assert!(guarded.violations.is_empty());
    }

    #[test]
    fn test_results_sorted_by_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("zeta.go"), CLEAN_GO).unwrap();
        fs::write(temp.path().join("alpha.go"), CLEAN_GO).unwrap();
        fs::write(temp.path().join("mid.go"), CLEAN_GO).unwrap();

        let outcome = scan(config_for(temp.path().to_path_buf()));
        let paths: Vec<_> = outcome.results.iter().map(|r| r.file.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_cancellation_stops_dispatch() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);

        let engine = ScanEngine::new(config_for(root)).unwrap();
        engine.cancel_flag().store(true, Ordering::Relaxed);
        let outcome = engine.scan().unwrap();

        assert_eq!(outcome.summary.scanned_files, 0);
        assert_eq!(outcome.summary.skipped_files, 2);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_progress_messages_emitted() {
        let temp = TempDir::new().unwrap();
        let root = write_tree(&temp);

        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let engine = ScanEngine::new(config_for(root))
            .unwrap()
            .with_progress(Box::new(move |msg| {
                sink.lock().unwrap().push(msg.to_string());
            }));
        engine.scan().unwrap();

        let messages = messages.lock().unwrap();
        assert!(messages.iter().any(|m| m.contains("discovered")));
        assert!(messages.iter().any(|m| m.contains("messy.go")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScanConfig {
            roots: vec![PathBuf::from(".")],
            ..Default::default()
        };
        config.thresholds.function_lines = 0;
        assert!(ScanEngine::new(config).is_err());
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"one\ntwo\n"), 2);
    }
}
