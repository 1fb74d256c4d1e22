//! Cache-checked extraction shared by all scan workers.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use super::cache::{AstCache, CacheStats, Fingerprint};
use super::{adapter_for, AnalysisInfo, Language};

/// Entry point for per-file analysis.
///
/// Owns the AST cache; `extract` consults it before running the language
/// adapter and stores successful results afterward. Extraction errors are
/// returned to the caller and never cached, so a corrected file re-parses
/// cleanly. Any cache trouble degrades to a plain uncached extraction.
pub struct AnalysisContext {
    cache: AstCache,
}

impl AnalysisContext {
    /// Create a context with the given cache bounds. Capacity zero disables
    /// caching.
    pub fn new(cache_capacity: usize, cache_ttl: Duration) -> Self {
        Self {
            cache: AstCache::new(cache_capacity, cache_ttl),
        }
    }

    /// Extract analysis facts for a file whose contents are already read.
    ///
    /// Unsupported extensions yield `AnalysisInfo::Unsupported` rather than
    /// an error; detectors skip those files.
    pub fn extract(&self, path: &Path, source: &[u8]) -> anyhow::Result<AnalysisInfo> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let Some(adapter) = adapter_for(ext) else {
            return Ok(AnalysisInfo::Unsupported);
        };

        // A fingerprint failure just means we skip the cache for this file.
        let fingerprint = Fingerprint::of(path).ok();

        if let Some(fp) = fingerprint {
            if let Some(info) = self.cache.get(path, fp) {
                return Ok(info);
            }
        }

        let parsed = adapter
            .parse(path, source)
            .with_context(|| format!("parsing {}", path.display()))?;
        let source_info = adapter
            .extract(&parsed)
            .with_context(|| format!("extracting {}", path.display()))?;

        let info = match adapter.language() {
            Language::Rust => AnalysisInfo::Rust(source_info),
            Language::Go => AnalysisInfo::Go(source_info),
            Language::Python => AnalysisInfo::Python(source_info),
            Language::Unknown => AnalysisInfo::Unsupported,
        };

        if let Some(fp) = fingerprint {
            self.cache.put(path, fp, info.clone());
        }

        Ok(info)
    }

    /// Cache diagnostics for display.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
