//! Scan configuration schema.
//!
//! A config describes what to scan and which thresholds to enforce. All
//! fields have YAML-friendly defaults; tri-state booleans stay `Option` in
//! the schema and are resolved to concrete defaults by accessor methods.
//! `validate` is the only hard-failure gate in the system: a scan never
//! starts with an invalid config, and nothing after it aborts the run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::supported_extensions;

/// Built-in file name patterns that mark test files.
const BUILTIN_TEST_PATTERNS: &[&str] = &["_test.", "test_", ".test.", "_spec."];

/// Configuration errors; the only error class that aborts a scan.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no root paths configured")]
    EmptyRoots,
    #[error("threshold {name:?} must be a positive integer")]
    NonPositiveThreshold { name: &'static str },
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Metric thresholds; a value at or under its threshold is acceptable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    pub function_lines: usize,
    pub complexity: usize,
    pub parameters: usize,
    pub nesting_depth: usize,
    pub class_lines: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            function_lines: 50,
            complexity: 10,
            parameters: 5,
            nesting_depth: 4,
            class_lines: 300,
        }
    }
}

/// Performance knobs for the scan pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker count; 0 means one per logical CPU.
    pub concurrent_files: usize,
    /// Files larger than this many bytes are skipped with a recorded error.
    pub max_file_size: u64,
    /// Maximum AST cache entries; 0 disables the cache.
    pub cache_capacity: usize,
    /// AST cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            concurrent_files: 0,
            max_file_size: 1024 * 1024,
            cache_capacity: 256,
            cache_ttl_secs: 300,
        }
    }
}

/// Top-level scan configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories (or single files) to scan.
    pub roots: Vec<PathBuf>,
    /// Glob patterns for paths to exclude (e.g. "**/vendor/**").
    pub exclude_patterns: Vec<String>,
    /// Accepted file extensions; empty means every supported language.
    pub extensions: Vec<String>,
    /// Whether to skip test files (default: true).
    pub skip_test_files: Option<bool>,
    /// Aggressive mode analyzes test files even when skipping is on.
    pub aggressive: Option<bool>,
    /// Additional test-file name patterns, additive to the built-ins.
    pub test_file_patterns: Vec<String>,
    /// Require doc comments on exported functions (default: false).
    pub require_documentation: Option<bool>,
    pub thresholds: Thresholds,
    pub performance: PerformanceConfig,
}

impl ScanConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ScanConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Reject configurations the engine must not run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roots.is_empty() {
            return Err(ConfigError::EmptyRoots);
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("function_lines", t.function_lines),
            ("complexity", t.complexity),
            ("parameters", t.parameters),
            ("nesting_depth", t.nesting_depth),
            ("class_lines", t.class_lines),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositiveThreshold { name });
            }
        }

        for pattern in &self.exclude_patterns {
            if let Err(source) = globset::Glob::new(pattern) {
                return Err(ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                });
            }
        }

        Ok(())
    }

    /// Whether test files are skipped, with aggressive mode overriding.
    pub fn should_skip_test_files(&self) -> bool {
        if self.aggressive.unwrap_or(false) {
            return false;
        }
        self.skip_test_files.unwrap_or(true)
    }

    /// Whether exported functions must carry a doc comment.
    pub fn requires_documentation(&self) -> bool {
        self.require_documentation.unwrap_or(false)
    }

    /// Accepted extensions, defaulting to every supported language.
    pub fn accepted_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            supported_extensions()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            self.extensions.clone()
        }
    }

    /// Built-in plus configured test-file name patterns.
    pub fn test_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> =
            BUILTIN_TEST_PATTERNS.iter().map(|p| p.to_string()).collect();
        patterns.extend(self.test_file_patterns.iter().cloned());
        patterns
    }

    /// Compile the exclude patterns into a matcher.
    ///
    /// Call `validate` first; this treats bad patterns as absent.
    pub fn exclude_matcher(&self) -> globset::GlobSet {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude_patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                builder.add(glob);
            }
        }
        builder.build().unwrap_or_else(|_| globset::GlobSet::empty())
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        if self.performance.concurrent_files == 0 {
            num_cpus::get()
        } else {
            self.performance.concurrent_files
        }
    }

    /// Resolved cache TTL.
    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.performance.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ScanConfig {
        ScanConfig {
            roots: vec![PathBuf::from(".")],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_roots_rejected() {
        let config = ScanConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRoots)));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut config = valid_config();
        config.thresholds.complexity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveThreshold { name: "complexity" })
        ));
    }

    #[test]
    fn test_bad_exclude_pattern_rejected() {
        let mut config = valid_config();
        config.exclude_patterns.push("{unclosed".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_tri_state_defaults() {
        let config = valid_config();
        assert!(config.should_skip_test_files());
        assert!(!config.requires_documentation());

        let mut aggressive = valid_config();
        aggressive.aggressive = Some(true);
        aggressive.skip_test_files = Some(true);
        // Aggressive mode wins over skip_test_files.
        assert!(!aggressive.should_skip_test_files());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
roots:
  - src
exclude_patterns:
  - "**/vendor/**"
thresholds:
  function_lines: 25
performance:
  concurrent_files: 2
"#;
        let config: ScanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("src")]);
        assert_eq!(config.thresholds.function_lines, 25);
        // Unspecified fields keep their defaults.
        assert_eq!(config.thresholds.complexity, 10);
        assert_eq!(config.performance.concurrent_files, 2);
        config.validate().unwrap();
    }

    #[test]
    fn test_test_patterns_additive() {
        let mut config = valid_config();
        config.test_file_patterns.push("fixture_".to_string());
        let patterns = config.test_patterns();
        assert!(patterns.iter().any(|p| p == "_test."));
        assert!(patterns.iter().any(|p| p == "fixture_"));
    }
}
