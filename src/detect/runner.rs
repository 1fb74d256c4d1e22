//! Detector registry.

use crate::analysis::AnalysisInfo;
use crate::config::ScanConfig;
use crate::engine::FileInfo;

use super::functions::FunctionDetector;
use super::naming::NamingDetector;
use super::todos::TodoDetector;
use super::Violation;

/// One independent detection rule.
///
/// Detectors see a single file's info and analysis payload and return zero
/// or more violations; they share no mutable state, so the registry can be
/// borrowed by every worker at once.
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, file: &FileInfo, analysis: &AnalysisInfo) -> Vec<Violation>;
}

/// Ordered collection of detectors, built once per scan.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    /// Standard registry: function metrics, naming, debt markers.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            detectors: vec![
                Box::new(FunctionDetector::new(
                    config.thresholds.clone(),
                    config.requires_documentation(),
                )),
                Box::new(NamingDetector::new()),
                Box::new(TodoDetector::new()),
            ],
        }
    }

    /// Registry with an explicit detector list, for tests and embedders.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Run every detector over one file, in registration order, and return
    /// the violations sorted by position.
    pub fn run(&self, file: &FileInfo, analysis: &AnalysisInfo) -> Vec<Violation> {
        let mut violations = Vec::new();
        for detector in &self.detectors {
            violations.extend(detector.detect(file, analysis));
        }
        violations.sort_by(|a, b| {
            (a.line, a.column, a.kind.as_str()).cmp(&(b.line, b.column, b.kind.as_str()))
        });
        violations
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
