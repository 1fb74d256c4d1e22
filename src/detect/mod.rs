//! Detection rules that consume per-file analysis facts.

mod functions;
mod naming;
mod runner;
mod todos;
mod types;

pub use functions::{max_nesting_depth, FunctionDetector};
pub use naming::NamingDetector;
pub use runner::{Detector, DetectorRegistry};
pub use todos::TodoDetector;
pub use types::{escalate, Severity, Violation, ViolationKind};
