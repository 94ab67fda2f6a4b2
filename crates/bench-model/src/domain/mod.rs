mod selection;
pub use selection::{SelectionMode, SelectionRequest};

mod outcome;
pub use outcome::JobOutcome;

mod job;
pub use job::{JobList, JobRecord};

mod lease;
pub use lease::CapacityLease;

mod report;
pub use report::{RunReport, RunStatus};

/// Identifier of a single benchmark within a run.
///
/// Always non-empty and trimmed once it has passed resolution.
pub type BenchmarkId = String;
