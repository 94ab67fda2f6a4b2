mod error;
pub use error::HarnessError;

mod harness;
pub use harness::{ExecReport, Harness, ProcHarness, ProcHarnessConfig};

mod dispatch;
pub use dispatch::dispatch_all;

mod util;
