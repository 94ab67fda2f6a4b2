pub mod error;

mod resolve;
pub use resolve::{ResolveConfig, resolve};

mod orchestrator;
pub use orchestrator::Orchestrator;
