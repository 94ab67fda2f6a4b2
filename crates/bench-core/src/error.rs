use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("selection resolved to zero benchmarks")]
    EmptySelection,
}
