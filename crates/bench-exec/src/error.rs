use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("missing harness program")]
    MissingProgram,
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("harness exited with code {code}")]
    NonZeroExit { code: i32 },
    #[error("harness terminated by signal")]
    KilledBySignal,
    #[error("cancelled")]
    Cancelled,
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e.to_string())
    }
}
