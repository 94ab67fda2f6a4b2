use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("provisioning request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provisioning endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("provisioning rejected: {0}")]
    Rejected(String),

    #[error("invalid provisioning response: {0}")]
    InvalidResponse(String),
}
