mod client;
pub use client::{CapacityClient, HttpCapacityClient};

mod config;
pub use config::ProvisionConfig;

mod batch;
pub use batch::{ProvisioningAborted, provision_all};

mod error;
pub use error::ProvisionError;
