mod arm;
mod auth;
mod client;
mod error;

pub use arm::AzureClient;
pub use auth::Credentials;
pub use client::{ActivityEvent, CloudClient, DnsRecordSet, Page, RecordType, ResourceGroup};
pub use error::{CloudError, Result};
