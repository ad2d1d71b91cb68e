use crate::ReapSummary;
use crate::resolver::LookupError;
use cleaner_azure::CloudError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("failed to list resource groups: {0}")]
    ListResourceGroups(#[source] CloudError),

    #[error("failed to query activity log for resource group {name}: {source}")]
    ActivityLog { name: String, source: CloudError },

    #[error("failed to delete resource group {name}: {source}")]
    DeleteResourceGroup { name: String, source: CloudError },

    #[error("failed to list DNS records in zone {zone}: {source}")]
    ListDnsRecords { zone: String, source: CloudError },

    #[error("failed to resolve {host}: {source}")]
    Resolve { host: String, source: LookupError },

    #[error("failed to delete DNS record {name}: {source}")]
    DeleteDnsRecord { name: String, source: CloudError },

    #[error("{reaper} pass finished with {failures} failed item(s), last error: {last}")]
    Incomplete {
        reaper: &'static str,
        summary: ReapSummary,
        failures: usize,
        #[source]
        last: Box<CleanerError>,
    },
}

impl CleanerError {
    /// Fatal errors abort a pass; the others only affect a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CleanerError::ListResourceGroups(_)
                | CleanerError::DeleteResourceGroup { .. }
                | CleanerError::ListDnsRecords { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
