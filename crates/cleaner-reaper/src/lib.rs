mod cleaner;
mod config;
mod dns_record;
mod error;
mod naming;
mod resolver;
mod resource_group;

pub use cleaner::{Cleaner, CleanupReport};
pub use config::ReaperConfig;
pub use dns_record::DnsRecordReaper;
pub use error::{CleanerError, Result};
pub use naming::{api_hostname, is_ci_record, is_ci_resource_group};
pub use resolver::{DnsResolver, HostResolver, LookupError};
pub use resource_group::{ResourceGroupReaper, activity_filter};

/// Per-pass counters reported by each reaper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReapSummary {
    pub listed: usize,
    /// Names outside the CI naming convention.
    pub ignored: usize,
    pub kept: usize,
    pub deleted: usize,
    pub skipped: usize,
}
