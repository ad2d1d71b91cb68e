use crate::dns_record::DnsRecordReaper;
use crate::resolver::HostResolver;
use crate::resource_group::ResourceGroupReaper;
use crate::{ReapSummary, ReaperConfig, Result};
use cleaner_azure::CloudClient;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub resource_groups: Option<ReapSummary>,
    pub dns_records: Option<ReapSummary>,
}

/// Runs the resource group reaper followed by the DNS record reaper.
pub struct Cleaner {
    resource_groups: ResourceGroupReaper,
    dns_records: DnsRecordReaper,
}

impl Cleaner {
    pub fn new(
        client: Arc<dyn CloudClient>,
        resolver: Arc<dyn HostResolver>,
        config: ReaperConfig,
    ) -> Self {
        Self {
            resource_groups: ResourceGroupReaper::new(client.clone(), config.clone()),
            dns_records: DnsRecordReaper::new(client, resolver, config),
        }
    }

    /// Runs both reapers. A failing reaper does not prevent the other from
    /// running; the first error is returned after both finished.
    pub async fn run(&self) -> Result<CleanupReport> {
        let mut report = CleanupReport::default();
        let mut first_error = None;

        info!("Cleaning CI resource groups");
        match self.resource_groups.run().await {
            Ok(summary) => report.resource_groups = Some(summary),
            Err(e) => {
                error!("Resource group cleanup failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        info!("Cleaning delegated DNS records");
        match self.dns_records.run().await {
            Ok(summary) => report.dns_records = Some(summary),
            Err(e) => {
                error!("DNS record cleanup failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
