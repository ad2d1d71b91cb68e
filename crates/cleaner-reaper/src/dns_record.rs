use crate::naming::{api_hostname, is_ci_record};
use crate::resolver::{HostResolver, LookupError};
use crate::{CleanerError, ReapSummary, ReaperConfig, Result};
use cleaner_azure::{CloudClient, DnsRecordSet, RecordType};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Deletes NS delegations for e2e clusters whose API no longer resolves.
pub struct DnsRecordReaper {
    client: Arc<dyn CloudClient>,
    resolver: Arc<dyn HostResolver>,
    config: ReaperConfig,
}

impl DnsRecordReaper {
    pub fn new(
        client: Arc<dyn CloudClient>,
        resolver: Arc<dyn HostResolver>,
        config: ReaperConfig,
    ) -> Self {
        Self {
            client,
            resolver,
            config,
        }
    }

    /// Runs one pass over the delegated zone.
    ///
    /// Per-record failures do not stop the pass; the last one is returned
    /// inside [`CleanerError::Incomplete`] once every record was visited.
    /// Resolver failures other than SERVFAIL (timeouts, NXDOMAIN) keep the
    /// record and count as such failures.
    pub async fn run(&self) -> Result<ReapSummary> {
        let mut summary = ReapSummary::default();
        let mut failures = 0;
        let mut last_error = None;
        let mut page_token = None;

        loop {
            let (records, next) = self
                .client
                .list_dns_record_sets(
                    &self.config.dns_zone_resource_group,
                    &self.config.dns_zone,
                    page_token.take(),
                )
                .await
                .map_err(|source| CleanerError::ListDnsRecords {
                    zone: self.config.dns_zone.clone(),
                    source,
                })?
                .into_parts();

            for record in records {
                summary.listed += 1;

                if let Err(e) = self.reap_record(&record, &mut summary).await {
                    error!("Failed to process DNS record {}: {}", record.name, e);
                    summary.skipped += 1;
                    failures += 1;
                    last_error = Some(e);
                }
            }

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            "DNS record pass complete: {} listed, {} deleted, {} kept, {} skipped{}",
            summary.listed,
            summary.deleted,
            summary.kept,
            summary.skipped,
            if self.config.dry_run { " (dry run)" } else { "" }
        );

        match last_error {
            Some(last) => Err(CleanerError::Incomplete {
                reaper: "DNS record",
                summary,
                failures,
                last: Box::new(last),
            }),
            None => Ok(summary),
        }
    }

    async fn reap_record(&self, record: &DnsRecordSet, summary: &mut ReapSummary) -> Result<()> {
        if !is_ci_record(&record.name) {
            debug!("DNS record {} is not a CI record, keeping", record.name);
            summary.ignored += 1;
            return Ok(());
        }

        if self.api_resolves(&record.name).await? {
            debug!("DNS record {} still resolves, keeping", record.name);
            summary.kept += 1;
            return Ok(());
        }

        if self.config.dry_run {
            info!("Dry run: would delete DNS record {}", record.name);
            summary.deleted += 1;
            return Ok(());
        }

        info!("DNS record {} has to be deleted", record.name);

        self.client
            .delete_dns_record_set(
                &self.config.dns_zone_resource_group,
                &self.config.dns_zone,
                &record.name,
                RecordType::NS,
                &record.etag,
            )
            .await
            .map_err(|source| CleanerError::DeleteDnsRecord {
                name: record.name.clone(),
                source,
            })?;

        debug!("DNS record {} was deleted", record.name);
        summary.deleted += 1;

        Ok(())
    }

    async fn api_resolves(&self, record_name: &str) -> Result<bool> {
        let host = api_hostname(record_name, &self.config.dns_zone);

        match self.resolver.lookup_host(&host).await {
            Ok(addresses) => Ok(!addresses.is_empty()),
            Err(LookupError::ServerFailure) => Ok(false),
            Err(e) => {
                warn!("Unexpected error when trying to resolve {}: {}", host, e);
                Err(CleanerError::Resolve { host, source: e })
            }
        }
    }
}
