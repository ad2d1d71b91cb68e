use crate::naming::is_ci_resource_group;
use crate::{CleanerError, ReapSummary, ReaperConfig, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use cleaner_azure::CloudClient;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Deletes CI resource groups that saw no activity within the grace period.
pub struct ResourceGroupReaper {
    client: Arc<dyn CloudClient>,
    config: ReaperConfig,
}

impl ResourceGroupReaper {
    pub fn new(client: Arc<dyn CloudClient>, config: ReaperConfig) -> Self {
        Self { client, config }
    }

    pub async fn run(&self) -> Result<ReapSummary> {
        self.run_at(Utc::now()).await
    }

    /// Runs one pass treating `now` as the current time.
    ///
    /// Stops at the first failed deletion; activity-log failures only skip
    /// the affected group.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ReapSummary> {
        let cutoff = self.config.cutoff(now);
        let mut summary = ReapSummary::default();
        let mut page_token = None;

        loop {
            let (groups, next) = self
                .client
                .list_resource_groups(page_token.take())
                .await
                .map_err(CleanerError::ListResourceGroups)?
                .into_parts();

            for group in groups {
                summary.listed += 1;
                self.reap_group(&group.name, cutoff, &mut summary).await?;
            }

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            "Resource group pass complete: {} listed, {} deleted, {} kept, {} skipped{}",
            summary.listed,
            summary.deleted,
            summary.kept,
            summary.skipped,
            if self.config.dry_run { " (dry run)" } else { "" }
        );

        Ok(summary)
    }

    async fn reap_group(
        &self,
        name: &str,
        cutoff: DateTime<Utc>,
        summary: &mut ReapSummary,
    ) -> Result<()> {
        debug!("Checking resource group {}", name);

        if !is_ci_resource_group(name) {
            summary.ignored += 1;
            return Ok(());
        }

        let has_activity = match self.has_activity(name, cutoff).await {
            Ok(has_activity) => has_activity,
            Err(e) => {
                warn!("Skipping resource group {} due to error: {}", name, e);
                summary.skipped += 1;
                return Ok(());
            }
        };

        if has_activity {
            debug!("Resource group {} has recent activity, keeping", name);
            summary.kept += 1;
            return Ok(());
        }

        if self.config.dry_run {
            info!("Dry run: would delete resource group {}", name);
            summary.deleted += 1;
            return Ok(());
        }

        info!("Deleting resource group {}", name);

        match self.client.delete_resource_group(name).await {
            Ok(()) => info!("Resource group {} deleted", name),
            Err(e) if e.is_not_found() => {
                debug!("Resource group {} was already gone", name);
            }
            Err(e) => {
                error!("Resource group {} deletion failed: {}", name, e);
                return Err(CleanerError::DeleteResourceGroup {
                    name: name.to_string(),
                    source: e,
                });
            }
        }

        summary.deleted += 1;
        Ok(())
    }

    async fn has_activity(&self, name: &str, cutoff: DateTime<Utc>) -> Result<bool> {
        let filter = activity_filter(name, cutoff);
        let mut page_token = None;

        loop {
            let (events, next) = self
                .client
                .list_activity_logs(&filter, page_token.take())
                .await
                .map_err(|source| CleanerError::ActivityLog {
                    name: name.to_string(),
                    source,
                })?
                .into_parts();

            if !events.is_empty() {
                return Ok(true);
            }

            match next {
                Some(token) => page_token = Some(token),
                None => return Ok(false),
            }
        }
    }
}

/// Activity-log query selecting events for `name` at or after `since`.
pub fn activity_filter(name: &str, since: DateTime<Utc>) -> String {
    format!(
        "eventTimestamp ge '{}' and resourceGroupName eq '{}'",
        since.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_activity_filter() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(
            activity_filter("ci-build-42", since),
            "eventTimestamp ge '2024-05-01T10:30:00Z' and resourceGroupName eq 'ci-build-42'"
        );
    }

    #[test]
    fn test_activity_filter_keeps_subsecond_precision() {
        let since = Utc
            .with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
            .unwrap()
            .checked_add_signed(chrono::TimeDelta::nanoseconds(123_456_789))
            .unwrap();
        assert!(activity_filter("e2e-x", since).contains("'2024-05-01T10:30:00.123456789Z'"));
    }
}
