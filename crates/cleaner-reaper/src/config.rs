use chrono::{DateTime, TimeDelta, Utc};
use cleaner_config::constants;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Fixed parameters shared by both reapers, built once at startup.
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    pub grace_period: Duration,
    pub dns_zone: String,
    pub dns_zone_resource_group: String,
    pub resolver_addr: SocketAddr,
    pub resolver_attempts: usize,
    pub dry_run: bool,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            grace_period: constants::GRACE_PERIOD,
            dns_zone: constants::DNS_ZONE_NAME.to_string(),
            dns_zone_resource_group: constants::DNS_ZONE_RESOURCE_GROUP.to_string(),
            resolver_addr: SocketAddr::new(
                IpAddr::V4(constants::DNS_RESOLVER_IP),
                constants::DNS_RESOLVER_PORT,
            ),
            resolver_attempts: constants::DNS_RESOLVER_ATTEMPTS,
            dry_run: false,
        }
    }
}

impl ReaperConfig {
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Staleness threshold for a pass starting at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.grace_period)
            .ok()
            .and_then(|grace| now.checked_sub_signed(grace))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
