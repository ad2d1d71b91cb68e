use cleaner_config::constants;
use regex::Regex;
use std::sync::LazyLock;

static E2E_RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(constants::E2E_RECORD_PATTERN).expect("E2E record pattern is a valid regex")
});

/// Whether a resource group name carries a CI pipeline prefix.
pub fn is_ci_resource_group(name: &str) -> bool {
    constants::RESOURCE_GROUP_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Whether a delegated zone record was created by an e2e pipeline, e.g.
/// `e2eterraform-xyz` or `e2eabcd.westeurope`.
pub fn is_ci_record(name: &str) -> bool {
    name.starts_with(constants::E2E_TERRAFORM_PREFIX) || E2E_RECORD_RE.is_match(name)
}

/// API hostname served behind a delegated record.
pub fn api_hostname(record_name: &str, zone: &str) -> String {
    format!("api.{}.{}", record_name, zone)
}
