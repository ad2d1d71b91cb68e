use std::net::Ipv4Addr;
use std::time::Duration;

/// Maximum time CI resources are allowed to remain up.
pub const GRACE_PERIOD: Duration = Duration::from_secs(90 * 60);

pub const DNS_ZONE_NAME: &str = "azure.gigantic.io";
pub const DNS_ZONE_RESOURCE_GROUP: &str = "root_dns_zone_rg";
pub const DNS_RESOLVER_IP: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);
pub const DNS_RESOLVER_PORT: u16 = 53;
pub const DNS_RESOLVER_ATTEMPTS: usize = 5;

pub const RESOURCE_GROUP_PREFIXES: [&str; 2] = ["ci-", "e2e"];
pub const E2E_TERRAFORM_PREFIX: &str = "e2eterraform";
pub const E2E_RECORD_PATTERN: &str = r"^e2e.*\.(westeurope|germanywestcentral)$";

pub const DEFAULT_CONFIG_PATH: &str = "/etc/ci-cleaner/cleaner.toml";

pub const AZURE_MANAGEMENT_URL: &str = "https://management.azure.com";
pub const AZURE_LOGIN_URL: &str = "https://login.microsoftonline.com";
pub const AZURE_MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

pub const RESOURCES_API_VERSION: &str = "2018-02-01";
pub const ACTIVITY_LOG_API_VERSION: &str = "2015-04-01";
pub const DNS_API_VERSION: &str = "2017-10-01";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(300);
