use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CleanerConfig {
    #[serde(default)]
    pub azure: AzureConfig,

    /// Log what would be deleted without deleting anything.
    #[serde(default)]
    pub dry_run: bool,

    /// Repeat passes on this interval instead of running once.
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AzureConfig {
    pub subscription_id: Option<String>,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,

    #[serde(default = "default_management_url")]
    pub management_url: String,

    #[serde(default = "default_login_url")]
    pub login_url: String,
}

fn default_management_url() -> String {
    crate::constants::AZURE_MANAGEMENT_URL.to_string()
}

fn default_login_url() -> String {
    crate::constants::AZURE_LOGIN_URL.to_string()
}

impl CleanerConfig {
    /// Overlays `CLEANER_*` and `AZURE_*` environment variables on top of the file values.
    pub fn apply_env(self) -> std::io::Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays values returned by `lookup`. Empty values are ignored;
    /// malformed `CLEANER_*` values are rejected instead of falling back.
    pub fn apply_overrides<F>(mut self, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = env("AZURE_SUBSCRIPTION_ID") {
            self.azure.subscription_id = Some(v);
        }
        if let Some(v) = env("AZURE_TENANT_ID") {
            self.azure.tenant_id = Some(v);
        }
        if let Some(v) = env("AZURE_CLIENT_ID") {
            self.azure.client_id = Some(v);
        }
        if let Some(v) = env("AZURE_CLIENT_SECRET") {
            self.azure.client_secret = Some(v);
        }
        if let Some(v) = env("AZURE_ACCESS_TOKEN") {
            self.azure.access_token = Some(v);
        }
        if let Some(v) = env("CLEANER_DRY_RUN") {
            self.dry_run = parse_bool("CLEANER_DRY_RUN", &v)?;
        }
        if let Some(v) = env("CLEANER_INTERVAL_SECS") {
            let secs = v.trim().parse::<u64>().map_err(|e| {
                invalid_data(format!("CLEANER_INTERVAL_SECS={:?} is not a number: {}", v, e))
            })?;
            self.interval_secs = Some(secs);
        }

        self.validate()
    }

    pub fn validate(self) -> std::io::Result<Self> {
        if self.interval_secs == Some(0) {
            return Err(invalid_data(
                "interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> std::io::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_data(format!(
            "{}={:?} is not a boolean",
            key, value
        ))),
    }
}

fn invalid_data(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message)
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            tenant_id: None,
            client_id: None,
            client_secret: None,
            access_token: None,
            management_url: default_management_url(),
            login_url: default_login_url(),
        }
    }
}

pub async fn parse_cleaner_toml(config_path: &Path) -> std::io::Result<CleanerConfig> {
    if !config_path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", config_path);
        return Ok(CleanerConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path).await?;
    let config: CleanerConfig = toml::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    config.validate()
}
