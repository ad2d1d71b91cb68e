use cleaner_azure::{AzureClient, Credentials};
use cleaner_config::{AzureConfig, CleanerConfig, constants};
use cleaner_reaper::ReaperConfig;
use std::path::PathBuf;

pub async fn load_config() -> anyhow::Result<CleanerConfig> {
    let path = std::env::var("CLEANER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_CONFIG_PATH));

    let config = cleaner_config::parse_cleaner_toml(&path).await?;

    Ok(config.apply_env()?)
}

pub fn create_reaper_config(config: &CleanerConfig) -> ReaperConfig {
    ReaperConfig::default().with_dry_run(config.dry_run)
}

pub fn create_azure_client(azure: &AzureConfig) -> anyhow::Result<AzureClient> {
    let subscription_id = azure
        .subscription_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("AZURE_SUBSCRIPTION_ID must be set"))?;

    let client = AzureClient::new(
        subscription_id,
        credentials(azure)?,
        azure.management_url.clone(),
        azure.login_url.clone(),
    )?;

    Ok(client)
}

fn credentials(azure: &AzureConfig) -> anyhow::Result<Credentials> {
    if let Some(token) = &azure.access_token {
        return Ok(Credentials::AccessToken(token.clone()));
    }

    match (&azure.tenant_id, &azure.client_id, &azure.client_secret) {
        (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Credentials::ClientSecret {
            tenant_id: tenant_id.clone(),
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
        }),
        _ => anyhow::bail!(
            "either AZURE_ACCESS_TOKEN or AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET must be set"
        ),
    }
}
