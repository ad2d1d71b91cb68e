use crate::auth::{Credentials, TokenSource};
use crate::client::{ActivityEvent, CloudClient, DnsRecordSet, Page, RecordType, ResourceGroup};
use crate::{CloudError, Result};
use async_trait::async_trait;
use cleaner_config::constants;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// [`CloudClient`] backed by the Azure Resource Manager REST API.
pub struct AzureClient {
    http: reqwest::Client,
    tokens: TokenSource,
    management_url: String,
    subscription_id: String,
}

impl AzureClient {
    pub fn new(
        subscription_id: String,
        credentials: Credentials,
        management_url: String,
        login_url: String,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(constants::HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            tokens: TokenSource::new(credentials, login_url),
            management_url: management_url.trim_end_matches('/').to_string(),
            subscription_id,
        })
    }

    fn subscription_url(&self) -> String {
        format!(
            "{}/subscriptions/{}",
            self.management_url, self.subscription_id
        )
    }

    fn dns_zone_url(&self, resource_group: &str, zone: &str) -> String {
        format!(
            "{}/resourceGroups/{}/providers/Microsoft.Network/dnsZones/{}",
            self.subscription_url(),
            resource_group,
            zone
        )
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.tokens.token(&self.http).await?;
        Ok(request.bearer_auth(token))
    }

    /// Fetches one page. A page token is a full `nextLink` URL and already
    /// carries the query string of the original request.
    async fn get_page<T: DeserializeOwned>(
        &self,
        first_page: RequestBuilder,
        page_token: Option<String>,
    ) -> Result<Page<T>> {
        let request = match page_token {
            Some(next_link) => self.http.get(next_link),
            None => first_page,
        };

        let response = check_status(self.authorized(request).await?.send().await?).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    Err(CloudError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CloudClient for AzureClient {
    async fn list_resource_groups(&self, page_token: Option<String>) -> Result<Page<ResourceGroup>> {
        let request = self
            .http
            .get(format!("{}/resourcegroups", self.subscription_url()))
            .query(&[("api-version", constants::RESOURCES_API_VERSION)]);

        self.get_page(request, page_token).await
    }

    async fn delete_resource_group(&self, name: &str) -> Result<()> {
        let request = self
            .http
            .delete(format!("{}/resourcegroups/{}", self.subscription_url(), name))
            .query(&[("api-version", constants::RESOURCES_API_VERSION)]);

        // Deletion is a long-running operation; 202 means it was accepted.
        let response = check_status(self.authorized(request).await?.send().await?).await?;
        debug!(
            "Resource group {} deletion accepted with status {}",
            name,
            response.status()
        );

        Ok(())
    }

    async fn list_activity_logs(
        &self,
        filter: &str,
        page_token: Option<String>,
    ) -> Result<Page<ActivityEvent>> {
        let request = self
            .http
            .get(format!(
                "{}/providers/microsoft.insights/eventtypes/management/values",
                self.subscription_url()
            ))
            .query(&[
                ("api-version", constants::ACTIVITY_LOG_API_VERSION),
                ("$filter", filter),
            ]);

        self.get_page(request, page_token).await
    }

    async fn list_dns_record_sets(
        &self,
        resource_group: &str,
        zone: &str,
        page_token: Option<String>,
    ) -> Result<Page<DnsRecordSet>> {
        let request = self
            .http
            .get(format!(
                "{}/{}",
                self.dns_zone_url(resource_group, zone),
                RecordType::NS
            ))
            .query(&[("api-version", constants::DNS_API_VERSION)]);

        self.get_page(request, page_token).await
    }

    async fn delete_dns_record_set(
        &self,
        resource_group: &str,
        zone: &str,
        name: &str,
        record_type: RecordType,
        etag: &str,
    ) -> Result<()> {
        let mut request = self
            .http
            .delete(format!(
                "{}/{}/{}",
                self.dns_zone_url(resource_group, zone),
                record_type,
                name
            ))
            .query(&[("api-version", constants::DNS_API_VERSION)]);

        if !etag.is_empty() {
            request = request.header("If-Match", etag);
        }

        check_status(self.authorized(request).await?.send().await?).await?;

        Ok(())
    }
}
