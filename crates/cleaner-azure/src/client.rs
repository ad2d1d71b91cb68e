use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Remote operations the reapers need from the cloud account.
///
/// Listing calls are paged: pass `None` for the first page and the returned
/// `next_page` token for the following ones until it comes back empty.
#[async_trait]
pub trait CloudClient: Send + Sync {
    async fn list_resource_groups(&self, page_token: Option<String>) -> Result<Page<ResourceGroup>>;

    /// Starts deletion of a resource group. A missing group surfaces as an
    /// error for which [`crate::CloudError::is_not_found`] holds.
    async fn delete_resource_group(&self, name: &str) -> Result<()>;

    async fn list_activity_logs(
        &self,
        filter: &str,
        page_token: Option<String>,
    ) -> Result<Page<ActivityEvent>>;

    async fn list_dns_record_sets(
        &self,
        resource_group: &str,
        zone: &str,
        page_token: Option<String>,
    ) -> Result<Page<DnsRecordSet>>;

    async fn delete_dns_record_set(
        &self,
        resource_group: &str,
        zone: &str,
        name: &str,
        record_type: RecordType,
        etag: &str,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    #[serde(rename = "nextLink", default)]
    pub next_page: Option<String>,
}

impl<T> Page<T> {
    pub fn last(value: Vec<T>) -> Self {
        Self {
            value,
            next_page: None,
        }
    }

    /// Splits the page into its items and the token of the next page, if any.
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        let next = self.next_page.filter(|link| !link.is_empty());
        (self.value, next)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    #[serde(default)]
    pub event_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resource_group_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecordSet {
    pub name: String,
    #[serde(default)]
    pub etag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    NS,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::NS => "NS",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_next_link() {
        let json = r#"{
            "value": [{"name": "ci-build-42", "location": "westeurope"}],
            "nextLink": "https://management.azure.com/next?page=2"
        }"#;
        let page: Page<ResourceGroup> = serde_json::from_str(json).unwrap();
        let (groups, next) = page.into_parts();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ci-build-42");
        assert_eq!(
            next.as_deref(),
            Some("https://management.azure.com/next?page=2")
        );
    }

    #[test]
    fn test_page_without_next_link_is_last() {
        let page: Page<DnsRecordSet> =
            serde_json::from_str(r#"{"value": [{"name": "e2eabc.westeurope", "etag": "abc"}]}"#)
                .unwrap();
        let (records, next) = page.into_parts();
        assert!(next.is_none());
        assert_eq!(records[0].etag, "abc");

        let empty: Page<DnsRecordSet> =
            serde_json::from_str(r#"{"value": [], "nextLink": ""}"#).unwrap();
        let (records, next) = empty.into_parts();
        assert!(records.is_empty());
        assert!(next.is_none());
    }

    #[test]
    fn test_activity_event_timestamp() {
        let json = r#"{
            "eventTimestamp": "2024-05-01T10:15:30.1234567Z",
            "resourceGroupName": "ci-build-42"
        }"#;
        let event: ActivityEvent = serde_json::from_str(json).unwrap();
        assert!(event.event_timestamp.is_some());
        assert_eq!(event.resource_group_name.as_deref(), Some("ci-build-42"));
    }
}
