#![allow(dead_code)]

use async_trait::async_trait;
use cleaner_azure::{
    ActivityEvent, CloudClient, CloudError, DnsRecordSet, Page, RecordType, ResourceGroup,
};
use cleaner_reaper::{HostResolver, LookupError};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    group_pages: Vec<Vec<String>>,
    active_groups: HashSet<String>,
    activity_failures: HashSet<String>,
    group_delete_status: HashMap<String, u16>,
    list_groups_status: Option<u16>,
    record_pages: Vec<Vec<(String, String)>>,
    list_records_status: Option<u16>,
    record_delete_status: HashMap<String, u16>,

    activity_filters: Vec<String>,
    deleted_groups: Vec<String>,
    deleted_records: Vec<(String, String, RecordType, String, String)>,
}

/// In-memory cloud account serving pages and recording every delete.
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<FakeState>,
}

fn api_error(status: u16) -> CloudError {
    CloudError::Api {
        status,
        message: format!("fake status {}", status),
    }
}

fn page_of<T>(pages: &[Vec<T>], token: Option<String>) -> Page<T>
where
    T: Clone,
{
    let index: usize = token.and_then(|t| t.parse().ok()).unwrap_or(0);
    let value = pages.get(index).cloned().unwrap_or_default();
    let next_page = (index + 1 < pages.len()).then(|| (index + 1).to_string());
    Page { value, next_page }
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_page(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .group_pages
            .push(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_activity(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .active_groups
            .insert(name.to_string());
        self
    }

    pub fn with_activity_failure(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .activity_failures
            .insert(name.to_string());
        self
    }

    pub fn with_group_delete_status(self, name: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .group_delete_status
            .insert(name.to_string(), status);
        self
    }

    pub fn with_list_groups_status(self, status: u16) -> Self {
        self.state.lock().unwrap().list_groups_status = Some(status);
        self
    }

    pub fn with_record_page(self, records: &[(&str, &str)]) -> Self {
        self.state.lock().unwrap().record_pages.push(
            records
                .iter()
                .map(|(name, etag)| (name.to_string(), etag.to_string()))
                .collect(),
        );
        self
    }

    pub fn with_list_records_status(self, status: u16) -> Self {
        self.state.lock().unwrap().list_records_status = Some(status);
        self
    }

    pub fn with_record_delete_status(self, name: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .record_delete_status
            .insert(name.to_string(), status);
        self
    }

    pub fn deleted_groups(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_groups.clone()
    }

    pub fn deleted_records(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .deleted_records
            .iter()
            .map(|(name, ..)| name.clone())
            .collect()
    }

    pub fn deleted_record_calls(&self) -> Vec<(String, String, RecordType, String, String)> {
        self.state.lock().unwrap().deleted_records.clone()
    }

    pub fn activity_filters(&self) -> Vec<String> {
        self.state.lock().unwrap().activity_filters.clone()
    }
}

#[async_trait]
impl CloudClient for FakeCloud {
    async fn list_resource_groups(
        &self,
        page_token: Option<String>,
    ) -> cleaner_azure::Result<Page<ResourceGroup>> {
        let state = self.state.lock().unwrap();
        if let Some(status) = state.list_groups_status {
            return Err(api_error(status));
        }

        let (value, next_page) = page_of(&state.group_pages, page_token).into_parts();
        Ok(Page {
            value: value
                .into_iter()
                .map(|name| ResourceGroup {
                    name,
                    location: Some("westeurope".to_string()),
                })
                .collect(),
            next_page,
        })
    }

    async fn delete_resource_group(&self, name: &str) -> cleaner_azure::Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.group_delete_status.get(name) {
            return Err(api_error(*status));
        }

        state.deleted_groups.push(name.to_string());
        Ok(())
    }

    async fn list_activity_logs(
        &self,
        filter: &str,
        _page_token: Option<String>,
    ) -> cleaner_azure::Result<Page<ActivityEvent>> {
        let mut state = self.state.lock().unwrap();
        state.activity_filters.push(filter.to_string());

        let group = filter
            .rsplit("resourceGroupName eq '")
            .next()
            .unwrap_or_default()
            .trim_end_matches('\'')
            .to_string();

        if state.activity_failures.contains(&group) {
            return Err(api_error(503));
        }

        let events = if state.active_groups.contains(&group) {
            vec![ActivityEvent {
                event_timestamp: Some(chrono::Utc::now()),
                resource_group_name: Some(group),
            }]
        } else {
            Vec::new()
        };

        Ok(Page::last(events))
    }

    async fn list_dns_record_sets(
        &self,
        _resource_group: &str,
        _zone: &str,
        page_token: Option<String>,
    ) -> cleaner_azure::Result<Page<DnsRecordSet>> {
        let state = self.state.lock().unwrap();
        if let Some(status) = state.list_records_status {
            return Err(api_error(status));
        }

        let (value, next_page) = page_of(&state.record_pages, page_token).into_parts();
        Ok(Page {
            value: value
                .into_iter()
                .map(|(name, etag)| DnsRecordSet { name, etag })
                .collect(),
            next_page,
        })
    }

    async fn delete_dns_record_set(
        &self,
        resource_group: &str,
        zone: &str,
        name: &str,
        record_type: RecordType,
        etag: &str,
    ) -> cleaner_azure::Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.record_delete_status.get(name) {
            return Err(api_error(*status));
        }

        state.deleted_records.push((
            name.to_string(),
            etag.to_string(),
            record_type,
            resource_group.to_string(),
            zone.to_string(),
        ));
        Ok(())
    }
}

#[derive(Clone)]
pub enum Answer {
    Addresses(Vec<IpAddr>),
    ServFail,
    Timeout,
}

/// Resolver answering from a fixed table; unknown hosts have no addresses.
#[derive(Default)]
pub struct FakeResolver {
    answers: HashMap<String, Answer>,
    queries: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, host: &str, answer: Answer) -> Self {
        self.answers.insert(host.to_string(), answer);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostResolver for FakeResolver {
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        self.queries.lock().unwrap().push(host.to_string());

        match self.answers.get(host).cloned() {
            Some(Answer::Addresses(addresses)) => Ok(addresses),
            Some(Answer::ServFail) => Err(LookupError::ServerFailure),
            Some(Answer::Timeout) => Err(LookupError::Resolve(
                hickory_resolver::error::ResolveError::from("request timed out"),
            )),
            None => Ok(Vec::new()),
        }
    }
}
