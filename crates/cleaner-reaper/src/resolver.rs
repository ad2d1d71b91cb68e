use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The authoritative servers could not answer, which is what a dangling
    /// delegation looks like from a public resolver.
    #[error("server failure (SERVFAIL)")]
    ServerFailure,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// IPv4 host lookups against a single upstream nameserver.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new(upstream: SocketAddr, attempts: usize) -> Self {
        let nameservers =
            NameServerConfigGroup::from_ips_clear(&[upstream.ip()], upstream.port(), true);
        let config = ResolverConfig::from_parts(None, vec![], nameservers);

        let mut opts = ResolverOpts::default();
        opts.attempts = attempts;
        opts.ip_strategy = LookupIpStrategy::Ipv4Only;
        opts.cache_size = 0;

        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        match self.inner.lookup_ip(host).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(e) => classify(e),
        }
    }
}

fn classify(error: ResolveError) -> Result<Vec<IpAddr>, LookupError> {
    let response_code = match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => Some(*response_code),
        _ => None,
    };

    match response_code {
        Some(ResponseCode::ServFail) => Err(LookupError::ServerFailure),
        // NOERROR without A records: the name exists but has no addresses.
        Some(ResponseCode::NoError) => Ok(Vec::new()),
        _ if error.to_string().contains("SERVFAIL") => Err(LookupError::ServerFailure),
        _ => Err(LookupError::Resolve(error)),
    }
}
