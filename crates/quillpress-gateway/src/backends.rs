use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use quillpress_protocol::pb::annotation::v1::annotation_service_client::AnnotationServiceClient;
use quillpress_protocol::pb::content::v1::content_service_client::ContentServiceClient;
use quillpress_protocol::pb::identity::v1::identity_service_client::IdentityServiceClient;

use crate::config::GatewayConfig;

/// The gateway's long-lived client channels, one per backend service,
/// constructed once by the composition root and shared read-only by every
/// request.
#[derive(Debug, Clone)]
pub struct Backends {
    pub identity: IdentityServiceClient<Channel>,
    pub content: ContentServiceClient<Channel>,
    pub annotation: AnnotationServiceClient<Channel>,
}

impl Backends {
    pub fn connect_lazy(cfg: &GatewayConfig) -> Result<Self, tonic::transport::Error> {
        let timeout = Duration::from_millis(cfg.rpc_timeout_ms);
        Ok(Self {
            identity: IdentityServiceClient::new(channel(&cfg.identity_endpoint, timeout)?),
            content: ContentServiceClient::new(channel(&cfg.content_endpoint, timeout)?),
            annotation: AnnotationServiceClient::new(channel(&cfg.annotation_endpoint, timeout)?),
        })
    }
}

fn channel(endpoint: &str, timeout: Duration) -> Result<Channel, tonic::transport::Error> {
    Ok(Endpoint::from_shared(endpoint.to_string())?
        .timeout(timeout)
        .connect_lazy())
}
