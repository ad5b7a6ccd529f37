use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use quillpress_protocol::pb::content::v1 as content_pb;
use content_pb::content_service_client::ContentServiceClient;

/// Client capability for the one cross-service call in the system. The
/// endpoint is resolved once by the composition root; the channel itself
/// connects on first use so this daemon can start before its peer. One hop,
/// no retry, no backoff: a transport failure surfaces immediately.
#[derive(Debug, Clone)]
pub struct ContentRelay {
    client: ContentServiceClient<Channel>,
}

impl ContentRelay {
    pub fn connect_lazy(
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(endpoint.to_string())?
            .timeout(timeout)
            .connect_lazy();
        Ok(Self {
            client: ContentServiceClient::new(channel),
        })
    }

    pub async fn create_content(
        &self,
        request: content_pb::CreateContentRequest,
    ) -> Result<content_pb::ContentItem, Status> {
        self.client
            .clone()
            .create_content(request)
            .await
            .map(tonic::Response::into_inner)
    }
}
