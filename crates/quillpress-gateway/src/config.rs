use quillpress_protocol::{
    DEFAULT_ANNOTATION_ENDPOINT, DEFAULT_CONTENT_ENDPOINT, DEFAULT_GATEWAY_ADDR,
    DEFAULT_IDENTITY_ENDPOINT, DEFAULT_RPC_TIMEOUT_MS,
};

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen: String,
    pub identity_endpoint: String,
    pub content_endpoint: String,
    pub annotation_endpoint: String,
    pub rpc_timeout_ms: u64,
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_GATEWAY_ADDR.to_string(),
            identity_endpoint: DEFAULT_IDENTITY_ENDPOINT.to_string(),
            content_endpoint: DEFAULT_CONTENT_ENDPOINT.to_string(),
            annotation_endpoint: DEFAULT_ANNOTATION_ENDPOINT.to_string(),
            rpc_timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
            max_body_bytes: 16_384,
        }
    }
}
