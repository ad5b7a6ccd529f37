// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quillpress_gateway::{serve, Backends, GatewayConfig};
use quillpress_protocol::{
    DEFAULT_ANNOTATION_ENDPOINT, DEFAULT_CONTENT_ENDPOINT, DEFAULT_GATEWAY_ADDR,
    DEFAULT_IDENTITY_ENDPOINT, DEFAULT_RPC_TIMEOUT_MS,
};

#[derive(Debug, Parser)]
#[command(name = "quillpress-gateway")]
#[command(about = "Quillpress HTTP gateway")]
struct Args {
    #[arg(long, default_value = DEFAULT_GATEWAY_ADDR)]
    listen: String,

    #[arg(long, default_value = DEFAULT_IDENTITY_ENDPOINT)]
    identity_endpoint: String,

    #[arg(long, default_value = DEFAULT_CONTENT_ENDPOINT)]
    content_endpoint: String,

    #[arg(long, default_value = DEFAULT_ANNOTATION_ENDPOINT)]
    annotation_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT_MS)]
    rpc_timeout_ms: u64,

    #[arg(long, default_value_t = 16_384)]
    max_body_bytes: usize,

    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log))
        .init();

    let cfg = GatewayConfig {
        listen: args.listen,
        identity_endpoint: args.identity_endpoint,
        content_endpoint: args.content_endpoint,
        annotation_endpoint: args.annotation_endpoint,
        rpc_timeout_ms: args.rpc_timeout_ms,
        max_body_bytes: args.max_body_bytes,
    };
    let backends = Backends::connect_lazy(&cfg)?;

    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        identity = %cfg.identity_endpoint,
        content = %cfg.content_endpoint,
        annotation = %cfg.annotation_endpoint,
        "quillpress gateway listening"
    );

    serve(listener, &cfg, backends, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
