// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use quillpress_identity::handler::IdentityHandler;
use quillpress_identity::relay::ContentRelay;
use quillpress_protocol::pb::identity::v1::identity_service_server::IdentityServiceServer;
use quillpress_protocol::{
    DEFAULT_CONTENT_ENDPOINT, DEFAULT_IDENTITY_ADDR, DEFAULT_RPC_TIMEOUT_MS,
};

#[derive(Debug, Parser)]
#[command(name = "quillpress-identity")]
#[command(about = "Quillpress identity service daemon")]
struct Args {
    #[arg(long, default_value = DEFAULT_IDENTITY_ADDR)]
    listen: String,

    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Endpoint of the content service, used by CreateContentForIdentity.
    #[arg(long, default_value = DEFAULT_CONTENT_ENDPOINT)]
    content_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT_MS)]
    rpc_timeout_ms: u64,

    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log))
        .init();

    let addr: SocketAddr = args.listen.parse()?;
    let relay = ContentRelay::connect_lazy(
        &args.content_endpoint,
        Duration::from_millis(args.rpc_timeout_ms),
    )?;
    let svc = IdentityHandler::build(&args.data_dir, relay)?;

    tracing::info!(
        %addr,
        data_dir = %args.data_dir,
        content_endpoint = %args.content_endpoint,
        "starting quillpress identity service"
    );

    tonic::transport::Server::builder()
        .add_service(IdentityServiceServer::new(svc))
        .serve(addr)
        .await?;

    Ok(())
}
