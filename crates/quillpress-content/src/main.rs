// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use quillpress_content::handler::ContentHandler;
use quillpress_protocol::pb::content::v1::content_service_server::ContentServiceServer;
use quillpress_protocol::DEFAULT_CONTENT_ADDR;

#[derive(Debug, Parser)]
#[command(name = "quillpress-content")]
#[command(about = "Quillpress content service daemon")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONTENT_ADDR)]
    listen: String,

    #[arg(long, default_value = "./data")]
    data_dir: String,

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
    let svc = ContentHandler::build(&args.data_dir)?;

    tracing::info!(%addr, data_dir = %args.data_dir, "starting quillpress content service");

    tonic::transport::Server::builder()
        .add_service(ContentServiceServer::new(svc))
        .serve(addr)
        .await?;

    Ok(())
}
