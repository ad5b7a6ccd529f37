// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use quillpress_annotation::handler::AnnotationHandler;
use quillpress_protocol::pb::annotation::v1::annotation_service_server::AnnotationServiceServer;
use quillpress_protocol::DEFAULT_ANNOTATION_ADDR;

#[derive(Debug, Parser)]
#[command(name = "quillpress-annotation")]
#[command(about = "Quillpress annotation service daemon")]
struct Args {
    #[arg(long, default_value = DEFAULT_ANNOTATION_ADDR)]
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
    let svc = AnnotationHandler::build(&args.data_dir)?;

    tracing::info!(%addr, data_dir = %args.data_dir, "starting quillpress annotation service");

    tonic::transport::Server::builder()
        .add_service(AnnotationServiceServer::new(svc))
        .serve(addr)
        .await?;

    Ok(())
}
