// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

//! quillpress-gateway
//!
//! The single HTTP entry point. A fixed route table maps each request to
//! exactly one backend RPC; the response flows back unchanged in shape, and
//! every backend failure renders as HTTP 500 with a flat error body.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod backends;
pub mod config;
pub mod error;
pub mod routes;

pub use crate::backends::Backends;
pub use crate::config::GatewayConfig;
pub use crate::routes::{router, serve};
