// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

//! quillpress-protocol
//!
//! Wire contracts for the quillpress backend: one gRPC package per service
//! (identity, content, annotation), compiled by `tonic-build`, plus the
//! default addresses the daemons and the gateway agree on. The schemas are
//! fixed, versioned contracts; nothing here contains behavior.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod pb {
    pub mod identity {
        pub mod v1 {
            tonic::include_proto!("quillpress.identity.v1");
        }
    }

    pub mod content {
        pub mod v1 {
            tonic::include_proto!("quillpress.content.v1");
        }
    }

    pub mod annotation {
        pub mod v1 {
            tonic::include_proto!("quillpress.annotation.v1");
        }
    }
}

pub const PROTOCOL_SEMVER: &str = "1.0.0";

pub const DEFAULT_IDENTITY_ADDR: &str = "127.0.0.1:50051";
pub const DEFAULT_CONTENT_ADDR: &str = "127.0.0.1:50052";
pub const DEFAULT_ANNOTATION_ADDR: &str = "127.0.0.1:50053";
pub const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:3000";

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "http://127.0.0.1:50051";
pub const DEFAULT_CONTENT_ENDPOINT: &str = "http://127.0.0.1:50052";
pub const DEFAULT_ANNOTATION_ENDPOINT: &str = "http://127.0.0.1:50053";

/// Per-call deadline applied to every client channel. The source system had
/// no deadline at all; a bounded default replaces the unbounded hang.
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;
