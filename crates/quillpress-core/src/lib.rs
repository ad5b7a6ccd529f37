// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

//! quillpress-core
//!
//! The per-service storage capability: file-backed JSON document collections
//! with CRUD-by-key semantics. Every operation acquires a fresh
//! connection-scoped resource and releases it on every exit path; absence of
//! a key is a value, never an error.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod store;

pub use crate::error::{StoreError, StoreResult};
pub use crate::store::{Collection, Document, DocumentStore};
