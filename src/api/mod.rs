//
//  bitbucket-server-connector
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client for the Bitbucket Server/Data Center REST API v1.0.
//!
//! ## Architecture
//!
//! - [`client`]: the typed [`BitbucketServerClient`] with authentication,
//!   single-resource GET/POST, and lazy paginated listings
//! - [`common`]: transport error type and the pagination envelope
//! - [`server`]: wire-format DTOs, one module per REST resource
//!
//! The facade in [`crate::repository`] is the intended consumer; the client
//! is public for callers that need raw access to the typed operations.

/// Core HTTP client for the Bitbucket Server REST API.
pub mod client;

/// Shared transport types: errors and pagination.
pub mod common;

/// Bitbucket Server REST resource DTOs.
pub mod server;

pub use client::BitbucketServerClient;
pub use common::{format_api_error, ApiError, Page};
