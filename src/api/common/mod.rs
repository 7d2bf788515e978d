//
//  bitbucket-server-connector
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Common API Types
//!
//! Transport-level types shared by every Bitbucket Server API operation:
//! the [`ApiError`] failure type and the Bitbucket error-body parser.
//! Pagination types live in the [`pagination`] submodule and are re-exported
//! here.

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::Page;
pub(crate) use pagination::with_start;

/// Error type for transport-level API failures.
///
/// Covers everything that can go wrong between issuing an HTTP request and
/// obtaining a deserialized response. No retry is performed at this layer;
/// errors propagate unchanged to the caller.
///
/// # Example
///
/// ```rust
/// use bitbucket_server_connector::api::ApiError;
///
/// fn describe(err: &ApiError) -> String {
///     match err {
///         ApiError::Http { status, .. } => format!("server said {status}"),
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status code.
    ///
    /// `message` carries the human-readable message extracted from
    /// Bitbucket's error body when one was present, or the raw body
    /// otherwise.
    #[error("API error ({status}): {message}")]
    Http {
        /// The HTTP status code the server returned.
        status: StatusCode,
        /// The extracted or raw error message.
        message: String,
    },

    /// A network-level failure: connection, timeout, TLS, or a response
    /// body that could not be deserialized.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured service URL (or a path joined onto it) is not a
    /// valid URL.
    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Extracts a user-friendly message from a Bitbucket Server error response.
///
/// Bitbucket Server reports errors as:
///
/// ```json
/// {"errors": [{"message": "Human readable message"}]}
/// ```
///
/// with a plain `{"message": "..."}` shape appearing on a few endpoints.
/// When neither shape matches, the raw body is preserved so nothing is
/// swallowed.
pub fn format_api_error(status: StatusCode, body: &str) -> ApiError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return ApiError::Http {
                status,
                message: message.to_string(),
            };
        }

        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return ApiError::Http {
                status,
                message: message.to_string(),
            };
        }
    }

    ApiError::Http {
        status,
        message: body.to_string(),
    }
}
