//
//  bitbucket-server-connector
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Pagination Envelope for Bitbucket Server Responses
//!
//! Bitbucket Server/Data Center paginates every listing endpoint with an
//! offset-based envelope:
//!
//! ```json
//! {
//!     "size": 25,
//!     "limit": 25,
//!     "isLastPage": false,
//!     "values": [ ... ],
//!     "start": 0
//! }
//! ```
//!
//! [`Page`] models that envelope. It never escapes the API client: callers
//! consume paginated endpoints through the lazy streams returned by
//! [`BitbucketServerClient`](crate::api::BitbucketServerClient), which drive
//! the page loop internally.
//!
//! # Offset arithmetic
//!
//! The next request's `start` is the previous `start` plus the page's
//! **size** (the number of items actually returned), not its `limit`.
//! Iteration stops once a page reports `isLastPage`, or reports a size
//! below one; the latter guards against a malformed server looping the
//! client forever on empty pages.

use serde::Deserialize;

/// A single page of an offset-paginated Bitbucket Server response.
///
/// # Type Parameters
///
/// - `T` - The type of items in the `values` array
///
/// All fields default when absent so that partial envelopes from older
/// server versions still deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Number of items in this page.
    #[serde(default)]
    pub size: u32,

    /// Maximum items per page, as applied by the server.
    #[serde(default)]
    pub limit: u32,

    /// Whether this is the final page of results.
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: bool,

    /// The items in this page, in server order.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Start offset of this page (0-indexed).
    #[serde(default)]
    pub start: u32,
}

impl<T> Page<T> {
    /// Whether the page loop should stop after consuming this page's values.
    ///
    /// True on the declared last page and on malformed zero-size pages.
    pub fn is_final(&self) -> bool {
        self.is_last_page || self.size < 1
    }
}

/// Appends a `start=<offset>` query parameter to a resource path.
///
/// Uses `&` when the path already carries a query string, `?` otherwise.
pub(crate) fn with_start(path: &str, start: u32) -> String {
    if path.contains('?') {
        format!("{path}&start={start}")
    } else {
        format!("{path}?start={start}")
    }
}
