//
//  bitbucket-server-connector
//  git/object_id.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Git Object Identifiers
//!
//! This module provides [`GitObjectId`], a validated Git object name (commit
//! hash). Bitbucket Server reports commits as hex strings; this type rejects
//! anything that is not a full SHA-1 (40 hex digits) or SHA-256 (64 hex
//! digits) object name, so downstream consumers never see truncated or
//! garbage hashes.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_server_connector::git::GitObjectId;
//!
//! let id: GitObjectId = "05FFD7188AB0B6BE1A5ea53a875b3c1dc04dcc17".parse().unwrap();
//! assert_eq!(id.as_str(), "05ffd7188ab0b6be1a5ea53a875b3c1dc04dcc17");
//!
//! assert!("not-a-hash".parse::<GitObjectId>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not a valid Git object name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid git object id: {0:?}")]
pub struct InvalidObjectId(pub String);

/// A validated, lowercase-normalized Git object name.
///
/// Accepts full SHA-1 (40 hex digits) and SHA-256 (64 hex digits) object
/// names. Input is normalized to lowercase so that two ids naming the same
/// object always compare equal, regardless of the case the server reported.
///
/// # Example
///
/// ```rust
/// use bitbucket_server_connector::git::GitObjectId;
///
/// let a: GitObjectId = "d670460b4b4aece5915caf5c68d12f560a9fe3e4".parse().unwrap();
/// let b: GitObjectId = "D670460B4B4AECE5915CAF5C68D12F560A9FE3E4".parse().unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitObjectId(String);

impl GitObjectId {
    /// Parses an optional string into an object id.
    ///
    /// Convenience for API fields that are both optional and untrusted:
    /// returns `None` when the input is absent or not a valid object name.
    pub fn try_parse(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }

    /// Returns the lowercase hex form of the object name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GitObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = matches!(s.len(), 40 | 64) && s.bytes().all(|b| b.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidObjectId(s.to_string()))
        }
    }
}

impl fmt::Display for GitObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GitObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
