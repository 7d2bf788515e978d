//
//  bitbucket-server-connector
//  api/server/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Branch Resource
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/branches
//! ```
//!
//! The same shape appears inline as the `fromRef`/`toRef` of a pull
//! request, so [`Branch`] is reused there.

use serde::Deserialize;

/// A branch ref in Bitbucket Server/Data Center.
///
/// A branch is only usable when both `display_id` and `latest_commit` are
/// present and the commit parses as a Git object id; consumers silently
/// skip entries that fail that test rather than failing the whole listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    /// Full ref id, e.g. `refs/heads/main`.
    #[serde(default)]
    pub id: Option<String>,

    /// Short human ref name, e.g. `main`.
    #[serde(default, rename = "displayId")]
    pub display_id: Option<String>,

    /// Ref type reported by the server, e.g. "BRANCH".
    #[serde(default, rename = "type")]
    pub ref_type: Option<String>,

    /// Hash of the commit the ref points at.
    #[serde(default, rename = "latestCommit")]
    pub latest_commit: Option<String>,

    /// Whether this is the repository's default branch.
    #[serde(default, rename = "isDefault")]
    pub is_default: bool,
}
