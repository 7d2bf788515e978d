//
//  bitbucket-server-connector
//  api/server/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Project Resource
//!
//! Projects are containers that group related repositories and provide
//! shared access control. Listing them is the first step of every
//! name-based repository resolution:
//!
//! ```text
//! GET /rest/api/1.0/projects
//! ```
//!
//! ## Notes
//!
//! - The `key` is the stable identifier used in URLs; the `name` is
//!   display-only and is what operators type into configuration.
//! - Personal projects have keys starting with `~` and type `PERSONAL`.

use serde::Deserialize;

/// A project in Bitbucket Server/Data Center.
///
/// The `key` is authoritative: it is the only project identifier this crate
/// carries between API calls. The `name` exists for case-insensitive lookup
/// of operator-entered configuration and must never be cached as an
/// identifier.
///
/// # Example
///
/// ```rust
/// use bitbucket_server_connector::api::server::Project;
///
/// let json = r#"{"key": "APPS", "name": "Applications", "id": 7, "type": "NORMAL", "public": false}"#;
/// let project: Project = serde_json::from_str(json).unwrap();
/// assert_eq!(project.key.as_deref(), Some("APPS"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Short stable key used in URLs and API paths (e.g. "PROJ").
    /// Absent only in degenerate server responses; resolution treats a
    /// keyless project as not found.
    #[serde(default)]
    pub key: Option<String>,

    /// Human-readable display name; matched case-insensitively during
    /// resolution.
    #[serde(default)]
    pub name: Option<String>,

    /// Unique numeric identifier assigned by the server.
    #[serde(default)]
    pub id: u64,

    /// Project type: "NORMAL" for regular projects, "PERSONAL" for user
    /// projects.
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,

    /// Whether the project is visible to unauthenticated users.
    #[serde(default, rename = "public")]
    pub is_public: bool,

    /// Optional description of the project's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Scope marker reported by some Data Center versions.
    #[serde(default)]
    pub scope: Option<String>,
}

impl Project {
    /// Whether this project's display name matches `name`, ignoring case.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }
}
