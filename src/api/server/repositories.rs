//
//  bitbucket-server-connector
//  api/server/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Repository Resource
//!
//! Repositories always belong to a project and are addressed by slug:
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos
//! ```
//!
//! Besides the wire shape, this module owns the Bitbucket-specific URL
//! rules: the HTTP clone link is preferred among the advertised clone
//! protocols, and browse URLs for a ref are built by appending an `at=`
//! query parameter with the percent-escaped full ref name.

use serde::Deserialize;

use crate::git::{GitBrowseTarget, GitBrowseTargetType, GitRepositoryInfo};

/// A repository in Bitbucket Server/Data Center.
///
/// The `slug` is the stable identifier used in API paths; the `name` is
/// display-only and is what operators enter in configuration. Resolution
/// treats a slugless repository as not found.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Human-readable display name; matched case-insensitively during
    /// resolution.
    #[serde(default)]
    pub name: Option<String>,

    /// Unique numeric identifier assigned by the server.
    #[serde(default)]
    pub id: u64,

    /// Default branch ref (e.g. `refs/heads/main`), when configured.
    #[serde(default, rename = "defaultBranch")]
    pub default_branch: Option<String>,

    /// URL-safe stable identifier used in API endpoints and clone URLs.
    #[serde(default)]
    pub slug: Option<String>,

    /// Clone and browse links advertised by the server.
    #[serde(default)]
    pub links: RepositoryLinks,
}

/// Link collections attached to a repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryLinks {
    /// Clone URLs, one per protocol ("http", "ssh").
    #[serde(default)]
    pub clone: Vec<NamedLink>,

    /// Web UI links to the repository itself.
    #[serde(default, rename = "self")]
    pub self_links: Vec<SelfLink>,
}

/// A link tagged with the protocol it serves.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedLink {
    /// The link URL.
    #[serde(default)]
    pub href: Option<String>,

    /// Protocol name, e.g. "http" or "ssh".
    #[serde(default)]
    pub name: Option<String>,
}

/// A self-referential web UI link.
#[derive(Debug, Clone, Deserialize)]
pub struct SelfLink {
    /// The full URL to view the resource in the web UI.
    #[serde(default)]
    pub href: Option<String>,
}

impl Repository {
    /// Whether this repository's display name matches `name`, ignoring case.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    /// The HTTP clone URL, when the server advertises one.
    pub fn clone_url(&self) -> Option<&str> {
        self.links
            .clone
            .iter()
            .find(|link| link.name.as_deref() == Some("http"))
            .and_then(|link| link.href.as_deref())
    }

    fn self_url(&self) -> Option<&str> {
        self.links
            .self_links
            .first()
            .and_then(|link| link.href.as_deref())
            .filter(|href| !href.is_empty())
    }
}

impl GitRepositoryInfo for Repository {
    fn repository_url(&self) -> String {
        self.clone_url().unwrap_or_default().to_string()
    }

    fn browse_url(&self) -> Option<String> {
        self.self_url().map(str::to_string)
    }

    fn default_branch(&self) -> Option<String> {
        self.default_branch.clone()
    }

    fn browse_url_for_target(&self, target: &GitBrowseTarget) -> Option<String> {
        let browse_url = self.self_url()?;

        let at = match target.target_type {
            GitBrowseTargetType::Branch => {
                urlencoding::encode(&format!("refs/heads/{}", target.value)).into_owned()
            }
            _ => urlencoding::encode(&target.value).into_owned(),
        };

        Some(format!("{browse_url}?at={at}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Repository {
        serde_json::from_str(
            r#"{
                "slug": "billing-service",
                "id": 11,
                "name": "Billing Service",
                "defaultBranch": "refs/heads/main",
                "links": {
                    "clone": [
                        {"href": "ssh://git@bitbucket.local:7999/apps/billing-service.git", "name": "ssh"},
                        {"href": "https://bitbucket.local/scm/apps/billing-service.git", "name": "http"}
                    ],
                    "self": [
                        {"href": "https://bitbucket.local/projects/APPS/repos/billing-service/browse"}
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_clone_url_prefers_http_link() {
        let repo = sample();
        assert_eq!(
            repo.clone_url(),
            Some("https://bitbucket.local/scm/apps/billing-service.git")
        );
        assert_eq!(repo.repository_url(), repo.clone_url().unwrap());
    }

    #[test]
    fn test_repository_url_empty_without_http_link() {
        let repo: Repository = serde_json::from_str(r#"{"slug": "r", "name": "r"}"#).unwrap();
        assert_eq!(repo.clone_url(), None);
        assert_eq!(repo.repository_url(), "");
    }

    #[test]
    fn test_browse_url_for_branch_target() {
        let repo = sample();
        let url = repo
            .browse_url_for_target(&GitBrowseTarget::branch("main"))
            .unwrap();
        assert_eq!(
            url,
            "https://bitbucket.local/projects/APPS/repos/billing-service/browse?at=refs%2Fheads%2Fmain"
        );
    }

    #[test]
    fn test_browse_url_for_other_targets_escapes_raw_value() {
        let repo = sample();
        let url = repo
            .browse_url_for_target(&GitBrowseTarget::tag("v1.0/rc"))
            .unwrap();
        assert!(url.ends_with("?at=v1.0%2Frc"));

        let commit = repo
            .browse_url_for_target(&GitBrowseTarget::commit("d670460b"))
            .unwrap();
        assert!(commit.ends_with("?at=d670460b"));
    }

    #[test]
    fn test_browse_url_for_target_without_self_link() {
        let repo: Repository = serde_json::from_str(r#"{"slug": "r", "name": "r"}"#).unwrap();
        assert_eq!(repo.browse_url_for_target(&GitBrowseTarget::branch("main")), None);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let repo = sample();
        assert!(repo.name_matches("billing service"));
        assert!(!repo.name_matches("billing"));
    }
}
