//
//  bitbucket-server-connector
//  api/server/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Pull Request Resource
//!
//! ```text
//! GET  /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests
//! GET  /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}
//! POST /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}/merge
//! ```
//!
//! ## Optimistic locking
//!
//! The `version` field is Bitbucket's optimistic-lock token: it changes on
//! every update to the pull request, and the merge endpoint rejects a stale
//! value with HTTP 409. A merge must therefore re-read the pull request and
//! send the freshly-observed version, never a guessed or remembered one.

use serde::{Deserialize, Serialize};

use super::branches::Branch;
use super::repositories::SelfLink;

/// A pull request in Bitbucket Server/Data Center.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Server-assigned numeric identifier.
    #[serde(default)]
    pub id: u64,

    /// Pull request title.
    #[serde(default)]
    pub title: Option<String>,

    /// Lifecycle state: "OPEN", "MERGED", or "DECLINED".
    #[serde(default)]
    pub state: Option<String>,

    /// Whether the pull request is open.
    #[serde(default)]
    pub open: bool,

    /// Optimistic-lock token; re-read immediately before any merge.
    #[serde(default)]
    pub version: u64,

    /// Target ref the pull request merges into.
    #[serde(default, rename = "toRef")]
    pub to_ref: Option<Branch>,

    /// Source ref the pull request merges from.
    #[serde(default, rename = "fromRef")]
    pub from_ref: Option<Branch>,

    /// Web UI links for the pull request.
    #[serde(default)]
    pub links: PullRequestLinks,
}

/// Link collection attached to a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestLinks {
    /// Web UI links to the pull request itself.
    #[serde(default, rename = "self")]
    pub self_links: Vec<SelfLink>,
}

impl PullRequest {
    /// The pull request's web UI URL, when the server advertises one.
    pub fn self_url(&self) -> Option<&str> {
        self.links
            .self_links
            .first()
            .and_then(|link| link.href.as_deref())
    }
}

/// Request body for the pull request merge endpoint.
///
/// `version` must be the value read from the pull request immediately
/// beforehand; the server rejects mismatches with HTTP 409.
#[derive(Debug, Clone, Serialize)]
pub struct MergePullRequest {
    /// Whether the server should generate the merge commit subject.
    #[serde(rename = "autoSubject")]
    pub auto_subject: bool,

    /// Merge commit message.
    pub message: Option<String>,

    /// Merge strategy id (e.g. "no-ff", "squash"); server default when absent.
    #[serde(rename = "strategyId")]
    pub strategy_id: Option<String>,

    /// The pull request version observed just before merging.
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_pull_request() {
        let json = r#"{
            "id": 42,
            "version": 7,
            "title": "Add retry budget",
            "state": "OPEN",
            "open": true,
            "fromRef": {"id": "refs/heads/feature/retry", "displayId": "feature/retry"},
            "toRef": {
                "id": "refs/heads/main",
                "displayId": "main",
                "latestCommit": "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
            },
            "links": {"self": [{"href": "https://bitbucket.local/projects/APPS/repos/x/pull-requests/42"}]}
        }"#;

        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.id, 42);
        assert_eq!(pr.version, 7);
        assert!(pr.open);
        assert_eq!(
            pr.to_ref.as_ref().and_then(|r| r.display_id.as_deref()),
            Some("main")
        );
        assert_eq!(
            pr.self_url(),
            Some("https://bitbucket.local/projects/APPS/repos/x/pull-requests/42")
        );
    }

    #[test]
    fn test_merge_body_serializes_camel_case() {
        let body = MergePullRequest {
            auto_subject: false,
            message: Some("Merged by the release train".to_string()),
            strategy_id: Some("no-ff".to_string()),
            version: 7,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["autoSubject"], false);
        assert_eq!(json["message"], "Merged by the release train");
        assert_eq!(json["strategyId"], "no-ff");
        assert_eq!(json["version"], 7);
    }

    #[test]
    fn test_merge_body_nulls_optional_fields() {
        let body = MergePullRequest {
            auto_subject: false,
            message: None,
            strategy_id: None,
            version: 1,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["message"].is_null());
        assert!(json["strategyId"].is_null());
    }
}
