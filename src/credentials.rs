//
//  bitbucket-server-connector
//  credentials.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Resolved Service Credentials
//!
//! The orchestration platform owns credential storage and resolution; this
//! crate only ever sees credentials that have already been resolved to a
//! server URL, a user name, and a secret. [`GitCredentials`] is the neutral
//! envelope the platform hands to every service operation, and
//! [`BitbucketAccount`] is the Bitbucket Server account variant this crate's
//! repository facade requires.
//!
//! Credentials are immutable per call: clients capture them at construction
//! and never mutate them afterwards.

use url::Url;

/// A Bitbucket Server/Data Center account.
///
/// When both `user_name` and `password` are present and non-empty, requests
/// use HTTP Basic authentication; otherwise requests are anonymous. The
/// `password` field holds either an account password or a personal access
/// token (Bitbucket Server accepts both through Basic auth).
#[derive(Debug, Clone)]
pub struct BitbucketAccount {
    /// Base URL of the Bitbucket Server instance, e.g. `https://my-bitbucket-server/`.
    pub service_url: Url,
    /// Account user name; `None` for anonymous access.
    pub user_name: Option<String>,
    /// Account password or personal access token; `None` for anonymous access.
    pub password: Option<String>,
}

impl BitbucketAccount {
    /// Creates an account with Basic authentication.
    pub fn new(
        service_url: Url,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_url,
            user_name: Some(user_name.into()),
            password: Some(password.into()),
        }
    }

    /// Creates an account for anonymous access.
    pub fn anonymous(service_url: Url) -> Self {
        Self {
            service_url,
            user_name: None,
            password: None,
        }
    }
}

/// Generic Git service credentials, not tied to any particular service type.
///
/// Used where an operation only needs a server URL and a secret, for
/// example namespace enumeration in configuration pickers, which runs before
/// the host has committed to a service-specific account type.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    /// Base URL of the service.
    pub service_url: Url,
    /// User name; `None` for anonymous access.
    pub user_name: Option<String>,
    /// Secret; `None` for anonymous access.
    pub password: Option<String>,
}

/// Resolved credentials for any supported Git hosting service.
///
/// Each service implementation accepts the variants it understands;
/// [`BitbucketServerRepository`](crate::BitbucketServerRepository) requires
/// [`GitCredentials::BitbucketAccount`] and rejects everything else with a
/// configuration error before any network call.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum GitCredentials {
    /// A Bitbucket Server/Data Center account.
    BitbucketAccount(BitbucketAccount),
    /// Service-agnostic credentials (URL + user name + secret).
    GitService(ServiceCredentials),
}

impl GitCredentials {
    /// The service base URL, regardless of variant.
    pub fn service_url(&self) -> &Url {
        match self {
            Self::BitbucketAccount(account) => &account.service_url,
            Self::GitService(credentials) => &credentials.service_url,
        }
    }

    /// The user name, regardless of variant.
    pub fn user_name(&self) -> Option<&str> {
        match self {
            Self::BitbucketAccount(account) => account.user_name.as_deref(),
            Self::GitService(credentials) => credentials.user_name.as_deref(),
        }
    }

    /// The secret, regardless of variant.
    pub fn password(&self) -> Option<&str> {
        match self {
            Self::BitbucketAccount(account) => account.password.as_deref(),
            Self::GitService(credentials) => credentials.password.as_deref(),
        }
    }
}

impl From<BitbucketAccount> for GitCredentials {
    fn from(account: BitbucketAccount) -> Self {
        Self::BitbucketAccount(account)
    }
}
