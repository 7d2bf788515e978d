//
//  bitbucket-server-connector
//  service.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Service Descriptor
//!
//! [`BitbucketServerService`] provides the service-level surface the host
//! uses before a repository handle exists: display metadata for
//! configuration fields and the namespace / repository-name enumeration
//! behind configuration pickers. Both enumerations are thin wrappers over
//! the client's project and repository listings.

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, StreamExt};

use crate::api::BitbucketServerClient;
use crate::credentials::GitCredentials;
use crate::git::{GitService, ServiceError, ServiceStream};

/// The Bitbucket Server/Data Center service descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitbucketServerService;

#[async_trait]
impl GitService for BitbucketServerService {
    fn service_name(&self) -> &'static str {
        "Bitbucket Server/Data Center"
    }

    fn namespace_display_name(&self) -> &'static str {
        "Project"
    }

    fn password_display_name(&self) -> &'static str {
        "Password or token"
    }

    fn api_url_display_name(&self) -> &'static str {
        "Server URL"
    }

    fn api_url_placeholder(&self) -> Option<&'static str> {
        Some("https://my-bitbucket-server/")
    }

    async fn get_namespaces(
        &self,
        credentials: &GitCredentials,
    ) -> Result<ServiceStream<String>, ServiceError> {
        let client = BitbucketServerClient::from_credentials(credentials)?;

        let stream = client
            .get_projects()
            .filter_map(|item| {
                future::ready(match item {
                    Ok(project) => project.name.map(Ok),
                    Err(err) => Some(Err(ServiceError::from(err))),
                })
            })
            .boxed();

        Ok(stream)
    }

    async fn get_repository_names(
        &self,
        credentials: &GitCredentials,
        namespace: &str,
    ) -> Result<ServiceStream<String>, ServiceError> {
        let client = BitbucketServerClient::from_credentials(credentials)?;

        // An unknown project is an empty picker, not an error.
        let Some(key) = client
            .get_project_by_name(namespace)
            .await?
            .and_then(|project| project.key)
        else {
            return Ok(stream::empty().boxed());
        };

        let stream = client
            .get_repositories(&key)
            .filter_map(|item| {
                future::ready(match item {
                    Ok(repository) => repository.name.map(Ok),
                    Err(err) => Some(Err(ServiceError::from(err))),
                })
            })
            .boxed();

        Ok(stream)
    }
}
