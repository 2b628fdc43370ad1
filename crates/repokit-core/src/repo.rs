//! Repository operations on top of [`ApiClient`]

use crate::api::ApiClient;
use crate::error::{RepoKitError, Result};
use crate::models::{RepoRef, RepositoryInfo};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

const REPOSITORY_INFO_QUERY: &str = "query RepositoryInfo($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    name
    owner { login }
  }
}";

#[derive(Deserialize)]
struct RepositoryInfoData {
    repository: Option<RepositoryInfo>,
}

impl ApiClient {
    /// Look up a repository's node ID and canonical owner/name.
    pub fn repository_info(&self, repo: &RepoRef) -> Result<RepositoryInfo> {
        let data: RepositoryInfoData = self.graphql(
            REPOSITORY_INFO_QUERY,
            json!({ "owner": repo.owner(), "name": repo.name() }),
        )?;

        data.repository
            .ok_or_else(|| RepoKitError::RepositoryNotFound(repo.full_name()))
    }

    /// Rename a repository in place. Any 2xx answer counts as success.
    pub fn rename_repository(&self, repo: &RepoRef, new_name: &str) -> Result<()> {
        let path = format!("repos/{}/{}", repo.owner(), repo.name());
        self.rest(Method::PATCH, &path, &json!({ "name": new_name }))?;
        Ok(())
    }
}
