use crate::github::models::{Item, RestIssue, RestRepo};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: usize = 100;

/// GitHub client abstraction
pub enum GitHubClient {
    Real(RealGitHub),
    #[cfg(test)]
    Mock(MockGitHub),
}

impl GitHubClient {
    /// Create a new real GitHub client
    pub fn new() -> Result<Self> {
        Ok(GitHubClient::Real(RealGitHub::new()?))
    }

    /// Create a mock client for testing
    #[cfg(test)]
    pub fn mock() -> Self {
        GitHubClient::Mock(MockGitHub::new())
    }

    /// List an organization's public repositories
    pub fn list_org_repos(&self, org: &str) -> Result<Vec<RestRepo>> {
        match self {
            GitHubClient::Real(client) => client.list_org_repos(org),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.list_org_repos(org),
        }
    }

    /// List the repositories visible to a team
    pub fn list_team_repos(&self, org: &str, team: &str) -> Result<Vec<RestRepo>> {
        match self {
            GitHubClient::Real(client) => client.list_team_repos(org, team),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.list_team_repos(org, team),
        }
    }

    /// List all open issues and PRs for a repository
    pub fn list_open_issues(&self, owner: &str, repo: &str) -> Result<Vec<Item>> {
        match self {
            GitHubClient::Real(client) => client.list_open_issues(owner, repo),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.list_open_issues(owner, repo),
        }
    }

    /// Replace the entire body of an issue
    pub fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        match self {
            GitHubClient::Real(client) => client.update_issue_body(owner, repo, number, body),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.update_issue_body(owner, repo, number, body),
        }
    }
}

/// Real GitHub client using the REST API
pub struct RealGitHub {
    client: HttpClient,
    token: String,
}

impl RealGitHub {
    /// Create a new real GitHub client
    pub fn new() -> Result<Self> {
        let token = crate::github::read_token()?;

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(RealGitHub { client, token })
    }

    /// Build request headers
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .context("Invalid token format")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gh-help-wanted/", env!("CARGO_PKG_VERSION"))),
        );

        Ok(headers)
    }

    /// Fetch every page of a list endpoint. Stops after the first short page,
    /// so busy repositories are never silently truncated at one page.
    fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut results = Vec::new();
        let mut page = 1u32;

        loop {
            debug!("GET {} page {}", path, page);

            let url = format!("{}{}", API_URL, path);
            let page_param = page.to_string();
            let per_page = PAGE_SIZE.to_string();

            let response = self
                .client
                .get(&url)
                .headers(self.build_headers()?)
                .query(query)
                .query(&[("per_page", per_page.as_str()), ("page", page_param.as_str())])
                .send()
                .with_context(|| format!("Failed to send request to {}", path))?;

            let body = handle_response(response, path)?;
            let batch: Vec<T> = serde_json::from_str(&body)
                .with_context(|| format!("Failed to parse response from {}", path))?;

            let fetched = batch.len();
            results.extend(batch);

            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(results)
    }

    /// List an organization's public repositories
    pub fn list_org_repos(&self, org: &str) -> Result<Vec<RestRepo>> {
        self.get_paginated(&format!("/orgs/{}/repos", org), &[("type", "public")])
    }

    /// List the repositories visible to a team
    pub fn list_team_repos(&self, org: &str, team: &str) -> Result<Vec<RestRepo>> {
        self.get_paginated(&format!("/orgs/{}/teams/{}/repos", org, team), &[])
    }

    /// List all open issues and PRs for a repository
    pub fn list_open_issues(&self, owner: &str, repo: &str) -> Result<Vec<Item>> {
        let raw: Vec<serde_json::Value> = self.get_paginated(
            &format!("/repos/{}/{}/issues", owner, repo),
            &[("state", "open")],
        )?;

        Ok(decode_items(raw, &format!("{}/{}", owner, repo)))
    }

    /// Replace the entire body of an issue
    pub fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        let path = format!("/repos/{}/{}/issues/{}", owner, repo, number);
        let url = format!("{}{}", API_URL, path);
        let payload = serde_json::json!({ "body": body }).to_string();

        let mut headers = self.build_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .patch(&url)
            .headers(headers)
            .body(payload)
            .send()
            .with_context(|| format!("Failed to send update for {}/{}#{}", owner, repo, number))?;

        handle_response(response, &path)?;
        Ok(())
    }
}

/// Decode listing entries one at a time so a single malformed item is logged
/// and skipped instead of failing the whole page downstream.
fn decode_items(raw: Vec<serde_json::Value>, repo: &str) -> Vec<Item> {
    let mut items = Vec::with_capacity(raw.len());

    for value in raw {
        match serde_json::from_value::<RestIssue>(value) {
            Ok(issue) => {
                if issue.created_at.parse::<jiff::Timestamp>().is_err() {
                    warn!(
                        "Skipping item with unparseable created_at in {}: {}",
                        repo, issue.html_url
                    );
                    continue;
                }
                items.push(Item::from(issue));
            }
            Err(e) => warn!("Skipping malformed item in {}: {}", repo, e),
        }
    }

    items
}

/// Handle API response
fn handle_response(response: Response, path: &str) -> Result<String> {
    let status = response.status();
    let body = response.text().context("Failed to read response body")?;

    if status.is_success() {
        return Ok(body);
    }

    // GitHub error bodies carry a "message" field
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    if status.as_u16() == 404 {
        Err(anyhow!("GitHub resource not found: {} ({})", path, message))
    } else if message.contains("rate limit") {
        Err(anyhow!("GitHub rate limit exceeded for {}: {}", path, message))
    } else if status.as_u16() == 401 || status.as_u16() == 403 {
        Err(anyhow!(
            "GitHub authentication failed for {} ({}): {}",
            path,
            status,
            message
        ))
    } else {
        Err(anyhow!("GitHub API error for {} ({}): {}", path, status, message))
    }
}

#[derive(serde::Deserialize)]
struct ApiError {
    message: String,
}

/// Mock GitHub client for testing
#[cfg(test)]
pub struct MockGitHub {
    pub org_repos: std::collections::HashMap<String, Vec<RestRepo>>,
    pub team_repos: std::collections::HashMap<(String, String), Vec<RestRepo>>,
    pub issues: std::collections::HashMap<String, Vec<Item>>,
    pub updated_issues: std::cell::RefCell<Vec<UpdatedIssue>>,
}

/// Record of an `update_issue_body` call against the mock
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct UpdatedIssue {
    pub repo: String,
    pub number: u64,
    pub body: String,
}

#[cfg(test)]
impl MockGitHub {
    pub fn new() -> Self {
        MockGitHub {
            org_repos: std::collections::HashMap::new(),
            team_repos: std::collections::HashMap::new(),
            issues: std::collections::HashMap::new(),
            updated_issues: std::cell::RefCell::new(vec![]),
        }
    }

    pub fn list_org_repos(&self, org: &str) -> Result<Vec<RestRepo>> {
        self.org_repos
            .get(org)
            .cloned()
            .ok_or_else(|| anyhow!("Organization {} not found", org))
    }

    pub fn list_team_repos(&self, org: &str, team: &str) -> Result<Vec<RestRepo>> {
        self.team_repos
            .get(&(org.to_string(), team.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("Team {}/{} not found", org, team))
    }

    pub fn list_open_issues(&self, owner: &str, repo: &str) -> Result<Vec<Item>> {
        self.issues
            .get(&format!("{}/{}", owner, repo))
            .cloned()
            .ok_or_else(|| anyhow!("Repository {}/{} not found", owner, repo))
    }

    pub fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.updated_issues.borrow_mut().push(UpdatedIssue {
            repo: format!("{}/{}", owner, repo),
            number,
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_list_open_issues() {
        let mut mock = MockGitHub::new();
        mock.issues.insert(
            "acme/widgets".to_string(),
            vec![crate::test_utils::issue(1, "2024-01-01T00:00:00Z", &["help wanted"])],
        );

        let client = GitHubClient::Mock(mock);

        let items = client.list_open_issues("acme", "widgets").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);

        let result = client.list_open_issues("acme", "gone");
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_records_issue_update() {
        let mock = MockGitHub::new();
        let client = GitHubClient::Mock(mock);

        client
            .update_issue_body("acme", "meta", 2, "## Issues")
            .unwrap();

        match &client {
            GitHubClient::Mock(mock) => {
                let updated = mock.updated_issues.borrow();
                assert_eq!(updated.len(), 1);
                assert_eq!(updated[0].repo, "acme/meta");
                assert_eq!(updated[0].number, 2);
                assert_eq!(updated[0].body, "## Issues");
            }
            _ => panic!("Expected mock client"),
        }
    }

    #[test]
    fn test_decode_items_skips_malformed_entries() {
        let raw = vec![
            serde_json::json!({
                "id": 1,
                "html_url": "https://github.com/acme/widgets/issues/1",
                "created_at": "2024-01-01T00:00:00Z",
                "labels": [],
                "user": { "login": "octocat" }
            }),
            // Missing html_url
            serde_json::json!({
                "id": 2,
                "created_at": "2024-01-02T00:00:00Z"
            }),
            // Unparseable created_at
            serde_json::json!({
                "id": 3,
                "html_url": "https://github.com/acme/widgets/issues/3",
                "created_at": "yesterday",
                "labels": []
            }),
        ];

        let items = decode_items(raw, "acme/widgets");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }
}
