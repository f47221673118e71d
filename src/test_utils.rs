//! Test utilities for gh-help-wanted
#![cfg(test)]

use crate::github::Item;

/// Create a test issue with the given labels
pub fn issue(id: u64, created_at: &str, labels: &[&str]) -> Item {
    Item {
        id,
        html_url: format!("https://github.com/acme/widgets/issues/{}", id),
        created_at: created_at.to_string(),
        labels: labels.iter().map(|label| label.to_string()).collect(),
        is_pull_request: false,
        is_draft: false,
        author_login: "octocat".to_string(),
    }
}

/// Create a test pull request
pub fn pr(id: u64, created_at: &str, labels: &[&str], draft: bool, author: &str) -> Item {
    Item {
        id,
        html_url: format!("https://github.com/acme/widgets/pull/{}", id),
        created_at: created_at.to_string(),
        labels: labels.iter().map(|label| label.to_string()).collect(),
        is_pull_request: true,
        is_draft: draft,
        author_login: author.to_string(),
    }
}
