use crate::github::{GitHubClient, Item};
use crate::resolve::RepoRef;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Items bucketed by project group, in the order groups were first seen.
///
/// Subsection order in the rendered report follows collection order, so this
/// cannot be a sorted map.
#[derive(Debug, Default)]
pub struct ProjectBuckets {
    groups: Vec<(String, Vec<Item>)>,
}

impl ProjectBuckets {
    /// Append items to a project group, registering the group on first sight.
    /// A group is registered even when a repository contributes zero items.
    pub fn append(&mut self, project: &str, items: Vec<Item>) {
        match self.groups.iter_mut().find(|(name, _)| name == project) {
            Some((_, bucket)) => bucket.extend(items),
            None => self.groups.push((project.to_string(), items)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.groups
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }
}

/// One "list open issues" call per repository; items land in the bucket named
/// by the repository's project group. A failing fetch aborts the whole run:
/// a partially-rendered report is worse than a failed one.
pub fn collect_items(client: &GitHubClient, repos: &[RepoRef]) -> Result<ProjectBuckets> {
    let mut buckets = ProjectBuckets::default();

    for repo in repos {
        let items = client
            .list_open_issues(&repo.owner, &repo.repo)
            .with_context(|| format!("Failed to fetch open issues for {}", repo.key()))?;

        debug!("{}: {} open items", repo.key(), items.len());
        buckets.append(&repo.project, items);
    }

    info!(
        "Collected {} items across {} project groups",
        buckets.item_count(),
        buckets.len()
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockGitHub;
    use crate::test_utils::issue;

    fn repo_ref(owner: &str, repo: &str, project: &str) -> RepoRef {
        RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            project: project.to_string(),
        }
    }

    #[test]
    fn test_buckets_preserve_first_populated_order() {
        let mut mock = MockGitHub::new();
        mock.issues.insert(
            "acme/widgets".to_string(),
            vec![issue(1, "2024-01-01T00:00:00Z", &[])],
        );
        mock.issues.insert(
            "acme/gadgets".to_string(),
            vec![issue(2, "2024-01-02T00:00:00Z", &[])],
        );
        mock.issues.insert(
            "acme/tools".to_string(),
            vec![issue(3, "2024-01-03T00:00:00Z", &[])],
        );

        let client = GitHubClient::Mock(mock);
        let repos = vec![
            repo_ref("acme", "widgets", "Widgets"),
            repo_ref("acme", "gadgets", "Gadgets"),
            repo_ref("acme", "tools", "Widgets"),
        ];

        let buckets = collect_items(&client, &repos).unwrap();

        let groups: Vec<&str> = buckets.iter().map(|(name, _)| name).collect();
        assert_eq!(groups, vec!["Widgets", "Gadgets"]);

        // Both widgets and tools land in the Widgets bucket
        let (_, widgets) = buckets.iter().next().unwrap();
        assert_eq!(widgets.len(), 2);
        assert_eq!(buckets.item_count(), 3);
    }

    #[test]
    fn test_empty_repository_still_registers_its_group() {
        let mut mock = MockGitHub::new();
        mock.issues.insert("acme/quiet".to_string(), vec![]);

        let client = GitHubClient::Mock(mock);
        let repos = vec![repo_ref("acme", "quiet", "Quiet")];

        let buckets = collect_items(&client, &repos).unwrap();

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.item_count(), 0);
        let (name, items) = buckets.iter().next().unwrap();
        assert_eq!(name, "Quiet");
        assert!(items.is_empty());
    }

    #[test]
    fn test_collect_aborts_on_fetch_failure() {
        let mut mock = MockGitHub::new();
        mock.issues.insert(
            "acme/widgets".to_string(),
            vec![issue(1, "2024-01-01T00:00:00Z", &[])],
        );

        let client = GitHubClient::Mock(mock);
        let repos = vec![
            repo_ref("acme", "widgets", "Widgets"),
            repo_ref("acme", "missing", "Widgets"),
        ];

        let result = collect_items(&client, &repos);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("acme/missing"));
    }
}
