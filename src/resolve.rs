use crate::config::Config;
use crate::github::GitHubClient;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info};

/// A repository selected for reporting, tagged with the project group its
/// items are bucketed under.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub project: String,
}

impl RepoRef {
    /// Identity key for deduplication
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Expand the configured seed list, organizations, and teams into a
/// deduplicated repository list.
///
/// A repository can appear in more than one listing (an organization and one
/// of its teams, say). The first occurrence wins and keeps its project group;
/// later duplicates are dropped. Any enumeration failure aborts the run.
pub fn resolve_repositories(client: &GitHubClient, config: &Config) -> Result<Vec<RepoRef>> {
    let mut seen = HashSet::new();
    let mut resolved: Vec<RepoRef> = Vec::new();

    for seed in &config.repos {
        push_unique(
            &mut seen,
            &mut resolved,
            RepoRef {
                owner: seed.owner.clone(),
                repo: seed.repo.clone(),
                project: seed.project.clone(),
            },
        );
    }

    for org in &config.organizations {
        let repos = client
            .list_org_repos(&org.name)
            .with_context(|| format!("Failed to list repositories for organization {}", org.name))?;

        for repo in repos.into_iter().filter(|repo| !repo.archived) {
            push_unique(
                &mut seen,
                &mut resolved,
                RepoRef {
                    owner: org.name.clone(),
                    repo: repo.name,
                    project: org.project.clone(),
                },
            );
        }
    }

    for team in &config.teams {
        let repos = client
            .list_team_repos(&team.org, &team.team)
            .with_context(|| {
                format!("Failed to list repositories for team {}/{}", team.org, team.team)
            })?;

        for repo in repos
            .into_iter()
            .filter(|repo| !repo.archived && !repo.private)
        {
            push_unique(
                &mut seen,
                &mut resolved,
                RepoRef {
                    owner: team.org.clone(),
                    repo: repo.name,
                    project: team.project.clone(),
                },
            );
        }
    }

    info!("Resolved {} repositories", resolved.len());
    Ok(resolved)
}

fn push_unique(seen: &mut HashSet<String>, resolved: &mut Vec<RepoRef>, candidate: RepoRef) {
    let key = candidate.key();
    if seen.insert(key) {
        resolved.push(candidate);
    } else {
        debug!("Skipping duplicate repository {}", candidate.key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OrgConfig, SeedRepo, TeamConfig, TrackingIssue};
    use crate::github::{MockGitHub, RestRepo};

    fn repo(name: &str, archived: bool, private: bool) -> RestRepo {
        RestRepo {
            name: name.to_string(),
            archived,
            private,
        }
    }

    fn test_config() -> Config {
        Config {
            repos: vec![SeedRepo {
                owner: "acme".to_string(),
                repo: "widgets".to_string(),
                project: "Widgets".to_string(),
            }],
            organizations: vec![OrgConfig {
                name: "acme".to_string(),
                project: "Acme".to_string(),
            }],
            teams: vec![TeamConfig {
                org: "acme".to_string(),
                team: "platform".to_string(),
                project: "Platform".to_string(),
            }],
            tracking_issue: TrackingIssue {
                owner: "acme".to_string(),
                repo: "meta".to_string(),
                number: 1,
            },
        }
    }

    #[test]
    fn test_resolve_filters_archived_and_private() {
        let mut mock = MockGitHub::new();
        mock.org_repos.insert(
            "acme".to_string(),
            vec![
                repo("gadgets", false, false),
                repo("old-gadgets", true, false),
            ],
        );
        mock.team_repos.insert(
            ("acme".to_string(), "platform".to_string()),
            vec![
                repo("tools", false, false),
                repo("secrets", false, true),
                repo("retired-tools", true, false),
            ],
        );

        let client = GitHubClient::Mock(mock);
        let resolved = resolve_repositories(&client, &test_config()).unwrap();

        let keys: Vec<String> = resolved.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["acme/widgets", "acme/gadgets", "acme/tools"]);
    }

    #[test]
    fn test_resolve_first_occurrence_wins() {
        let mut mock = MockGitHub::new();
        // "widgets" is seeded, listed by the org, and visible to the team
        mock.org_repos.insert(
            "acme".to_string(),
            vec![repo("widgets", false, false), repo("gadgets", false, false)],
        );
        mock.team_repos.insert(
            ("acme".to_string(), "platform".to_string()),
            vec![repo("widgets", false, false), repo("gadgets", false, false)],
        );

        let client = GitHubClient::Mock(mock);
        let resolved = resolve_repositories(&client, &test_config()).unwrap();

        assert_eq!(resolved.len(), 2);
        // The seed entry saw "widgets" first, so its project group sticks
        assert_eq!(resolved[0].key(), "acme/widgets");
        assert_eq!(resolved[0].project, "Widgets");
        // "gadgets" keeps the organization's group, not the team's
        assert_eq!(resolved[1].key(), "acme/gadgets");
        assert_eq!(resolved[1].project, "Acme");
    }

    #[test]
    fn test_resolved_keys_are_unique() {
        let mut mock = MockGitHub::new();
        mock.org_repos.insert(
            "acme".to_string(),
            vec![repo("widgets", false, false), repo("gadgets", false, false)],
        );
        mock.team_repos.insert(
            ("acme".to_string(), "platform".to_string()),
            vec![repo("gadgets", false, false)],
        );

        let client = GitHubClient::Mock(mock);
        let resolved = resolve_repositories(&client, &test_config()).unwrap();

        let mut keys: Vec<String> = resolved.iter().map(|r| r.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), resolved.len());
    }

    #[test]
    fn test_resolve_aborts_on_enumeration_failure() {
        // No org data seeded, so the organization listing fails
        let mock = MockGitHub::new();
        let client = GitHubClient::Mock(mock);

        let result = resolve_repositories(&client, &test_config());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("organization acme"));
    }
}
