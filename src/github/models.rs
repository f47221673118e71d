use serde::Deserialize;

/// An open issue or pull request, reduced to the fields the report needs.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: u64,
    pub html_url: String,
    /// Creation timestamp exactly as the API returned it. The fixed-width
    /// ISO-8601 format makes byte order equal chronological order, and the
    /// rendered `datetime` attribute must carry the verbatim value.
    pub created_at: String,
    pub labels: Vec<String>,
    pub is_pull_request: bool,
    pub is_draft: bool,
    pub author_login: String,
}

impl Item {
    /// Case-sensitive exact label match
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

/// Raw issue shape from the REST issues listing. Pull requests appear in the
/// same listing with a `pull_request` marker attached.
#[derive(Debug, Clone, Deserialize)]
pub struct RestIssue {
    pub id: u64,
    pub html_url: String,
    pub created_at: String,
    #[serde(default)]
    pub labels: Vec<RestLabel>,
    pub pull_request: Option<PullRequestMarker>,
    pub draft: Option<bool>,
    pub user: Option<RestUser>,
}

/// Label on an issue/PR
#[derive(Debug, Clone, Deserialize)]
pub struct RestLabel {
    pub name: String,
}

/// Presence of this object in the listing marks the item as a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestMarker {}

/// Author information
#[derive(Debug, Clone, Deserialize)]
pub struct RestUser {
    pub login: String,
}

impl From<RestIssue> for Item {
    fn from(raw: RestIssue) -> Self {
        Item {
            id: raw.id,
            html_url: raw.html_url,
            created_at: raw.created_at,
            labels: raw.labels.into_iter().map(|label| label.name).collect(),
            is_pull_request: raw.pull_request.is_some(),
            is_draft: raw.draft.unwrap_or(false),
            author_login: raw.user.map(|user| user.login).unwrap_or_default(),
        }
    }
}

/// Repository entry from an organization or team listing
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepo {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub private: bool,
}
