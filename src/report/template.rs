use anyhow::Result;
use jiff::Timestamp;

use crate::collect::ProjectBuckets;
use crate::report::filter::{help_wanted_issues, help_wanted_prs, RENOVATE_LOGIN};
use crate::resolve::RepoRef;
use crate::time::time_tag;

const BOT_MARKER: &str = "🤖 ";
const NO_PRS_LINE: &str = "No PRs to help with.";

/// Render the report: Issues and PRs grouped by project, then the covered
/// repositories. Returns the document as individual lines; the publisher
/// joins them with single newlines.
pub fn render_report(
    buckets: &ProjectBuckets,
    repos: &[RepoRef],
    now: Timestamp,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    lines.push("## Issues".to_string());
    lines.push(String::new());
    lines.push(
        "Issues labeled with *help wanted*. Remove the *help wanted* label to not include them in this list."
            .to_string(),
    );

    for (project, items) in buckets.iter() {
        lines.push(String::new());
        lines.push(format!("### {}", project));
        lines.push(String::new());

        for item in help_wanted_issues(items) {
            lines.push(format!(
                "- {} ({})",
                item.html_url,
                time_tag(&item.created_at, now)?
            ));
        }
    }

    lines.push(String::new());
    lines.push("## PRs".to_string());
    lines.push(String::new());
    lines.push("PRs labeled with *help wanted*, and all PRs opened by Renovate.".to_string());
    lines.push("Add the *on hold* label to not include them in this list.".to_string());

    for (project, items) in buckets.iter() {
        lines.push(String::new());
        lines.push(format!("### {}", project));
        lines.push(String::new());

        let prs = help_wanted_prs(items);
        if prs.is_empty() {
            lines.push(NO_PRS_LINE.to_string());
        } else {
            for item in prs {
                let marker = if item.author_login == RENOVATE_LOGIN {
                    BOT_MARKER
                } else {
                    ""
                };
                lines.push(format!(
                    "- {}{} ({})",
                    marker,
                    item.html_url,
                    time_tag(&item.created_at, now)?
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("## Repos".to_string());
    lines.push(String::new());
    lines.push("This list is compiled from the following repositories:".to_string());
    lines.push(String::new());

    for repo in repos {
        lines.push(format!(
            "- [@{}/{}](https://github.com/{}/{})",
            repo.owner, repo.repo, repo.owner, repo.repo
        ));
    }

    Ok(lines)
}
