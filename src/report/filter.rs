use crate::github::Item;

/// Label signaling external contribution is welcome. Exact match only.
pub const HELP_WANTED_LABEL: &str = "help wanted";

/// Label suppressing a PR from the report regardless of other labels.
pub const ON_HOLD_LABEL: &str = "on hold";

/// Bot identity whose non-draft PRs are always listed.
pub const RENOVATE_LOGIN: &str = "renovate[bot]";

/// Issues labeled "help wanted", newest first. An "on hold" label does not
/// exclude an issue; only the PR list treats it specially.
pub fn help_wanted_issues(items: &[Item]) -> Vec<&Item> {
    let mut matched: Vec<&Item> = items
        .iter()
        .filter(|item| !item.is_pull_request && item.has_label(HELP_WANTED_LABEL))
        .collect();
    sort_newest_first(&mut matched);
    matched
}

/// Non-draft PRs labeled "help wanted" or opened by Renovate, newest first.
/// An "on hold" label excludes a PR no matter what else matches.
pub fn help_wanted_prs(items: &[Item]) -> Vec<&Item> {
    let mut matched: Vec<&Item> = items
        .iter()
        .filter(|item| {
            item.is_pull_request
                && !item.is_draft
                && !item.has_label(ON_HOLD_LABEL)
                && (item.has_label(HELP_WANTED_LABEL) || item.author_login == RENOVATE_LOGIN)
        })
        .collect();
    sort_newest_first(&mut matched);
    matched
}

/// Sort by the raw created_at string, descending. The API's fixed-width
/// zero-padded ISO-8601 format makes byte order equal chronological order,
/// and sorting the strings keeps the ordering byte-identical across runs.
fn sort_newest_first(items: &mut [&Item]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
