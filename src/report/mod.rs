mod filter;
mod template;

pub use filter::{help_wanted_issues, help_wanted_prs, HELP_WANTED_LABEL, ON_HOLD_LABEL, RENOVATE_LOGIN};
pub use template::render_report;
