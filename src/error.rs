use std::fmt;

/// User-facing error with an optional fix suggestion
#[derive(Debug)]
pub struct UserError {
    message: String,
    suggestion: Option<String>,
}

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Print the error to stderr
    pub fn display(&self) {
        eprintln!("\n❌ Error: {}", self.message);

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("💡 {}", suggestion);
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UserError {}

/// Map pipeline failures to actionable messages
pub fn user_friendly_error(error: &anyhow::Error) -> UserError {
    // Include the whole context chain so matches see the root cause too
    let chain = format!("{:#}", error);

    if chain.contains("GH_TOKEN") {
        return UserError::new("GitHub token not configured").with_suggestion(
            "Set the GH_TOKEN environment variable to a personal access token with repo scope",
        );
    }

    if chain.contains("authentication failed") {
        return UserError::new("GitHub rejected the provided token").with_suggestion(
            "Check that GH_TOKEN is valid and grants access to the configured organizations and teams",
        );
    }

    if chain.contains("rate limit") {
        return UserError::new("GitHub API rate limit exceeded")
            .with_suggestion("Wait for the rate limit window to reset and run again");
    }

    if chain.contains("resource not found") {
        return UserError::new(chain).with_suggestion(
            "Check the configured owners, team slugs, and the tracking issue reference",
        );
    }

    if chain.contains("Failed to parse config") {
        return UserError::new("Invalid configuration file")
            .with_suggestion("Check the TOML syntax of the configuration file");
    }

    UserError::new(chain)
}
