use anyhow::{anyhow, Result};

mod client;
mod models;

pub use client::*;
pub use models::*;

/// Environment variables checked for the API credential, in order.
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Read the bearer token from the environment.
pub fn read_token() -> Result<String> {
    for var in TOKEN_VARS {
        if let Ok(value) = std::env::var(var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }

    Err(anyhow!(
        "GH_TOKEN is not set. Export a personal access token with access to the configured repositories"
    ))
}
