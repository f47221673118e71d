use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run configuration: the repositories to report on and the tracking issue
/// that receives the rendered report.
///
/// The lists ship as compiled-in defaults; a TOML file at the default
/// location (or given via `--config`) can replace any of them.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_repos")]
    pub repos: Vec<SeedRepo>,
    #[serde(default = "default_organizations")]
    pub organizations: Vec<OrgConfig>,
    #[serde(default = "default_teams")]
    pub teams: Vec<TeamConfig>,
    #[serde(default = "default_tracking_issue")]
    pub tracking_issue: TrackingIssue,
}

/// An individually named repository with its project group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedRepo {
    pub owner: String,
    pub repo: String,
    pub project: String,
}

/// An organization whose public repositories are all included.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrgConfig {
    pub name: String,
    pub project: String,
}

/// A team whose visible repositories are all included.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamConfig {
    pub org: String,
    pub team: String,
    pub project: String,
}

/// The issue whose body is replaced with the rendered report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackingIssue {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl Config {
    /// Load configuration from the default location or a specified path.
    ///
    /// An explicitly given path must exist. Without one, a missing file at
    /// the default location falls back to the compiled-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("gh-help-wanted").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repos: default_repos(),
            organizations: default_organizations(),
            teams: default_teams(),
            tracking_issue: default_tracking_issue(),
        }
    }
}

// Default value functions
fn default_repos() -> Vec<SeedRepo> {
    vec![SeedRepo {
        owner: "NordicPlayground".to_string(),
        repo: "nrf-docker".to_string(),
        project: "nRF Docker".to_string(),
    }]
}

fn default_organizations() -> Vec<OrgConfig> {
    vec![
        OrgConfig {
            name: "hello-nrfcloud".to_string(),
            project: "hello.nrfcloud.com".to_string(),
        },
        OrgConfig {
            name: "bifravst".to_string(),
            project: "Bifravst".to_string(),
        },
    ]
}

fn default_teams() -> Vec<TeamConfig> {
    vec![
        TeamConfig {
            org: "NordicSemiconductor".to_string(),
            team: "nrf-asset-tracker".to_string(),
            project: "nRF Asset Tracker".to_string(),
        },
        TeamConfig {
            org: "NordicPlayground".to_string(),
            team: "cellular-iot-applications".to_string(),
            project: "Cellular IoT Applications".to_string(),
        },
        TeamConfig {
            org: "NordicPlayground".to_string(),
            team: "thingy-world".to_string(),
            project: "thingy.world".to_string(),
        },
    ]
}

fn default_tracking_issue() -> TrackingIssue {
    TrackingIssue {
        owner: "bifravst".to_string(),
        repo: "help-wanted".to_string(),
        number: 2,
    }
}
