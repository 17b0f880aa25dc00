// Remote CSV source: a folder of per-game CSV files in a private GitHub
// repository.
//
// The folder is listed through the GitHub contents API; every .csv entry
// is downloaded and decoded into plate-appearance events, and the decoded
// files are concatenated into one combined dataset. A failure on one file
// skips that file; a failure to list the folder aborts the fetch.

use crate::config::Config;
use crate::event::{self, PlateAppearanceEvent};
use serde::Deserialize;
use tracing::{info, warn};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("batboard/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no GitHub token configured")]
    MissingToken,

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("folder listing for '{path}' returned HTTP {status}")]
    Listing {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("no CSV files could be loaded from '{path}'")]
    NoCsvFiles { path: String },
}

// ---------------------------------------------------------------------------
// Contents API payload (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
    download_url: Option<String>,
}

// ---------------------------------------------------------------------------
// GithubSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GithubSource {
    client: reqwest::Client,
    owner: String,
    repo: String,
    branch: String,
    folder_path: String,
    token: String,
}

impl GithubSource {
    pub fn from_config(config: &Config) -> Result<GithubSource, FetchError> {
        let token = config
            .credentials
            .github_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(FetchError::MissingToken)?;

        Ok(GithubSource {
            client: reqwest::Client::new(),
            owner: config.github.owner.clone(),
            repo: config.github.repo.clone(),
            branch: config.github.branch.clone(),
            folder_path: config.github.folder_path.clone(),
            token,
        })
    }

    /// Download and decode every CSV file in the configured folder.
    pub async fn load_events(&self) -> Result<Vec<PlateAppearanceEvent>, FetchError> {
        let listing_url = format!(
            "{API_BASE}/repos/{}/{}/contents/{}?ref={}",
            self.owner,
            self.repo,
            encode_folder_path(&self.folder_path),
            self.branch
        );

        let response = self.get(&listing_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Listing {
                path: self.folder_path.clone(),
                status: response.status(),
            });
        }
        let entries: Vec<ContentsEntry> = response.json().await?;

        let mut events = Vec::new();
        let mut loaded_files = 0usize;

        for entry in entries {
            if entry.entry_type != "file" || !entry.name.to_lowercase().ends_with(".csv") {
                continue;
            }
            let Some(url) = &entry.download_url else {
                warn!("skipping {}: no download URL in listing", entry.name);
                continue;
            };

            let body = match self.download(url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("skipping {}: download failed: {}", entry.name, e);
                    continue;
                }
            };

            match event::load_events_from_reader(body.as_slice()) {
                Ok(mut file_events) => {
                    info!("loaded {} events from {}", file_events.len(), entry.name);
                    events.append(&mut file_events);
                    loaded_files += 1;
                }
                Err(e) => {
                    warn!("skipping {}: CSV decode failed: {}", entry.name, e);
                }
            }
        }

        if loaded_files == 0 {
            return Err(FetchError::NoCsvFiles {
                path: self.folder_path.clone(),
            });
        }

        info!(
            "combined dataset: {} events from {} files",
            events.len(),
            loaded_files
        );
        Ok(events)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Listing {
                path: url.to_string(),
                status: response.status(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Percent-encode a repository folder path for the contents API URL,
/// leaving `/` separators intact (folder names may be non-ASCII).
fn encode_folder_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
