//! Hosted content API backend
//!
//! Talks to a repository contents endpoint:
//!
//! ```text
//! GET {api}/repos/{repo}/contents/{path}?ref={branch}
//!     -> {"sha": "...", "content": "<base64>", "encoding": "base64"}
//! PUT {api}/repos/{repo}/contents/{path}
//!     <- {"message", "content": "<base64>", "sha": "<expected>", "branch"}
//!     -> {"content": {"sha": "<new>"}}
//! ```
//!
//! The file's `sha` is the version token. A write guarded by a stale `sha`
//! is refused by the remote with 409 or 422.

use rollcall_core::{Blob, BlobBackend, StoreError, StoreResult, VersionToken};
use rollcall_wire::{decode_content, encode_content};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("rollcall/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 512;

/// Location and credentials of the remote table file
#[derive(Clone)]
pub struct ContentApiConfig {
    /// API root, e.g. `https://api.github.com`
    pub api_url: String,
    /// `owner/name`
    pub repo: String,
    /// File path inside the repository
    pub path: String,
    /// Branch to read from and commit to
    pub branch: String,
    /// Bearer token; anonymous when `None`
    pub token: Option<String>,
    /// Per-request deadline
    pub timeout: Duration,
}

impl fmt::Debug for ContentApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentApiConfig")
            .field("api_url", &self.api_url)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct FileResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
    branch: &'a str,
}

#[derive(Deserialize)]
struct UpdateResponse {
    content: UpdatedFile,
}

#[derive(Deserialize)]
struct UpdatedFile {
    sha: String,
}

/// Remote table file behind a repository contents API
pub struct ContentApiBlob {
    config: ContentApiConfig,
    agent: ureq::Agent,
}

impl ContentApiBlob {
    /// Backend for the file described by `config`
    pub fn new(config: ContentApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build();
        ContentApiBlob { config, agent }
    }

    /// Configuration in use
    pub fn config(&self) -> &ContentApiConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.repo.trim_matches('/'),
            self.config.path.trim_start_matches('/'),
        )
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        let request = request.set("Accept", "application/vnd.github+json");
        match &self.config.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

fn map_error(err: ureq::Error, on_conflict: Option<&VersionToken>, url: &str) -> StoreError {
    match err {
        ureq::Error::Status(404, _) => StoreError::Missing(url.to_string()),
        ureq::Error::Status(code @ (409 | 412 | 422), response) => match on_conflict {
            Some(expected) => StoreError::Conflict {
                expected: expected.clone(),
            },
            None => status_error(code, response),
        },
        ureq::Error::Status(code, response) => status_error(code, response),
        ureq::Error::Transport(t) => StoreError::Transport(t.to_string()),
    }
}

fn status_error(code: u16, response: ureq::Response) -> StoreError {
    let mut body = response.into_string().unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    StoreError::Status { code, body }
}

impl BlobBackend for ContentApiBlob {
    fn fetch(&self) -> StoreResult<Blob> {
        let url = self.url();
        debug!(url = %url, branch = %self.config.branch, "fetching remote table");
        let file: FileResponse = self
            .authorize(self.agent.get(&url))
            .query("ref", &self.config.branch)
            .call()
            .map_err(|e| map_error(e, None, &url))?
            .into_json()
            .map_err(|e| StoreError::Decode(format!("malformed contents response: {}", e)))?;

        if !file.encoding.is_empty() && file.encoding != "base64" {
            return Err(StoreError::Decode(format!(
                "unsupported content encoding '{}'",
                file.encoding
            )));
        }
        let content =
            decode_content(&file.content).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Blob {
            content,
            version: VersionToken::new(file.sha),
        })
    }

    fn put(
        &self,
        content: &[u8],
        message: &str,
        expected: &VersionToken,
    ) -> StoreResult<VersionToken> {
        let url = self.url();
        let body = UpdateRequest {
            message,
            content: encode_content(content),
            sha: expected.as_str(),
            branch: &self.config.branch,
        };
        let updated: UpdateResponse = self
            .authorize(self.agent.put(&url))
            .send_json(&body)
            .map_err(|e| map_error(e, Some(expected), &url))?
            .into_json()
            .map_err(|e| StoreError::Decode(format!("malformed update response: {}", e)))?;
        Ok(VersionToken::new(updated.content.sha))
    }

    fn describe(&self) -> String {
        format!("{}:{}@{}", self.config.repo, self.config.path, self.config.branch)
    }
}
