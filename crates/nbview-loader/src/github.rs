//! Notebook retrieval through the GitHub REST contents API.
//!
//! The HTTP transport is injected ([`Transport`]) so the request/decoding logic stays testable;
//! enable the `http` feature for a blocking `ureq` implementation.
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use url::Url;

use crate::error::LoadError;
use crate::error::Result;
use crate::file::RawDocument;
use crate::file::has_notebook_extension;
use crate::file::parse_document;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "main";
const RAW_BASE: &str = "https://raw.githubusercontent.com";
const ACCEPT: (&str, &str) = ("Accept", "application/vnd.github.v3+json");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Accepts `https://github.com/<owner>/<repo>[/...]`, `github.com/<owner>/<repo>`, or the
    /// bare `<owner>/<repo>` form. A trailing `.git` is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = || LoadError::InvalidRepo(input.to_string());

        let (owner, repo) = if let Some(url) = github_url(input) {
            let mut segments = url
                .path_segments()
                .ok_or_else(invalid)?
                .filter(|s| !s.is_empty());
            let owner = segments.next().ok_or_else(invalid)?;
            let repo = segments.next().ok_or_else(invalid)?;
            (owner.to_string(), repo.to_string())
        } else {
            let mut parts = input.split('/');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                    (owner.to_string(), repo.to_string())
                }
                _ => return Err(invalid()),
            }
        };

        let repo = repo.strip_suffix(".git").unwrap_or(&repo).to_string();
        if repo.is_empty() {
            return Err(invalid());
        }
        Ok(Self { owner, repo })
    }
}

fn github_url(input: &str) -> Option<Url> {
    let candidate = if input.contains("://") {
        input.to_string()
    } else if input.starts_with("github.com/") || input.starts_with("www.github.com/") {
        format!("https://{input}")
    } else {
        return None;
    };
    let url = Url::parse(&candidate).ok()?;
    matches!(url.host_str(), Some("github.com" | "www.github.com")).then_some(url)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET.
///
/// Implementations report transport failures as [`LoadError::Network`] and return every HTTP
/// response, successful or not, as an [`HttpResponse`].
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// A file fetched from the contents API, with its payload already base64-decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    pub sha: Option<String>,
    pub size: Option<u64>,
    pub html_url: Option<String>,
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: Option<String>,
    encoding: Option<String>,
    sha: Option<String>,
    size: Option<u64>,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct RepoInfo {
    default_branch: Option<String>,
}

pub struct GithubSource<T> {
    transport: T,
    pub api_base: String,
    pub branch: String,
}

impl<T: Transport> GithubSource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            api_base: DEFAULT_API_BASE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// `<api_base>/repos/<owner>/<repo>/contents/<path>?ref=<branch>`
    pub fn contents_url(&self, repo: &RepoRef, path: &str) -> Result<String> {
        let mut url = self.api_url(&["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"])?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| LoadError::InvalidRepo(self.api_base.clone()))?;
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url.into())
    }

    /// Base URL that relative links inside the notebook resolve against.
    pub fn raw_base_url(&self, repo: &RepoRef, path: &str) -> String {
        let dir = path
            .trim_matches('/')
            .rsplit_once('/')
            .map(|(dir, _)| format!("{dir}/"))
            .unwrap_or_default();
        format!(
            "{RAW_BASE}/{}/{}/{}/{dir}",
            repo.owner, repo.repo, self.branch
        )
    }

    pub fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<RemoteFile> {
        let url = self.contents_url(repo, path)?;
        let body = self.get_ok(&url)?;

        let resp: ContentsResponse = serde_json::from_slice(&body)
            .map_err(|e| LoadError::Payload(format!("contents response: {e}")))?;
        if let Some(encoding) = resp.encoding.as_deref() {
            if encoding != "base64" {
                return Err(LoadError::Payload(format!("unsupported encoding `{encoding}`")));
            }
        }
        let encoded = resp
            .content
            .ok_or_else(|| LoadError::Payload("response has no file content".to_string()))?;
        let content = decode_content(&encoded)?;

        tracing::info!(
            owner = %repo.owner,
            repo = %repo.repo,
            path,
            bytes = content.len(),
            "fetched remote notebook"
        );
        Ok(RemoteFile {
            content,
            sha: resp.sha,
            size: resp.size,
            html_url: resp.html_url,
        })
    }

    /// Fetches and parses a notebook. The extension is checked before any request is made.
    pub fn load(&self, repo: &RepoRef, path: &str) -> Result<RawDocument> {
        if !has_notebook_extension(path) {
            return Err(LoadError::WrongExtension(path.to_string()));
        }
        let file = self.fetch_file(repo, path)?;
        parse_document(&file.content)
    }

    /// The repository's default branch, or [`DEFAULT_BRANCH`] if it cannot be determined.
    pub fn default_branch(&self, repo: &RepoRef) -> String {
        let lookup = || -> Result<Option<String>> {
            let url: String = self.api_url(&["repos", repo.owner.as_str(), repo.repo.as_str()])?.into();
            let body = self.get_ok(&url)?;
            let info: RepoInfo = serde_json::from_slice(&body)
                .map_err(|e| LoadError::Payload(format!("repository response: {e}")))?;
            Ok(info.default_branch)
        };
        match lookup() {
            Ok(Some(branch)) => branch,
            Ok(None) => DEFAULT_BRANCH.to_string(),
            Err(err) => {
                tracing::debug!(%err, "default branch lookup failed");
                DEFAULT_BRANCH.to_string()
            }
        }
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let bad_base = || LoadError::InvalidRepo(self.api_base.clone());
        let mut url = Url::parse(&self.api_base).map_err(|_| bad_base())?;
        url.path_segments_mut()
            .map_err(|_| bad_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_ok(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.transport.get(url, &[ACCEPT])?;
        if !resp.is_success() {
            tracing::warn!(url, status = resp.status, "remote request failed");
            return Err(LoadError::from_status(resp.status));
        }
        Ok(resp.body)
    }
}

/// Decodes the contents API's base64 payload, which is wrapped with newlines.
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| LoadError::Payload(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes).map_err(|e| LoadError::Payload(format!("content is not UTF-8: {e}")))
}

#[cfg(feature = "http")]
pub use self::http::UreqTransport;

#[cfg(feature = "http")]
mod http {
    use std::io::Read;
    use std::time::Duration;

    use super::HttpResponse;
    use super::Transport;
    use crate::error::LoadError;
    use crate::error::Result;

    /// Blocking transport backed by `ureq`.
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::with_timeout(Duration::from_secs(30))
        }

        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(concat!("nbview/", env!("CARGO_PKG_VERSION")))
                .build();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
            let mut req = self.agent.get(url);
            for (name, value) in headers {
                req = req.set(name, value);
            }
            match req.call() {
                Ok(resp) => {
                    let status = resp.status();
                    let mut body = Vec::new();
                    resp.into_reader().read_to_end(&mut body)?;
                    Ok(HttpResponse { status, body })
                }
                Err(ureq::Error::Status(status, resp)) => Ok(HttpResponse {
                    status,
                    body: resp.into_string().unwrap_or_default().into_bytes(),
                }),
                Err(ureq::Error::Transport(err)) => Err(LoadError::Network(err.to_string())),
            }
        }
    }
}
