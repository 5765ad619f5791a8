use crate::firmware_delivery::domain::{
    ArtifactDescriptor, Credential, DownloadHandle, RepositoryReference, RunId, WorkflowRun,
};
use crate::ports::outbound::{ArchiveStream, CiArtifactProvider};
use crate::shared::error::FlashToolError;
use crate::shared::Result;
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder, Response};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct WorkflowRunsPage {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct ArtifactsPage {
    #[serde(default)]
    artifacts: Vec<ArtifactDescriptor>,
}

/// GitHub Actions REST client
///
/// All requests are blocking and issued one at a time. The credential, when
/// present, is attached to every request; reqwest drops it again when a
/// download redirects to another host.
///
/// # Security
/// - Implements timeout (30 seconds per API call, 10 minutes per download)
/// - Does not retry failed requests (every stage fails fast)
pub struct GitHubActionsClient {
    client: Client,
    api_base: String,
    credential: Option<Credential>,
    download_timeout: Duration,
}

impl GitHubActionsClient {
    pub const DEFAULT_API_BASE: &'static str = "https://api.github.com";
    const TIMEOUT_SECONDS: u64 = 30;
    const DOWNLOAD_TIMEOUT_SECONDS: u64 = 600;
    const MEDIA_TYPE: &'static str = "application/vnd.github+json";
    const API_VERSION_HEADER: &'static str = "X-GitHub-Api-Version";
    /// The artifacts endpoint pages at 100
    const ARTIFACTS_PER_PAGE: usize = 100;

    /// Creates a client for api.github.com
    pub fn new(credential: Option<Credential>) -> Result<Self> {
        Self::with_api_base(credential, Self::DEFAULT_API_BASE)
    }

    /// Creates a client for another API host (e.g. GitHub Enterprise)
    pub fn with_api_base(credential: Option<Credential>, api_base: &str) -> Result<Self> {
        let client = Self::client_builder(Duration::from_secs(Self::TIMEOUT_SECONDS)).build()?;
        Ok(Self::from_client(client, credential, api_base))
    }

    fn client_builder(timeout: Duration) -> ClientBuilder {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("idf-artifact-flash/{}", version);
        Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
    }

    fn from_client(client: Client, credential: Option<Credential>, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            credential,
            download_timeout: Duration::from_secs(Self::DOWNLOAD_TIMEOUT_SECONDS),
        }
    }

    fn repository_url(&self, repository: &RepositoryReference) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base,
            urlencoding::encode(repository.owner()),
            urlencoding::encode(repository.name())
        )
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let request = request.header(ACCEPT, Self::MEDIA_TYPE);
        let Some(credential) = &self.credential else {
            return Ok(request);
        };

        let mut value = HeaderValue::from_str(&credential.authorization_header()).map_err(|_| {
            FlashToolError::Validation {
                message: "GitHub token contains characters that are not allowed in an HTTP header"
                    .to_string(),
            }
        })?;
        value.set_sensitive(true);

        let request = request.header(AUTHORIZATION, value);
        Ok(match credential.api_version() {
            Some(version) => request.header(Self::API_VERSION_HEADER, version),
            None => request,
        })
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        log::debug!("GET {}", url);
        let response = self
            .authorize(request)?
            .send()
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        log::debug!("{} -> {}", url, status);
        match status_error(url, status) {
            Some(error) => Err(error.into()),
            None => Ok(response),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.client.get(url), url)?;
        response.json::<T>().map_err(|e| {
            FlashToolError::Fetch {
                url: url.to_string(),
                details: format!("Unexpected response body: {}", e),
                hint: "Check that api_base points at a GitHub REST API".to_string(),
            }
            .into()
        })
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> FlashToolError {
    let hint = if error.is_timeout() {
        "The request timed out; check your network connection and try again"
    } else if error.is_connect() {
        "Could not connect; check your network connection and proxy settings"
    } else {
        "Check your network connection and try again"
    };
    FlashToolError::Fetch {
        url: url.to_string(),
        details: error.to_string(),
        hint: hint.to_string(),
    }
}

/// Maps a non-success status to the error taxonomy
fn status_error(url: &str, status: StatusCode) -> Option<FlashToolError> {
    if status.is_success() {
        return None;
    }
    let hint = match status {
        StatusCode::UNAUTHORIZED => {
            return Some(FlashToolError::Authentication {
                url: url.to_string(),
            })
        }
        StatusCode::FORBIDDEN => {
            "Access denied or rate limited. Private repositories need a token with Actions read access"
        }
        StatusCode::NOT_FOUND => {
            "Repository not found or not visible. Check the name, or pass a token for private repositories"
        }
        _ => "GitHub returned an unexpected status; try again later",
    };
    Some(FlashToolError::Fetch {
        url: url.to_string(),
        details: format!("HTTP {}", status),
        hint: hint.to_string(),
    })
}

impl CiArtifactProvider for GitHubActionsClient {
    fn list_successful_runs(
        &self,
        repository: &RepositoryReference,
        limit: usize,
    ) -> Result<Vec<WorkflowRun>> {
        // `status=success` filters on conclusion; the API ignores a `conclusion` parameter
        let url = format!(
            "{}/actions/runs?status=success&per_page={}",
            self.repository_url(repository),
            limit
        );
        let page: WorkflowRunsPage = self.get_json(&url)?;

        let runs: Vec<WorkflowRun> = page
            .workflow_runs
            .into_iter()
            .filter(|run| run.status == "completed" && run.conclusion.as_deref() == Some("success"))
            .collect();
        log::debug!("{} successful run(s) returned", runs.len());
        Ok(runs)
    }

    fn list_run_artifacts(
        &self,
        repository: &RepositoryReference,
        run_id: RunId,
    ) -> Result<Vec<ArtifactDescriptor>> {
        let url = format!(
            "{}/actions/runs/{}/artifacts?per_page={}",
            self.repository_url(repository),
            run_id,
            Self::ARTIFACTS_PER_PAGE
        );
        let page: ArtifactsPage = self.get_json(&url)?;
        Ok(page.artifacts)
    }

    fn open_archive(&self, handle: &DownloadHandle) -> Result<ArchiveStream> {
        let url = handle.as_str();
        let request = self.client.get(url).timeout(self.download_timeout);
        let response = self.send(request, url)?;
        let content_length = response.content_length();
        Ok(ArchiveStream::new(Box::new(response), content_length))
    }
}
