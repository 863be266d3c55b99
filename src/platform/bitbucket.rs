//! Bitbucket Server platform service implementation

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::PullRequestService;
use crate::types::{CreatedPullRequest, PullRequest, PullRequestDraft, qualified_ref};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Bitbucket Server service using reqwest
pub struct BitbucketService {
    client: Client,
    auth_header: String,
    base_url: String,
    project_key: String,
}

// Request payloads

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePrPayload<'a> {
    title: &'a str,
    description: &'a str,
    from_ref: RefPayload<'a>,
    to_ref: RefPayload<'a>,
    reviewers: Vec<ReviewerPayload<'a>>,
}

#[derive(Serialize)]
struct RefPayload<'a> {
    id: String,
    repository: RepositoryPayload<'a>,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct RepositoryPayload<'a> {
    project: ProjectPayload<'a>,
    slug: &'a str,
}

#[derive(Serialize)]
struct ProjectPayload<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct ReviewerPayload<'a> {
    user: UserPayload<'a>,
}

#[derive(Serialize)]
struct UserPayload<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct MergePayload {
    version: i64,
}

#[derive(Serialize)]
struct DeleteBranchPayload {
    name: String,
}

// Response documents

/// One page of a paged collection
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    values: Vec<T>,
    #[serde(default = "last_page_default")]
    is_last_page: bool,
    next_page_start: Option<u64>,
}

const fn last_page_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPullRequest {
    id: u64,
    version: i64,
    #[serde(default)]
    title: String,
    from_ref: ApiRef,
    to_ref: ApiRef,
    author: Option<ApiParticipant>,
    #[serde(default)]
    links: ApiLinks,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRef {
    display_id: String,
}

#[derive(Deserialize)]
struct ApiParticipant {
    user: ApiUser,
}

#[derive(Deserialize)]
struct ApiUser {
    name: String,
}

#[derive(Deserialize, Default)]
struct ApiLinks {
    #[serde(rename = "self", default)]
    self_links: Vec<ApiLink>,
}

#[derive(Deserialize)]
struct ApiLink {
    href: String,
}

impl ApiLinks {
    fn first_href(self) -> Option<String> {
        self.self_links.into_iter().next().map(|l| l.href)
    }
}

/// Creation response
#[derive(Deserialize)]
struct ApiCreated {
    id: u64,
    version: i64,
    #[serde(default)]
    links: ApiLinks,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        Self {
            id: pr.id,
            version: pr.version,
            title: pr.title,
            source_branch: pr.from_ref.display_id,
            destination_branch: pr.to_ref.display_id,
            author: pr.author.map(|a| a.user.name),
            url: pr.links.first_href(),
        }
    }
}

impl BitbucketService {
    /// Create a new Bitbucket service
    pub fn new(base_url: &Url, project_key: String, credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pr-batch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth_header: credentials.basic_header(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            project_key,
        })
    }

    /// Create a service from the run configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, config.project_key.clone(), &config.credentials)
    }

    fn repo_url(&self, api: &str, repo: &str) -> String {
        format!(
            "{}/rest/{api}/latest/projects/{}/repos/{}",
            self.base_url,
            urlencoding::encode(&self.project_key),
            urlencoding::encode(repo)
        )
    }

    fn pull_requests_url(&self, repo: &str) -> String {
        format!("{}/pull-requests", self.repo_url("api", repo))
    }

    fn branches_url(&self, repo: &str) -> String {
        format!("{}/branches", self.repo_url("branch-utils", repo))
    }

    fn ref_payload<'a>(&'a self, repo: &'a str, branch: &str) -> RefPayload<'a> {
        RefPayload {
            id: qualified_ref(branch),
            repository: RepositoryPayload {
                project: ProjectPayload {
                    key: &self.project_key,
                },
                slug: repo,
            },
            kind: "BRANCH",
        }
    }
}

/// Turn a non-success response into [`Error::Rejected`], keeping the payload
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<serde_json::Value>(&raw)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or(raw);

    Err(Error::Rejected {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        body,
    })
}

#[async_trait]
impl PullRequestService for BitbucketService {
    async fn create_pr(&self, draft: &PullRequestDraft) -> Result<CreatedPullRequest> {
        let repo = draft.source.repo.as_str();
        debug!(repo, source = %draft.source.branch, destination = %draft.destination.branch, "creating PR");

        let payload = CreatePrPayload {
            title: &draft.title,
            description: &draft.description,
            from_ref: self.ref_payload(repo, &draft.source.branch),
            to_ref: self.ref_payload(&draft.destination.repo, &draft.destination.branch),
            reviewers: draft
                .reviewers
                .iter()
                .map(|name| ReviewerPayload {
                    user: UserPayload { name },
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.pull_requests_url(repo))
            .header(AUTHORIZATION, &self.auth_header)
            .json(&payload)
            .send()
            .await?;

        let created: ApiCreated = check_status(response).await?.json().await?;

        debug!(repo, pr_id = created.id, "created PR");
        Ok(CreatedPullRequest {
            id: created.id,
            version: created.version,
            url: created.links.first_href(),
        })
    }

    async fn list_open_prs(&self, repo: &str) -> Result<Vec<PullRequest>> {
        debug!(repo, "listing open PRs");
        let url = self.pull_requests_url(repo);

        let mut prs = Vec::new();
        let mut start: Option<u64> = None;
        loop {
            let mut request = self
                .client
                .get(&url)
                .header(AUTHORIZATION, &self.auth_header)
                .query(&[("state", "OPEN")]);
            if let Some(start) = start {
                request = request.query(&[("start", start)]);
            }

            let page: Page<ApiPullRequest> = check_status(request.send().await?).await?.json().await?;
            let page_len = page.values.len();
            prs.extend(page.values.into_iter().map(PullRequest::from));

            match page.next_page_start {
                Some(next) if !page.is_last_page => {
                    // Every page must move the cursor forward.
                    let current = start.unwrap_or(0);
                    if page_len == 0 || next <= current {
                        return Err(Error::UnexpectedResponse(format!(
                            "pagination for {repo} did not advance (start {current}, next {next}, {page_len} values)"
                        )));
                    }
                    start = Some(next);
                }
                _ => break,
            }
        }

        debug!(repo, count = prs.len(), "listed open PRs");
        Ok(prs)
    }

    async fn merge_pr(&self, repo: &str, pr_id: u64, version: i64) -> Result<()> {
        debug!(repo, pr_id, version, "merging PR");
        let url = format!("{}/{pr_id}/merge", self.pull_requests_url(repo));

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(&MergePayload { version })
            .send()
            .await?;
        check_status(response).await?;

        debug!(repo, pr_id, "merged PR");
        Ok(())
    }

    async fn delete_branch(&self, repo: &str, branch: &str) -> Result<()> {
        debug!(repo, branch, "deleting branch");

        let response = self
            .client
            .delete(self.branches_url(repo))
            .header(AUTHORIZATION, &self.auth_header)
            .json(&DeleteBranchPayload {
                name: qualified_ref(branch),
            })
            .send()
            .await?;
        check_status(response).await?;

        debug!(repo, branch, "deleted branch");
        Ok(())
    }
}
