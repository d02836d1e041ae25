//! GitHub API and workflow-file helpers: check runs, PR comments, job
//! summaries and step outputs.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::checks::{CheckRunRequest, CheckRunSink};
use crate::error::{DeltaCovError, Result};

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "deltacov";
const API_VERSION: &str = "2022-11-28";

/// Resolved GitHub Actions context, read from environment variables.
pub struct Context {
    token: String,
    repo: String,
    api_url: String,
    pub pr_number: Option<u64>,
    pub sha: Option<String>,
}

impl Context {
    /// Build a context from standard GitHub Actions environment variables
    /// (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `GITHUB_REF`, `GITHUB_SHA`,
    /// `GITHUB_API_URL`).
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var("GITHUB_TOKEN").map_err(|_| DeltaCovError::MissingEnv("GITHUB_TOKEN"))?;
        let repo = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| DeltaCovError::MissingEnv("GITHUB_REPOSITORY"))?;
        let api_url = std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let pr_number = std::env::var("GITHUB_REF")
            .ok()
            .and_then(|r| pr_number_from_ref(&r));
        let sha = std::env::var("GITHUB_SHA").ok();
        Ok(Self {
            token,
            repo,
            api_url: api_url.trim_end_matches('/').to_string(),
            pr_number,
            sha,
        })
    }

    fn get(&self, url: &str) -> ureq::Request {
        self.authorize(ureq::get(url))
    }

    fn post(&self, url: &str) -> ureq::Request {
        self.authorize(ureq::post(url))
    }

    fn patch(&self, url: &str) -> ureq::Request {
        self.authorize(ureq::patch(url))
    }

    fn authorize(&self, req: ureq::Request) -> ureq::Request {
        req.set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    /// Create or update the report comment on the pull request. The
    /// comment is located by `marker`, which must be part of `body`.
    pub fn post_comment(&self, body: &str, marker: &str) -> Result<()> {
        if marker.trim().is_empty() {
            return Err(DeltaCovError::Other(
                "comment marker must not be empty".to_string(),
            ));
        }
        let pr_number = self.pr_number.ok_or_else(|| {
            DeltaCovError::Other("not a pull request: GITHUB_REF has no PR number".to_string())
        })?;
        let payload = serde_json::json!({ "body": body });

        match self.find_existing_comment(pr_number, marker)? {
            Some(comment_id) => {
                let url = format!(
                    "{}/repos/{}/issues/comments/{}",
                    self.api_url, self.repo, comment_id
                );
                self.patch(&url).send_json(payload)?;
                log::info!("Updated comment {} on {}/pull/{}", comment_id, self.repo, pr_number);
            }
            None => {
                let url = format!(
                    "{}/repos/{}/issues/{}/comments",
                    self.api_url, self.repo, pr_number
                );
                self.post(&url).send_json(payload)?;
                log::info!("Comment posted to {}/pull/{}", self.repo, pr_number);
            }
        }
        Ok(())
    }

    fn find_existing_comment(&self, pr_number: u64, marker: &str) -> Result<Option<u64>> {
        let mut page = 1u32;
        loop {
            let url = format!(
                "{}/repos/{}/issues/{}/comments?per_page=100&page={}",
                self.api_url, self.repo, pr_number, page
            );
            let comments: Vec<Comment> = self.get(&url).call()?.into_json()?;
            if comments.is_empty() {
                break;
            }
            if let Some(c) = comments
                .iter()
                .find(|c| c.body.as_deref().is_some_and(|b| b.contains(marker)))
            {
                return Ok(Some(c.id));
            }
            page += 1;
        }
        Ok(None)
    }
}

impl CheckRunSink for Context {
    fn create_check_run(&self, request: &CheckRunRequest) -> Result<String> {
        let url = format!("{}/repos/{}/check-runs", self.api_url, self.repo);
        let created: CreatedCheckRun = self.post(&url).send_json(request)?.into_json()?;
        Ok(created.html_url)
    }
}

#[derive(Deserialize)]
struct Comment {
    id: u64,
    body: Option<String>,
}

#[derive(Deserialize)]
struct CreatedCheckRun {
    html_url: String,
}

/// Extract PR number from a ref (e.g. "refs/pull/42/merge" → 42).
pub fn pr_number_from_ref(github_ref: &str) -> Option<u64> {
    let parts: Vec<&str> = github_ref.split('/').collect();
    if parts.len() >= 3 && parts[0] == "refs" && parts[1] == "pull" {
        parts[2].parse().ok()
    } else {
        None
    }
}

fn env_file(var: &'static str) -> Result<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .ok_or(DeltaCovError::MissingEnv(var))
}

fn append_to(path: &Path, text: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// Append markdown to the job summary (`GITHUB_STEP_SUMMARY`).
pub fn append_step_summary(markdown: &str) -> Result<()> {
    let path = env_file("GITHUB_STEP_SUMMARY")?;
    append_to(&path, &format!("{markdown}\n"))?;
    log::debug!("appended {} bytes to {}", markdown.len(), path.display());
    Ok(())
}

/// Record a step output (`GITHUB_OUTPUT`).
pub fn set_output(key: &str, value: &str) -> Result<()> {
    let path = env_file("GITHUB_OUTPUT")?;
    append_to(&path, &format!("{key}={value}\n"))
}
