//! Read-only GitHub collaborator backing the public site data.
//!
//! Failures never propagate: the site degrades to empty lists while the
//! detail goes to the operator log.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use util::config;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "club-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub id: i64,
    pub login: String,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    #[serde(default)]
    pub contributions: i64,
}

pub struct GitHubClient {
    http: reqwest::Client,
    org: String,
    token: String,
}

impl GitHubClient {
    pub fn from_config() -> Self {
        Self {
            http: reqwest::Client::new(),
            org: config::github_org(),
            token: config::github_token(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Option<T> {
        let mut req = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT);
        if !self.token.is_empty() {
            req = req.header("Authorization", format!("token {}", self.token));
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, url, "GitHub request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), url, "GitHub request rejected");
            return None;
        }

        match resp.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, url, "GitHub response did not parse");
                None
            }
        }
    }

    pub async fn org_repos(&self) -> Vec<Repository> {
        let url = format!(
            "{GITHUB_API}/orgs/{}/repos?sort=updated&per_page=100&type=all",
            self.org
        );
        self.get_json(&url).await.unwrap_or_default()
    }

    pub async fn org_members(&self) -> Vec<Contributor> {
        let url = format!("{GITHUB_API}/orgs/{}/members?per_page=100", self.org);
        self.get_json(&url).await.unwrap_or_default()
    }

    pub async fn repo_contributors(&self, repo: &str) -> Vec<Contributor> {
        let url = format!("{GITHUB_API}/repos/{}/{repo}/contributors", self.org);
        self.get_json(&url).await.unwrap_or_default()
    }

    /// Org members merged with contributors from the most recently updated
    /// repositories, contributions summed per login, ranked descending.
    pub async fn all_members(&self) -> Vec<Contributor> {
        let repos = self.org_repos().await;
        let members = self.org_members().await;

        let mut merged: HashMap<String, Contributor> = HashMap::new();
        for member in members {
            merged.insert(
                member.login.clone(),
                Contributor {
                    contributions: 0,
                    ..member
                },
            );
        }

        // Only the top few repos; contributor listings are rate-limited.
        for repo in repos.iter().take(5) {
            for contributor in self.repo_contributors(&repo.name).await {
                merged
                    .entry(contributor.login.clone())
                    .and_modify(|existing| existing.contributions += contributor.contributions)
                    .or_insert(contributor);
            }
        }

        let mut ranked: Vec<Contributor> = merged.into_values().collect();
        ranked.sort_by(|a, b| b.contributions.cmp(&a.contributions));
        ranked
    }
}
