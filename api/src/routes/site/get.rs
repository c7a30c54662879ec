use crate::response::ApiResponse;
use crate::services::github::{Contributor, GitHubClient, Repository};
use axum::Json;

/// GET /api/members
///
/// Public. Club members derived from the GitHub org: explicit members plus
/// repository contributors, ranked by contributions. Degrades to an empty
/// list when GitHub is unreachable.
pub async fn list_members() -> Json<ApiResponse<Vec<Contributor>>> {
    let members = GitHubClient::from_config().all_members().await;
    Json(ApiResponse::success(
        members,
        "Members retrieved successfully",
    ))
}

/// GET /api/projects
///
/// Public. The org's repositories, most recently updated first.
pub async fn list_projects() -> Json<ApiResponse<Vec<Repository>>> {
    let repos = GitHubClient::from_config().org_repos().await;
    Json(ApiResponse::success(
        repos,
        "Projects retrieved successfully",
    ))
}
