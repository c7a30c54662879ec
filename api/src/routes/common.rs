use axum::http::StatusCode;
use db::models::RosterError;

/// Maps a model-layer error onto the HTTP status and caller-facing message.
///
/// Database failures are logged and collapsed into a generic message; the
/// detail stays in the operator log.
pub fn roster_error(err: RosterError) -> (StatusCode, String) {
    match err {
        RosterError::Conflict { field } => {
            (StatusCode::BAD_REQUEST, format!("{field} already exists"))
        }
        RosterError::NotFound => (StatusCode::NOT_FOUND, "Student not found".to_owned()),
        RosterError::NotPending => (
            StatusCode::BAD_REQUEST,
            "Registration is not pending".to_owned(),
        ),
        RosterError::Db(e) => {
            tracing::error!(error = %e, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            )
        }
    }
}
