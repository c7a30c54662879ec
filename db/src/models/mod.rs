pub mod attendance_record;
pub mod student;

use sea_orm::DbErr;

/// Error taxonomy shared by the roster and ledger models.
///
/// Conflicts detected by a courtesy pre-check and conflicts raised by the
/// database's unique indexes both surface as `Conflict`, so callers see one
/// error model regardless of which guard fired first.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("{field} already exists")]
    Conflict { field: &'static str },

    #[error("not found")]
    NotFound,

    #[error("registration is not pending")]
    NotPending,

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// SQLite reports index violations through the error message; SeaORM does not
/// expose a structured code for them on this backend.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

/// Translates a storage-level unique violation into the same conflict shape a
/// pre-check would have produced.
pub(crate) fn conflict_on_unique(err: DbErr, field: &'static str) -> RosterError {
    if is_unique_violation(&err) {
        RosterError::Conflict { field }
    } else {
        RosterError::Db(err)
    }
}
