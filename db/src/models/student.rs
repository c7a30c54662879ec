use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::{RosterError, conflict_on_unique};

/// Prefix and zero-padding width of generated student codes (`PGS001`).
const STUDENT_ID_PREFIX: &str = "PGS";
const STUDENT_ID_WIDTH: usize = 3;

/// Represents a club member in the `students` table.
///
/// Rows are never hard-deleted; `is_active = false` marks a row as removed
/// while keeping attendance history intact.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub github_username: Option<String>,
    /// Optional human-readable code (`PGS001`); unique among active rows.
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub registration_type: RegistrationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How a row entered the roster. Admin-created rows are verified from the
/// start; self-registrations wait for admin review.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RegistrationType {
    #[sea_orm(string_value = "admin")]
    Admin,
    // DB-backing token must avoid camel-casing to the reserved keyword `Self`
    // (sea-orm's DeriveActiveEnum generates an identifier from this string with
    // no keyword escaping). The logical/API value stays "self" via strum Display.
    #[sea_orm(string_value = "self_registered")]
    #[serde(rename = "self")]
    #[strum(serialize = "self")]
    SelfRegistered,
}

/// The registration workflow state, derived from the two persisted flags in
/// exactly one place. The flags stay in storage for bit-compatibility; this
/// enum is what transition checks consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Pending,
    Verified,
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attribute payload for admin-path create and update.
#[derive(Debug, Default, Clone)]
pub struct StudentAttrs {
    pub name: String,
    pub email: Option<String>,
    pub github_username: Option<String>,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
}

/// Trims a free-text attribute; blank collapses to absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn clean_email(value: Option<String>) -> Option<String> {
    clean(value).map(|v| v.to_lowercase())
}

impl Model {
    pub fn registration_state(&self) -> RegistrationState {
        if !self.is_active {
            RegistrationState::Rejected
        } else if self.is_verified {
            RegistrationState::Verified
        } else {
            RegistrationState::Pending
        }
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Active roster, newest first. Unverified (pending) rows are only
    /// included when the admin review screen asks for them.
    pub async fn list_active(db: &DbConn, include_unverified: bool) -> Result<Vec<Model>, DbErr> {
        let mut condition = Condition::all().add(Column::IsActive.eq(true));
        if !include_unverified {
            condition = condition.add(Column::IsVerified.eq(true));
        }

        Entity::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Courtesy pre-check that a code is free among active rows. The partial
    /// unique index remains the authoritative guard under concurrency.
    async fn check_code_available(
        db: &DbConn,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), RosterError> {
        let mut condition = Condition::all()
            .add(Column::StudentId.eq(code))
            .add(Column::IsActive.eq(true));
        if let Some(id) = exclude_id {
            condition = condition.add(Column::Id.ne(id));
        }

        match Entity::find().filter(condition).one(db).await? {
            Some(_) => Err(RosterError::Conflict {
                field: "Student ID",
            }),
            None => Ok(()),
        }
    }

    pub async fn find_active_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    pub async fn find_active_by_github(
        db: &DbConn,
        github_username: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::GithubUsername.eq(github_username))
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    /// Admin-path create: the row is verified immediately.
    pub async fn create(db: &DbConn, attrs: StudentAttrs) -> Result<Model, RosterError> {
        let student_id = clean(attrs.student_id);
        if let Some(code) = &student_id {
            Self::check_code_available(db, code, None).await?;
        }

        let now = Utc::now();
        let student = ActiveModel {
            name: Set(attrs.name.trim().to_owned()),
            email: Set(clean_email(attrs.email)),
            github_username: Set(clean(attrs.github_username)),
            student_id: Set(student_id),
            phone: Set(clean(attrs.phone)),
            course: Set(clean(attrs.course)),
            year: Set(clean(attrs.year)),
            area_of_study: Set(clean(attrs.area_of_study)),
            is_active: Set(true),
            is_verified: Set(true),
            registration_type: Set(RegistrationType::Admin),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        student
            .insert(db)
            .await
            .map_err(|e| conflict_on_unique(e, "Student ID"))
    }

    /// Self-registration: lands in the Pending state until an admin reviews
    /// it. Email and GitHub username must be free among active rows.
    pub async fn create_self_registration(
        db: &DbConn,
        name: &str,
        email: &str,
        github_username: &str,
        year: &str,
        area_of_study: &str,
    ) -> Result<Model, RosterError> {
        let email = email.trim().to_lowercase();
        let github_username = github_username.trim().to_owned();

        if Self::find_active_by_email(db, &email).await?.is_some() {
            return Err(RosterError::Conflict { field: "email" });
        }
        if Self::find_active_by_github(db, &github_username)
            .await?
            .is_some()
        {
            return Err(RosterError::Conflict {
                field: "GitHub username",
            });
        }

        let now = Utc::now();
        let student = ActiveModel {
            name: Set(name.trim().to_owned()),
            email: Set(Some(email)),
            github_username: Set(Some(github_username)),
            year: Set(Some(year.trim().to_owned())),
            area_of_study: Set(Some(area_of_study.trim().to_owned())),
            is_active: Set(true),
            is_verified: Set(false),
            registration_type: Set(RegistrationType::SelfRegistered),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        student
            .insert(db)
            .await
            .map_err(|e| conflict_on_unique(e, "email"))
    }

    /// Replaces the editable attributes of an existing row.
    pub async fn update(db: &DbConn, id: i64, attrs: StudentAttrs) -> Result<Model, RosterError> {
        let existing = Self::find_by_id(db, id).await?.ok_or(RosterError::NotFound)?;

        let student_id = clean(attrs.student_id);
        if let Some(code) = &student_id {
            if existing.student_id.as_deref() != Some(code.as_str()) {
                Self::check_code_available(db, code, Some(id)).await?;
            }
        }

        let mut student: ActiveModel = existing.into();
        student.name = Set(attrs.name.trim().to_owned());
        student.email = Set(clean_email(attrs.email));
        student.github_username = Set(clean(attrs.github_username));
        student.student_id = Set(student_id);
        student.phone = Set(clean(attrs.phone));
        student.course = Set(clean(attrs.course));
        student.year = Set(clean(attrs.year));
        student.area_of_study = Set(clean(attrs.area_of_study));
        student.updated_at = Set(Utc::now());

        student
            .update(db)
            .await
            .map_err(|e| conflict_on_unique(e, "Student ID"))
    }

    /// Soft delete. Attendance history keeps referencing the row; it simply
    /// drops out of active listings and uniqueness scopes.
    pub async fn soft_delete(db: &DbConn, id: i64) -> Result<(), RosterError> {
        let existing = Self::find_by_id(db, id).await?.ok_or(RosterError::NotFound)?;

        let mut student: ActiveModel = existing.into();
        student.is_active = Set(false);
        student.updated_at = Set(Utc::now());
        student.update(db).await?;

        Ok(())
    }

    /// Approve a pending registration, optionally assigning a code.
    ///
    /// On a code conflict nothing is written and the registration stays
    /// Pending.
    pub async fn approve(
        db: &DbConn,
        id: i64,
        student_id_to_assign: Option<String>,
    ) -> Result<Model, RosterError> {
        let existing = Self::find_by_id(db, id).await?.ok_or(RosterError::NotFound)?;
        if existing.registration_state() != RegistrationState::Pending {
            return Err(RosterError::NotPending);
        }

        let assigned = clean(student_id_to_assign);
        if let Some(code) = &assigned {
            Self::check_code_available(db, code, Some(id)).await?;
        }

        let mut student: ActiveModel = existing.into();
        if let Some(code) = assigned {
            student.student_id = Set(Some(code));
        }
        student.is_verified = Set(true);
        student.updated_at = Set(Utc::now());

        student
            .update(db)
            .await
            .map_err(|e| conflict_on_unique(e, "Student ID"))
    }

    /// Reject a pending registration (soft delete). Frees the email and
    /// GitHub username for a future attempt.
    pub async fn reject(db: &DbConn, id: i64) -> Result<(), RosterError> {
        let existing = Self::find_by_id(db, id).await?.ok_or(RosterError::NotFound)?;
        if existing.registration_state() != RegistrationState::Pending {
            return Err(RosterError::NotPending);
        }

        let mut student: ActiveModel = existing.into();
        student.is_active = Set(false);
        student.updated_at = Set(Utc::now());
        student.update(db).await?;

        Ok(())
    }

    /// Suggests the next code in sequence by incrementing the highest active
    /// `PGS`-prefixed code. Advisory only: nothing is reserved, the unique
    /// index arbitrates concurrent creates.
    pub async fn next_student_id(db: &DbConn) -> Result<String, DbErr> {
        let codes: Vec<Option<String>> = Entity::find()
            .filter(Column::IsActive.eq(true))
            .filter(Column::StudentId.is_not_null())
            .all(db)
            .await?
            .into_iter()
            .map(|s| s.student_id)
            .collect();

        let highest = codes
            .into_iter()
            .flatten()
            .filter_map(|code| parse_code_number(&code))
            .max();

        let next = highest.map_or(1, |n| n + 1);
        Ok(format!(
            "{STUDENT_ID_PREFIX}{next:0width$}",
            width = STUDENT_ID_WIDTH
        ))
    }
}

/// `PGS042` → `Some(42)`; anything not matching `PGS<digits>` is ignored.
fn parse_code_number(code: &str) -> Option<u32> {
    let digits = code.strip_prefix(STUDENT_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
