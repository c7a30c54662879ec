use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::{RosterError, is_unique_violation, student};

/// One attendance status per student per calendar day.
///
/// The (student_id, date) pair is covered by a unique index; writes go
/// through [`Model::upsert`] which overwrites the existing row instead of
/// duplicating it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: Status,
    pub notes: Option<String>,
    /// Email of the admin who recorded the status.
    pub marked_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "late")]
    Late,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Insert-or-overwrite keyed on (student, date).
    ///
    /// The common path is find-then-write; when a concurrent insert wins the
    /// race the unique index rejects ours and the write is retried as an
    /// update, so callers never see the constraint violation.
    pub async fn upsert(
        db: &DbConn,
        student_id: i64,
        date: NaiveDate,
        status: Status,
        notes: Option<String>,
        marked_by: &str,
    ) -> Result<Model, RosterError> {
        if let Some(existing) = Self::find_for_day(db, student_id, date).await? {
            return Self::overwrite(db, existing, status, notes, marked_by).await;
        }

        let now = Utc::now();
        let record = ActiveModel {
            student_id: Set(student_id),
            date: Set(date),
            status: Set(status),
            notes: Set(notes.clone()),
            marked_by: Set(marked_by.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match record.insert(db).await {
            Ok(row) => Ok(row),
            Err(e) if is_unique_violation(&e) => {
                let existing = Self::find_for_day(db, student_id, date)
                    .await?
                    .ok_or(RosterError::Db(e))?;
                Self::overwrite(db, existing, status, notes, marked_by).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn overwrite(
        db: &DbConn,
        existing: Model,
        status: Status,
        notes: Option<String>,
        marked_by: &str,
    ) -> Result<Model, RosterError> {
        let mut record: ActiveModel = existing.into();
        record.status = Set(status);
        record.notes = Set(notes);
        record.marked_by = Set(marked_by.to_owned());
        record.updated_at = Set(Utc::now());
        Ok(record.update(db).await?)
    }

    pub async fn find_for_day(
        db: &DbConn,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// Filtered history with the student joined at read time, sorted by date
    /// descending then creation time descending.
    pub async fn find_filtered(
        db: &DbConn,
        date: Option<NaiveDate>,
        student_id: Option<i64>,
    ) -> Result<Vec<(Model, Option<student::Model>)>, DbErr> {
        let mut query = Entity::find();
        if let Some(date) = date {
            query = query.filter(Column::Date.eq(date));
        }
        if let Some(student_id) = student_id {
            query = query.filter(Column::StudentId.eq(student_id));
        }

        query
            .find_also_related(student::Entity)
            .order_by_desc(Column::Date)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::{Model as Student, StudentAttrs};
    use crate::test_utils::setup_test_db;

    async fn seed_student(db: &DbConn, name: &str) -> Student {
        Student::create(
            db,
            StudentAttrs {
                name: name.to_owned(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("present".parse::<Status>().unwrap(), Status::Present);
        assert_eq!("Late".parse::<Status>().unwrap(), Status::Late);
        assert!("holiday".parse::<Status>().is_err());
    }

    #[tokio::test]
    async fn upsert_overwrites_instead_of_duplicating() {
        let db = setup_test_db().await;
        let student = seed_student(&db, "Jane").await;
        let date = day("2024-06-01");

        let first = Model::upsert(&db, student.id, date, Status::Present, None, "admin@club.local")
            .await
            .unwrap();
        let second = Model::upsert(
            &db,
            student.id,
            date,
            Status::Absent,
            Some("sick".into()),
            "admin@club.local",
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, Status::Absent);
        assert_eq!(second.notes.as_deref(), Some("sick"));

        let all = Model::find_filtered(&db, Some(date), None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0.status, Status::Absent);
    }

    #[tokio::test]
    async fn history_survives_student_soft_delete() {
        let db = setup_test_db().await;
        let student = seed_student(&db, "Jane").await;
        let date = day("2024-06-01");

        Model::upsert(&db, student.id, date, Status::Present, None, "admin@club.local")
            .await
            .unwrap();
        Student::soft_delete(&db, student.id).await.unwrap();

        let rows = Model::find_filtered(&db, None, Some(student.id))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        let joined = rows[0].1.as_ref().unwrap();
        assert!(!joined.is_active);
    }

    #[tokio::test]
    async fn filters_are_conjunctive() {
        let db = setup_test_db().await;
        let jane = seed_student(&db, "Jane").await;
        let ben = seed_student(&db, "Ben").await;

        for (student, date, status) in [
            (&jane, "2024-06-01", Status::Present),
            (&jane, "2024-06-02", Status::Late),
            (&ben, "2024-06-01", Status::Absent),
        ] {
            Model::upsert(&db, student.id, day(date), status, None, "admin@club.local")
                .await
                .unwrap();
        }

        let rows = Model::find_filtered(&db, Some(day("2024-06-01")), Some(jane.id))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0.status, Status::Present);

        let by_date = Model::find_filtered(&db, Some(day("2024-06-01")), None)
            .await
            .unwrap();
        assert_eq!(by_date.len(), 2);
    }
}
