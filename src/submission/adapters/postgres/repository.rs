//! `PostgreSQL` repository implementation for answer persistence.

use super::{
    models::{AnswerChangeset, AnswerRow, NewAnswerRow},
    schema::answers,
};
use crate::assignment::domain::TaskId;
use crate::attachment::Attachment;
use crate::identity::domain::UserId;
use crate::submission::{
    domain::{Answer, AnswerDraft, AnswerId, AnswerStatus, Grade, GradingState},
    ports::{AnswerRepository, AnswerRepositoryError, AnswerRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by submission adapters.
pub type SubmissionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed answer repository.
#[derive(Debug, Clone)]
pub struct PostgresAnswerRepository {
    pool: SubmissionPgPool,
}

impl PostgresAnswerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SubmissionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AnswerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AnswerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AnswerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AnswerRepositoryError::persistence)?
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    async fn create(&self, draft: AnswerDraft) -> AnswerRepositoryResult<Answer> {
        let task = draft.task;
        let student = draft.student;
        let new_row = to_new_row(&draft)?;
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(answers::table)
                .values(&new_row)
                .returning(AnswerRow::as_returning())
                .get_result::<AnswerRow>(connection)
                .map_err(|err| translate_insert_error(err, task, student))?;
            row_to_answer(row)
        })
        .await
    }

    async fn update(&self, answer: &Answer) -> AnswerRepositoryResult<()> {
        let answer_id = answer.id();
        let changeset = to_changeset(answer)?;
        self.run_blocking(move |connection| {
            let updated =
                diesel::update(answers::table.filter(answers::id.eq(answer_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(AnswerRepositoryError::persistence)?;
            if updated == 0 {
                return Err(AnswerRepositoryError::NotFound(answer_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AnswerId) -> AnswerRepositoryResult<Option<Answer>> {
        self.run_blocking(move |connection| {
            let row = answers::table
                .filter(answers::id.eq(id.into_inner()))
                .select(AnswerRow::as_select())
                .first::<AnswerRow>(connection)
                .optional()
                .map_err(AnswerRepositoryError::persistence)?;
            row.map(row_to_answer).transpose()
        })
        .await
    }

    async fn find_by_task_and_student(
        &self,
        task: TaskId,
        student: UserId,
    ) -> AnswerRepositoryResult<Option<Answer>> {
        self.run_blocking(move |connection| {
            let row = answers::table
                .filter(answers::task_id.eq(task.into_inner()))
                .filter(answers::student_id.eq(student.into_inner()))
                .select(AnswerRow::as_select())
                .first::<AnswerRow>(connection)
                .optional()
                .map_err(AnswerRepositoryError::persistence)?;
            row.map(row_to_answer).transpose()
        })
        .await
    }

    async fn list_by_task(&self, task: TaskId) -> AnswerRepositoryResult<Vec<Answer>> {
        self.run_blocking(move |connection| {
            let rows = answers::table
                .filter(answers::task_id.eq(task.into_inner()))
                .order(answers::id.asc())
                .select(AnswerRow::as_select())
                .load::<AnswerRow>(connection)
                .map_err(AnswerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_answer).collect()
        })
        .await
    }

    async fn list_by_student(&self, student: UserId) -> AnswerRepositoryResult<Vec<Answer>> {
        self.run_blocking(move |connection| {
            let rows = answers::table
                .filter(answers::student_id.eq(student.into_inner()))
                .order(answers::id.asc())
                .select(AnswerRow::as_select())
                .load::<AnswerRow>(connection)
                .map_err(AnswerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_answer).collect()
        })
        .await
    }

    async fn delete(&self, id: AnswerId) -> AnswerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(answers::table.filter(answers::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(AnswerRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(AnswerRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_task(&self, task: TaskId) -> AnswerRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(answers::table.filter(answers::task_id.eq(task.into_inner())))
                    .execute(connection)
                    .map_err(AnswerRepositoryError::persistence)?;
            u64::try_from(deleted).map_err(AnswerRepositoryError::persistence)
        })
        .await
    }

    async fn delete_by_student(&self, student: UserId) -> AnswerRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(answers::table.filter(answers::student_id.eq(student.into_inner())))
                    .execute(connection)
                    .map_err(AnswerRepositoryError::persistence)?;
            u64::try_from(deleted).map_err(AnswerRepositoryError::persistence)
        })
        .await
    }
}

/// Maps the `unique_task_student` pair violation onto its semantic error.
fn translate_insert_error(err: DieselError, task: TaskId, student: UserId) -> AnswerRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AnswerRepositoryError::DuplicateSubmission { task, student }
        }
        _ => AnswerRepositoryError::persistence(err),
    }
}

fn to_new_row(draft: &AnswerDraft) -> AnswerRepositoryResult<NewAnswerRow> {
    let files_metadata =
        serde_json::to_value(&draft.files).map_err(AnswerRepositoryError::persistence)?;
    let photos_metadata =
        serde_json::to_value(&draft.photos).map_err(AnswerRepositoryError::persistence)?;
    Ok(NewAnswerRow {
        task_id: draft.task.into_inner(),
        student_id: draft.student.into_inner(),
        message: draft.message.clone(),
        files_metadata,
        photos_metadata,
        status: AnswerStatus::Submitted.as_str().to_owned(),
        add_at: draft.add_at,
    })
}

fn to_changeset(answer: &Answer) -> AnswerRepositoryResult<AnswerChangeset> {
    let files_metadata =
        serde_json::to_value(answer.files()).map_err(AnswerRepositoryError::persistence)?;
    let photos_metadata =
        serde_json::to_value(answer.photos()).map_err(AnswerRepositoryError::persistence)?;
    Ok(AnswerChangeset {
        message: answer.message().to_owned(),
        files_metadata,
        photos_metadata,
        status: answer.status().as_str().to_owned(),
        grade: answer.grade().map(Grade::into_inner),
        teacher_comment: answer.teacher_comment().map(str::to_owned),
        graded_at: answer.graded_at(),
    })
}

fn row_to_answer(row: AnswerRow) -> AnswerRepositoryResult<Answer> {
    let status = AnswerStatus::try_from(row.status.as_str())
        .map_err(AnswerRepositoryError::persistence)?;
    let grade = row
        .grade
        .map(Grade::new)
        .transpose()
        .map_err(AnswerRepositoryError::persistence)?;
    let files: Vec<Attachment> =
        serde_json::from_value(row.files_metadata).map_err(AnswerRepositoryError::persistence)?;
    let photos: Vec<Attachment> =
        serde_json::from_value(row.photos_metadata).map_err(AnswerRepositoryError::persistence)?;

    let draft = AnswerDraft {
        task: TaskId::new(row.task_id),
        student: UserId::new(row.student_id),
        message: row.message,
        files,
        photos,
        add_at: row.add_at,
    };
    let grading = GradingState {
        status,
        grade,
        teacher_comment: row.teacher_comment,
        graded_at: row.graded_at,
    };
    Ok(Answer::restore(AnswerId::new(row.id), draft, grading))
}
