//! `PostgreSQL` repository implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::assignment::{
    domain::{LessonType, Task, TaskDraft, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::attachment::Attachment;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by assignment adapters.
pub type AssignmentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: AssignmentPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AssignmentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let title = draft.title.to_string();
        let checker = draft.checker;
        let new_row = to_new_row(&draft)?;
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| translate_write_error(err, &title, checker))?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let title = task.title().to_string();
        let checker = task.checker();
        let changeset = to_changeset(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| translate_write_error(err, &title, checker))?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_title(&self, title: &str) -> TaskRepositoryResult<Option<Task>> {
        let lookup = title.to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::title.eq(lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count_by_checker(&self, checker: UserId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::checker.eq(checker.into_inner()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Maps title-uniqueness and checker foreign-key violations onto their
/// semantic repository errors.
fn translate_write_error(err: DieselError, title: &str, checker: UserId) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTitle(title.to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskRepositoryError::UnknownChecker(checker)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn to_new_row(draft: &TaskDraft) -> TaskRepositoryResult<NewTaskRow> {
    let files_metadata =
        serde_json::to_value(&draft.files).map_err(TaskRepositoryError::persistence)?;
    let photos_metadata =
        serde_json::to_value(&draft.photos).map_err(TaskRepositoryError::persistence)?;
    Ok(NewTaskRow {
        title: draft.title.to_string(),
        description: draft.description.clone(),
        files_metadata,
        photos_metadata,
        lesson_name: draft.lesson_name.clone(),
        lesson_type: draft.lesson_type.as_str().to_owned(),
        checker: draft.checker.into_inner(),
        specialty: draft.specialty.clone(),
        course: draft.course,
        deadline: draft.deadline,
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    let files_metadata =
        serde_json::to_value(task.files()).map_err(TaskRepositoryError::persistence)?;
    let photos_metadata =
        serde_json::to_value(task.photos()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskChangeset {
        title: task.title().to_string(),
        description: task.description().to_owned(),
        files_metadata,
        photos_metadata,
        lesson_name: task.lesson_name().to_owned(),
        lesson_type: task.lesson_type().as_str().to_owned(),
        checker: task.checker().into_inner(),
        specialty: task.specialty().to_owned(),
        course: task.course(),
        deadline: task.deadline(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let lesson_type = LessonType::try_from(row.lesson_type.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let files: Vec<Attachment> =
        serde_json::from_value(row.files_metadata).map_err(TaskRepositoryError::persistence)?;
    let photos: Vec<Attachment> =
        serde_json::from_value(row.photos_metadata).map_err(TaskRepositoryError::persistence)?;

    let mut draft = TaskDraft::new(
        title,
        row.description,
        row.lesson_name,
        lesson_type,
        UserId::new(row.checker),
        row.specialty,
        row.course,
    )
    .with_files(files)
    .with_photos(photos);
    draft.deadline = row.deadline;
    Ok(Task::from_draft(TaskId::new(row.id), draft))
}
