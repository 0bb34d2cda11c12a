//! In-memory task repository for assignment tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::{
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory task repository.
///
/// Title uniqueness is checked and committed under a single write guard,
/// matching the relational schema's unique-constraint behaviour under
/// concurrent creation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    title_index: HashMap<String, TaskId>,
    next_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: HashMap::new(),
            title_index: HashMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.title_index.contains_key(draft.title.as_str()) {
            return Err(TaskRepositoryError::DuplicateTitle(draft.title.to_string()));
        }

        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        let task = Task::from_draft(id, draft);
        state
            .title_index
            .insert(task.title().to_string(), task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_task = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();
        if let Some(existing) = state.title_index.get(task.title().as_str())
            && *existing != task.id()
        {
            return Err(TaskRepositoryError::DuplicateTitle(task.title().to_string()));
        }

        state.title_index.remove(old_task.title().as_str());
        state
            .title_index
            .insert(task.title().to_string(), task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .title_index
            .get(title)
            .and_then(|id| state.tasks.get(id))
            .cloned();
        Ok(task)
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.title_index.remove(task.title().as_str());
        Ok(())
    }

    async fn count_by_checker(&self, checker: UserId) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.checker() == checker)
            .count();
        u64::try_from(count).map_err(TaskRepositoryError::persistence)
    }
}
