//! In-memory answer repository for submission tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::domain::TaskId;
use crate::identity::domain::UserId;
use crate::submission::{
    domain::{Answer, AnswerDraft, AnswerId},
    ports::{AnswerRepository, AnswerRepositoryError, AnswerRepositoryResult},
};

/// Thread-safe in-memory answer repository.
///
/// The (task, student) pair index is checked and committed under a single
/// write guard, matching the relational schema's unique-constraint behaviour
/// under concurrent submission.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnswerRepository {
    state: Arc<RwLock<InMemoryAnswerState>>,
}

#[derive(Debug)]
struct InMemoryAnswerState {
    answers: HashMap<AnswerId, Answer>,
    pair_index: HashMap<(TaskId, UserId), AnswerId>,
    next_id: i64,
}

impl Default for InMemoryAnswerState {
    fn default() -> Self {
        Self {
            answers: HashMap::new(),
            pair_index: HashMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryAnswerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn create(&self, draft: AnswerDraft) -> AnswerRepositoryResult<Answer> {
        let mut state = self.state.write().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let pair = (draft.task, draft.student);
        if state.pair_index.contains_key(&pair) {
            return Err(AnswerRepositoryError::DuplicateSubmission {
                task: draft.task,
                student: draft.student,
            });
        }

        let id = AnswerId::new(state.next_id);
        state.next_id += 1;
        let answer = Answer::from_draft(id, draft);
        state.pair_index.insert(pair, answer.id());
        state.answers.insert(answer.id(), answer.clone());
        Ok(answer)
    }

    async fn update(&self, answer: &Answer) -> AnswerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.answers.contains_key(&answer.id()) {
            return Err(AnswerRepositoryError::NotFound(answer.id()));
        }
        state.answers.insert(answer.id(), answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AnswerId) -> AnswerRepositoryResult<Option<Answer>> {
        let state = self.state.read().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.answers.get(&id).cloned())
    }

    async fn find_by_task_and_student(
        &self,
        task: TaskId,
        student: UserId,
    ) -> AnswerRepositoryResult<Option<Answer>> {
        let state = self.state.read().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let answer = state
            .pair_index
            .get(&(task, student))
            .and_then(|id| state.answers.get(id))
            .cloned();
        Ok(answer)
    }

    async fn list_by_task(&self, task: TaskId) -> AnswerRepositoryResult<Vec<Answer>> {
        let state = self.state.read().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut answers: Vec<Answer> = state
            .answers
            .values()
            .filter(|answer| answer.task() == task)
            .cloned()
            .collect();
        answers.sort_by_key(Answer::id);
        Ok(answers)
    }

    async fn list_by_student(&self, student: UserId) -> AnswerRepositoryResult<Vec<Answer>> {
        let state = self.state.read().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut answers: Vec<Answer> = state
            .answers
            .values()
            .filter(|answer| answer.student() == student)
            .cloned()
            .collect();
        answers.sort_by_key(Answer::id);
        Ok(answers)
    }

    async fn delete(&self, id: AnswerId) -> AnswerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let answer = state
            .answers
            .remove(&id)
            .ok_or(AnswerRepositoryError::NotFound(id))?;
        state.pair_index.remove(&(answer.task(), answer.student()));
        Ok(())
    }

    async fn delete_by_task(&self, task: TaskId) -> AnswerRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let doomed: Vec<AnswerId> = state
            .answers
            .values()
            .filter(|answer| answer.task() == task)
            .map(Answer::id)
            .collect();
        for id in &doomed {
            if let Some(answer) = state.answers.remove(id) {
                state.pair_index.remove(&(answer.task(), answer.student()));
            }
        }
        u64::try_from(doomed.len()).map_err(AnswerRepositoryError::persistence)
    }

    async fn delete_by_student(&self, student: UserId) -> AnswerRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            AnswerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let doomed: Vec<AnswerId> = state
            .answers
            .values()
            .filter(|answer| answer.student() == student)
            .map(Answer::id)
            .collect();
        for id in &doomed {
            if let Some(answer) = state.answers.remove(id) {
                state.pair_index.remove(&(answer.task(), answer.student()));
            }
        }
        u64::try_from(doomed.len()).map_err(AnswerRepositoryError::persistence)
    }
}
