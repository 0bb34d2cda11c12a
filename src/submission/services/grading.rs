//! Service layer for grading and returning answers.

use super::workflow::{SubmissionServiceError, SubmissionServiceResult, authorize_checker};
use crate::assignment::ports::TaskRepository;
use crate::identity::domain::User;
use crate::submission::{
    domain::{Answer, AnswerId, Grade},
    ports::AnswerRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Grading orchestration service.
///
/// Moves answers along the forward-only lifecycle on behalf of the task's
/// checker or an administrator. The grade is validated before any state
/// changes, so a rejected grade leaves the answer untouched.
#[derive(Clone)]
pub struct GradingService<A, T, C>
where
    A: AnswerRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    answers: Arc<A>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<A, T, C> GradingService<A, T, C>
where
    A: AnswerRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new grading service.
    #[must_use]
    pub const fn new(answers: Arc<A>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            answers,
            tasks,
            clock,
        }
    }

    /// Grades a submitted answer.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] unless the actor is the
    /// task's checker or an administrator,
    /// [`SubmissionDomainError::InvalidGrade`] for grades outside 0 to 100,
    /// and [`SubmissionDomainError::InvalidStateTransition`] when the answer
    /// has already been graded.
    ///
    /// [`SubmissionDomainError::InvalidGrade`]: crate::submission::domain::SubmissionDomainError::InvalidGrade
    /// [`SubmissionDomainError::InvalidStateTransition`]: crate::submission::domain::SubmissionDomainError::InvalidStateTransition
    pub async fn grade_answer(
        &self,
        actor: &User,
        answer_id: AnswerId,
        grade: i32,
        comment: Option<String>,
    ) -> SubmissionServiceResult<Answer> {
        let mut answer = self.authorized_answer(actor, answer_id).await?;

        let grade = Grade::new(grade)?;
        answer.record_grade(grade, comment, self.clock.as_ref())?;
        self.answers.update(&answer).await?;
        Ok(answer)
    }

    /// Hands a graded answer back to the student with a closing comment.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] unless the actor is the
    /// task's checker or an administrator, and
    /// [`SubmissionDomainError::InvalidStateTransition`] unless the answer
    /// is currently graded.
    ///
    /// [`SubmissionDomainError::InvalidStateTransition`]: crate::submission::domain::SubmissionDomainError::InvalidStateTransition
    pub async fn return_answer(
        &self,
        actor: &User,
        answer_id: AnswerId,
        comment: impl Into<String>,
    ) -> SubmissionServiceResult<Answer> {
        let mut answer = self.authorized_answer(actor, answer_id).await?;

        answer.mark_returned(comment.into())?;
        self.answers.update(&answer).await?;
        Ok(answer)
    }

    /// Fetches an answer and checks the actor against its task's checker.
    async fn authorized_answer(
        &self,
        actor: &User,
        answer_id: AnswerId,
    ) -> SubmissionServiceResult<Answer> {
        let answer = self
            .answers
            .find_by_id(answer_id)
            .await?
            .ok_or(SubmissionServiceError::UnknownAnswer(answer_id))?;
        let task = self
            .tasks
            .find_by_id(answer.task())
            .await?
            .ok_or(SubmissionServiceError::UnknownTask(answer.task()))?;
        authorize_checker(actor, &task)?;
        Ok(answer)
    }
}
