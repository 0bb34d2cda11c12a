//! Unit tests for answer lifecycle mutations.

use crate::assignment::domain::TaskId;
use crate::attachment::Attachment;
use crate::identity::domain::UserId;
use crate::submission::domain::{
    Answer, AnswerDraft, AnswerId, AnswerStatus, Grade, SubmissionDomainError,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn submitted_answer(clock: DefaultClock) -> Result<Answer, SubmissionDomainError> {
    let draft = AnswerDraft::new(TaskId::new(1), UserId::new(2), "First attempt", &clock)?;
    Ok(Answer::from_draft(AnswerId::new(10), draft))
}

#[rstest]
fn fresh_answers_start_submitted(
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let answer = submitted_answer?;
    ensure!(answer.status() == AnswerStatus::Submitted);
    ensure!(answer.grade().is_none());
    ensure!(answer.teacher_comment().is_none());
    ensure!(answer.graded_at().is_none());
    Ok(())
}

#[rstest]
fn blank_draft_message_is_rejected(clock: DefaultClock) {
    let result = AnswerDraft::new(TaskId::new(1), UserId::new(2), "   ", &clock);
    assert_eq!(result.err(), Some(SubmissionDomainError::EmptyMessage));
}

#[rstest]
fn update_content_appends_attachments(
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let mut answer = submitted_answer?;

    answer.update_content(
        Some("Second attempt".to_owned()),
        vec![Attachment::new("v1.rs", "uploads/v1.rs")],
        Vec::new(),
    )?;
    answer.update_content(None, vec![Attachment::new("v2.rs", "uploads/v2.rs")], Vec::new())?;

    ensure!(answer.message() == "Second attempt");
    ensure!(answer.files().len() == 2);
    Ok(())
}

#[rstest]
fn update_content_rejects_a_blank_replacement_message(
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let mut answer = submitted_answer?;
    let original_message = answer.message().to_owned();

    let result = answer.update_content(Some(String::new()), Vec::new(), Vec::new());

    if result != Err(SubmissionDomainError::EmptyMessage) {
        bail!("expected EmptyMessage, got {result:?}");
    }
    ensure!(answer.message() == original_message);
    Ok(())
}

#[rstest]
fn record_grade_moves_to_graded_with_timestamp(
    clock: DefaultClock,
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let mut answer = submitted_answer?;
    let grade = Grade::new(75)?;

    answer.record_grade(grade, Some("Decent".to_owned()), &clock)?;

    ensure!(answer.status() == AnswerStatus::Graded);
    ensure!(answer.grade() == Some(grade));
    ensure!(answer.teacher_comment() == Some("Decent"));
    ensure!(answer.graded_at().is_some());
    Ok(())
}

#[rstest]
fn graded_answers_refuse_edits(
    clock: DefaultClock,
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let mut answer = submitted_answer?;
    answer.record_grade(Grade::new(75)?, None, &clock)?;

    let result = answer.update_content(Some("Sneaky edit".to_owned()), Vec::new(), Vec::new());
    let expected = Err(SubmissionDomainError::NotEditable {
        answer_id: answer.id(),
        status: AnswerStatus::Graded,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(answer.message() == "First attempt");
    Ok(())
}

#[rstest]
fn mark_returned_requires_a_grade_first(
    clock: DefaultClock,
    submitted_answer: Result<Answer, SubmissionDomainError>,
) -> eyre::Result<()> {
    let mut answer = submitted_answer?;

    let premature = answer.mark_returned("See notes".to_owned());
    let expected = Err(SubmissionDomainError::InvalidStateTransition {
        answer_id: answer.id(),
        from: AnswerStatus::Submitted,
        to: AnswerStatus::Returned,
    });
    if premature != expected {
        bail!("expected {expected:?}, got {premature:?}");
    }

    answer.record_grade(Grade::new(90)?, Some("Initial".to_owned()), &clock)?;
    answer.mark_returned("Final word".to_owned())?;

    ensure!(answer.status() == AnswerStatus::Returned);
    ensure!(answer.teacher_comment() == Some("Final word"));
    ensure!(answer.status().is_terminal());
    Ok(())
}
