//! Service orchestration tests for the task registry.

use std::sync::Arc;

use crate::assignment::{
    adapters::memory::InMemoryTaskRepository,
    domain::{AssignmentDomainError, LessonType, TaskId, TaskPatch, TaskTitle},
    services::{AssignmentService, AssignmentServiceError, CreateTaskRequest},
};
use crate::attachment::Attachment;
use crate::identity::domain::{User, UserDraft, UserId, UserRole, Username};
use crate::submission::adapters::memory::InMemoryAnswerRepository;
use crate::submission::domain::AnswerDraft;
use crate::submission::ports::AnswerRepository;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = AssignmentService<InMemoryTaskRepository, InMemoryAnswerRepository>;

struct Harness {
    service: TestService,
    answers: Arc<InMemoryAnswerRepository>,
}

#[fixture]
fn harness() -> Harness {
    let answers = Arc::new(InMemoryAnswerRepository::new());
    let service = AssignmentService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&answers),
    );
    Harness { service, answers }
}

fn user(id: i64, name: &str, role: UserRole) -> User {
    let draft = UserDraft::local(
        Username::new(name).expect("valid username"),
        None,
        "hash".to_owned(),
        &DefaultClock,
    )
    .with_role(role);
    User::from_draft(UserId::new(id), draft)
}

fn request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(
        title,
        "Implement merge sort",
        "Algorithms",
        LessonType::Practice,
        "Software Engineering",
        2,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn teacher_creates_a_retrievable_task(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);

    let created = harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("task creation should succeed");
    let fetched = harness
        .service
        .get_task(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, Some(created.clone()));
    assert_eq!(created.checker(), teacher.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_cannot_create_tasks(harness: Harness) {
    let student = user(1, "olena", UserRole::Student);

    let result = harness
        .service
        .create_task(&student, request("Sorting algorithms"))
        .await;

    assert!(matches!(result, Err(AssignmentServiceError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_title_is_rejected(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("first creation should succeed");

    let result = harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentServiceError::DuplicateTitle(title)) if title == "Sorting algorithms"
    ));
}

#[rstest]
#[case(0)]
#[case(-1)]
#[tokio::test(flavor = "multi_thread")]
async fn non_positive_course_is_rejected(harness: Harness, #[case] course: i32) {
    let teacher = user(1, "marko", UserRole::Teacher);
    let create_request = CreateTaskRequest::new(
        "Sorting algorithms",
        "Implement merge sort",
        "Algorithms",
        LessonType::Practice,
        "Software Engineering",
        course,
    );

    let result = harness.service.create_task(&teacher, create_request).await;

    assert!(matches!(
        result,
        Err(AssignmentServiceError::Domain(
            AssignmentDomainError::InvalidCourse(value)
        )) if value == course
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_checker_or_an_admin_may_update(harness: Harness) {
    let owner = user(1, "marko", UserRole::Teacher);
    let other_teacher = user(2, "iryna", UserRole::Teacher);
    let admin = user(3, "root", UserRole::Admin);
    let task = harness
        .service
        .create_task(&owner, request("Sorting algorithms"))
        .await
        .expect("task creation should succeed");

    let denied = harness
        .service
        .update_task(
            &other_teacher,
            task.id(),
            TaskPatch::new().with_description("hijacked"),
        )
        .await;
    assert!(matches!(denied, Err(AssignmentServiceError::Forbidden)));

    let updated = harness
        .service
        .update_task(
            &admin,
            task.id(),
            TaskPatch::new().with_description("clarified"),
        )
        .await
        .expect("admin update should succeed");
    assert_eq!(updated.description(), "clarified");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_appends_attachments_and_keeps_existing(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    let task = harness
        .service
        .create_task(
            &teacher,
            request("Sorting algorithms")
                .with_files(vec![Attachment::new("spec.pdf", "files/spec.pdf")]),
        )
        .await
        .expect("task creation should succeed");

    let updated = harness
        .service
        .update_task(
            &teacher,
            task.id(),
            TaskPatch::new().with_files(vec![Attachment::new("hints.pdf", "files/hints.pdf")]),
        )
        .await
        .expect("update should succeed");

    let names: Vec<&str> = updated
        .files()
        .iter()
        .map(|file| file.name.as_str())
        .collect();
    assert_eq!(names, vec!["spec.pdf", "hints.pdf"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_collision_is_rejected(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("first creation should succeed");
    let second = harness
        .service
        .create_task(&teacher, request("Graph traversal"))
        .await
        .expect("second creation should succeed");

    let result = harness
        .service
        .update_task(
            &teacher,
            second.id(),
            TaskPatch::new().with_title(TaskTitle::new("Sorting algorithms").expect("valid title")),
        )
        .await;

    assert!(matches!(
        result,
        Err(AssignmentServiceError::DuplicateTitle(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_requires_a_staff_checker(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    let student = user(2, "olena", UserRole::Student);
    let colleague = user(3, "iryna", UserRole::Teacher);
    let task = harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("task creation should succeed");

    let denied = harness
        .service
        .reassign_checker(&teacher, task.id(), &student)
        .await;
    assert!(matches!(denied, Err(AssignmentServiceError::Forbidden)));

    let reassigned = harness
        .service
        .reassign_checker(&teacher, task.id(), &colleague)
        .await
        .expect("reassignment should succeed");
    assert_eq!(reassigned.checker(), colleague.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_cascades_its_answers(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    let student = user(2, "olena", UserRole::Student);
    let task = harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("task creation should succeed");
    let draft = AnswerDraft::new(task.id(), student.id(), "My answer", &DefaultClock)
        .expect("valid answer draft");
    harness
        .answers
        .create(draft)
        .await
        .expect("answer creation should succeed");

    harness
        .service
        .delete_task(&teacher, task.id())
        .await
        .expect("deletion should succeed");

    let gone = harness
        .service
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none());
    let answers = harness
        .answers
        .list_by_task(task.id())
        .await
        .expect("listing should succeed");
    assert!(answers.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_orders_by_identifier(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);
    let first = harness
        .service
        .create_task(&teacher, request("Sorting algorithms"))
        .await
        .expect("first creation should succeed");
    let second = harness
        .service
        .create_task(&teacher, request("Graph traversal"))
        .await
        .expect("second creation should succeed");

    let listed = harness
        .service
        .list_tasks()
        .await
        .expect("listing should succeed");
    let ids: Vec<TaskId> = listed.iter().map(crate::assignment::domain::Task::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_yields_unknown_task(harness: Harness) {
    let teacher = user(1, "marko", UserRole::Teacher);

    let result = harness
        .service
        .update_task(&teacher, TaskId::new(404), TaskPatch::new())
        .await;

    assert!(matches!(
        result,
        Err(AssignmentServiceError::UnknownTask(id)) if id == TaskId::new(404)
    ));
}
