//! Service orchestration tests for account management.

use std::sync::Arc;

use crate::assignment::adapters::memory::InMemoryTaskRepository;
use crate::assignment::domain::{LessonType, TaskDraft, TaskTitle};
use crate::assignment::ports::TaskRepository;
use crate::identity::{
    adapters::{Argon2PasswordHasher, memory::InMemoryUserRepository},
    domain::{OAuthIdentity, OAuthProfile, OAuthProvider, OAuthTokens, UserRole, Username},
    services::{IdentityService, IdentityServiceError, RegisterLocalRequest},
};
use crate::submission::adapters::memory::InMemoryAnswerRepository;
use crate::submission::domain::AnswerDraft;
use crate::submission::ports::AnswerRepository;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = IdentityService<
    InMemoryUserRepository,
    InMemoryTaskRepository,
    InMemoryAnswerRepository,
    Argon2PasswordHasher,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    answers: Arc<InMemoryAnswerRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let answers = Arc::new(InMemoryAnswerRepository::new());
    let service = IdentityService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::clone(&tasks),
        Arc::clone(&answers),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        tasks,
        answers,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_authenticate_records_login(harness: Harness) {
    let registered = harness
        .service
        .register_local(
            RegisterLocalRequest::new("olena", "correct horse").with_email("olena@example.edu"),
        )
        .await
        .expect("registration should succeed");
    assert_eq!(registered.role(), UserRole::Student);
    assert!(registered.last_login_at().is_none());

    let authenticated = harness
        .service
        .authenticate_local("olena", "correct horse")
        .await
        .expect("authentication should succeed");

    assert_eq!(authenticated.id(), registered.id());
    assert!(authenticated.last_login_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_registration_is_rejected(harness: Harness) {
    harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "first"))
        .await
        .expect("first registration should succeed");

    let result = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "second"))
        .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::DuplicateIdentity(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected(harness: Harness) {
    harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "correct horse"))
        .await
        .expect("registration should succeed");

    let result = harness
        .service
        .authenticate_local("olena", "battery staple")
        .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::InvalidCredentials)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_account_cannot_authenticate(harness: Harness) {
    let admin = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("bootstrap should succeed");
    let user = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "correct horse"))
        .await
        .expect("registration should succeed");

    harness
        .service
        .deactivate_user(&admin, user.id())
        .await
        .expect("deactivation should succeed");
    let result = harness
        .service
        .authenticate_local("olena", "correct horse")
        .await;

    assert!(matches!(result, Err(IdentityServiceError::AccountInactive)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oauth_resolution_creates_once_and_refreshes_after(harness: Harness) {
    let identity = OAuthIdentity::new(OAuthProvider::Google, "ext-1").expect("valid identity");
    let profile = OAuthProfile::new(Username::new("dmytro").expect("valid username"));

    let created = harness
        .service
        .resolve_or_create_oauth(&identity, profile.clone(), OAuthTokens::default())
        .await
        .expect("first login should create the account");

    let refreshed_tokens = OAuthTokens {
        access_token: Some("fresh".to_owned()),
        ..OAuthTokens::default()
    };
    let resolved = harness
        .service
        .resolve_or_create_oauth(&identity, profile, refreshed_tokens)
        .await
        .expect("repeat login should resolve the account");

    assert_eq!(resolved.id(), created.id());
    assert_eq!(resolved.tokens().access_token.as_deref(), Some("fresh"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_role_requires_an_administrator(harness: Harness) {
    let student = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "password one"))
        .await
        .expect("registration should succeed");
    let peer = harness
        .service
        .register_local(RegisterLocalRequest::new("dmytro", "password two"))
        .await
        .expect("registration should succeed");

    let result = harness
        .service
        .set_role(&student, peer.id(), UserRole::Teacher)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));

    let admin = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("bootstrap should succeed");
    let promoted = harness
        .service
        .set_role(&admin, peer.id(), UserRole::Teacher)
        .await
        .expect("promotion should succeed");

    assert_eq!(promoted.role(), UserRole::Teacher);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_password_verifies_the_old_secret(harness: Harness) {
    let user = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "old secret"))
        .await
        .expect("registration should succeed");

    let rejected = harness
        .service
        .change_password(user.id(), "not the old secret", "new secret")
        .await;
    assert!(matches!(
        rejected,
        Err(IdentityServiceError::InvalidCredentials)
    ));

    harness
        .service
        .change_password(user.id(), "old secret", "new secret")
        .await
        .expect("password change should succeed");
    harness
        .service
        .authenticate_local("olena", "new secret")
        .await
        .expect("new password should authenticate");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_admin_is_idempotent(harness: Harness) {
    let first = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("first bootstrap should succeed");
    let second = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("repeat bootstrap should resolve the seeded account");

    assert_eq!(first.id(), second.id());
    assert_eq!(first.role(), UserRole::Admin);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_admin_rejects_a_username_held_by_a_non_admin(harness: Harness) {
    let squatter = harness
        .service
        .register_local(RegisterLocalRequest::new("root", "student secret"))
        .await
        .expect("registration should succeed");

    let result = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::DuplicateIdentity(name)) if name == "root"
    ));
    let unchanged = harness
        .service
        .find_user(squatter.id())
        .await
        .expect("lookup should succeed")
        .expect("squatter should survive");
    assert_eq!(unchanged.role(), UserRole::Student);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_blocks_while_checker_references_remain(harness: Harness) {
    let admin = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("bootstrap should succeed");
    let teacher = harness
        .service
        .register_local(RegisterLocalRequest::new("marko", "teacher secret"))
        .await
        .expect("registration should succeed");
    let teacher = harness
        .service
        .set_role(&admin, teacher.id(), UserRole::Teacher)
        .await
        .expect("promotion should succeed");

    let draft = TaskDraft::new(
        TaskTitle::new("Sorting algorithms").expect("valid title"),
        "Implement merge sort",
        "Algorithms",
        LessonType::Practice,
        teacher.id(),
        "Software Engineering",
        2,
    );
    harness
        .tasks
        .create(draft)
        .await
        .expect("task creation should succeed");

    let blocked = harness.service.remove_user(&admin, teacher.id()).await;
    assert!(matches!(
        blocked,
        Err(IdentityServiceError::ReferentialConflict(id)) if id == teacher.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_removal_leaves_the_targets_answers_intact(harness: Harness) {
    let admin = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("bootstrap should succeed");
    let target = harness
        .service
        .register_local(RegisterLocalRequest::new("marko", "first secret"))
        .await
        .expect("registration should succeed");

    let task = harness
        .tasks
        .create(TaskDraft::new(
            TaskTitle::new("Recursion drills").expect("valid title"),
            "Implement factorial",
            "Programming",
            LessonType::Practice,
            admin.id(),
            "Software Engineering",
            1,
        ))
        .await
        .expect("task creation should succeed");
    let clock = DefaultClock;
    harness
        .answers
        .create(
            AnswerDraft::new(task.id(), target.id(), "My factorial answer", &clock)
                .expect("valid answer draft"),
        )
        .await
        .expect("answer creation should succeed");

    // Promote the target and hand them a task so removal is blocked.
    let target = harness
        .service
        .set_role(&admin, target.id(), UserRole::Teacher)
        .await
        .expect("promotion should succeed");
    harness
        .tasks
        .create(TaskDraft::new(
            TaskTitle::new("Iteration drills").expect("valid title"),
            "Implement fibonacci",
            "Programming",
            LessonType::Practice,
            target.id(),
            "Software Engineering",
            1,
        ))
        .await
        .expect("task creation should succeed");

    let blocked = harness.service.remove_user(&admin, target.id()).await;
    assert!(matches!(
        blocked,
        Err(IdentityServiceError::ReferentialConflict(_))
    ));

    let remaining = harness
        .answers
        .list_by_student(target.id())
        .await
        .expect("listing should succeed");
    assert_eq!(remaining.len(), 1);
    let survivor = harness
        .service
        .find_user(target.id())
        .await
        .expect("lookup should succeed");
    assert!(survivor.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_cascades_the_students_answers(harness: Harness) {
    let admin = harness
        .service
        .bootstrap_admin(RegisterLocalRequest::new("root", "admin secret"))
        .await
        .expect("bootstrap should succeed");
    let student = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "student secret"))
        .await
        .expect("registration should succeed");

    let task = harness
        .tasks
        .create(TaskDraft::new(
            TaskTitle::new("Graph traversal").expect("valid title"),
            "Implement BFS",
            "Algorithms",
            LessonType::Lab,
            admin.id(),
            "Software Engineering",
            2,
        ))
        .await
        .expect("task creation should succeed");
    let clock = DefaultClock;
    let answer_draft = AnswerDraft::new(task.id(), student.id(), "My BFS answer", &clock)
        .expect("valid answer draft");
    harness
        .answers
        .create(answer_draft)
        .await
        .expect("answer creation should succeed");

    harness
        .service
        .remove_user(&admin, student.id())
        .await
        .expect("removal should succeed");

    let remaining = harness
        .answers
        .list_by_student(student.id())
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
    let gone = harness
        .service
        .find_user(student.id())
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_requires_an_administrator(harness: Harness) {
    let student = harness
        .service
        .register_local(RegisterLocalRequest::new("olena", "student secret"))
        .await
        .expect("registration should succeed");
    let peer = harness
        .service
        .register_local(RegisterLocalRequest::new("dmytro", "peer secret"))
        .await
        .expect("registration should succeed");

    let result = harness.service.remove_user(&student, peer.id()).await;

    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));
}
