//! Unit tests for the user aggregate and its validated scalars.

use crate::identity::domain::{
    EmailAddress, OAuthIdentity, OAuthProfile, OAuthProvider, OAuthTokens, User, UserDraft,
    UserId, UserRole, Username,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn username(value: &str) -> Username {
    Username::new(value).expect("valid username")
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).expect("valid email")
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("two words")]
fn invalid_usernames_are_rejected(#[case] raw: &str) {
    assert!(Username::new(raw).is_err());
}

#[rstest]
fn overlong_username_is_rejected() {
    let raw = "a".repeat(101);
    assert!(Username::new(raw).is_err());
}

#[rstest]
fn username_is_trimmed() {
    assert_eq!(username("  olena  ").as_str(), "olena");
}

#[rstest]
#[case("no-at-sign")]
#[case("@missing-local")]
#[case("missing-domain@")]
#[case("two@at@signs")]
fn invalid_emails_are_rejected(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn local_draft_always_carries_a_hash(clock: DefaultClock) {
    let draft = UserDraft::local(
        username("olena"),
        Some(email("olena@example.edu")),
        "hash".to_owned(),
        &clock,
    );

    assert_eq!(draft.password_hash.as_deref(), Some("hash"));
    assert_eq!(draft.role, UserRole::Student);
    assert_eq!(draft.provider, OAuthProvider::Local);
    assert!(draft.is_active);
    assert!(!draft.is_verified);
    assert!(draft.last_login_at.is_none());
}

#[rstest]
fn oauth_draft_is_verified_and_logged_in(clock: DefaultClock) {
    let identity = OAuthIdentity::new(OAuthProvider::Google, "ext-1").expect("valid identity");
    let profile = OAuthProfile::new(username("dmytro")).with_email(email("d@example.edu"), true);

    let draft = UserDraft::oauth(&identity, profile, OAuthTokens::default(), &clock);

    assert!(draft.password_hash.is_none());
    assert_eq!(draft.provider, OAuthProvider::Google);
    assert_eq!(draft.oauth_id.as_deref(), Some("ext-1"));
    assert!(draft.is_verified);
    assert!(draft.is_email_verified);
    assert!(draft.last_login_at.is_some());
}

#[rstest]
fn record_login_touches_updated_at(clock: DefaultClock) {
    let draft = UserDraft::local(username("olena"), None, "hash".to_owned(), &clock);
    let mut user = User::from_draft(UserId::new(1), draft);
    let before = user.updated_at();

    user.record_login(&clock);

    assert!(user.last_login_at().is_some());
    assert!(user.updated_at() >= before);
}

#[rstest]
fn deactivate_flips_the_active_flag(clock: DefaultClock) {
    let draft = UserDraft::local(username("olena"), None, "hash".to_owned(), &clock);
    let mut user = User::from_draft(UserId::new(1), draft);

    user.deactivate(&clock);

    assert!(!user.is_active());
}

#[rstest]
fn refresh_oauth_never_overwrites_a_registered_email(clock: DefaultClock) {
    let identity = OAuthIdentity::new(OAuthProvider::Github, "ext-2").expect("valid identity");
    let first_profile =
        OAuthProfile::new(username("dmytro")).with_email(email("first@example.edu"), true);
    let draft = UserDraft::oauth(&identity, first_profile, OAuthTokens::default(), &clock);
    let mut user = User::from_draft(UserId::new(2), draft);

    let second_profile =
        OAuthProfile::new(username("dmytro")).with_email(email("second@example.edu"), true);
    let tokens = OAuthTokens {
        access_token: Some("fresh".to_owned()),
        ..OAuthTokens::default()
    };
    user.refresh_oauth(&second_profile, tokens, &clock);

    assert_eq!(user.email().map(EmailAddress::as_str), Some("first@example.edu"));
    assert_eq!(user.tokens().access_token.as_deref(), Some("fresh"));
}

#[rstest]
fn refresh_oauth_fills_a_missing_email(clock: DefaultClock) {
    let identity = OAuthIdentity::new(OAuthProvider::Github, "ext-3").expect("valid identity");
    let draft = UserDraft::oauth(
        &identity,
        OAuthProfile::new(username("dmytro")),
        OAuthTokens::default(),
        &clock,
    );
    let mut user = User::from_draft(UserId::new(3), draft);
    assert!(user.email().is_none());

    let profile =
        OAuthProfile::new(username("dmytro")).with_email(email("late@example.edu"), false);
    user.refresh_oauth(&profile, OAuthTokens::default(), &clock);

    assert_eq!(user.email().map(EmailAddress::as_str), Some("late@example.edu"));
    assert!(!user.is_email_verified());
}

#[rstest]
fn admin_draft_builder_overrides_role(clock: DefaultClock) {
    let draft = UserDraft::local(username("root"), None, "hash".to_owned(), &clock)
        .with_role(UserRole::Admin)
        .verified();

    assert_eq!(draft.role, UserRole::Admin);
    assert!(draft.is_verified);
}
