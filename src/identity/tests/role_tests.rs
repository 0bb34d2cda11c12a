//! Unit tests for roles and provider tags.

use crate::identity::domain::{OAuthIdentity, OAuthProvider, ParseRoleError, UserRole};
use rstest::rstest;

#[rstest]
#[case(UserRole::Student, "student")]
#[case(UserRole::Teacher, "teacher")]
#[case(UserRole::Admin, "admin")]
fn role_storage_form_round_trips(#[case] role: UserRole, #[case] stored: &str) {
    assert_eq!(role.as_str(), stored);
    assert_eq!(UserRole::try_from(stored), Ok(role));
}

#[rstest]
#[case(UserRole::Student, false)]
#[case(UserRole::Teacher, true)]
#[case(UserRole::Admin, true)]
fn is_staff_returns_expected(#[case] role: UserRole, #[case] expected: bool) {
    assert_eq!(role.is_staff(), expected);
}

#[rstest]
#[case(UserRole::Student, false)]
#[case(UserRole::Teacher, false)]
#[case(UserRole::Admin, true)]
fn is_admin_returns_expected(#[case] role: UserRole, #[case] expected: bool) {
    assert_eq!(role.is_admin(), expected);
}

#[rstest]
#[case("ADMIN", UserRole::Admin)]
#[case(" teacher ", UserRole::Teacher)]
fn role_parsing_normalises_case_and_whitespace(#[case] input: &str, #[case] expected: UserRole) {
    assert_eq!(UserRole::try_from(input), Ok(expected));
}

#[rstest]
fn unknown_role_is_rejected() {
    assert_eq!(
        UserRole::try_from("superuser"),
        Err(ParseRoleError("superuser".to_owned()))
    );
}

#[rstest]
#[case(OAuthProvider::Local, "local")]
#[case(OAuthProvider::Google, "google")]
#[case(OAuthProvider::Github, "github")]
#[case(OAuthProvider::Microsoft, "microsoft")]
fn provider_storage_form_round_trips(#[case] provider: OAuthProvider, #[case] stored: &str) {
    assert_eq!(provider.as_str(), stored);
    assert_eq!(OAuthProvider::try_from(stored), Ok(provider));
}

#[rstest]
fn oauth_identity_rejects_local_provider() {
    let result = OAuthIdentity::new(OAuthProvider::Local, "ext-1");
    assert!(result.is_err());
}

#[rstest]
#[case("")]
#[case("   ")]
fn oauth_identity_rejects_blank_external_id(#[case] external_id: &str) {
    let result = OAuthIdentity::new(OAuthProvider::Google, external_id);
    assert!(result.is_err());
}

#[rstest]
fn oauth_identity_trims_external_id() {
    let identity =
        OAuthIdentity::new(OAuthProvider::Github, "  ext-42  ").expect("valid external id");
    assert_eq!(identity.external_id(), "ext-42");
    assert_eq!(identity.to_string(), "github/ext-42");
}
