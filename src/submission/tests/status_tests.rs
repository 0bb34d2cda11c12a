//! Unit tests for answer lifecycle state transition validation.

use crate::submission::domain::{AnswerStatus, ParseAnswerStatusError};
use rstest::rstest;

#[rstest]
#[case(AnswerStatus::Submitted, AnswerStatus::Submitted, false)]
#[case(AnswerStatus::Submitted, AnswerStatus::Graded, true)]
#[case(AnswerStatus::Submitted, AnswerStatus::Returned, false)]
#[case(AnswerStatus::Graded, AnswerStatus::Submitted, false)]
#[case(AnswerStatus::Graded, AnswerStatus::Graded, false)]
#[case(AnswerStatus::Graded, AnswerStatus::Returned, true)]
#[case(AnswerStatus::Returned, AnswerStatus::Submitted, false)]
#[case(AnswerStatus::Returned, AnswerStatus::Graded, false)]
#[case(AnswerStatus::Returned, AnswerStatus::Returned, false)]
fn can_transition_to_returns_expected(
    #[case] from: AnswerStatus,
    #[case] to: AnswerStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(AnswerStatus::Submitted, false)]
#[case(AnswerStatus::Graded, false)]
#[case(AnswerStatus::Returned, true)]
fn is_terminal_returns_expected(#[case] status: AnswerStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case(AnswerStatus::Submitted, "SUBMITTED")]
#[case(AnswerStatus::Graded, "GRADED")]
#[case(AnswerStatus::Returned, "RETURNED")]
fn storage_form_round_trips(#[case] status: AnswerStatus, #[case] stored: &str) {
    assert_eq!(status.as_str(), stored);
    assert_eq!(AnswerStatus::try_from(stored), Ok(status));
}

#[rstest]
#[case("submitted", AnswerStatus::Submitted)]
#[case(" GRADED ", AnswerStatus::Graded)]
fn parsing_normalises_case_and_whitespace(#[case] input: &str, #[case] expected: AnswerStatus) {
    assert_eq!(AnswerStatus::try_from(input), Ok(expected));
}

#[rstest]
fn unknown_status_is_rejected() {
    assert_eq!(
        AnswerStatus::try_from("ARCHIVED"),
        Err(ParseAnswerStatusError("ARCHIVED".to_owned()))
    );
}
