use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::error::ValidationError;
use super::types::{CompetitionDraft, ParticipantDraft};

/// Maximum length, in characters, of names and locations.
pub const MAX_TEXT_LEN: usize = 255;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Validates a competition before creation or update.
pub fn validate_competition(draft: &CompetitionDraft) -> Result<(), ValidationError> {
    require_text("name", &draft.name)?;
    require_text("location", &draft.location)?;
    Ok(())
}

/// Validates a participant before creation or update.
pub fn validate_participant(draft: &ParticipantDraft) -> Result<(), ValidationError> {
    require_text("name", &draft.name)?;
    if draft.email.trim().is_empty() {
        return Err(ValidationError::Required("email"));
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Returns true if the address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(field))
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_valid_competition() {
        let draft = CompetitionDraft::new("Spring Open", date(), "Hall A");
        assert!(validate_competition(&draft).is_ok());
    }

    #[test]
    fn test_competition_requires_name() {
        let draft = CompetitionDraft::new("   ", date(), "Hall A");
        assert_eq!(
            validate_competition(&draft),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn test_competition_requires_location() {
        let draft = CompetitionDraft::new("Spring Open", date(), "");
        assert_eq!(
            validate_competition(&draft),
            Err(ValidationError::Required("location"))
        );
    }

    #[test]
    fn test_competition_name_length_limit() {
        let at_limit = CompetitionDraft::new("a".repeat(MAX_TEXT_LEN), date(), "Hall A");
        assert!(validate_competition(&at_limit).is_ok());

        let over_limit = CompetitionDraft::new("a".repeat(MAX_TEXT_LEN + 1), date(), "Hall A");
        assert_eq!(
            validate_competition(&over_limit),
            Err(ValidationError::TooLong {
                field: "name",
                max: MAX_TEXT_LEN
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let draft = CompetitionDraft::new("é".repeat(MAX_TEXT_LEN), date(), "Hall A");
        assert!(validate_competition(&draft).is_ok());
    }

    #[test]
    fn test_valid_participant() {
        let draft = ParticipantDraft::new("Ada", "ada@example.com");
        assert!(validate_participant(&draft).is_ok());
    }

    #[test]
    fn test_participant_requires_email() {
        let draft = ParticipantDraft::new("Ada", "");
        assert_eq!(
            validate_participant(&draft),
            Err(ValidationError::Required("email"))
        );
    }

    #[test]
    fn test_participant_rejects_bad_email() {
        for email in ["ada", "ada@", "ada@example", "@example.com", "ada@example.c"] {
            let draft = ParticipantDraft::new("Ada", email);
            assert_eq!(
                validate_participant(&draft),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_accepts_common_forms() {
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(is_valid_email("a_b-c%d@example.io"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("date", "2025-04-01"), Ok(date()));
        assert_eq!(
            parse_date("date", "01/04/2025"),
            Err(ValidationError::InvalidDate("date"))
        );
        assert_eq!(
            parse_date("date", "2025-02-30"),
            Err(ValidationError::InvalidDate("date"))
        );
    }
}
