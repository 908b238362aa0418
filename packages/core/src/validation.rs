// ABOUTME: Field validation for create/update inputs
// ABOUTME: Collects all violations instead of failing on the first one

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{IssueCreateInput, ProjectCreateInput, ProjectUpdateInput};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MIN_KEY_LENGTH: usize = 2;
pub const MAX_KEY_LENGTH: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot exceed {MAX_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title cannot exceed {MAX_TITLE_LENGTH} characters")]
    TitleTooLong,
    #[error("Project key must be {MIN_KEY_LENGTH}-{MAX_KEY_LENGTH} uppercase letters or digits, starting with a letter")]
    InvalidKey,
    #[error("Sprint end date must not be before its start date")]
    EndBeforeStart,
}

fn validate_name(name: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    } else if name.len() > MAX_NAME_LENGTH {
        errors.push(ValidationError::NameTooLong);
    }
}

fn is_valid_key(key: &str) -> bool {
    let len = key.chars().count();
    if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&len) {
        return false;
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Validates a new project's fields.
pub fn validate_project_data(input: &ProjectCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_name(&input.name, &mut errors);
    if !is_valid_key(&input.key) {
        errors.push(ValidationError::InvalidKey);
    }
    errors
}

/// Validates a project update; absent fields are not validated.
pub fn validate_project_update(input: &ProjectUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(name) = &input.name {
        validate_name(name, &mut errors);
    }
    errors
}

/// Validates a sprint's date window.
pub fn validate_sprint_dates(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Vec<ValidationError> {
    if end_date < start_date {
        vec![ValidationError::EndBeforeStart]
    } else {
        Vec::new()
    }
}

/// Validates a new issue's fields.
pub fn validate_issue_create(input: &IssueCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if input.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    } else if input.title.len() > MAX_TITLE_LENGTH {
        errors.push(ValidationError::TitleTooLong);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueStatus;
    use chrono::Duration;

    fn project_input(name: &str, key: &str) -> ProjectCreateInput {
        ProjectCreateInput {
            name: name.to_string(),
            key: key.to_string(),
            description: None,
        }
    }

    #[test]
    fn accepts_well_formed_project() {
        assert!(validate_project_data(&project_input("Apollo", "APL")).is_empty());
        assert!(validate_project_data(&project_input("x", "A2C4")).is_empty());
    }

    #[test]
    fn rejects_bad_keys() {
        for key in ["", "A", "abc", "1AB", "TOOLONGKEY1", "AB-C"] {
            let errors = validate_project_data(&project_input("ok", key));
            assert!(
                errors.contains(&ValidationError::InvalidKey),
                "key {key:?} should be invalid"
            );
        }
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        assert!(validate_project_data(&project_input("  ", "AB"))
            .contains(&ValidationError::EmptyName));
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_project_data(&project_input(&long, "AB"))
            .contains(&ValidationError::NameTooLong));
    }

    #[test]
    fn sprint_dates_must_be_ordered() {
        let now = Utc::now();
        assert!(validate_sprint_dates(now, now).is_empty());
        assert!(validate_sprint_dates(now, now + Duration::days(14)).is_empty());
        assert_eq!(
            validate_sprint_dates(now, now - Duration::seconds(1)),
            vec![ValidationError::EndBeforeStart]
        );
    }

    #[test]
    fn issue_title_is_required() {
        let input = IssueCreateInput {
            title: "   ".to_string(),
            description: None,
            status: IssueStatus::Todo,
            priority: None,
            sprint_id: None,
            assignee_id: None,
        };
        assert_eq!(
            validate_issue_create(&input),
            vec![ValidationError::EmptyTitle]
        );
    }
}
