//! Rule-driven validation of submitted form fields.
//!
//! Each route applies a rule set (`required`, `min_length`, `max_length`) to
//! its named fields before anything reaches the domain services. Violations
//! are collected per field and rendered as a single `invalid_request` error
//! so clients can redisplay the whole form at once.

use serde_json::json;

use crate::domain::{
    Credentials, EntryDraft, Error, TAGS_MAX_LEN, TITLE_MAX_LEN, USERNAME_MAX_LEN,
    USERNAME_MIN_LEN,
};

/// Declarative validation rules for one form field.
#[derive(Debug, Clone, Copy)]
struct FieldRules {
    field: &'static str,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

/// One rule violation attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Violation {
    field: &'static str,
    code: &'static str,
    message: String,
}

const USERNAME_RULES: FieldRules = FieldRules {
    field: "username",
    required: true,
    min_length: Some(USERNAME_MIN_LEN),
    max_length: Some(USERNAME_MAX_LEN),
};

const PASSWORD_RULES: FieldRules = FieldRules {
    field: "password",
    required: true,
    min_length: None,
    max_length: None,
};

const TITLE_RULES: FieldRules = FieldRules {
    field: "title",
    required: true,
    min_length: None,
    max_length: Some(TITLE_MAX_LEN),
};

const CONTENT_RULES: FieldRules = FieldRules {
    field: "content",
    required: true,
    min_length: None,
    max_length: None,
};

const TAGS_RULES: FieldRules = FieldRules {
    field: "tags",
    required: false,
    min_length: None,
    max_length: Some(TAGS_MAX_LEN),
};

impl FieldRules {
    fn check(&self, value: &str, violations: &mut Vec<Violation>) {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            violations.push(Violation {
                field: self.field,
                code: "missing_field",
                message: format!("missing required field: {}", self.field),
            });
            return;
        }

        if let Some(min) = self.min_length {
            if !trimmed.is_empty() && trimmed.chars().count() < min {
                violations.push(Violation {
                    field: self.field,
                    code: "too_short",
                    message: format!("{} must be at least {min} characters", self.field),
                });
                return;
            }
        }

        if let Some(max) = self.max_length {
            if trimmed.chars().count() > max {
                violations.push(Violation {
                    field: self.field,
                    code: "too_long",
                    message: format!("{} must be at most {max} characters", self.field),
                });
            }
        }
    }
}

fn validation_error(violations: Vec<Violation>) -> Error {
    let details: Vec<_> = violations
        .into_iter()
        .map(|violation| {
            json!({
                "field": violation.field,
                "code": violation.code,
                "message": violation.message,
            })
        })
        .collect();
    Error::invalid_request("validation failed").with_details(json!({ "violations": details }))
}

/// Validate the login/registration form and build domain credentials.
pub fn validate_credentials_form(username: &str, password: &str) -> Result<Credentials, Error> {
    let mut violations = Vec::new();
    USERNAME_RULES.check(username, &mut violations);
    // Passwords keep caller whitespace; only absence is a violation.
    if password.is_empty() {
        violations.push(Violation {
            field: PASSWORD_RULES.field,
            code: "missing_field",
            message: format!("missing required field: {}", PASSWORD_RULES.field),
        });
    }
    if !violations.is_empty() {
        return Err(validation_error(violations));
    }

    Credentials::try_from_parts(username, password)
        .map_err(|err| Error::internal(format!("validated credentials failed parsing: {err}")))
}

/// Validate the entry form and build a domain draft.
pub fn validate_entry_form(
    title: &str,
    content: &str,
    tags: Option<&str>,
) -> Result<EntryDraft, Error> {
    let mut violations = Vec::new();
    TITLE_RULES.check(title, &mut violations);
    CONTENT_RULES.check(content, &mut violations);
    TAGS_RULES.check(tags.unwrap_or_default(), &mut violations);
    if !violations.is_empty() {
        return Err(validation_error(violations));
    }

    EntryDraft::try_from_parts(title, content, tags)
        .map_err(|err| Error::internal(format!("validated entry form failed parsing: {err}")))
}
