use regex::Regex;
use std::sync::LazyLock;

use crate::shared::errors::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-().]{6,}$").expect("phone pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+(/\S*)?$")
        .expect("url pattern is valid")
});

pub struct Validator;

impl Validator {
    pub fn validate_table_name(name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Table name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > 100 {
            return Err(AppError::ValidationError(
                "Table name too long (max 100 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_valid_email(value: &str) -> bool {
        EMAIL_RE.is_match(value.trim())
    }

    pub fn is_valid_phone(value: &str) -> bool {
        let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
        digits >= 6 && PHONE_RE.is_match(value.trim())
    }

    pub fn is_valid_url(value: &str) -> bool {
        URL_RE.is_match(value.trim())
    }
}
