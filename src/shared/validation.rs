//! Input validation helpers
//!
//! Small building blocks used by the request types' `validate` methods.
//! Failures are collected instead of returned early, so a client sees every
//! problem with its submission in one response.

use chrono::NaiveDate;

use crate::shared::error::{FieldError, SharedError};

/// Date format accepted for experience and education entries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accumulates field errors for one request
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` against `field` when `value` is missing or blank
    pub fn require(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if value.map_or(true, is_blank) {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Record `msg` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, msg: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// `Ok` when nothing was recorded
    pub fn finish(&mut self) -> Result<(), SharedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::validation(std::mem::take(&mut self.errors)))
        }
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose structural email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Trimmed value, or `None` when missing or blank
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an optional `YYYY-MM-DD` date. Blank input is `Ok(None)`.
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match non_empty(value) {
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT).map(Some),
        None => Ok(None),
    }
}
