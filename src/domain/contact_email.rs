use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

// local@domain.tld, no whitespace and exactly one '@'
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Blank input counts as a missing field; anything else has to look like `local@domain.tld`.
    pub fn parse(s: String) -> Result<ContactEmail, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingRequiredField);
        }
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
