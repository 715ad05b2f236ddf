use super::ValidationError;

/// Free-form message text. Outer whitespace is trimmed, line breaks inside are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(s: String) -> Result<MessageBody, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingRequiredField);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
