/// What the submitter gets back, whatever happened.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
}

impl SubmissionResult {
    pub const SENT: &'static str = "Your message has been sent successfully!";

    pub fn sent() -> Self {
        Self {
            success: true,
            message: Self::SENT.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
