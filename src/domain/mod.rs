mod company_name;
mod contact_email;
mod contact_message;
mod contact_name;
mod contact_submission;
mod message_body;
mod submission_request;
mod submission_result;

pub use company_name::CompanyName;
pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use contact_submission::ContactSubmission;
pub use message_body::MessageBody;
pub use submission_request::SubmissionRequest;
pub use submission_result::SubmissionResult;

/// A submission that was rejected before anything left the process.
///
/// The `Display` output of each variant is the exact text shown to the submitter.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill out all required fields")]
    MissingRequiredField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}
