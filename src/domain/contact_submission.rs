use crate::domain::{
    CompanyName, ContactEmail, ContactName, MessageBody, SubmissionRequest, ValidationError,
};

pub struct ContactSubmission {
    pub first_name: ContactName,
    pub last_name: ContactName,
    pub email: ContactEmail,
    pub company: CompanyName,
    pub message: MessageBody,
}

impl ContactSubmission {
    /// "{first} {last}", as used for the sender display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl TryFrom<SubmissionRequest> for ContactSubmission {
    type Error = ValidationError;

    /// Required fields are checked before the email's shape, so a form that is both incomplete
    /// and carries a bad address is reported as incomplete.
    fn try_from(form: SubmissionRequest) -> Result<Self, Self::Error> {
        let first_name = ContactName::parse(form.first_name)?;
        let last_name = ContactName::parse(form.last_name)?;
        let message = MessageBody::parse(form.message)?;
        let email = ContactEmail::parse(form.email)?;
        let company = CompanyName::parse(form.company);
        Ok(ContactSubmission {
            first_name,
            last_name,
            email,
            company,
            message,
        })
    }
}
