use crate::domain::ContactSubmission;

/// The message handed to a delivery channel: the submission plus the derived headers and both
/// renditions of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub from_name: String,
    pub subject: String,
    pub reply_to: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactMessage {
    pub fn text_body(&self) -> String {
        format!(
            "{}\n\nName: {}\nEmail: {}\nCompany: {}\n\nMessage:\n{}\n",
            self.subject, self.name, self.email, self.company, self.message
        )
    }

    pub fn html_body(&self) -> String {
        format!(
            "<h2>{}</h2>\
            <p><strong>Name:</strong> {}<br />\
            <strong>Email:</strong> <a href=\"mailto:{}\">{}</a><br />\
            <strong>Company:</strong> {}</p>\
            <p><strong>Message:</strong></p><p>{}</p>",
            escape_html(&self.subject),
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.email),
            escape_html(&self.company),
            escape_html(&self.message).replace('\n', "<br />"),
        )
    }
}

impl From<ContactSubmission> for ContactMessage {
    fn from(submission: ContactSubmission) -> Self {
        let full_name = submission.full_name();
        Self {
            subject: format!("New Contact Form Submission from {}", full_name),
            from_name: full_name.clone(),
            reply_to: submission.email.as_ref().to_string(),
            name: full_name,
            email: submission.email.as_ref().to_string(),
            company: submission.company.as_ref().to_string(),
            message: submission.message.as_ref().to_string(),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
