use std::fmt::{Debug, Formatter};

use actix_web::http::StatusCode;
use actix_web::{web, Either, HttpResponse, ResponseError};

use crate::domain::{SubmissionRequest, SubmissionResult};
use crate::error_handling::error_chain_fmt;
use crate::submission_handler::{ContactSubmissionHandler, SubmitError};

/// A failed submission together with the result the submitter gets to see.
#[derive(thiserror::Error)]
#[error("Contact form submission failed")]
pub struct ContactError {
    #[source]
    source: SubmitError,
    result: SubmissionResult,
}

impl ContactError {
    pub fn new(source: SubmitError, handler: &ContactSubmissionHandler) -> Self {
        let result = handler.failure_result(&source);
        Self { source, result }
    }
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self.source {
            SubmitError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubmitError::DeliveryError(_) | SubmitError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.result)
    }
}

/// Turns a body that could not be read as a submission (not JSON, not a form, wrong field types)
/// into the generic failure result. Used as the JSON and form extractor error handler.
pub fn unreadable_body(
    handler: &ContactSubmissionHandler,
    e: impl std::fmt::Display,
) -> actix_web::Error {
    let source = SubmitError::UnexpectedError(anyhow::anyhow!(
        "Failed to read the contact form body: {}",
        e
    ));
    // with `Either` a form body also trips the JSON extractor first, so keep this quiet
    tracing::debug!(error.cause_chain = ?source, "Unreadable contact form body");
    ContactError::new(source, handler).into()
}

/// Accepts the contact form as JSON or as a url-encoded form and always answers with a
/// `SubmissionResult` body.
#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(form, handler),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn contact(
    form: Either<web::Json<SubmissionRequest>, web::Form<SubmissionRequest>>,
    handler: web::Data<ContactSubmissionHandler>,
) -> Result<HttpResponse, ContactError> {
    let request = match form {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let span = tracing::Span::current();
    span.record("submitter_email", &tracing::field::display(&request.email));
    span.record(
        "submitter_name",
        &tracing::field::display(format!("{} {}", request.first_name, request.last_name)),
    );

    handler
        .handle(request)
        .await
        .map_err(|e| ContactError::new(e, &handler))?;
    Ok(HttpResponse::Ok().json(SubmissionResult::sent()))
}
