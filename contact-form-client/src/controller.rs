use common_types::Contact::{Field, SubmissionPayload, MESSAGE_SOFT_CAP};

use crate::{
    Transport::{ContactTransport, TransportError, TransportResponse},
    Validation::{validate, FieldErrors},
};

pub const SENT_FALLBACK: &'static str = "Message sent successfully! I'll get back to you soon.";
pub const FAILED_FALLBACK: &'static str = "Failed to send message. Please try again or contact me directly via email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The message shown after a submission finished. It outlives the
/// `Success`/`Error` state and is only cleared by the next submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: BannerKind,
    pub message: String,
}

/// State behind one rendered contact form.
///
/// `Idle --submit(valid)--> Submitting --2xx--> Success`
/// `Submitting --non-2xx / network / bad JSON--> Error`
/// `Success | Error --field_changed--> Idle`
///
/// Exactly one request goes out per accepted submit, there is no retry.
pub struct FormController<T> {
    transport: T,
    fields: SubmissionPayload,
    field_errors: FieldErrors,
    state: SubmissionState,
    banner: Option<StatusBanner>,
}

impl<T: ContactTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        FormController {
            transport,
            fields: SubmissionPayload::default(),
            field_errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            banner: None,
        }
    }

    pub fn fields(&self) -> &SubmissionPayload {
        &self.fields
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn status_message(&self) -> &str {
        self.banner.as_ref().map(|x| x.message.as_str()).unwrap_or_default()
    }

    // The submit control and the inputs are disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        self.state != SubmissionState::Submitting
    }

    pub fn message_counter(&self) -> String {
        format!("{} / {MESSAGE_SOFT_CAP} characters", self.fields.message.chars().count())
    }

    pub fn field_changed(&mut self, field: Field, value: impl Into<String>) {
        if self.state == SubmissionState::Submitting {
            tracing::debug!("Ignoring edit to {field} while submitting");
            return;
        }
        *self.fields.get_mut(field) = value.into();
        self.field_errors.remove(&field);
        if matches!(self.state, SubmissionState::Success | SubmissionState::Error) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Runs the full client-side validation. Returns the payload to send if
    /// the form moved to `Submitting`, `None` if it stayed where it was.
    pub fn begin_submit(&mut self) -> Option<SubmissionPayload> {
        if !self.can_submit() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return None;
        }
        self.banner = None;
        self.state = SubmissionState::Idle;

        self.field_errors = validate(&self.fields);
        if !self.field_errors.is_empty() {
            tracing::info!("Contact form has {} invalid field(s)", self.field_errors.len());
            return None;
        }

        self.state = SubmissionState::Submitting;
        Some(self.fields.clone())
    }

    pub fn complete_submit(&mut self, result: Result<TransportResponse, TransportError>) {
        if self.state != SubmissionState::Submitting {
            tracing::warn!("Received a submission result with no submission in flight");
            return;
        }

        match result {
            // A 2xx that is not JSON is still a failure
            Ok(response) if response.is_success() && response.body.is_some() => {
                let message = response.body_str("message").unwrap_or(SENT_FALLBACK).to_owned();
                self.fields = SubmissionPayload::default();
                self.field_errors.clear();
                self.finish(SubmissionState::Success, BannerKind::Success, message);
            },
            Ok(response) => {
                tracing::error!("Contact form submission rejected with status {}", response.status);
                let message = match response.is_success() {
                    true => FAILED_FALLBACK,
                    false => response.body_str("error").unwrap_or(FAILED_FALLBACK),
                }.to_owned();
                self.finish(SubmissionState::Error, BannerKind::Error, message);
            },
            Err(err) => {
                tracing::error!("Contact form submission error: {err}");
                self.finish(SubmissionState::Error, BannerKind::Error, FAILED_FALLBACK.to_owned());
            },
        }
    }

    pub async fn submit(&mut self) -> SubmissionState {
        let Some(payload) = self.begin_submit() else {
            return self.state;
        };
        let result = self.transport.post(payload).await;
        self.complete_submit(result);
        self.state
    }

    fn finish(&mut self, state: SubmissionState, kind: BannerKind, message: String) {
        self.state = state;
        self.banner = Some(StatusBanner { kind, message });
    }
}
