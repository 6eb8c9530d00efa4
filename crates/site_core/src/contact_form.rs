//! Contact form validation and the submit lifecycle.

use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use anyhow::anyhow;
use regex::Regex;
use shared::{
    domain::{FormField, SubmitStatus},
    error::SiteException,
    protocol::{
        ContactFields, ContactMessage, ContactSnapshot, FieldErrors, Notification, SiteEvent,
    },
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::transport::ContactTransport;

pub const NAME_REQUIRED: &str = "name required";
pub const EMAIL_REQUIRED: &str = "email required";
pub const EMAIL_INVALID: &str = "invalid email";
pub const SUBJECT_REQUIRED: &str = "subject required";
pub const MESSAGE_REQUIRED: &str = "message required";

const VALIDATION_FAILED_TITLE: &str = "Validation error";
const VALIDATION_FAILED_DESCRIPTION: &str = "Please correct the errors in the form.";
const SENT_TITLE: &str = "Message sent";
const SENT_DESCRIPTION: &str = "Thanks for your message. I will get back to you shortly.";
const SEND_FAILED_TITLE: &str = "Send failed";
const SEND_FAILED_DESCRIPTION: &str = "Something went wrong. Please try again.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Runs every field rule and collects the failures. Pure: identical fields
/// always yield identical errors.
pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }
    if fields.email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&fields.email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }
    if fields.subject.trim().is_empty() {
        errors.insert(FormField::Subject, SUBJECT_REQUIRED);
    }
    if fields.message.trim().is_empty() {
        errors.insert(FormField::Message, MESSAGE_REQUIRED);
    }

    errors
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors stored on the form, a finished status drops
    /// back to `Idle`.
    Invalid(FieldErrors),
    Sent { submission_id: Uuid },
    Failed { reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a submission is already in flight for this form")]
    AlreadySubmitting,
}

#[derive(Default)]
struct ContactFormState {
    fields: ContactFields,
    errors: FieldErrors,
    status: SubmitStatus,
}

impl ContactFormState {
    fn snapshot(&self) -> ContactSnapshot {
        ContactSnapshot {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            status: self.status,
        }
    }
}

pub struct ContactForm {
    transport: Arc<dyn ContactTransport>,
    submit_timeout: Option<Duration>,
    inner: Mutex<ContactFormState>,
    events: broadcast::Sender<SiteEvent>,
}

impl ContactForm {
    pub fn new(
        transport: Arc<dyn ContactTransport>,
        submit_timeout: Option<Duration>,
        events: broadcast::Sender<SiteEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            submit_timeout,
            inner: Mutex::new(ContactFormState::default()),
            events,
        })
    }

    pub async fn snapshot(&self) -> ContactSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn status(&self) -> SubmitStatus {
        self.inner.lock().await.status
    }

    /// Stores the raw value and drops that field's error without
    /// re-validating. A finished submission returns to `Idle` on the next edit.
    pub async fn set_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> ContactSnapshot {
        let value = value.into();
        let mut guard = self.inner.lock().await;
        guard.fields.set(field, value);
        let cleared = guard.errors.remove(field).is_some();
        if guard.status.is_terminal() {
            info!(previous = ?guard.status, "contact form reset to idle by edit");
            guard.status = SubmitStatus::Idle;
        }
        debug!(
            field = field.as_str(),
            cleared_error = cleared,
            "contact field updated"
        );
        let snapshot = guard.snapshot();
        let _ = self.events.send(SiteEvent::ContactChanged {
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    pub async fn set_field_id(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<ContactSnapshot, SiteException> {
        let field = name.parse::<FormField>().inspect_err(|_| {
            warn!(name, "rejected unknown contact field");
        })?;
        Ok(self.set_field(field, value).await)
    }

    /// Validates the current fields without storing the result.
    pub async fn validate(&self) -> FieldErrors {
        validate(&self.inner.lock().await.fields)
    }

    /// Validates, then hands delivery to a task owned by the form. The
    /// submission settles to `Succeeded` or `Failed` even if the caller stops
    /// awaiting this future.
    pub async fn submit(self: &Arc<Self>) -> Result<SubmitOutcome, SubmitError> {
        let message = {
            let mut guard = self.inner.lock().await;
            if guard.status == SubmitStatus::Submitting {
                warn!("rejected submit while another submission is in flight");
                return Err(SubmitError::AlreadySubmitting);
            }

            let errors = validate(&guard.fields);
            guard.errors = errors.clone();
            if !errors.is_empty() {
                if guard.status.is_terminal() {
                    guard.status = SubmitStatus::Idle;
                }
                info!(
                    invalid_fields = errors.len(),
                    "contact submit rejected by validation"
                );
                self.publish(&guard);
                self.notify(Notification::destructive(
                    VALIDATION_FAILED_TITLE,
                    VALIDATION_FAILED_DESCRIPTION,
                ));
                return Ok(SubmitOutcome::Invalid(errors));
            }

            guard.status = SubmitStatus::Submitting;
            self.publish(&guard);
            ContactMessage::from_fields(&guard.fields)
        };

        let submission_id = message.submission_id;
        info!(%submission_id, "contact submission started");
        let form = Arc::clone(self);
        let delivery = tokio::spawn(async move { form.deliver_and_settle(message).await });
        match delivery.await {
            Ok(outcome) => Ok(outcome),
            Err(err) => Ok(self
                .settle(submission_id, Err(anyhow!("delivery task aborted: {err}")))
                .await),
        }
    }

    async fn deliver_and_settle(&self, message: ContactMessage) -> SubmitOutcome {
        let submission_id = message.submission_id;
        let delivery = match self.submit_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.transport.deliver(message)).await {
                    Ok(result) => result,
                    Err(_) => Err(anyhow!(
                        "delivery timed out after {} ms",
                        limit.as_millis()
                    )),
                }
            }
            None => self.transport.deliver(message).await,
        };
        self.settle(submission_id, delivery).await
    }

    async fn settle(&self, submission_id: Uuid, delivery: anyhow::Result<()>) -> SubmitOutcome {
        let mut guard = self.inner.lock().await;
        match delivery {
            Ok(()) => {
                guard.fields = ContactFields::default();
                guard.errors.clear();
                guard.status = SubmitStatus::Succeeded;
                info!(%submission_id, "contact submission delivered");
                self.publish(&guard);
                self.notify(Notification::success(SENT_TITLE, SENT_DESCRIPTION));
                SubmitOutcome::Sent { submission_id }
            }
            Err(err) => {
                guard.status = SubmitStatus::Failed;
                warn!(%submission_id, error = %err, "contact submission failed");
                self.publish(&guard);
                self.notify(Notification::destructive(
                    SEND_FAILED_TITLE,
                    SEND_FAILED_DESCRIPTION,
                ));
                SubmitOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn publish(&self, state: &ContactFormState) {
        let _ = self.events.send(SiteEvent::ContactChanged {
            snapshot: state.snapshot(),
        });
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(SiteEvent::Notification(notification));
    }
}

#[cfg(test)]
#[path = "tests/contact_form_tests.rs"]
mod tests;
