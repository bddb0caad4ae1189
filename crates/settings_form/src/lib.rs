use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::OrganizationId, error::PersistenceError, record::MailgunSettingsUpdate};
use storage::Storage;
use tracing::{info, warn};

pub mod fields;
pub mod rest;

pub use fields::{FieldName, FieldSpec, FormValues, FIELDS};
pub use rest::RestConfigStore;
pub use shared::{domain, error, record};

/// Fixed success toast text.
pub const SAVED_MESSAGE: &str = "Notification settings saved";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Supplies the organization the settings record is scoped to. Resolved once
/// per submission, synchronously, never stored by the controller.
pub trait OrganizationResolver: Send + Sync {
    fn active_organization(&self) -> OrganizationId;
}

pub struct FixedOrganization(pub OrganizationId);

impl OrganizationResolver for FixedOrganization {
    fn active_organization(&self) -> OrganizationId {
        self.0
    }
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Updates the configuration record matched by organization id. Exactly
    /// the four mailgun fields change; everything else in the record stays.
    async fn update_persisted(
        &self,
        organization_id: OrganizationId,
        update: &MailgunSettingsUpdate,
    ) -> Result<(), PersistenceError>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

pub trait FormValidator: Send + Sync {
    fn is_valid(&self, values: &FormValues) -> bool;
}

/// Default validation policy: every declared field non-empty.
pub struct RequiredFields;

impl FormValidator for RequiredFields {
    fn is_valid(&self, values: &FormValues) -> bool {
        FIELDS
            .iter()
            .all(|spec| !values.field(spec.name).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Saved,
    Failed { message: String },
}

/// What a settled submission produced, for the presentation layer to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub outcome: SubmissionOutcome,
    pub redirect: Option<String>,
}

/// Owns the field state and the submission lifecycle of the notification
/// settings form: idle → submitting → settled → idle. Validity is derived on
/// demand, so an initially incomplete form reads invalid before any edit.
///
/// At most one submission is in flight at a time; the presentation layer is
/// expected to disable its submit affordance while [`is_submitting`] is true.
/// The controller itself does not queue or reject a re-entrant submit.
///
/// [`is_submitting`]: SubmissionController::is_submitting
pub struct SubmissionController {
    values: FormValues,
    state: SubmissionState,
    store: Arc<dyn ConfigStore>,
    resolver: Arc<dyn OrganizationResolver>,
    validator: Arc<dyn FormValidator>,
    redirect: Option<String>,
}

impl SubmissionController {
    pub fn new(
        values: FormValues,
        store: Arc<dyn ConfigStore>,
        resolver: Arc<dyn OrganizationResolver>,
        redirect: Option<String>,
    ) -> Self {
        Self {
            values,
            state: SubmissionState::Idle,
            store,
            resolver,
            validator: Arc::new(RequiredFields),
            redirect,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn FormValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Pure state update: replaces one named field. No side effects.
    pub fn update_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.values.set_field(name, value.into());
    }

    pub fn is_valid(&self) -> bool {
        self.validator.is_valid(&self.values)
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Persists the current values and returns the settled report.
    ///
    /// Validity is NOT re-checked here; gating on [`is_valid`] is the
    /// caller's responsibility, so a bypassed gate submits whatever the
    /// fields hold. All outcomes are absorbed into the report: no retries,
    /// no error to the caller, no timeout or cancellation.
    ///
    /// [`is_valid`]: SubmissionController::is_valid
    pub async fn submit(&mut self) -> SubmissionReport {
        self.state = SubmissionState::Submitting;
        let report = self.persist_current_values().await;
        self.state = SubmissionState::Idle;
        report
    }

    /// Like [`submit`], but runs the presenter's side effects (navigate, then
    /// notify) before reverting to idle, so a loading indicator derived from
    /// the submitting flag strictly outlives both.
    ///
    /// [`submit`]: SubmissionController::submit
    pub async fn submit_and_present(&mut self, presenter: &FormPresenter) -> SubmissionReport {
        self.state = SubmissionState::Submitting;
        let report = self.persist_current_values().await;
        presenter.present(&report);
        self.state = SubmissionState::Idle;
        report
    }

    async fn persist_current_values(&self) -> SubmissionReport {
        let organization_id = self.resolver.active_organization();
        let update = self.values.to_settings_update();

        let outcome = match self.store.update_persisted(organization_id, &update).await {
            Ok(()) => {
                info!(
                    organization_id = organization_id.0,
                    "notification settings saved"
                );
                SubmissionOutcome::Saved
            }
            Err(err) => {
                warn!(
                    organization_id = organization_id.0,
                    "notification settings update failed: {err}"
                );
                SubmissionOutcome::Failed {
                    message: err.message,
                }
            }
        };

        SubmissionReport {
            outcome,
            redirect: self.redirect.clone(),
        }
    }
}

/// Presentation-layer half of a submission: turns a settled report into the
/// user-facing side effects, keeping the controller free of UI concerns.
pub struct FormPresenter {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl FormPresenter {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notifier,
            navigator,
        }
    }

    /// On success with a configured redirect, navigation fires strictly
    /// before the toast is raised. Failures surface the store's message
    /// verbatim and never navigate.
    pub fn present(&self, report: &SubmissionReport) {
        match &report.outcome {
            SubmissionOutcome::Saved => {
                if let Some(path) = &report.redirect {
                    self.navigator.navigate_to(path);
                }
                self.notifier.notify(SAVED_MESSAGE, NoticeKind::Success);
            }
            SubmissionOutcome::Failed { message } => {
                self.notifier.notify(message, NoticeKind::Error);
            }
        }
    }
}

/// [`ConfigStore`] over the workspace's own sqlite storage.
pub struct SqliteConfigStore {
    storage: Storage,
}

impl SqliteConfigStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn update_persisted(
        &self,
        organization_id: OrganizationId,
        update: &MailgunSettingsUpdate,
    ) -> Result<(), PersistenceError> {
        self.storage
            .update_mailgun_settings(organization_id, update)
            .await
            .map_err(|err| PersistenceError::new(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
