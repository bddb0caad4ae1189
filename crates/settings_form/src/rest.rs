use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::OrganizationId, error::PersistenceError, record::MailgunSettingsUpdate};

use crate::ConfigStore;

/// [`ConfigStore`] over a REST row-update endpoint: issues
/// `PATCH {base}/organizations/{id}/config` with the update as the JSON body.
/// Non-2xx responses surface the response body as the failure message, so the
/// server's own wording reaches the user unchanged.
pub struct RestConfigStore {
    http: Client,
    base_url: String,
}

impl RestConfigStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ConfigStore for RestConfigStore {
    async fn update_persisted(
        &self,
        organization_id: OrganizationId,
        update: &MailgunSettingsUpdate,
    ) -> Result<(), PersistenceError> {
        let url = format!(
            "{}/organizations/{}/config",
            self.base_url.trim_end_matches('/'),
            organization_id.0
        );

        let response = self
            .http
            .patch(&url)
            .json(update)
            .send()
            .await
            .map_err(|err| PersistenceError::new(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            Err(PersistenceError::new(format!(
                "config update failed with status {status}"
            )))
        } else {
            Err(PersistenceError::new(body.trim().to_string()))
        }
    }
}

#[cfg(test)]
#[path = "tests/rest_tests.rs"]
mod tests;
