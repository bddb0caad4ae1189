use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{fs, path::Path, str::FromStr};

use shared::{domain::OrganizationId, record::MailgunSettingsUpdate};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredMailgunSettings {
    pub api_key: Option<String>,
    pub domain: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Creates an organization together with its blank configuration record.
    pub async fn create_organization(&self, name: &str) -> Result<OrganizationId> {
        let rec = sqlx::query("INSERT INTO organizations (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        let organization_id = OrganizationId(rec.get::<i64, _>(0));
        sqlx::query("INSERT INTO organization_config (organization_id) VALUES (?)")
            .bind(organization_id.0)
            .execute(&self.pool)
            .await?;
        Ok(organization_id)
    }

    pub async fn organization_exists(&self, organization_id: OrganizationId) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM organizations WHERE id = ?")
            .bind(organization_id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Updates the four mailgun columns of the configuration record matched by
    /// organization id. All other columns are left untouched. Fails when no
    /// record matches.
    pub async fn update_mailgun_settings(
        &self,
        organization_id: OrganizationId,
        update: &MailgunSettingsUpdate,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE organization_config
             SET mailgun_api_key = ?, mailgun_domain = ?, mailgun_from_email = ?,
                 mailgun_from_name = ?, updated_at = ?
             WHERE organization_id = ?",
        )
        .bind(&update.mailgun_api_key)
        .bind(&update.mailgun_domain)
        .bind(&update.mailgun_from_email)
        .bind(&update.mailgun_from_name)
        .bind(Utc::now())
        .bind(organization_id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!(
                "no configuration record for organization {}",
                organization_id.0
            ));
        }
        Ok(())
    }

    pub async fn mailgun_settings(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<StoredMailgunSettings>> {
        let row = sqlx::query(
            "SELECT mailgun_api_key, mailgun_domain, mailgun_from_email, mailgun_from_name,
                    updated_at
             FROM organization_config WHERE organization_id = ?",
        )
        .bind(organization_id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| StoredMailgunSettings {
            api_key: r.get("mailgun_api_key"),
            domain: r.get("mailgun_domain"),
            from_email: r.get("mailgun_from_email"),
            from_name: r.get("mailgun_from_name"),
            updated_at: r.get("updated_at"),
        }))
    }

    pub async fn set_company_name(
        &self,
        organization_id: OrganizationId,
        company_name: &str,
    ) -> Result<()> {
        sqlx::query("UPDATE organization_config SET company_name = ? WHERE organization_id = ?")
            .bind(company_name)
            .bind(organization_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn company_name(&self, organization_id: OrganizationId) -> Result<Option<String>> {
        let row = sqlx::query("SELECT company_name FROM organization_config WHERE organization_id = ?")
            .bind(organization_id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.and_then(|r| r.get::<Option<String>, _>(0)))
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return Ok(());
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();
    if path.is_empty() {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory for '{database_url}'"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
