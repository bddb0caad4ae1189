use super::*;

fn update(api_key: &str, domain: &str, from_email: &str, from_name: &str) -> MailgunSettingsUpdate {
    MailgunSettingsUpdate {
        mailgun_api_key: api_key.into(),
        mailgun_domain: domain.into(),
        mailgun_from_email: from_email.into(),
        mailgun_from_name: from_name.into(),
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("settings_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("settings.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn creating_an_organization_seeds_a_blank_config_record() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let org = storage.create_organization("acme").await.expect("org");

    assert!(storage.organization_exists(org).await.expect("exists"));
    let settings = storage
        .mailgun_settings(org)
        .await
        .expect("settings")
        .expect("record");
    assert_eq!(settings.api_key, None);
    assert_eq!(settings.updated_at, None);
}

#[tokio::test]
async fn updates_exactly_the_four_mailgun_columns() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let org = storage.create_organization("acme").await.expect("org");
    storage
        .set_company_name(org, "Acme Inc")
        .await
        .expect("company name");

    storage
        .update_mailgun_settings(org, &update("key-1", "mg.example.com", "no-reply@example.com", "Acme"))
        .await
        .expect("update");

    let settings = storage
        .mailgun_settings(org)
        .await
        .expect("settings")
        .expect("record");
    assert_eq!(settings.api_key.as_deref(), Some("key-1"));
    assert_eq!(settings.domain.as_deref(), Some("mg.example.com"));
    assert_eq!(settings.from_email.as_deref(), Some("no-reply@example.com"));
    assert_eq!(settings.from_name.as_deref(), Some("Acme"));
    assert!(settings.updated_at.is_some());

    // Sibling columns stay untouched.
    assert_eq!(
        storage.company_name(org).await.expect("company name"),
        Some("Acme Inc".to_string())
    );
}

#[tokio::test]
async fn update_fails_when_no_record_matches() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");

    let err = storage
        .update_mailgun_settings(OrganizationId(42), &update("k", "d", "e", "n"))
        .await
        .expect_err("missing record");
    assert!(err.to_string().contains("organization 42"));
}

#[tokio::test]
async fn resubmitting_overwrites_previous_values() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let org = storage.create_organization("acme").await.expect("org");

    storage
        .update_mailgun_settings(org, &update("old", "d", "e", "n"))
        .await
        .expect("first update");
    storage
        .update_mailgun_settings(org, &update("new", "d", "e", "n"))
        .await
        .expect("second update");

    let settings = storage
        .mailgun_settings(org)
        .await
        .expect("settings")
        .expect("record");
    assert_eq!(settings.api_key.as_deref(), Some("new"));
}
