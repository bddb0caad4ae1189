use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use settings_form::{
    FixedOrganization, FormPresenter, FormValues, Navigator, NoticeKind, Notifier,
    SqliteConfigStore, SubmissionController, FIELDS,
};
use shared::domain::OrganizationId;
use storage::Storage;
use tracing::info;

mod config;

use config::{load_settings, prepare_database_url};

/// Saves Mailgun notification settings for an organization.
#[derive(Parser, Debug)]
struct Args {
    /// Existing organization id; omit to create a fresh organization.
    #[arg(long)]
    organization_id: Option<i64>,
    /// Name for the organization created when --organization-id is omitted.
    #[arg(long, default_value = "default")]
    organization_name: String,
    #[arg(long)]
    api_key: String,
    #[arg(long)]
    domain: String,
    #[arg(long)]
    from_name: String,
    #[arg(long)]
    from_email: String,
    /// Path printed as the post-save destination.
    #[arg(long)]
    redirect: Option<String>,
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => println!("{message}"),
            NoticeKind::Error => eprintln!("error: {message}"),
        }
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to(&self, path: &str) {
        println!("-> {path}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await?;

    let organization_id = match args.organization_id {
        Some(id) => OrganizationId(id),
        None => {
            let id = storage.create_organization(&args.organization_name).await?;
            info!(
                organization_id = id.0,
                name = %args.organization_name,
                "created organization"
            );
            id
        }
    };

    let values = FormValues {
        mailgun_api_key: args.api_key,
        mailgun_domain: args.domain,
        mailgun_name: args.from_name,
        mailgun_email: args.from_email,
    };

    let mut controller = SubmissionController::new(
        values,
        Arc::new(SqliteConfigStore::new(storage)),
        Arc::new(FixedOrganization(organization_id)),
        args.redirect,
    );

    // Same gate the form's submit button applies: no submit while invalid.
    if !controller.is_valid() {
        let missing = FIELDS
            .iter()
            .filter(|spec| controller.values().field(spec.name).is_empty())
            .map(|spec| spec.label)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(anyhow!("missing required fields: {missing}"));
    }

    let presenter = FormPresenter::new(Arc::new(ConsoleNotifier), Arc::new(ConsoleNavigator));
    controller.submit_and_present(&presenter).await;

    Ok(())
}
