use serde::{Deserialize, Serialize};
use shared::record::MailgunSettingsUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    MailgunApiKey,
    MailgunDomain,
    MailgunName,
    MailgunEmail,
}

/// Render-ready description of one form field. Rule content stays in the
/// validator; this is presentation data only.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub helper_text: Option<&'static str>,
}

pub const FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: FieldName::MailgunApiKey,
        label: "Mailgun API key",
        placeholder: "Mailgun API key",
        helper_text: Some("Mailgun → User → API Keys → Private API Key"),
    },
    FieldSpec {
        name: FieldName::MailgunDomain,
        label: "Mailgun domain",
        placeholder: "Mailgun domain",
        helper_text: Some("Choose the sending domain from Sending → Domains"),
    },
    FieldSpec {
        name: FieldName::MailgunName,
        label: "Mailgun from name",
        placeholder: "Mailgun from name",
        helper_text: None,
    },
    FieldSpec {
        name: FieldName::MailgunEmail,
        label: "Mailgun from email",
        placeholder: "Mailgun from email",
        helper_text: None,
    },
];

/// Current values of the four form fields, keyed on the wire by their
/// camelCase form-side names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub mailgun_api_key: String,
    pub mailgun_domain: String,
    pub mailgun_name: String,
    pub mailgun_email: String,
}

impl FormValues {
    pub fn field(&self, name: FieldName) -> &str {
        match name {
            FieldName::MailgunApiKey => &self.mailgun_api_key,
            FieldName::MailgunDomain => &self.mailgun_domain,
            FieldName::MailgunName => &self.mailgun_name,
            FieldName::MailgunEmail => &self.mailgun_email,
        }
    }

    pub fn set_field(&mut self, name: FieldName, value: String) {
        match name {
            FieldName::MailgunApiKey => self.mailgun_api_key = value,
            FieldName::MailgunDomain => self.mailgun_domain = value,
            FieldName::MailgunName => self.mailgun_name = value,
            FieldName::MailgunEmail => self.mailgun_email = value,
        }
    }

    /// Remaps the form-side fields to the store's column names. Note that
    /// `mailgun_name`/`mailgun_email` become `mailgun_from_name`/
    /// `mailgun_from_email` on the store side.
    pub fn to_settings_update(&self) -> MailgunSettingsUpdate {
        MailgunSettingsUpdate {
            mailgun_api_key: self.mailgun_api_key.clone(),
            mailgun_domain: self.mailgun_domain.clone(),
            mailgun_from_email: self.mailgun_email.clone(),
            mailgun_from_name: self.mailgun_name.clone(),
        }
    }
}
