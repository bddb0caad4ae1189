use serde::{Deserialize, Serialize};

/// Update payload for the per-organization configuration record.
///
/// The field names here are the store's own column names and are a permanent
/// part of the contract: the form-side `mailgunName`/`mailgunEmail` values map
/// to `mailgun_from_name`/`mailgun_from_email` on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailgunSettingsUpdate {
    pub mailgun_api_key: String,
    pub mailgun_domain: String,
    pub mailgun_from_email: String,
    pub mailgun_from_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_under_store_field_names() {
        let update = MailgunSettingsUpdate {
            mailgun_api_key: "k".into(),
            mailgun_domain: "d".into(),
            mailgun_from_email: "e".into(),
            mailgun_from_name: "n".into(),
        };

        let value = serde_json::to_value(&update).expect("serialize");
        assert_eq!(value["mailgun_api_key"], "k");
        assert_eq!(value["mailgun_domain"], "d");
        assert_eq!(value["mailgun_from_email"], "e");
        assert_eq!(value["mailgun_from_name"], "n");
    }
}
