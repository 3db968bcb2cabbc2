use crate::gateway::hubspot::Contact;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item type reported for every HubSpot contact.
pub const CONTACT_ITEM_TYPE: &str = "Contact";

/// Name used when a contact has neither a name nor an email.
pub const UNNAMED_CONTACT: &str = "Unnamed Contact";

/// A provider record normalized for display. Derived on every fetch, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "101",
    "name": "Jane Doe",
    "type": "Contact",
    "creation_time": "2024-01-01T00:00:00Z",
    "last_modified_time": "2024-02-01T00:00:00Z"
}))]
pub struct IntegrationItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub creation_time: Option<String>,
    pub last_modified_time: Option<String>,
}

impl From<&Contact> for IntegrationItem {
    fn from(contact: &Contact) -> Self {
        let properties = &contact.properties;

        Self {
            id: contact.id.clone(),
            name: display_name(
                properties.firstname.as_deref(),
                properties.lastname.as_deref(),
                properties.email.as_deref(),
            ),
            item_type: CONTACT_ITEM_TYPE.to_string(),
            creation_time: contact
                .created_at
                .clone()
                .or_else(|| properties.createdate.clone()),
            last_modified_time: contact
                .updated_at
                .clone()
                .or_else(|| properties.lastmodifieddate.clone()),
        }
    }
}

// "{first} {last}" trimmed, then email, then the placeholder.
fn display_name(firstname: Option<&str>, lastname: Option<&str>, email: Option<&str>) -> String {
    let full_name = format!(
        "{} {}",
        firstname.unwrap_or_default(),
        lastname.unwrap_or_default()
    );
    let full_name = full_name.trim();

    if !full_name.is_empty() {
        return full_name.to_string();
    }

    match email.map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => UNNAMED_CONTACT.to_string(),
    }
}
