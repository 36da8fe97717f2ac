use serde::{Deserialize, Serialize};

use super::{Entity, flexible_id, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub address_line1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pin_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

impl Address {
    /// Comma-joined address, skipping blank parts
    pub fn address_string(&self) -> String {
        [
            &self.address_line1,
            &self.address_line2,
            &self.city,
            &self.state,
            &self.pin_code,
            &self.country,
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "flexible_id")]
    pub customer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    pub customer_address: Option<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub dob: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at_str: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn address_display(&self) -> String {
        let joined = self
            .customer_address
            .as_ref()
            .map(Address::address_string)
            .unwrap_or_default();
        if joined.is_empty() {
            "--".to_string()
        } else {
            joined
        }
    }
}

impl Entity for Customer {
    type Filter = ();

    fn id(&self) -> &str {
        &self.customer_id
    }
}
