use serde::{Deserialize, Serialize};

use super::{Entity, flexible_id, null_as_default, or_dash, rupees};

/// One row of the payments ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    #[serde(deserialize_with = "flexible_id")]
    pub payment_id: String,
    /// Razorpay transaction reference
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    pub customer_email_id: Option<String>,
    #[serde(deserialize_with = "flexible_id")]
    pub booking_id: String,
    #[serde(rename = "fieldEZTicketID", deserialize_with = "null_as_default")]
    pub field_ez_ticket_id: String,
    pub amount: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at_str: String,
}

impl Payment {
    /// `Name (email)`, or `--` without a name
    pub fn customer_display(&self) -> String {
        if self.customer_name.trim().is_empty() {
            return "--".to_string();
        }
        format!(
            "{} ({})",
            self.customer_name.trim(),
            or_dash(self.customer_email_id.as_deref())
        )
    }

    pub fn amount_display(&self) -> String {
        rupees(self.amount)
    }
}

impl Entity for Payment {
    type Filter = ();

    fn id(&self) -> &str {
        &self.payment_id
    }
}
