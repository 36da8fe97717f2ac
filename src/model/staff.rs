use serde::{Deserialize, Serialize};

use super::{flexible_id, null_as_default};

/// A staff member that bookings can be assigned to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffMember {
    #[serde(deserialize_with = "flexible_id")]
    pub staff_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub employee_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile_number: String,
}

impl StaffMember {
    /// `Name (email)`, as shown in the assign picker
    pub fn label(&self) -> String {
        if self.email_id.is_empty() {
            self.employee_name.clone()
        } else {
            format!("{} ({})", self.employee_name, self.email_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let staff: StaffMember = serde_json::from_str(
            r#"{"staffId": 7, "employeeName": "Nila", "emailId": "nila@example.com"}"#,
        )
        .unwrap();
        assert_eq!(staff.staff_id, "7");
        assert_eq!(staff.label(), "Nila (nila@example.com)");
    }
}
