use serde::Deserialize;

use super::ApiClient;
use crate::error::Result;
use crate::model::{StaffMember, null_as_default};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaffData {
    #[serde(default, deserialize_with = "null_as_default")]
    staff_list: Vec<StaffMember>,
}

impl ApiClient {
    /// `GET /staff`
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>> {
        let data: Option<StaffData> = self.get("/staff", &[] as &[(&str, &str)]).await?;
        Ok(data.unwrap_or_default().staff_list)
    }
}
