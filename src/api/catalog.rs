//! Catalog endpoints. These lists are small and come back whole, unpaginated.

use serde::Deserialize;

use super::ApiClient;
use crate::error::Result;
use crate::model::{Service, Tag, TagCategory, null_as_default};

#[derive(Debug, Default, Deserialize)]
struct ServicesData {
    #[serde(default, deserialize_with = "null_as_default")]
    services: Vec<Service>,
}

impl ApiClient {
    /// `GET /service`
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let data: Option<ServicesData> = self.get("/service", &[] as &[(&str, &str)]).await?;
        Ok(data.unwrap_or_default().services)
    }

    /// `GET /tags`
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let data: Option<Vec<Tag>> = self.get("/tags", &[] as &[(&str, &str)]).await?;
        Ok(data.unwrap_or_default())
    }

    /// `GET /tags-category`
    pub async fn list_tag_categories(&self) -> Result<Vec<TagCategory>> {
        let data: Option<Vec<TagCategory>> = self
            .get("/tags-category", &[] as &[(&str, &str)])
            .await?;
        Ok(data.unwrap_or_default())
    }
}
