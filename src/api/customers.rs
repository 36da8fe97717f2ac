use serde::Deserialize;

use super::{ApiClient, ListBackend};
use crate::error::{CentreError, Result};
use crate::model::{Customer, Page, PageQuery, null_as_default};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomersData {
    #[serde(default, deserialize_with = "null_as_default")]
    customers: Vec<Customer>,
    #[serde(default, deserialize_with = "null_as_default")]
    total_items: u64,
}

impl ApiClient {
    /// `GET /customers?limit&page`
    pub async fn list_customers(&self, query: &PageQuery<()>) -> Result<Page<Customer>> {
        let params = [("limit", query.page_size), ("page", query.page)];
        let data: Option<CustomersData> = self.get("/customers", &params).await?;
        Ok(data
            .map(|d| Page::new(d.customers, d.total_items))
            .unwrap_or_else(Page::empty))
    }

    /// `GET /customers/<id>`
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        let path = format!("/customers/{customer_id}");
        let data: Option<Customer> = self.get(&path, &[] as &[(&str, &str)]).await?;
        data.ok_or_else(|| CentreError::NotFound(customer_id.to_string()))
    }
}

/// Customers list: pagination and selection only, no per-row actions
#[derive(Debug, Clone)]
pub struct CustomersBackend {
    client: ApiClient,
}

impl CustomersBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ListBackend<Customer> for CustomersBackend {
    async fn fetch_page(&self, query: &PageQuery<()>) -> Result<Page<Customer>> {
        self.client.list_customers(query).await
    }
}
