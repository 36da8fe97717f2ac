use serde::Deserialize;

use super::{ApiClient, ListBackend};
use crate::error::Result;
use crate::model::{Page, PageQuery, Payment, null_as_default};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentsData {
    #[serde(default, deserialize_with = "null_as_default")]
    payments: Vec<Payment>,
    #[serde(default, deserialize_with = "null_as_default")]
    total_items: u64,
}

impl ApiClient {
    /// `GET /bookings/action/list-payments?limit&page`
    pub async fn list_payments(&self, query: &PageQuery<()>) -> Result<Page<Payment>> {
        let params = [("limit", query.page_size), ("page", query.page)];
        let data: Option<PaymentsData> = self
            .get("/bookings/action/list-payments", &params)
            .await?;
        Ok(data
            .map(|d| Page::new(d.payments, d.total_items))
            .unwrap_or_else(Page::empty))
    }
}

/// Payments ledger: pagination only, read-only rows
#[derive(Debug, Clone)]
pub struct PaymentsBackend {
    client: ApiClient,
}

impl PaymentsBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ListBackend<Payment> for PaymentsBackend {
    async fn fetch_page(&self, query: &PageQuery<()>) -> Result<Page<Payment>> {
        self.client.list_payments(query).await
    }
}
