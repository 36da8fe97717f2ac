//! Booking endpoints and the bookings list backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ListBackend};
use crate::controller::ActionRequest;
use crate::error::{CentreError, Result};
use crate::model::{Booking, BookingFilter, Page, PageQuery, StaffMember, null_as_default};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingsData {
    #[serde(default, deserialize_with = "null_as_default")]
    bookings: Vec<Booking>,
    #[serde(default, deserialize_with = "null_as_default")]
    total_items: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignBody<'a> {
    booking_id: &'a str,
    staff_id: &'a str,
}

impl ApiClient {
    /// `GET /bookings?limit&page&booking_filter`
    pub async fn list_bookings(&self, query: &PageQuery<BookingFilter>) -> Result<Page<Booking>> {
        let params = [
            ("limit", query.page_size.to_string()),
            ("page", query.page.to_string()),
            ("booking_filter", query.filter.as_param().to_string()),
        ];
        let data: Option<BookingsData> = self.get("/bookings", &params).await?;
        Ok(data
            .map(|d| Page::new(d.bookings, d.total_items))
            .unwrap_or_else(Page::empty))
    }

    /// `GET /bookings/<id>`
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        let path = format!("/bookings/{booking_id}");
        let data: Option<Booking> = self.get(&path, &[] as &[(&str, &str)]).await?;
        data.ok_or_else(|| CentreError::NotFound(booking_id.to_string()))
    }

    pub async fn mark_booking_read(&self, booking_id: &str) -> Result<()> {
        let _: Value = self
            .get("/bookings/action/mark-read", &[("booking_id", booking_id)])
            .await?;
        Ok(())
    }

    /// Send one action request to its endpoint
    pub async fn perform_booking_action(&self, request: &ActionRequest) -> Result<()> {
        let _: Value = match request {
            ActionRequest::MarkComplete { booking_id } => {
                self.get(
                    "/bookings/action/mark-complete",
                    &[("booking_id", booking_id.as_str())],
                )
                .await?
            }
            ActionRequest::MarkCancel { booking_id } => {
                self.get(
                    "/bookings/action/mark-cancel",
                    &[("booking_id", booking_id.as_str())],
                )
                .await?
            }
            ActionRequest::AssignStaff {
                booking_id,
                staff_id,
            } => {
                self.post(
                    "/bookings/action/assign-to-staff",
                    &AssignBody {
                        booking_id,
                        staff_id,
                    },
                )
                .await?
            }
            ActionRequest::ApproveInvitation {
                booking_id,
                staff_id,
            } => {
                self.get(
                    "/bookings/action/approve-invitation",
                    &[
                        ("booking_id", booking_id.as_str()),
                        ("care_giver_id", staff_id.as_str()),
                    ],
                )
                .await?
            }
        };
        Ok(())
    }
}

/// Bookings list served by the operations API
#[derive(Debug, Clone)]
pub struct BookingsBackend {
    client: ApiClient,
}

impl BookingsBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ListBackend<Booking> for BookingsBackend {
    async fn fetch_page(&self, query: &PageQuery<BookingFilter>) -> Result<Page<Booking>> {
        self.client.list_bookings(query).await
    }

    async fn mark_read(&self, id: &str) -> Result<()> {
        self.client.mark_booking_read(id).await
    }

    async fn perform(&self, request: &ActionRequest) -> Result<()> {
        self.client.perform_booking_action(request).await
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>> {
        self.client.list_staff().await
    }
}
