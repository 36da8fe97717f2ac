//! Booking records and the bookings list filter

use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use super::{Entity, flexible_id, null_as_default, or_dash, rupees};
use crate::error::CentreError;

/// Lifecycle state of a booking as reported by `bookingStatus`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    New,
    Approved,
    Assigned,
    Completed,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::New => "NEW",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Assigned => "ASSIGNED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Other(s) => s,
        }
    }

    /// No further status change is expected
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "NEW" => BookingStatus::New,
            "APPROVED" => BookingStatus::Approved,
            "ASSIGNED" => BookingStatus::Assigned,
            "COMPLETED" => BookingStatus::Completed,
            "CANCELLED" | "CANCELED" => BookingStatus::Cancelled,
            _ => BookingStatus::Other(value),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(value: BookingStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categorical filter for the bookings list (`booking_filter` query parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BookingFilter {
    #[default]
    All,
    NewBookings,
    Approved,
}

impl BookingFilter {
    pub const ALL: [BookingFilter; 3] = [
        BookingFilter::All,
        BookingFilter::NewBookings,
        BookingFilter::Approved,
    ];

    /// Value sent on the wire
    pub fn as_param(&self) -> &'static str {
        match self {
            BookingFilter::All => "ALL",
            BookingFilter::NewBookings => "NEW_BOOKINGS",
            BookingFilter::Approved => "APPROVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingFilter::All => "All",
            BookingFilter::NewBookings => "New Bookings",
            BookingFilter::Approved => "Approved",
        }
    }

    /// Cycle order used by the interactive screen
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl FromStr for BookingFilter {
    type Err = CentreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(BookingFilter::All),
            "new" | "new_bookings" => Ok(BookingFilter::NewBookings),
            "approved" => Ok(BookingFilter::Approved),
            other => Err(CentreError::InvalidInput(format!(
                "unknown booking filter '{other}', expected one of: all, new, approved"
            ))),
        }
    }
}

impl fmt::Display for BookingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Staff member a booking is assigned to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignee {
    #[serde(deserialize_with = "flexible_id")]
    pub staff_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPayment {
    pub amount: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
}

impl BookingPayment {
    /// `₹ <amount>` (zero included), or `--` when no amount was sent
    pub fn amount_display(&self) -> String {
        rupees(self.amount)
    }
}

/// An invitation sent to a staff member to take a booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invitation {
    #[serde(deserialize_with = "flexible_id")]
    pub staff_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub staff_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub staff_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub staff_mobile_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_invitation_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at_str: String,
}

impl Invitation {
    pub fn is_accepted(&self) -> bool {
        self.booking_invitation_status.eq_ignore_ascii_case("ACCEPTED")
    }
}

/// The family member a booking was made for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyMember {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
}

impl FamilyMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    #[serde(deserialize_with = "flexible_id")]
    pub booking_id: String,
    #[serde(rename = "fieldEZTicketNumber", deserialize_with = "null_as_default")]
    pub field_ez_ticket_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    pub customer_email_id: Option<String>,
    #[serde(deserialize_with = "flexible_id")]
    pub customer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_name: String,
    #[serde(deserialize_with = "flexible_id")]
    pub service_id: String,
    pub booking_assignee_details: Option<Assignee>,
    pub payment: Option<BookingPayment>,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_status: BookingStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_status_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_invitations: Vec<Invitation>,
    pub total_invitations_sent: Option<u32>,
    pub total_invitations_accepted: Option<u32>,
    pub slot_date: Option<String>,
    pub slot_time: Option<String>,
    pub booking_for_member: Option<FamilyMember>,
}

impl Booking {
    /// `DD Mon, YYYY hh:mm AM/PM`, falling back to the raw values if they don't parse
    pub fn slot_display(&self) -> String {
        let date = self.slot_date.as_deref().map(str::trim).unwrap_or("");
        if date.is_empty() {
            return "--".to_string();
        }
        let time = self.slot_time.as_deref().map(str::trim).unwrap_or("");

        let Ok(parsed_date) = Date::strptime("%Y-%m-%d", date) else {
            return format!("{date} {time}").trim().to_string();
        };
        let mut out = parsed_date.strftime("%d %b, %Y").to_string();
        if !time.is_empty() {
            match Time::strptime("%H:%M", time) {
                Ok(t) => {
                    out.push(' ');
                    out.push_str(&t.strftime("%I:%M %p").to_string());
                }
                Err(_) => {
                    out.push(' ');
                    out.push_str(time);
                }
            }
        }
        out
    }

    pub fn assignee_display(&self) -> String {
        or_dash(self.booking_assignee_details.as_ref().map(|a| a.name.as_str()))
    }

    pub fn amount_display(&self) -> String {
        self.payment
            .as_ref()
            .map(BookingPayment::amount_display)
            .unwrap_or_else(|| "--".to_string())
    }

    /// Human status text, preferring the server's own wording
    pub fn status_display(&self) -> String {
        if self.booking_status_str.trim().is_empty() {
            self.booking_status.to_string()
        } else {
            self.booking_status_str.clone()
        }
    }

    /// Whether the invitation's staff member may be approved for this booking
    pub fn can_approve(&self, invitation: &Invitation) -> bool {
        invitation.is_accepted() && self.booking_status == BookingStatus::Assigned
    }
}

impl Entity for Booking {
    type Filter = BookingFilter;

    fn id(&self) -> &str {
        &self.booking_id
    }

    fn is_read(&self) -> bool {
        self.is_read
    }

    fn mark_read(&mut self) {
        self.is_read = true;
    }
}
