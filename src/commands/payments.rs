use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{page_footer, print_json, resolve_page_size};
use crate::api::{ApiClient, ListBackend, PaymentsBackend};
use crate::config::Config;
use crate::error::Result;
use crate::model::{PageQuery, Payment, or_dash};

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Razorpay ID")]
    transaction: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Booking ID")]
    booking: String,
    #[tabled(rename = "FieldEZ ID")]
    ticket: String,
    #[tabled(rename = "Payment ID")]
    id: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            customer: p.customer_display(),
            transaction: or_dash(Some(&p.transaction_id)),
            amount: p.amount_display(),
            status: or_dash(Some(&p.payment_status)),
            booking: or_dash(Some(&p.booking_id)),
            ticket: or_dash(Some(&p.field_ez_ticket_id)),
            id: p.payment_id.clone(),
            updated: or_dash(Some(&p.updated_at_str)),
        }
    }
}

/// List one page of the payments ledger
pub async fn cmd_payments_ls(page: u32, page_size: Option<u32>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let page_size = resolve_page_size(page_size, &config)?;
    let backend = PaymentsBackend::new(ApiClient::from_config(&config)?);

    let result = backend
        .fetch_page(&PageQuery {
            filter: (),
            page,
            page_size,
        })
        .await?
        .bounded(page_size);

    if json {
        return print_json(&json!({
            "page": page,
            "page_size": page_size,
            "total": result.total,
            "payments": result.items,
        }));
    }

    if result.items.is_empty() {
        println!("No payments found.");
        return Ok(());
    }

    let rows: Vec<PaymentRow> = result.items.iter().map(PaymentRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "\n{}",
        page_footer(result.items.len(), page, page_size, result.total)
    );
    Ok(())
}
