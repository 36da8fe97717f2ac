use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{authenticated_client, page_footer, print_json, resolve_page_size};
use crate::api::{ApiClient, CustomersBackend, ListBackend};
use crate::config::Config;
use crate::error::Result;
use crate::model::{Customer, PageQuery, or_dash};

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "Customer ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// List one page of customers
pub async fn cmd_customers_ls(page: u32, page_size: Option<u32>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let page_size = resolve_page_size(page_size, &config)?;
    let backend = CustomersBackend::new(ApiClient::from_config(&config)?);

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
            "customers": result.items,
        }));
    }

    if result.items.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    let rows: Vec<CustomerRow> = result
        .items
        .iter()
        .map(|c| CustomerRow {
            id: c.customer_id.clone(),
            name: or_dash(Some(&c.full_name())),
            email: or_dash(Some(&c.email_id)),
            phone: or_dash(Some(&c.phone_number)),
            created: or_dash(Some(&c.created_at_str)),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "\n{}",
        page_footer(result.items.len(), page, page_size, result.total)
    );
    Ok(())
}

/// Show one customer
pub async fn cmd_customers_show(id: &str, json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let customer = client.get_customer(id).await?;

    if json {
        return print_json(&customer);
    }

    print_customer(&customer);
    Ok(())
}

fn print_customer(c: &Customer) {
    let field = |label: &str, value: String| println!("{:>12}: {}", label.cyan(), value);

    println!("{}\n", "Customer Detail".bold());
    field("Customer ID", c.customer_id.clone());
    field("Name", or_dash(Some(&c.full_name())));
    field("Email", or_dash(Some(&c.email_id)));
    field("Phone", or_dash(Some(&c.phone_number)));
    field("Gender", or_dash(Some(&c.gender)));
    field("DOB", or_dash(Some(&c.dob)));
    field("Address", c.address_display());
    field("Status", or_dash(Some(&c.status)));
    field("Created", or_dash(Some(&c.created_at_str)));
}
