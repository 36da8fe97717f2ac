use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{authenticated_client, print_json};
use crate::error::Result;
use crate::model::or_dash;

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "Staff ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
}

/// List the staff roster
pub async fn cmd_staff_ls(json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let staff = client.list_staff().await?;

    if json {
        return print_json(&staff);
    }

    if staff.is_empty() {
        println!("No staff members found.");
        return Ok(());
    }

    let rows: Vec<StaffRow> = staff
        .iter()
        .map(|s| StaffRow {
            id: s.staff_id.clone(),
            name: or_dash(Some(&s.employee_name)),
            email: or_dash(Some(&s.email_id)),
            mobile: or_dash(Some(&s.mobile_number)),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("\n{} staff member(s)", staff.len());
    Ok(())
}
