use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{authenticated_client, print_json};
use crate::error::Result;
use crate::model::or_dash;

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Short Description")]
    description: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Sub Category")]
    sub_category: String,
    #[tabled(rename = "Location")]
    locations: String,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Services")]
    services: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled)]
struct TagCategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Packages")]
    packages: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

fn print_table<R: Tabled>(rows: Vec<R>, noun: &str) {
    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("\n{count} {noun}(s)");
}

/// List the service catalog
pub async fn cmd_services_ls(json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let services = client.list_services().await?;

    if json {
        return print_json(&services);
    }

    if services.is_empty() {
        println!("No services found.");
        return Ok(());
    }

    let rows: Vec<ServiceRow> = services
        .iter()
        .map(|s| ServiceRow {
            name: or_dash(Some(&s.name)),
            description: or_dash(s.short_description.as_deref()),
            price: s.price_display(),
            category: or_dash(s.category_name.as_deref()),
            sub_category: or_dash(s.sub_category_name.as_deref()),
            locations: s.locations_display(),
        })
        .collect();
    print_table(rows, "service");
    Ok(())
}

/// List tags (service packages)
pub async fn cmd_tags_ls(json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let tags = client.list_tags().await?;

    if json {
        return print_json(&tags);
    }

    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let rows: Vec<TagRow> = tags
        .iter()
        .map(|t| TagRow {
            name: or_dash(Some(&t.tag_name)),
            description: or_dash(Some(&t.tag_short_description)),
            services: t.services_display(),
            updated: or_dash(t.updated_at_str.as_deref()),
        })
        .collect();
    print_table(rows, "tag");
    Ok(())
}

/// List tag categories
pub async fn cmd_tag_categories_ls(json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let categories = client.list_tag_categories().await?;

    if json {
        return print_json(&categories);
    }

    if categories.is_empty() {
        println!("No tag categories found.");
        return Ok(());
    }

    let rows: Vec<TagCategoryRow> = categories
        .iter()
        .map(|c| TagCategoryRow {
            name: or_dash(Some(&c.tag_category_name)),
            description: or_dash(Some(&c.tag_category_short_description)),
            packages: c.packages_display(),
            updated: or_dash(c.updated_at_str.as_deref()),
        })
        .collect();
    print_table(rows, "tag category");
    Ok(())
}
