//! Plain-text views of API resources
//!
//! Resources are opaque JSON; missing fields render as `-` rather than failing.

use chrono::{DateTime, Utc};
use serde_json::Value;
use shopdesk_core::Resource;
use shopdesk_egress::DashboardSummary;
use std::fmt::Write;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

const DESCRIPTION_PREVIEW_CHARS: usize = 50;

pub fn dashboard(summary: &DashboardSummary) -> String {
    format!(
        "Products:   {}\nCategories: {}\nUsers:      {}",
        summary.products, summary.categories, summary.users
    )
}

pub fn product_cards(products: &[Resource]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let mut out = String::new();
    for (i, product) in products.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "#{} {}", scalar(&product["id"]), text(product, "title"));
        let _ = writeln!(out, "  Price: ${}", scalar(&product["price"]));
        let _ = writeln!(
            out,
            "  {}",
            truncate(text(product, "description"), DESCRIPTION_PREVIEW_CHARS)
        );
        let _ = writeln!(out, "  Image: {}", first_image(product));
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn product_detail(product: &Resource) -> String {
    let category = product["category"]
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("N/A");

    [
        format!("#{} {}", scalar(&product["id"]), text(product, "title")),
        format!("Description: {}", text(product, "description")),
        format!("Price:       ${}", scalar(&product["price"])),
        format!("Category:    {}", category),
        format!("Created:     {}", created(product)),
        format!("Image:       {}", first_image(product)),
    ]
    .join("\n")
}

pub fn category_list(categories: &[Resource]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    categories
        .iter()
        .map(|c| format!("#{} {}", scalar(&c["id"]), text(c, "name")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn category_detail(category: &Resource) -> String {
    let image = category["image"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE);

    [
        format!("#{} {}", scalar(&category["id"]), text(category, "name")),
        format!("Created: {}", created(category)),
        format!("Image:   {}", image),
    ]
    .join("\n")
}

pub fn user_table(users: &[Resource]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|u| {
            [
                scalar(&u["id"]),
                text(u, "name").to_string(),
                text(u, "email").to_string(),
                text(u, "role").to_string(),
            ]
        })
        .collect();

    let header = ["ID", "NAME", "EMAIL", "ROLE"].map(str::to_string);
    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            format!(
                "{:<w0$}  {:<w1$}  {:<w2$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_detail(user: &Resource) -> String {
    [
        format!("#{} {}", scalar(&user["id"]), text(user, "name")),
        format!("Email:   {}", text(user, "email")),
        format!("Role:    {}", text(user, "role")),
        format!("Avatar:  {}", text(user, "avatar")),
        format!("Created: {}", created(user)),
    ]
    .join("\n")
}

/// First `max_chars` characters, with `...` appended when something was cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Calendar date of an RFC 3339 timestamp; unparseable input is shown as-is
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn created(resource: &Resource) -> String {
    match resource["creationAt"].as_str() {
        Some(raw) => format_date(raw),
        None => "-".to_string(),
    }
}

fn first_image(product: &Resource) -> &str {
    product["images"]
        .as_array()
        .and_then(|images| images.first())
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

fn text<'a>(resource: &'a Resource, field: &str) -> &'a str {
    resource[field].as_str().unwrap_or("-")
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
