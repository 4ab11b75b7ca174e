//! HTML rendering of the product page.
//!
//! # Design
//! Rendering is a pure function of the fetch state and the money format: no
//! I/O and no clock. Markup lives in Tera templates registered under `.html`
//! names so autoescaping applies to every value taken from the product.
//! Numbers, prices and dates are formatted here and handed to the template
//! as strings; the template only lays them out.

use product_core::{FetchState, Product};
use serde::Serialize;
use tera::{Context, Tera};

use crate::format::MoneyFormat;

/// Availability status that gets the in-stock badge. Matched exactly.
pub const IN_STOCK: &str = "In Stock";

pub const LOADING_MESSAGE: &str = "Loading...";

pub const NO_REVIEWS_MESSAGE: &str = "No reviews yet. Be the first to review!";

const PRODUCT_TEMPLATE: &str = include_str!("../templates/product.html");

const ERROR_TEMPLATE: &str = "<div class=\"error\">Error: {{ message }}</div>\n";

#[derive(Debug, Serialize)]
struct Field {
    label: &'static str,
    value: String,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReviewEntry<'a> {
    name: &'a str,
    date: String,
    comment: &'a str,
}

/// A fresh Tera instance with the page templates registered.
fn templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html"]);
    tera.add_raw_templates(vec![
        ("product.html", PRODUCT_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
    ])?;
    Ok(tera)
}

/// Render whatever the fetch state currently allows.
///
/// `Idle` renders nothing.
pub fn render_state(state: &FetchState<Product>, money: &MoneyFormat) -> tera::Result<String> {
    match state {
        FetchState::Idle => Ok(String::new()),
        FetchState::Loading => Ok(format!("<div class=\"loading\">{LOADING_MESSAGE}</div>\n")),
        FetchState::Failed(err) => {
            let mut context = Context::new();
            context.insert("message", &err.to_string());
            templates()?.render("error.html", &context)
        }
        FetchState::Succeeded(product) => render_product(product, money),
    }
}

pub fn render_product(product: &Product, money: &MoneyFormat) -> tera::Result<String> {
    templates()?.render("product.html", &product_context(product, money))
}

fn product_context(product: &Product, money: &MoneyFormat) -> Context {
    let mut context = Context::new();
    context.insert("product", product);
    context.insert("price", &money.format_price(product.price));
    if product.discount_percentage > 0.0 {
        let original = money.original_price(product.price, product.discount_percentage);
        context.insert("original_price", &money.format(original));
        context.insert("discount", &product.discount_percentage.to_string());
    }
    context.insert("stock_class", stock_class(&product.availability_status));

    let facts = [
        Field::new("Brand", product.brand.as_deref().unwrap_or("-")),
        Field::new("Category", product.category.as_str()),
        Field::new("Stock", format!("{} units", product.stock)),
        Field::new("SKU", product.sku.as_str()),
        Field::new("Tags", product.tags.join(", ")),
        Field::new("Min. Order", product.minimum_order_quantity.to_string()),
    ];
    context.insert("facts", &facts);

    let dims = product.dimensions;
    let specifications = [
        Field::new("Width", format!("{} cm", dims.width)),
        Field::new("Height", format!("{} cm", dims.height)),
        Field::new("Depth", format!("{} cm", dims.depth)),
        Field::new("Weight", format!("{} kg", product.weight)),
    ];
    context.insert("specifications", &specifications);

    let policies = [
        Field::new("Shipping", product.shipping_information.as_str()),
        Field::new("Warranty", product.warranty_information.as_str()),
        Field::new("Return Policy", product.return_policy.as_str()),
    ];
    context.insert("policies", &policies);

    let reviews: Vec<ReviewEntry<'_>> = product
        .reviews
        .iter()
        .map(|review| ReviewEntry {
            name: &review.reviewer_name,
            date: money.format_date(&review.date),
            comment: &review.comment,
        })
        .collect();
    context.insert("reviews", &reviews);
    context.insert("no_reviews_message", NO_REVIEWS_MESSAGE);

    let meta = &product.meta;
    let meta_fields = [
        Field::new("Barcode", meta.barcode.as_str()),
        Field::new("Created", money.format_datetime(&meta.created_at)),
        Field::new("Updated", money.format_datetime(&meta.updated_at)),
    ];
    context.insert("meta_fields", &meta_fields);
    if let Some(qr) = meta.qr_code() {
        context.insert("qr_code", qr);
    }
    context
}

/// CSS class of the availability badge; only an exact `IN_STOCK` match
/// counts as in stock.
pub fn stock_class(availability_status: &str) -> &'static str {
    if availability_status == IN_STOCK {
        "in-stock"
    } else {
        "out-of-stock"
    }
}
