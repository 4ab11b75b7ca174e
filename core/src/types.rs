//! Domain DTOs for the product catalogue API.
//!
//! # Design
//! These types mirror the remote payload field for field (camelCase on the
//! wire). The core treats a `Product` as an already-structured value: it is
//! deserialized with serde and handed on untouched, with no validation of
//! ranges or cross-field consistency. Timestamps stay as the server's strings
//! so a product always serializes back to what was received.

use serde::{Deserialize, Serialize};

/// A single product record returned by `GET /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: u64,
    pub tags: Vec<String>,
    /// Some catalogue entries (groceries, mostly) carry no brand at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub sku: String,
    pub weight: f64,
    pub dimensions: Dimensions,
    pub warranty_information: String,
    pub shipping_information: String,
    pub availability_status: String,
    pub reviews: Vec<Review>,
    pub return_policy: String,
    pub minimum_order_quantity: u64,
    pub meta: Meta,
    pub images: Vec<String>,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_added: Option<bool>,
}

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub created_at: String,
    pub updated_at: String,
    pub barcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl Meta {
    /// The QR-code image reference, if one is set and non-empty.
    pub fn qr_code(&self) -> Option<&str> {
        self.qr_code.as_deref().filter(|s| !s.is_empty())
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: f64,
    pub comment: String,
    pub date: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
}
