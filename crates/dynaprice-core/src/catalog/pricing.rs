//! Dynamic pricing requests and results.

use crate::error::DashboardError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Result of a price query. Rendered once and discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub base_price: f64,
    pub multiplier: f64,
    pub dynamic_price: f64,
    pub change_percent: f64,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, rename = "sales_7day", skip_serializing_if = "Option::is_none")]
    pub sales_7: Option<u32>,
    #[serde(default, rename = "sales_30day", skip_serializing_if = "Option::is_none")]
    pub sales_30: Option<u32>,
}

/// Direction of a price change, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceChange {
    Up,
    Down,
    Flat,
}

impl PricingResult {
    pub fn direction(&self) -> PriceChange {
        if self.change_percent > 0.0 {
            PriceChange::Up
        } else if self.change_percent < 0.0 {
            PriceChange::Down
        } else {
            PriceChange::Flat
        }
    }

    /// `+12.5%` / `-3%` / `0%`.
    pub fn change_label(&self) -> String {
        if self.change_percent > 0.0 {
            format!("+{}%", self.change_percent)
        } else {
            format!("{}%", self.change_percent)
        }
    }
}

/// Body of `POST /predict-price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRequest {
    pub product_id: ProductId,
    pub base_price: f64,
    pub stock: u32,
    pub sales_7: u32,
    pub sales_30: u32,
    pub day: u8,
}

/// Raw, user-entered calculator fields.
#[derive(Debug, Clone, Default)]
pub struct PricingForm {
    pub product_id: String,
    pub base_price: String,
    pub stock: String,
    pub sales_7: String,
    pub sales_30: String,
    pub day: String,
}

impl PricingRequest {
    /// Validate a form. Invalid input blocks the request entirely.
    pub fn from_form(form: &PricingForm) -> Result<Self, DashboardError> {
        let product_id: i64 = parse_field("product id", &form.product_id)?;
        if product_id <= 0 {
            return Err(invalid("product id must be a positive integer"));
        }

        let base_price: f64 = parse_field("base price", &form.base_price)?;
        if !base_price.is_finite() || base_price <= 0.0 {
            return Err(invalid("base price must be a positive number"));
        }

        let stock = parse_count("stock", &form.stock)?;
        let sales_7 = parse_count("7-day sales", &form.sales_7)?;
        let sales_30 = parse_count("30-day sales", &form.sales_30)?;

        let day: u8 = parse_field("day", &form.day)?;
        if day > 6 {
            return Err(invalid("day must be between 0 and 6"));
        }

        Ok(Self {
            product_id: ProductId::new(product_id),
            base_price,
            stock,
            sales_7,
            sales_30,
            day,
        })
    }
}

fn invalid(msg: &str) -> DashboardError {
    DashboardError::Validation(msg.to_string())
}

fn parse_field<T: std::str::FromStr>(label: &str, raw: &str) -> Result<T, DashboardError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DashboardError::Validation(format!("{} is required", label)));
    }
    raw.parse()
        .map_err(|_| DashboardError::Validation(format!("{} is not a valid number: {:?}", label, raw)))
}

fn parse_count(label: &str, raw: &str) -> Result<u32, DashboardError> {
    let value: i64 = parse_field(label, raw)?;
    u32::try_from(value)
        .map_err(|_| DashboardError::Validation(format!("{} must be a non-negative integer", label)))
}
