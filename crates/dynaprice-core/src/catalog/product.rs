//! Product type as served by the pricing backend.

use std::collections::HashSet;

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field values are never edited client-side; a product is only ever
/// reordered or hidden by the collection store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// List price before dynamic adjustment.
    pub base_price: f64,
    /// Units on hand.
    pub stock: u32,
    /// Units sold over the last 7 days.
    pub sales_7: u32,
    /// Units sold over the last 30 days.
    pub sales_30: u32,
    /// Weekday (0 = Monday) the sales snapshot was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    /// Any further columns the backend sends, kept verbatim for export.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no extra columns.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        base_price: f64,
        stock: u32,
        sales_7: u32,
        sales_30: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            base_price,
            stock,
            sales_7,
            sales_30,
            day: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    /// Check field-level invariants the type system cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(format!(
                "product {} has invalid base_price {}",
                self.product_id, self.base_price
            ));
        }
        if let Some(day) = self.day {
            if day > 6 {
                return Err(format!("product {} has invalid day {}", self.product_id, day));
            }
        }
        Ok(())
    }

    /// Case-insensitive substring match on the display name.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// Units sold per day over the 7-day window.
    pub fn daily_velocity(&self) -> f64 {
        self.sales_7 as f64 / 7.0
    }
}

/// Validate a freshly fetched batch: every product valid, identifiers unique.
pub fn validate_batch(products: &[Product]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        product.validate()?;
        if !seen.insert(product.product_id) {
            return Err(format!("duplicate product_id {}", product.product_id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_row_keeps_extra_columns() {
        let row = json!({
            "product_id": 3,
            "name": "Basmati Rice 1kg",
            "category": "Grains",
            "base_price": 120.0,
            "stock": 40,
            "sales_7": 12,
            "sales_30": 51,
            "day": 5
        });
        let product: Product = serde_json::from_value(row).unwrap();
        assert_eq!(product.product_id, ProductId::new(3));
        assert_eq!(product.day, Some(5));
        assert_eq!(product.extra.get("category"), Some(&json!("Grains")));
    }

    #[test]
    fn test_decode_missing_required_field_fails() {
        let row = json!({"product_id": 3, "name": "Milk", "stock": 4, "sales_7": 1, "sales_30": 2});
        assert!(serde_json::from_value::<Product>(row).is_err());
    }

    #[test]
    fn test_decode_negative_stock_fails() {
        let row = json!({
            "product_id": 3, "name": "Milk", "base_price": 30.0,
            "stock": -1, "sales_7": 1, "sales_30": 2
        });
        assert!(serde_json::from_value::<Product>(row).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let product = Product::new(1, "Eggs", -2.0, 1, 1, 1);
        assert!(product.validate().is_err());
        assert!(Product::new(1, "Eggs", 0.0, 1, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_batch_rejects_duplicates() {
        let batch = vec![
            Product::new(1, "Eggs", 60.0, 10, 3, 9),
            Product::new(1, "Bread", 40.0, 5, 2, 8),
        ];
        let err = validate_batch(&batch).unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_name_contains_case_insensitive() {
        let product = Product::new(1, "Pineapple", 80.0, 3, 1, 4);
        assert!(product.name_contains("apple"));
        assert!(!product.name_contains("banana"));
    }
}
