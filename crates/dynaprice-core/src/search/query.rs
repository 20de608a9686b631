//! Sort keys for the product list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Name A-Z, case-folded.
    Name,
    /// Base price, low to high.
    Price,
    /// Stock, low to high.
    Stock,
    /// 7-day sales, high to low.
    Demand,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Price, SortKey::Stock, SortKey::Demand];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Stock => "stock",
            SortKey::Demand => "demand",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::Price => "Price: Low to High",
            SortKey::Stock => "Stock: Low to High",
            SortKey::Demand => "Demand: High to Low",
        }
    }

    /// Ordering of two products under this key. Used with a stable sort.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            // Case-folded first so "apple" sorts beside "Apple"; raw bytes break ties.
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Price => a.base_price.total_cmp(&b.base_price),
            SortKey::Stock => a.stock.cmp(&b.stock),
            SortKey::Demand => b.sales_7.cmp(&a.sales_7),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            "stock" => Ok(SortKey::Stock),
            "demand" | "sales" => Ok(SortKey::Demand),
            other => Err(format!(
                "unknown sort key '{}' (expected name, price, stock or demand)",
                other
            )),
        }
    }
}
