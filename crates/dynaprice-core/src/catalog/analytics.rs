//! Service status, training and analytics payloads.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub model_loaded: bool,
    pub products_loaded: u64,
}

/// `GET /model-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub model_path: Option<String>,
}

impl ModelStatus {
    pub fn is_loaded(&self) -> bool {
        self.status == "loaded"
    }

    /// "Ready" / "Not Loaded".
    pub fn label(&self) -> &'static str {
        if self.is_loaded() {
            "Ready"
        } else {
            "Not Loaded"
        }
    }
}

/// `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    pub products: Vec<Product>,
}

/// `POST /train-model`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub train_score: f64,
    pub test_score: f64,
    #[serde(default)]
    pub model_path: Option<String>,
}

impl TrainingReport {
    /// Scores as percentages with two decimals, e.g. `("97.31%", "88.02%")`.
    pub fn score_labels(&self) -> (String, String) {
        (
            format!("{:.2}%", self.train_score * 100.0),
            format!("{:.2}%", self.test_score * 100.0),
        )
    }
}

/// Row of `/analytics/top-demand`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopDemandEntry {
    pub product_id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub sales_7: u32,
    pub sales_30: u32,
}

/// Row of `/analytics/low-stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockEntry {
    pub product_id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub stock: u32,
    pub sales_7: u32,
}

/// Row of `/analytics/high-value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighValueEntry {
    pub product_id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub stock: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopDemandEnvelope {
    pub top_products: Vec<TopDemandEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LowStockEnvelope {
    pub low_stock_products: Vec<LowStockEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HighValueEnvelope {
    pub high_value_products: Vec<HighValueEntry>,
}

/// The three analytics tables. A section whose request failed stays `None`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AnalyticsReport {
    pub top_demand: Option<Vec<TopDemandEntry>>,
    pub low_stock: Option<Vec<LowStockEntry>>,
    pub high_value: Option<Vec<HighValueEntry>>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.top_demand.is_none() && self.low_stock.is_none() && self.high_value.is_none()
    }
}
