//! Catalog module.
//!
//! Contains the product type and the payloads of the pricing service.

mod analytics;
mod pricing;
mod product;

pub(crate) use analytics::{HighValueEnvelope, LowStockEnvelope, TopDemandEnvelope};
pub use analytics::{
    AnalyticsReport, HealthStatus, HighValueEntry, LowStockEntry, ModelStatus, ProductPage,
    TopDemandEntry, TrainingReport,
};
pub use pricing::{PriceChange, PricingForm, PricingRequest, PricingResult};
pub use product::{validate_batch, Product};
