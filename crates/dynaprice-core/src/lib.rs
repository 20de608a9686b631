//! Client-side core of the dynaprice pricing dashboard.
//!
//! Pricing, analytics and model training all live in a remote service. This
//! crate requests their results and keeps the client-side state:
//!
//! - **Catalog**: products and the service's pricing/analytics payloads
//! - **Api**: typed gateway over a pluggable transport
//! - **Search**: non-destructive filter, stable sort, fixed-size pages
//! - **Notify**: single transient status message
//! - **Export**: CSV encoding of the visible product list
//! - **Dashboard**: the session that ties them together
//!
//! # Example
//!
//! ```rust,ignore
//! use dynaprice_core::prelude::*;
//!
//! let api = PricingApi::http(DEFAULT_API_URL);
//! let mut dash = Dashboard::new(api, MemorySettings::new());
//! dash.start().await;
//!
//! dash.load_products().await?;
//! dash.search("rice");
//! dash.sort(SortKey::Price);
//! for product in dash.page() {
//!     println!("{} {}", product.name, product.base_price);
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod ids;
pub mod notify;
pub mod search;
pub mod settings;

pub use error::DashboardError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::PricingApi;
    pub use crate::catalog::{
        AnalyticsReport, HealthStatus, ModelStatus, PricingForm, PricingRequest, PricingResult,
        Product, TrainingReport,
    };
    pub use crate::dashboard::{ApiStatus, Dashboard, DashboardOptions, NavigationEvent, Section};
    pub use crate::error::DashboardError;
    pub use crate::ids::ProductId;
    pub use crate::notify::{Notification, Notifier, Severity};
    pub use crate::search::{PageInfo, ProductCollection, SortKey, PAGE_SIZE};
    pub use crate::settings::{MemorySettings, SettingsStore, DEFAULT_API_URL};
}
