//! Dashboard module.
//!
//! Contains the tab model and the session that drives it.

mod section;
mod session;

pub use section::{ApiStatus, NavigationEvent, Section};
pub use session::{Dashboard, DashboardOptions, Overview};
