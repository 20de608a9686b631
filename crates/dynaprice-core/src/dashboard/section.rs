//! Dashboard tabs and navigation events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One tab of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Overview,
    Products,
    Pricing,
    Training,
    Analytics,
    Settings,
}

impl Section {
    /// Tab order.
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Products,
        Section::Pricing,
        Section::Training,
        Section::Analytics,
        Section::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Products => "products",
            Section::Pricing => "pricing",
            Section::Training => "training",
            Section::Analytics => "analytics",
            Section::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Dashboard",
            Section::Products => "Products",
            Section::Pricing => "Price Calculator",
            Section::Training => "Model Training",
            Section::Analytics => "Analytics",
            Section::Settings => "Settings",
        }
    }

    /// Whether entering the tab fetches data.
    pub fn loads_data(&self) -> bool {
        matches!(
            self,
            Section::Overview | Section::Products | Section::Analytics
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" | "dashboard" => Ok(Section::Overview),
            "products" => Ok(Section::Products),
            "pricing" | "calculator" => Ok(Section::Pricing),
            "training" | "train" => Ok(Section::Training),
            "analytics" => Ok(Section::Analytics),
            "settings" => Ok(Section::Settings),
            other => Err(format!("unknown section: {}", other)),
        }
    }
}

/// The user switched tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEvent {
    pub section: Section,
}

impl NavigationEvent {
    pub fn new(section: Section) -> Self {
        Self { section }
    }
}

impl From<Section> for NavigationEvent {
    fn from(section: Section) -> Self {
        Self { section }
    }
}

/// Reachability of the pricing service as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Offline,
    /// The last training run failed.
    Error,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Unknown => "Unknown",
            ApiStatus::Online => "Online",
            ApiStatus::Offline => "Offline",
            ApiStatus::Error => "Error",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
