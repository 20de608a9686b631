//! The dashboard session.
//!
//! A [`Dashboard`] owns everything one user session touches: the API
//! gateway, the product collection, the notifier and the settings store.
//! Every operation takes `&mut self` and awaits its request before it
//! touches state, so two operations can never race on the same session.
//! Failures are reported through the notifier and leave the last good state
//! in place.

use std::collections::HashSet;
use std::path::Path;

use dynaprice_fetch::{HttpTransport, Transport};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::PricingApi;
use crate::catalog::{
    AnalyticsReport, HealthStatus, ModelStatus, PricingForm, PricingRequest, PricingResult,
    Product, TrainingReport,
};
use crate::dashboard::section::{ApiStatus, NavigationEvent, Section};
use crate::error::DashboardError;
use crate::export;
use crate::ids::ProductId;
use crate::notify::{Notification, Notifier, Severity};
use crate::search::{PageInfo, ProductCollection, SortKey, PAGE_SIZE};
use crate::settings::{self, MemorySettings, SettingsStore, API_URL_KEY};

/// Request sizes used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// `limit` sent with the product fetch.
    pub fetch_limit: usize,
    /// `limit` for the top-demand and high-value tables.
    pub analytics_limit: usize,
    pub low_stock_threshold: u32,
    pub page_size: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            fetch_limit: 500,
            analytics_limit: 10,
            low_stock_threshold: 10,
            page_size: PAGE_SIZE,
        }
    }
}

/// Headline figures of the overview tab.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Overview {
    pub health: Option<HealthStatus>,
    pub model: Option<ModelStatus>,
}

impl Overview {
    pub fn total_products(&self) -> Option<u64> {
        self.health.as_ref().map(|h| h.products_loaded)
    }

    pub fn model_label(&self) -> Option<&'static str> {
        self.model.as_ref().map(ModelStatus::label)
    }
}

pub struct Dashboard<T = HttpTransport, S = MemorySettings> {
    api: PricingApi<T>,
    settings: S,
    options: DashboardOptions,
    products: ProductCollection,
    notifier: Notifier,
    status: ApiStatus,
    overview: Overview,
    analytics: Option<AnalyticsReport>,
    pricing: Option<PricingResult>,
    training: Option<TrainingReport>,
    loaded: HashSet<Section>,
    current: Section,
}

impl<T: Transport, S: SettingsStore> Dashboard<T, S> {
    pub fn new(api: PricingApi<T>, settings: S) -> Self {
        Self::with_options(api, settings, DashboardOptions::default())
    }

    /// Build a session. The API base URL is taken from `settings`.
    pub fn with_options(mut api: PricingApi<T>, settings: S, options: DashboardOptions) -> Self {
        api.set_base_url(settings::api_url(&settings));
        Self {
            api,
            settings,
            options,
            products: ProductCollection::with_page_size(options.page_size),
            notifier: Notifier::default(),
            status: ApiStatus::Unknown,
            overview: Overview::default(),
            analytics: None,
            pricing: None,
            training: None,
            loaded: HashSet::new(),
            current: Section::Overview,
        }
    }

    // ---- accessors ----

    pub fn api(&self) -> &PricingApi<T> {
        &self.api
    }

    pub fn api_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn options(&self) -> DashboardOptions {
        self.options
    }

    pub fn products(&self) -> &ProductCollection {
        &self.products
    }

    pub fn status(&self) -> ApiStatus {
        self.status
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn analytics(&self) -> Option<&AnalyticsReport> {
        self.analytics.as_ref()
    }

    pub fn last_pricing(&self) -> Option<&PricingResult> {
        self.pricing.as_ref()
    }

    pub fn last_training(&self) -> Option<&TrainingReport> {
        self.training.as_ref()
    }

    pub fn current_section(&self) -> Section {
        self.current
    }

    pub fn is_loaded(&self, section: Section) -> bool {
        self.loaded.contains(&section)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The visible notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.visible()
    }

    /// Hand the pending notification to a renderer.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notifier.take()
    }

    // ---- lifecycle ----

    /// Session start: check the service, then fill the overview.
    pub async fn start(&mut self) -> ApiStatus {
        self.check_status().await;
        self.fetch_overview().await;
        self.status
    }

    pub async fn check_status(&mut self) -> ApiStatus {
        match self.api.health().await {
            Ok(health) => {
                self.status = ApiStatus::Online;
                self.overview.health = Some(health);
            }
            Err(err) => {
                self.status = ApiStatus::Offline;
                self.notify_error(&err);
            }
        }
        debug!(status = %self.status, "api status checked");
        self.status
    }

    pub async fn load_overview(&mut self) -> &Overview {
        self.fetch_overview().await;
        &self.overview
    }

    /// Reload the overview and forget which tabs were loaded.
    pub async fn refresh(&mut self) -> bool {
        self.loaded.clear();
        let ok = self.fetch_overview().await;
        if ok {
            self.notifier.notify("Dashboard refreshed", Severity::Success);
        }
        ok
    }

    /// Persist a new API base URL and start over against it.
    pub async fn set_api_url(&mut self, url: &str) -> Result<(), DashboardError> {
        let url = match settings::validate_api_url(url) {
            Ok(url) => url,
            Err(err) => return Err(self.fail(err)),
        };
        if let Err(err) = self.settings.set(API_URL_KEY, &url) {
            return Err(self.fail(err));
        }

        info!(url = %url, "api url changed, reloading");
        self.api.set_base_url(url);
        self.reset();
        self.start().await;
        Ok(())
    }

    /// Drop all fetched data and navigation state.
    pub fn reset(&mut self) {
        self.products.clear();
        self.overview = Overview::default();
        self.analytics = None;
        self.pricing = None;
        self.training = None;
        self.loaded.clear();
        self.status = ApiStatus::Unknown;
        self.current = Section::Overview;
    }

    /// Switch tabs. A tab's data is fetched the first time it is entered
    /// and again only after a reload or refresh. Returns whether a fetch
    /// happened.
    pub async fn navigate(&mut self, event: impl Into<NavigationEvent>) -> bool {
        let section = event.into().section;
        self.current = section;
        if !section.loads_data() || self.loaded.contains(&section) {
            return false;
        }

        debug!(%section, "loading section");
        match section {
            Section::Overview => {
                self.fetch_overview().await;
            }
            Section::Products => {
                // Failure is already reported; the tab stays unloaded so the
                // next visit retries.
                let _ = self.load_products().await;
            }
            Section::Analytics => {
                self.load_analytics().await;
            }
            _ => {}
        }
        true
    }

    // ---- products ----

    /// Fetch the catalog and replace the collection.
    pub async fn load_products(&mut self) -> Result<usize, DashboardError> {
        let page = match self.api.products(0, self.options.fetch_limit).await {
            Ok(page) => page,
            Err(err) => return Err(self.fail(err)),
        };

        let count = page.products.len();
        self.products.replace(page.products);
        self.loaded.insert(Section::Products);
        info!(count, "products loaded");
        self.notifier
            .notify(format!("Loaded {} products", count), Severity::Success);
        Ok(count)
    }

    pub fn search(&mut self, term: &str) {
        self.products.filter(term);
    }

    pub fn clear_search(&mut self) {
        self.products.clear_filter();
    }

    pub fn sort(&mut self, key: SortKey) {
        self.products.sort_by(key);
    }

    pub fn page(&self) -> Vec<&Product> {
        self.products.page()
    }

    pub fn page_info(&self) -> PageInfo {
        self.products.page_info()
    }

    pub fn next_page(&mut self) -> bool {
        self.products.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.products.previous_page()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.products.go_to_page(page);
    }

    // ---- pricing ----

    /// Dynamic price of a catalog product.
    pub async fn price_for(&mut self, id: ProductId) -> Result<&PricingResult, DashboardError> {
        let result = match self.api.product_price(id).await {
            Ok(result) => result,
            Err(err) => return Err(self.fail(err)),
        };
        let result: &PricingResult = self.pricing.insert(result);
        Ok(result)
    }

    /// Price an ad-hoc product from calculator input. Invalid input is
    /// reported and nothing is sent.
    pub async fn calculate_price(
        &mut self,
        form: &PricingForm,
    ) -> Result<&PricingResult, DashboardError> {
        let request = match PricingRequest::from_form(form) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err)),
        };
        let result = match self.api.predict_price(&request).await {
            Ok(result) => result,
            Err(err) => return Err(self.fail(err)),
        };
        let result: &PricingResult = self.pricing.insert(result);
        Ok(result)
    }

    // ---- training ----

    /// Retrain the backend model, then refresh the overview.
    pub async fn train_model(&mut self) -> Result<TrainingReport, DashboardError> {
        let report = match self.api.train_model().await {
            Ok(report) => report,
            Err(err) => {
                self.status = ApiStatus::Error;
                return Err(self.fail(err));
            }
        };

        self.status = ApiStatus::Online;
        let (train, test) = report.score_labels();
        self.notifier.notify(
            format!(
                "Model trained successfully! Train Score: {} | Test Score: {}",
                train, test
            ),
            Severity::Success,
        );
        self.training = Some(report.clone());
        self.fetch_overview().await;
        Ok(report)
    }

    // ---- analytics ----

    /// Fetch the three analytics tables. Each one is independent: a failed
    /// request leaves its table empty and does not stop the others. The tab
    /// only counts as loaded when at least one table arrived.
    pub async fn load_analytics(&mut self) -> &AnalyticsReport {
        let top_demand = self.api.top_demand(self.options.analytics_limit).await;
        let low_stock = self.api.low_stock(self.options.low_stock_threshold).await;
        let high_value = self.api.high_value(self.options.analytics_limit).await;

        let report = AnalyticsReport {
            top_demand: self.keep(top_demand),
            low_stock: self.keep(low_stock),
            high_value: self.keep(high_value),
        };
        if !report.is_empty() {
            self.loaded.insert(Section::Analytics);
        }
        self.analytics.insert(report)
    }

    // ---- export ----

    /// CSV text of the visible product list.
    pub fn export_csv(&mut self) -> Result<String, DashboardError> {
        let items = self.products.to_vec();
        match export::encode(&items) {
            Ok(text) => {
                self.notifier
                    .notify("Products exported successfully", Severity::Success);
                Ok(text)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Write the visible product list to `path`.
    pub fn export_to(&mut self, path: &Path) -> Result<usize, DashboardError> {
        let items = self.products.to_vec();
        match export::export_to(path, &items) {
            Ok(rows) => {
                self.notifier
                    .notify("Products exported successfully", Severity::Success);
                Ok(rows)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    // ---- internals ----

    /// Health and model status, each kept only if its request succeeds.
    /// Returns whether both succeeded; the tab counts as loaded if either did.
    async fn fetch_overview(&mut self) -> bool {
        let health = self.api.health().await;
        let model = self.api.model_status().await;
        let (mut health_ok, mut model_ok) = (false, false);

        match health {
            Ok(health) => {
                health_ok = true;
                self.status = ApiStatus::Online;
                self.overview.health = Some(health);
            }
            Err(err) => self.notify_error(&err),
        }
        match model {
            Ok(model) => {
                model_ok = true;
                self.overview.model = Some(model);
            }
            Err(err) => self.notify_error(&err),
        }

        if health_ok || model_ok {
            self.loaded.insert(Section::Overview);
        }
        health_ok && model_ok
    }

    fn keep<R>(&mut self, result: Result<R, DashboardError>) -> Option<R> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.notify_error(&err);
                None
            }
        }
    }

    fn notify_error(&mut self, err: &DashboardError) {
        warn!(kind = err.kind(), error = %err, "dashboard operation failed");
        let message = match err {
            DashboardError::Fetch(_) | DashboardError::Decode { .. } => format!("Error: {}", err),
            other => other.to_string(),
        };
        self.notifier.notify(message, Severity::Error);
    }

    fn fail(&mut self, err: DashboardError) -> DashboardError {
        self.notify_error(&err);
        err
    }
}
