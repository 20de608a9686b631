//! Typed gateway to the pricing service.

use dynaprice_fetch::{FetchClient, HttpTransport, Method, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{
    validate_batch, HealthStatus, HighValueEnvelope, HighValueEntry, LowStockEntry,
    LowStockEnvelope, ModelStatus, PricingRequest, PricingResult, ProductPage, TopDemandEntry,
    TopDemandEnvelope, TrainingReport,
};
use crate::error::DashboardError;
use crate::ids::ProductId;

/// Decode a JSON document into the type an endpoint promises.
pub fn decode<R: DeserializeOwned>(endpoint: &str, value: Value) -> Result<R, DashboardError> {
    serde_json::from_value(value).map_err(|e| DashboardError::decode(endpoint, e.to_string()))
}

/// Client for the pricing/analytics REST API.
///
/// Every call is independent: no retries, no deduplication, no timeout.
pub struct PricingApi<T = HttpTransport> {
    client: FetchClient<T>,
    price_method: Method,
}

impl PricingApi<HttpTransport> {
    /// Client over real HTTP.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(), base_url)
    }
}

impl<T: Transport> PricingApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            client: FetchClient::with_transport(transport)
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
            price_method: Method::Get,
        }
    }

    /// Method used for `/price/{id}`.
    pub fn with_price_method(mut self, method: Method) -> Self {
        self.price_method = method;
        self
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().unwrap_or_default()
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.client.set_base_url(base_url);
    }

    pub fn transport(&self) -> &T {
        self.client.transport()
    }

    /// Issue one request and return the parsed JSON body.
    ///
    /// Any non-2xx status, transport failure or non-JSON body is an error.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, DashboardError> {
        debug!(%method, endpoint, "api call");
        let mut request = self.client.request(method, endpoint);
        if let Some(body) = body {
            request = request.json(body)?;
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<Value>()?)
    }

    async fn call_typed<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<R, DashboardError> {
        let value = self.call(endpoint, method, body).await?;
        decode(endpoint, value)
    }

    pub async fn health(&self) -> Result<HealthStatus, DashboardError> {
        self.call_typed("/health", Method::Get, None).await
    }

    pub async fn model_status(&self) -> Result<ModelStatus, DashboardError> {
        self.call_typed("/model-status", Method::Get, None).await
    }

    /// One backend page of products. The batch is validated as a whole.
    pub async fn products(&self, skip: usize, limit: usize) -> Result<ProductPage, DashboardError> {
        let endpoint = format!("/products?skip={}&limit={}", skip, limit);
        let page: ProductPage = self.call_typed(&endpoint, Method::Get, None).await?;
        validate_batch(&page.products).map_err(|msg| DashboardError::decode(&endpoint, msg))?;
        Ok(page)
    }

    pub async fn product_price(&self, id: ProductId) -> Result<PricingResult, DashboardError> {
        let endpoint = format!("/price/{}", id);
        self.call_typed(&endpoint, self.price_method, None).await
    }

    pub async fn predict_price(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResult, DashboardError> {
        let body = serde_json::to_value(request)
            .map_err(|e| DashboardError::Validation(e.to_string()))?;
        self.call_typed("/predict-price", Method::Post, Some(&body)).await
    }

    pub async fn train_model(&self) -> Result<TrainingReport, DashboardError> {
        self.call_typed("/train-model", Method::Post, None).await
    }

    pub async fn top_demand(&self, limit: usize) -> Result<Vec<TopDemandEntry>, DashboardError> {
        let endpoint = format!("/analytics/top-demand?limit={}", limit);
        let envelope: TopDemandEnvelope = self.call_typed(&endpoint, Method::Get, None).await?;
        Ok(envelope.top_products)
    }

    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<LowStockEntry>, DashboardError> {
        let endpoint = format!("/analytics/low-stock?threshold={}", threshold);
        let envelope: LowStockEnvelope = self.call_typed(&endpoint, Method::Get, None).await?;
        Ok(envelope.low_stock_products)
    }

    pub async fn high_value(&self, limit: usize) -> Result<Vec<HighValueEntry>, DashboardError> {
        let endpoint = format!("/analytics/high-value?limit={}", limit);
        let envelope: HighValueEnvelope = self.call_typed(&endpoint, Method::Get, None).await?;
        Ok(envelope.high_value_products)
    }
}
