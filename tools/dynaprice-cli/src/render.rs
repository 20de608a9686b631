//! Terminal views of dashboard data.

use chrono::Local;
use dynaprice_core::catalog::{
    AnalyticsReport, HighValueEntry, LowStockEntry, PricingResult, Product, TopDemandEntry,
    TrainingReport,
};
use dynaprice_core::dashboard::{ApiStatus, Overview};
use dynaprice_core::search::{PageInfo, SortKey};

use crate::output::{format_change, format_price, status_badge, yes_no, Output};

const PRODUCT_WIDTHS: [usize; 6] = [6, 28, 12, 8, 10, 10];
const NAME_WIDTH: usize = 28;

pub fn overview(out: &Output, status: ApiStatus, overview: &Overview, api_url: &str) {
    out.header("Dashboard");
    out.kv("API Status", &status_badge(status));

    match overview.total_products() {
        Some(total) => out.kv("Total Products", &total.to_string()),
        None => out.kv("Total Products", "-"),
    }
    out.kv("Model Status", overview.model_label().unwrap_or("-"));

    if let Some(ref health) = overview.health {
        out.kv("Model Loaded", yes_no(health.model_loaded));
    }
    if let Some(model) = overview.model.as_ref().filter(|m| m.is_loaded()) {
        out.kv("Model Type", model.model_type.as_deref().unwrap_or("-"));
        out.kv("Features", &model.features.len().to_string());
    }

    out.kv("API Base URL", api_url);
    out.kv("Last Updated", &Local::now().format("%H:%M:%S").to_string());
}

pub fn products(out: &Output, page: &[&Product], info: &PageInfo, search: &str, sort: Option<SortKey>) {
    out.header("Products");
    if !search.is_empty() {
        out.kv("Search", search);
    }
    if let Some(key) = sort {
        out.kv("Sort", key.display_name());
    }

    if page.is_empty() {
        out.info("No products to show.");
        out.info(&info.label());
        return;
    }

    out.table_header(
        &["ID", "NAME", "PRICE", "STOCK", "7-DAY", "30-DAY"],
        &PRODUCT_WIDTHS,
    );
    for p in page {
        out.table_row(
            &[
                &p.product_id.to_string(),
                &p.name,
                &format_price(p.base_price),
                &p.stock.to_string(),
                &p.sales_7.to_string(),
                &p.sales_30.to_string(),
            ],
            &PRODUCT_WIDTHS,
        );
    }

    out.blank();
    out.info(&format!(
        "{}  (showing {}-{} of {})",
        info.label(),
        info.start_item(),
        info.end_item(),
        info.total_items
    ));
}

pub fn pricing(out: &Output, result: &PricingResult) {
    match (&result.name, result.product_id) {
        (Some(name), Some(id)) => out.header(&format!("Pricing Result: {} (#{})", name, id)),
        _ => out.header("Pricing Result"),
    }
    out.kv("Base Price", &format_price(result.base_price));
    out.kv("Price Multiplier", &format!("{}x", result.multiplier));
    out.kv("Dynamic Price", &format_price(result.dynamic_price));
    out.kv("Change", &format_change(result));
    if let Some(stock) = result.stock {
        out.kv("Stock", &format!("{} units", stock));
    }
    if let (Some(s7), Some(s30)) = (result.sales_7, result.sales_30) {
        out.kv("Sales (7d / 30d)", &format!("{} / {}", s7, s30));
    }
    out.blank();
    out.info(&format!("📌 {}", result.recommendation));
}

pub fn training(out: &Output, report: &TrainingReport) {
    let (train, test) = report.score_labels();
    out.header("Model Training");
    if let Some(ref message) = report.message {
        out.kv("Result", message);
    }
    out.kv("Train Score", &train);
    out.kv("Test Score", &test);
    if let Some(ref path) = report.model_path {
        out.kv("Model Path", path);
    }
}

pub fn analytics(out: &Output, report: &AnalyticsReport) {
    section(out, "Top Demand Products", report.top_demand.as_deref(), top_demand);
    section(out, "Low Stock Alert", report.low_stock.as_deref(), low_stock);
    section(out, "High Value Products", report.high_value.as_deref(), high_value);
}

fn section<R>(out: &Output, title: &str, rows: Option<&[R]>, table: fn(&Output, &[R])) {
    out.header(title);
    match rows {
        None => out.warn("Unavailable"),
        Some([]) => out.info("No products"),
        Some(rows) => table(out, rows),
    }
}

fn top_demand(out: &Output, rows: &[TopDemandEntry]) {
    let widths = [NAME_WIDTH, 12, 12];
    out.table_header(&["PRODUCT", "7-DAY SALES", "30-DAY SALES"], &widths);
    for r in rows {
        out.table_row(&[&r.name, &r.sales_7.to_string(), &r.sales_30.to_string()], &widths);
    }
}

fn low_stock(out: &Output, rows: &[LowStockEntry]) {
    let widths = [NAME_WIDTH, 8, 12];
    out.table_header(&["PRODUCT", "STOCK", "7-DAY SALES"], &widths);
    for r in rows {
        out.table_row(&[&r.name, &r.stock.to_string(), &r.sales_7.to_string()], &widths);
    }
}

fn high_value(out: &Output, rows: &[HighValueEntry]) {
    let widths = [NAME_WIDTH, 12, 8];
    out.table_header(&["PRODUCT", "PRICE", "STOCK"], &widths);
    for r in rows {
        out.table_row(&[&r.name, &format_price(r.base_price), &r.stock.to_string()], &widths);
    }
}
