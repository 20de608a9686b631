//! CSV export of the product list.
//!
//! The header is taken from the first row's fields in declaration order.
//! String cells are always quoted, numbers and booleans never are, and a
//! field missing from a later row becomes an empty cell.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::catalog::Product;
use crate::error::DashboardError;

/// File name offered for download.
pub const EXPORT_FILENAME: &str = "products.csv";

fn as_object<T: Serialize>(item: &T) -> Result<serde_json::Map<String, Value>, DashboardError> {
    match serde_json::to_value(item).map_err(|e| DashboardError::Csv(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(DashboardError::Csv(format!(
            "rows must serialize to objects, got {}",
            other
        ))),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => quote(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => quote(&nested.to_string()),
    }
}

/// Encode rows as CSV text. Fails with [`DashboardError::EmptyExport`]
/// when there is no first row to take the header from.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String, DashboardError> {
    let first = items.first().ok_or(DashboardError::EmptyExport)?;
    let headers: Vec<String> = as_object(first)?.keys().cloned().collect();

    // Quoting is decided per value type above, so the writer must not add its own.
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;

    for item in items {
        let row = as_object(item)?;
        writer.write_record(headers.iter().map(|h| cell(row.get(h))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Csv(e.to_string()))
}

/// Decode CSV text produced by [`encode`] back into typed rows.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    reader
        .deserialize()
        .map(|row| row.map_err(DashboardError::from))
        .collect()
}

#[derive(Deserialize)]
struct ProductRow {
    product_id: i64,
    name: String,
    base_price: f64,
    stock: u32,
    sales_7: u32,
    sales_30: u32,
    #[serde(default)]
    day: Option<u8>,
}

/// Decode an exported product file. Extra columns are dropped.
pub fn decode_products(text: &str) -> Result<Vec<Product>, DashboardError> {
    let rows: Vec<ProductRow> = decode(text)?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let product = Product::new(r.product_id, r.name, r.base_price, r.stock, r.sales_7, r.sales_30);
            match r.day {
                Some(day) => product.with_day(day),
                None => product,
            }
        })
        .collect())
}

/// Encode and write `items` to `path`. Nothing is written for an empty list.
pub fn export_to<T: Serialize>(path: &Path, items: &[T]) -> Result<usize, DashboardError> {
    let text = encode(items)?;
    std::fs::write(path, &text)?;
    info!(path = %path.display(), rows = items.len(), "exported csv");
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_and_quoting() {
        let rows = vec![json!({"id": 1, "name": "A", "price": 9.5})];
        assert_eq!(encode(&rows).unwrap(), "id,name,price\n1,\"A\",9.5\n");
    }

    #[test]
    fn test_decode_recovers_values() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Row {
            id: i64,
            name: String,
            price: f64,
        }

        let text = encode(&[json!({"id": 1, "name": "A", "price": 9.5})]).unwrap();
        let rows: Vec<Row> = decode(&text).unwrap();
        assert_eq!(
            rows,
            vec![Row {
                id: 1,
                name: "A".into(),
                price: 9.5
            }]
        );
    }

    #[test]
    fn test_empty_collection_fails() {
        let rows: Vec<Product> = Vec::new();
        assert!(matches!(encode(&rows), Err(DashboardError::EmptyExport)));
    }

    #[test]
    fn test_header_follows_first_row_and_missing_cells_are_empty() {
        let rows = vec![
            json!({"id": 1, "name": "Tea", "note": "fresh"}),
            json!({"id": 2, "name": "Salt"}),
        ];
        assert_eq!(
            encode(&rows).unwrap(),
            "id,name,note\n1,\"Tea\",\"fresh\"\n2,\"Salt\",\n"
        );
    }

    #[test]
    fn test_embedded_quotes_and_commas() {
        let rows = vec![json!({"name": "Rice, \"Basmati\" 5kg"})];
        let text = encode(&rows).unwrap();
        assert_eq!(text, "name\n\"Rice, \"\"Basmati\"\" 5kg\"\n");

        #[derive(Deserialize)]
        struct Row {
            name: String,
        }
        let back: Vec<Row> = decode(&text).unwrap();
        assert_eq!(back[0].name, "Rice, \"Basmati\" 5kg");
    }

    #[test]
    fn test_numeric_looking_string_is_still_quoted() {
        let rows = vec![json!({"sku": "0042", "ok": true})];
        assert_eq!(encode(&rows).unwrap(), "sku,ok\n\"0042\",true\n");
    }

    #[test]
    fn test_products_use_field_order_and_round_trip() {
        let products = vec![
            Product::new(1, "Apple", 120.5, 10, 4, 20).with_day(2),
            Product::new(2, "Banana", 40.0, 0, 9, 31),
        ];
        let text = encode(&products).unwrap();
        assert!(text.starts_with("product_id,name,base_price,stock,sales_7,sales_30,day\n"));

        let back = decode_products(&text).unwrap();
        assert_eq!(back, products);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        let written = export_to(&path, &[Product::new(7, "Ghee", 550.0, 3, 2, 6)]).unwrap();
        assert_eq!(written, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Ghee\""));
    }

    #[test]
    fn test_export_to_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        let empty: Vec<Product> = Vec::new();
        assert!(export_to(&path, &empty).is_err());
        assert!(!path.exists());
    }
}
