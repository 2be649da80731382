use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single purchasable lead. `url` points at a retailer search-results page,
/// never a product page; `price` is a display string, not an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub title: String,
    pub store: String,
    #[serde(default = "default_price")]
    pub price: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_price() -> String {
    "Check Price".to_string()
}

/// One clothing item detected in the photo. Identity is positional within the
/// containing [`AnalysisResult`]; `products` stays empty until discovery runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub name: String,
    pub description: String,
    pub color: String,
    pub style: String,
    pub estimated_price: String,
    pub search_terms: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub items: Vec<ClothingItem>,
    pub overall_style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub path: PathBuf,
}
