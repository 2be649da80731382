use url::Url;

use stylescout_core::extract::extract_json;
use stylescout_core::fallback::build_fallback;
use stylescout_core::{ClothingItem, Product};

use crate::backend::GenerativeBackend;

pub fn discovery_prompt(item: &ClothingItem) -> String {
    format!(
        "For the clothing item described as \"{}\" (Search terms: \"{}\"), identify 3-4 major \
         retailers that likely carry this style (e.g., Nordstrom, Amazon, ASOS, Zara, H&M, \
         Revolve, Shopbop, etc.).\n\n\
         For each retailer, construct a VALID search URL that searches for these specific \
         keywords on their website. Do NOT try to find a specific product page URL (like \
         /product/123), as these often break. Instead, create a search results page URL \
         (like /search?q=keywords).\n\n\
         Return a JSON object with a \"products\" array.\n\n\
         Format:\n\
         ```json\n\
         {{\n\
           \"products\": [\n\
             {{ \"title\": \"Search for [Item Name] at [Store]\", \"store\": \"[Store Name]\", \
         \"price\": \"Check Price\", \"url\": \"https://www.retailer.com/search?q=encoded+keywords\", \
         \"description\": \"Click to see available options at [Store Name]\" }}\n\
           ]\n\
         }}\n\
         ```",
        item.description, item.search_terms
    )
}

/// Discover retailer leads for one item. Never fails: transport errors,
/// unextractable text, a missing or empty `products` array, and entries that
/// fail lenient validation all degrade to the deterministic fallback list, so
/// one item cannot abort the batch.
pub async fn discover_products(backend: &dyn GenerativeBackend, item: &ClothingItem) -> Vec<Product> {
    let text = match backend.grounded_search(&discovery_prompt(item)).await {
        Ok(text) => text,
        Err(_) => return build_fallback(&item.search_terms),
    };
    let products = parse_products(&text);
    if products.is_empty() {
        build_fallback(&item.search_terms)
    } else {
        products
    }
}

/// Lenient by policy: discovery output is advisory, not authoritative. An
/// entry survives if it deserializes and its URL is absolute http(s).
fn parse_products(text: &str) -> Vec<Product> {
    let Ok(value) = extract_json(text) else {
        return Vec::new();
    };
    let Some(entries) = value.get("products").and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<Product>(entry.clone()).ok())
        .filter(|product| is_absolute_http(&product.url))
        .collect()
}

fn is_absolute_http(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_products_reads_fenced_json() {
        let text = "Here you go:\n```json\n{\"products\": [{\"title\": \"Search at ASOS\", \
                    \"store\": \"ASOS\", \"price\": \"Check Price\", \
                    \"url\": \"https://www.asos.com/us/search/?q=jacket\"}]}\n```";
        let products = parse_products(text);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].store, "ASOS");
    }

    #[test]
    fn parse_products_rejects_relative_urls() {
        let text = r#"{"products": [{"title": "t", "store": "s", "url": "/search?q=jacket"}]}"#;
        assert!(parse_products(text).is_empty());
    }

    #[test]
    fn parse_products_defaults_missing_price() {
        let text = r#"{"products": [{"title": "t", "store": "s", "url": "https://a.example/s?q=x"}]}"#;
        let products = parse_products(text);
        assert_eq!(products[0].price, "Check Price");
    }

    #[test]
    fn parse_products_handles_non_array_products() {
        assert!(parse_products(r#"{"products": "none"}"#).is_empty());
        assert!(parse_products(r#"{"items": []}"#).is_empty());
        assert!(parse_products("not json at all").is_empty());
    }

    #[test]
    fn prompt_carries_description_and_terms() {
        let item = ClothingItem {
            name: "Jacket".to_string(),
            description: "blue denim jacket".to_string(),
            color: "blue".to_string(),
            style: "casual".to_string(),
            estimated_price: "$50-80".to_string(),
            search_terms: "blue casual jacket".to_string(),
            products: Vec::new(),
        };
        let prompt = discovery_prompt(&item);
        assert!(prompt.contains("blue denim jacket"));
        assert!(prompt.contains("blue casual jacket"));
        assert!(prompt.contains("search results page URL"));
    }
}
