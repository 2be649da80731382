use crate::types::Product;

/// Retailer search templates. These strings are load-bearing for persisted
/// fixtures; changing them is a compatibility break.
const RETAILERS: [(&str, &str); 4] = [
    ("Amazon", "https://www.amazon.com/s?k="),
    ("Nordstrom", "https://www.nordstrom.com/sr?keyword="),
    ("ASOS", "https://www.asos.com/us/search/?q="),
    ("Zara", "https://www.zara.com/us/en/search?searchTerm="),
];

/// Deterministic search links used when product discovery yields nothing
/// usable. Pure and total: always exactly four products.
pub fn build_fallback(search_terms: &str) -> Vec<Product> {
    let encoded = urlencoding::encode(search_terms);
    RETAILERS
        .iter()
        .map(|(store, template)| Product {
            title: format!("{store} Search"),
            store: (*store).to_string(),
            price: "Check Price".to_string(),
            url: format!("{template}{encoded}"),
            description: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_four_products_with_encoded_terms() {
        let products = build_fallback("blue denim jacket");
        assert_eq!(products.len(), 4);
        for product in &products {
            assert!(product.url.contains("blue%20denim%20jacket"), "{}", product.url);
            assert_eq!(product.price, "Check Price");
        }
        assert_eq!(products[0].store, "Amazon");
        assert_eq!(products[0].url, "https://www.amazon.com/s?k=blue%20denim%20jacket");
        assert_eq!(products[3].store, "Zara");
    }

    #[test]
    fn empty_terms_still_produce_valid_links() {
        let products = build_fallback("");
        assert_eq!(products.len(), 4);
        assert_eq!(products[1].url, "https://www.nordstrom.com/sr?keyword=");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_fallback("wool coat"), build_fallback("wool coat"));
    }
}
