//! Name search filter.

use crate::catalog::Product;

/// Case-insensitive substring filter on product names.
///
/// An empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    term: String,
    folded: String,
}

impl NameFilter {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let folded = term.to_lowercase();
        Self { term, folded }
    }

    /// The term as the user typed it.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty() || product.name_contains(&self.folded)
    }

    /// Indices of matching products, in their original relative order.
    pub fn select(&self, products: &[Product]) -> Vec<usize> {
        products
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(names: &[&str]) -> Vec<Product> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Product::new(i as i64 + 1, *n, 10.0, 1, 1, 1))
            .collect()
    }

    #[test]
    fn test_substring_case_insensitive_keeps_order() {
        let items = products(&["Apple", "banana", "Pineapple"]);
        let filter = NameFilter::new("apple");
        assert_eq!(filter.select(&items), vec![0, 2]);
    }

    #[test]
    fn test_uppercase_term() {
        let items = products(&["Apple", "banana", "Pineapple"]);
        assert_eq!(NameFilter::new("BAN").select(&items), vec![1]);
    }

    #[test]
    fn test_empty_term_matches_all() {
        let items = products(&["Apple", "banana"]);
        let filter = NameFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.select(&items), vec![0, 1]);
    }

    #[test]
    fn test_no_match() {
        let items = products(&["Apple", "banana"]);
        assert!(NameFilter::new("kiwi").select(&items).is_empty());
    }
}
