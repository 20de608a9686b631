//! In-memory product collection with a derived, paginated view.
//!
//! The fetched list is kept as the *source*. Sorting reorders the source in
//! place, so successive sorts compose: sorting by stock after price leaves
//! equal-stock products in price order. Filtering only rebuilds the
//! *visible* index list, so clearing the search term brings every product
//! back without another round-trip to the backend.

use tracing::debug;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::search::results::{PageCursor, PageInfo, PAGE_SIZE};
use crate::search::{NameFilter, SortKey};

/// The product list owned by one dashboard session.
#[derive(Debug, Clone)]
pub struct ProductCollection {
    source: Vec<Product>,
    visible: Vec<usize>,
    filter: NameFilter,
    sort: Option<SortKey>,
    cursor: PageCursor,
}

impl Default for ProductCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            source: Vec::new(),
            visible: Vec::new(),
            filter: NameFilter::default(),
            sort: None,
            cursor: PageCursor::new(page_size),
        }
    }

    /// Discard everything and store `items` as the new source.
    ///
    /// The search term is cleared and the cursor goes back to page 0. The
    /// last sort key is reapplied so a reload keeps the user's ordering.
    pub fn replace(&mut self, items: Vec<Product>) {
        self.source = items;
        self.filter = NameFilter::default();
        if let Some(key) = self.sort {
            self.source.sort_by(|a, b| key.compare(a, b));
        }
        self.rebuild();
        debug!(count = self.source.len(), "collection replaced");
    }

    /// Show only products whose name contains `term` (case-insensitive).
    /// An empty term shows everything again.
    pub fn filter(&mut self, term: impl Into<String>) {
        self.filter = NameFilter::new(term);
        self.rebuild();
    }

    pub fn clear_filter(&mut self) {
        self.filter(String::new());
    }

    /// Reorder the products by `key`. Stable, starting from the current
    /// order.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = Some(key);
        self.source.sort_by(|a, b| key.compare(a, b));
        self.rebuild();
    }

    /// Drop products, search term, sort key and cursor position.
    pub fn clear(&mut self) {
        self.source.clear();
        self.filter = NameFilter::default();
        self.sort = None;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.visible = self.filter.select(&self.source);
        self.cursor.reset();
    }

    pub fn search_term(&self) -> &str {
        self.filter.term()
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Number of visible products.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Number of fetched products, regardless of the filter.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Visible products in display order.
    pub fn items(&self) -> impl Iterator<Item = &Product> + '_ {
        self.visible.iter().map(move |&i| &self.source[i])
    }

    /// Owned copy of the visible products in display order.
    pub fn to_vec(&self) -> Vec<Product> {
        self.items().cloned().collect()
    }

    /// Look a fetched product up by id, ignoring the filter.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.source.iter().find(|p| p.product_id == id)
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Products on the current page.
    pub fn page(&self) -> Vec<&Product> {
        self.page_at(self.cursor.page(), self.cursor.page_size())
    }

    /// Products on an arbitrary page, clipped to the visible list.
    pub fn page_at(&self, page: usize, page_size: usize) -> Vec<&Product> {
        let range = super::results::page_range(page, page_size.max(1), self.len());
        self.visible[range].iter().map(|&i| &self.source[i]).collect()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages_for(self.cursor.page_size())
    }

    pub fn total_pages_for(&self, page_size: usize) -> usize {
        super::results::total_pages(self.len(), page_size)
    }

    pub fn page_info(&self) -> PageInfo {
        self.cursor.info(self.len())
    }

    /// Returns whether the cursor moved.
    pub fn next_page(&mut self) -> bool {
        let len = self.len();
        self.cursor.next(len)
    }

    /// Returns whether the cursor moved.
    pub fn previous_page(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.len();
        self.cursor.go_to(page, len);
    }
}
