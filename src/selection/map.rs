//! Per-page selection storage.

use std::collections::BTreeMap;

use crate::api::{Artwork, PageNumber};

/// Records marked selected, keyed by the page they were fetched on.
///
/// Entries are created lazily and survive page navigation. A page that has
/// never been touched reads as an empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    entries: BTreeMap<PageNumber, Vec<Artwork>>,
}

impl SelectionMap {
    /// Create an empty selection map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selection for a page, in selection order.
    pub fn get(&self, page: PageNumber) -> &[Artwork] {
        self.entries.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether an entry exists for a page (it may be empty).
    pub fn contains_page(&self, page: PageNumber) -> bool {
        self.entries.contains_key(&page)
    }

    /// Replace the entry for a page with `rows`, verbatim.
    pub fn replace(&mut self, page: PageNumber, rows: Vec<Artwork>) {
        self.entries.insert(page, rows);
    }

    /// Append `rows` to the entry for a page, creating it if needed.
    ///
    /// Rows already present are not deduplicated.
    pub fn append(&mut self, page: PageNumber, rows: impl IntoIterator<Item = Artwork>) {
        self.entries.entry(page).or_default().extend(rows);
    }

    /// Check whether a record id is selected on a page.
    pub fn is_selected(&self, page: PageNumber, id: u64) -> bool {
        self.get(page).iter().any(|a| a.id == id)
    }

    /// Total number of selected rows across all pages, duplicates included.
    pub fn total_selected(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Number of pages with at least one selected row.
    pub fn page_count(&self) -> usize {
        self.entries.values().filter(|rows| !rows.is_empty()).count()
    }

    /// Iterate over all entries in page order.
    pub fn iter(&self) -> impl Iterator<Item = (PageNumber, &[Artwork])> {
        self.entries.iter().map(|(page, rows)| (*page, rows.as_slice()))
    }

    /// Selected ids per non-empty page, keyed by the raw page number.
    pub fn selected_ids(&self) -> BTreeMap<u32, Vec<u64>> {
        self.iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(page, rows)| (page.get(), rows.iter().map(|a| a.id).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(id: u64) -> Artwork {
        Artwork {
            id,
            title: Some(format!("Artwork {}", id)),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[test]
    fn test_unvisited_page_is_empty() {
        let map = SelectionMap::new();
        assert!(map.get(page(1)).is_empty());
        assert!(map.get(page(4000)).is_empty());
        assert!(!map.contains_page(page(1)));
    }

    #[test]
    fn test_replace_overwrites_in_order() {
        let mut map = SelectionMap::new();
        map.replace(page(2), vec![artwork(1), artwork(2)]);
        map.replace(page(2), vec![artwork(9), artwork(3)]);

        let ids: Vec<u64> = map.get(page(2)).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![9, 3]);
    }

    #[test]
    fn test_replace_with_empty_keeps_entry() {
        let mut map = SelectionMap::new();
        map.replace(page(2), vec![artwork(1)]);
        map.replace(page(2), Vec::new());

        assert!(map.contains_page(page(2)));
        assert!(map.get(page(2)).is_empty());
        assert_eq!(map.page_count(), 0);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut map = SelectionMap::new();
        map.append(page(1), vec![artwork(1), artwork(2)]);
        map.append(page(1), vec![artwork(1)]);

        let ids: Vec<u64> = map.get(page(1)).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(map.total_selected(), 3);
    }

    #[test]
    fn test_pages_are_independent() {
        let mut map = SelectionMap::new();
        map.replace(page(1), vec![artwork(1)]);
        map.replace(page(3), vec![artwork(30), artwork(31)]);

        assert!(map.is_selected(page(1), 1));
        assert!(!map.is_selected(page(3), 1));
        assert_eq!(map.page_count(), 2);
        assert_eq!(map.total_selected(), 3);
    }

    #[test]
    fn test_selected_ids_skips_empty_pages() {
        let mut map = SelectionMap::new();
        map.replace(page(5), vec![artwork(50)]);
        map.replace(page(2), Vec::new());
        map.replace(page(1), vec![artwork(10), artwork(11)]);

        let ids = map.selected_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[&1], vec![10, 11]);
        assert_eq!(ids[&5], vec![50]);
    }
}
