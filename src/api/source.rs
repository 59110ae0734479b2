//! The page data source seam.

use std::future::Future;

use super::types::{ArtworkPage, PageNumber};

/// Something that can produce a page of artworks for a 1-based page number.
///
/// Implementations never fail: a fetch error is logged and surfaced as
/// [`ArtworkPage::empty`], so callers only ever see "no records, total 0".
pub trait PageSource: Clone + Send + Sync + 'static {
    /// Fetch the records for `page` together with the total record count.
    fn fetch_page(&self, page: PageNumber) -> impl Future<Output = ArtworkPage> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Artwork, Pagination};

    /// Echoes the page number back as the single record id.
    #[derive(Clone)]
    struct EchoSource;

    impl PageSource for EchoSource {
        async fn fetch_page(&self, page: PageNumber) -> ArtworkPage {
            ArtworkPage {
                data: vec![Artwork {
                    id: u64::from(page.get()),
                    title: None,
                    place_of_origin: None,
                    artist_display: None,
                    inscriptions: None,
                    date_start: None,
                    date_end: None,
                }],
                pagination: Pagination { total: 1 },
            }
        }
    }

    #[test]
    fn test_source_keyed_by_page_number() {
        let page = PageNumber::new(3).unwrap();
        let result = tokio_test::block_on(EchoSource.fetch_page(page));
        assert_eq!(result.data[0].id, 3);
        assert_eq!(result.total(), 1);
    }
}
