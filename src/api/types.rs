//! Artwork API request and response types.
//!
//! These types model the subset of the `/artworks` listing response that the
//! table consumes. Everything else the API returns is ignored.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Fields requested from the API; also the only fields deserialized.
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

/// A 1-based page number.
///
/// The sole key into both the page source and the selection map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Create a page number, rejecting zero.
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// The raw 1-based value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The page immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The page immediately before this one, if any.
    pub fn prev(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single artwork row.
///
/// Every display field may be `null` in the API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// The artwork's numeric id.
    pub id: u64,
    /// The artwork title.
    #[serde(default)]
    pub title: Option<String>,
    /// Where the artwork was made.
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Artist name with dates and nationality, possibly multi-line.
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscription text.
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// Year the work was started.
    #[serde(default)]
    pub date_start: Option<i32>,
    /// Year the work was completed.
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Get the title for display, or an empty string.
    pub fn title_display(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Get the place of origin for display, or an empty string.
    pub fn origin_display(&self) -> &str {
        self.place_of_origin.as_deref().unwrap_or("")
    }

    /// Get the first line of the artist credit.
    pub fn artist_line(&self) -> &str {
        self.artist_display
            .as_deref()
            .and_then(|s| s.lines().next())
            .unwrap_or("")
    }

    /// Get the inscriptions on a single line.
    pub fn inscriptions_line(&self) -> String {
        self.inscriptions
            .as_deref()
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title_display())
    }
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of records across all pages.
    #[serde(default)]
    pub total: u64,
}

/// One page of artworks.
///
/// Returned by `GET /artworks?page={n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkPage {
    /// The records on this page, in API order.
    #[serde(default)]
    pub data: Vec<Artwork>,
    /// Pagination info.
    #[serde(default)]
    pub pagination: Pagination,
}

impl ArtworkPage {
    /// The sentinel returned when a fetch fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total record count reported by the API.
    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    /// Check whether this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
