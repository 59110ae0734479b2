//! Artwork API client and types.
//!
//! This module provides the page data source backed by the Art Institute of
//! Chicago REST API.

mod client;
pub mod error;
mod source;
pub mod types;

pub use client::{ArticClient, DEFAULT_TIMEOUT_SECS, PAGE_SIZE};
pub use error::ApiError;
pub use source::PageSource;
pub use types::{Artwork, ArtworkPage, PageNumber};
