//! artgrid - page through the Art Institute of Chicago collection in the
//! terminal and select artworks across pages.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod selection;
pub mod tasks;
pub mod ui;
