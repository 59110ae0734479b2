//! User interface components and views.
//!
//! Rendering only. The application state lives in [`crate::app`] and is
//! passed in at draw time.

mod components;
pub mod theme;
mod views;

pub use components::{
    page_count, render_key_hints, LoadingIndicator, Notification, NotificationManager,
    NotificationType, NumberInput, Paginator, SelectCountAction, SelectCountPopup, HELP_HINTS,
    PAGE_LINK_SIZE, TABLE_HINTS,
};
pub use theme::Theme;
pub use views::{ArtworkTableView, HeaderCheck, HelpAction, HelpView};
