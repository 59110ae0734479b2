//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod notification;
mod paginator;
mod select_count;

pub use help_bar::{render_key_hints, HELP_HINTS, TABLE_HINTS};
pub use input::NumberInput;
pub use loading::LoadingIndicator;
pub use notification::{Notification, NotificationManager, NotificationType};
pub use paginator::{page_count, Paginator, PAGE_LINK_SIZE};
pub use select_count::{SelectCountAction, SelectCountPopup};
