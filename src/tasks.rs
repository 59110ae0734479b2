//! Background fetches for the table.
//!
//! Page fetches run as tokio tasks so the UI keeps rendering while a request
//! is in flight. The flow is:
//! 1. `App` queues a [`FetchRequest`] (page navigation or a bulk-select spill)
//! 2. The main loop drains the queue and hands each request to [`TaskSpawner`]
//! 3. The task awaits the [`PageSource`] and sends an [`ApiMessage`] back
//! 4. The main loop polls the channel with `try_recv()` and passes results to
//!    `App::handle_api_message`
//!
//! Tasks are never cancelled. Each request carries a generation so that the
//! app can ignore results that were superseded while in flight.

use tokio::sync::mpsc;
use tracing::trace;

use crate::api::{ArtworkPage, PageNumber, PageSource};
use crate::selection::SpillRequest;

/// A fetch the app wants performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    /// Load the records for the active page.
    Page {
        /// The page to load.
        page: PageNumber,
        /// Navigation generation at the time of the request.
        generation: u64,
    },
    /// Fetch the page following a bulk selection that ran short.
    Spill(SpillRequest),
}

impl FetchRequest {
    /// The page this request fetches.
    pub fn page(&self) -> PageNumber {
        match self {
            FetchRequest::Page { page, .. } => *page,
            FetchRequest::Spill(spill) => spill.page,
        }
    }
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Records for a navigated-to page.
    PageFetched {
        page: PageNumber,
        generation: u64,
        result: ArtworkPage,
    },

    /// Records for the page a bulk selection spilled into.
    SpillFetched {
        request: SpillRequest,
        result: ArtworkPage,
    },
}

/// Spawns fetch tasks that report back over a channel.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn the task for a queued request.
    pub fn spawn<S: PageSource>(&self, source: &S, request: FetchRequest) {
        trace!(page = %request.page(), ?request, "Spawning fetch");
        match request {
            FetchRequest::Page { page, generation } => {
                self.spawn_fetch_page(source, page, generation)
            }
            FetchRequest::Spill(spill) => self.spawn_fetch_spill(source, spill),
        }
    }

    /// Spawn a task to load a page for display.
    pub fn spawn_fetch_page<S: PageSource>(&self, source: &S, page: PageNumber, generation: u64) {
        let tx = self.tx.clone();
        let source = source.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(page).await;
            trace!(page = %page, generation, "Page fetch finished");
            let _ = tx.send(ApiMessage::PageFetched {
                page,
                generation,
                result,
            });
        });
    }

    /// Spawn a task to fetch the page a bulk selection spills into.
    pub fn spawn_fetch_spill<S: PageSource>(&self, source: &S, request: SpillRequest) {
        let tx = self.tx.clone();
        let source = source.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(request.page).await;
            trace!(page = %request.page, generation = request.generation, "Spill fetch finished");
            let _ = tx.send(ApiMessage::SpillFetched { request, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
