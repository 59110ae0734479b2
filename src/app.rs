//! Main application state and update logic.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. `App` never performs I/O itself:
//! fetches it needs are queued as [`FetchRequest`]s and drained by the main
//! loop with [`App::take_pending_fetches`], and their results come back
//! through [`App::handle_api_message`].

use std::num::NonZeroUsize;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::api::{Artwork, PageNumber, PAGE_SIZE};
use crate::events::{Action, Event, KeyBindings};
use crate::selection::{SelectionAccumulator, SelectionMap, SpillOutcome};
use crate::tasks::{ApiMessage, FetchRequest};
use crate::ui::{
    render_key_hints, ArtworkTableView, HelpAction, HelpView, LoadingIndicator,
    NotificationManager, Paginator, SelectCountAction, SelectCountPopup, HELP_HINTS,
    TABLE_HINTS,
};

/// The current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browsing the artwork table.
    #[default]
    Browsing,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    state: AppState,
    should_quit: bool,
    /// The active page.
    page: PageNumber,
    /// Records loaded for the active page. Empty while loading.
    buffer: Vec<Artwork>,
    /// Total record count from the most recently applied page fetch.
    total: u64,
    /// Set once any page fetch has been applied; until then `total` is a guess.
    total_known: bool,
    /// Bumped on every navigation; page results from older generations are dropped.
    page_generation: u64,
    page_loading: bool,
    selection: SelectionAccumulator,
    /// Fetches waiting to be spawned by the main loop.
    pending: Vec<FetchRequest>,
    table: ArtworkTableView,
    select_count: SelectCountPopup,
    help: HelpView,
    notifications: NotificationManager,
    loading: LoadingIndicator,
    bindings: KeyBindings,
}

impl App {
    /// Create the application and queue the load of `start_page`.
    ///
    /// The start page is not clamped; the total is unknown until the first
    /// fetch completes.
    pub fn new(start_page: PageNumber, bindings: KeyBindings) -> Self {
        debug!(page = %start_page, vim_mode = bindings.vim_mode, "Creating application");

        let mut app = Self {
            state: AppState::Browsing,
            should_quit: false,
            page: start_page,
            buffer: Vec::new(),
            total: 0,
            total_known: false,
            page_generation: 0,
            page_loading: false,
            selection: SelectionAccumulator::new(),
            pending: Vec::new(),
            table: ArtworkTableView::new(),
            select_count: SelectCountPopup::new(),
            help: HelpView::new(bindings),
            notifications: NotificationManager::new(),
            loading: LoadingIndicator::new(),
            bindings,
        };
        app.load_page(start_page);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The active page.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Records loaded for the active page.
    pub fn buffer(&self) -> &[Artwork] {
        &self.buffer
    }

    /// Total record count reported by the last applied fetch.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check if the active page is still being fetched.
    pub fn is_page_loading(&self) -> bool {
        self.page_loading
    }

    /// The selection across all pages.
    pub fn selection(&self) -> &SelectionMap {
        self.selection.map()
    }

    /// The selection for the active page.
    pub fn current_selection(&self) -> &[Artwork] {
        self.selection.selection(self.page)
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Check if the select-count popup is open.
    pub fn is_select_count_visible(&self) -> bool {
        self.select_count.is_visible()
    }

    /// Pagination for the active page and current total.
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page, self.total, PAGE_SIZE)
    }

    /// Take the fetches queued since the last call.
    pub fn take_pending_fetches(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Navigate to `target`, clamped to the known page range.
    ///
    /// Before the first page load completes the range is unknown and the
    /// target is taken as is. Navigating to the active page is a no-op.
    pub fn go_to_page(&mut self, target: PageNumber) {
        let target = if self.total_known {
            self.paginator().clamp(target)
        } else {
            target
        };
        if target == self.page {
            trace!(page = %target, "Already on page");
            return;
        }
        info!(from = %self.page, to = %target, "Navigating");
        self.load_page(target);
    }

    fn load_page(&mut self, page: PageNumber) {
        self.page = page;
        self.buffer.clear();
        self.page_generation += 1;
        self.page_loading = true;
        self.table.reset_cursor();
        self.loading
            .start_with_message(format!("Loading page {}...", page));
        self.pending.push(FetchRequest::Page {
            page,
            generation: self.page_generation,
        });
    }

    /// Apply the result of a background fetch.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::PageFetched {
                page,
                generation,
                result,
            } => {
                if generation != self.page_generation {
                    debug!(
                        page = %page,
                        generation,
                        latest = self.page_generation,
                        "Dropping stale page result"
                    );
                    return;
                }
                debug!(page = %page, rows = result.data.len(), total = result.total(), "Page loaded");
                self.total = result.total();
                self.total_known = true;
                self.buffer = result.data;
                self.page_loading = false;
                self.loading.stop();
                self.table.clamp_cursor(self.buffer.len());
            }
            ApiMessage::SpillFetched { request, result } => {
                match self.selection.apply_spill(request, &result.data) {
                    SpillOutcome::Applied { page, selected } => {
                        info!(page = %page, selected, "Bulk selection continued onto next page");
                        self.notifications
                            .success(format!("Selected {} rows on page {}", selected, page));
                    }
                    SpillOutcome::Stale => {}
                }
            }
        }
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // The popup captures all input while open.
        if self.select_count.is_visible() {
            match self.select_count.handle_input(key) {
                Some(SelectCountAction::Submit(n)) => self.select_first_n(n),
                Some(SelectCountAction::Invalid) => {
                    self.notifications.warning("Enter a positive number of rows");
                }
                Some(SelectCountAction::Cancel) => debug!("Bulk selection cancelled"),
                None => {}
            }
            return;
        }

        match self.state {
            AppState::Browsing => {
                if let Some(action) = self.bindings.resolve(key) {
                    self.handle_action(action);
                }
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help.handle_input(key) {
                    self.state = AppState::Browsing;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_action(&mut self, action: Action) {
        let paginator = self.paginator();
        match action {
            Action::CursorDown => self.table.move_down(self.buffer.len()),
            Action::CursorUp => self.table.move_up(),
            Action::ToggleRow => {
                if let Some(row) = self.buffer.get(self.table.cursor()) {
                    self.selection.toggle_row(self.page, row);
                }
            }
            Action::ToggleAll => self.selection.toggle_all(self.page, &self.buffer),
            Action::OpenSelectCount => {
                if self.page_loading {
                    self.notifications
                        .warning("Page is still loading, try again in a moment");
                } else {
                    self.select_count.show();
                }
            }
            Action::FirstPage => self.go_to_page(PageNumber::FIRST),
            Action::PrevPage => {
                if let Some(prev) = self.page.prev() {
                    self.go_to_page(prev);
                }
            }
            Action::NextPage => self.go_to_page(self.page.next()),
            // Both depend on the page count, which needs a completed load.
            Action::LastPage | Action::PageLink(_) if !self.total_known => {
                trace!(?action, "Page range not known yet");
            }
            Action::LastPage => self.go_to_page(paginator.last_page()),
            Action::PageLink(index) => {
                if let Some(page) = paginator.link(index) {
                    self.go_to_page(page);
                }
            }
            Action::Help => {
                self.help.reset_scroll();
                self.state = AppState::Help;
            }
            Action::Quit => self.quit(),
        }
    }

    /// Run the bulk "select first N" from the active page.
    fn select_first_n(&mut self, n: NonZeroUsize) {
        if self.page_loading {
            self.notifications
                .warning("Page is still loading, try again in a moment");
            return;
        }

        let outcome = self.selection.select_first_n(self.page, &self.buffer, n);
        match outcome.spill {
            Some(spill) => {
                self.notifications.info(format!(
                    "Selected {} rows, fetching page {} for {} more",
                    outcome.appended, spill.page, spill.remaining
                ));
                self.pending.push(FetchRequest::Spill(spill));
            }
            None => {
                self.notifications.success(format!(
                    "Selected {} rows on page {}",
                    outcome.appended, outcome.page
                ));
            }
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Paginator
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match self.state {
            AppState::Help => {
                self.help.render(frame, chunks[1]);
                render_key_hints(frame, chunks[4], HELP_HINTS);
            }
            AppState::Browsing | AppState::Exiting => {
                if self.page_loading {
                    self.render_loading(frame, chunks[1]);
                } else {
                    let title = format!("Artworks · page {}", self.page);
                    self.table.render(
                        frame,
                        chunks[1],
                        &self.buffer,
                        self.selection.selection(self.page),
                        &title,
                    );
                }
                render_key_hints(frame, chunks[4], TABLE_HINTS);
            }
        }

        self.paginator().render(frame, chunks[2]);
        self.render_status(frame, chunks[3]);

        self.select_count.render(frame, area);
        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                " artgrid ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Art Institute of Chicago collection",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let center = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        self.loading.render(frame, center[1]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let map = self.selection.map();
        let status = Line::from(vec![
            Span::styled(
                format!(" {} selected on this page ", self.current_selection().len()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!(
                    "· {} selected across {} pages",
                    map.total_selected(),
                    map.page_count()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ArtworkPage;
    use crate::api::types::Pagination;
    use ratatui::{backend::TestBackend, Terminal};

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

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

    fn records(ids: std::ops::Range<u64>, total: u64) -> ArtworkPage {
        ArtworkPage {
            data: ids.map(artwork).collect(),
            pagination: Pagination { total },
        }
    }

    fn ids(rows: &[Artwork]) -> Vec<u64> {
        rows.iter().map(|a| a.id).collect()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Complete the single pending page fetch with `result`.
    fn complete_page(app: &mut App, result: ArtworkPage) {
        let mut pending = app.take_pending_fetches();
        assert_eq!(pending.len(), 1);
        match pending.remove(0) {
            FetchRequest::Page { page, generation } => {
                app.handle_api_message(ApiMessage::PageFetched {
                    page,
                    generation,
                    result,
                })
            }
            other => panic!("expected page fetch, got {:?}", other),
        }
    }

    /// App on page 1 with 12 records (ids 1..=12) out of 120.
    fn loaded_app() -> App {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, records(1..13, 120));
        app
    }

    fn open_and_submit(app: &mut App, count: &str) {
        app.update(key(KeyCode::Char('n')));
        for c in count.chars() {
            app.update(key(KeyCode::Char(c)));
        }
        app.update(key(KeyCode::Enter));
    }

    #[test]
    fn test_app_new_queues_start_page() {
        let mut app = App::new(page(4), KeyBindings::default());
        assert_eq!(app.state(), AppState::Browsing);
        assert!(!app.should_quit());
        assert!(app.is_page_loading());
        assert_eq!(app.page(), page(4));
        assert_eq!(
            app.take_pending_fetches(),
            vec![FetchRequest::Page {
                page: page(4),
                generation: 1
            }]
        );
        assert!(app.take_pending_fetches().is_empty());
    }

    #[test]
    fn test_page_fetch_fills_buffer() {
        let app = loaded_app();
        assert!(!app.is_page_loading());
        assert_eq!(app.buffer().len(), 12);
        assert_eq!(app.total(), 120);
        assert_eq!(app.paginator().page_count(), 10);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);

        let mut app = loaded_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_help_opens_and_closes() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('?')));
        assert_eq!(app.state(), AppState::Help);

        // Table keys are inert while help is open.
        app.update(key(KeyCode::Char(' ')));
        assert!(app.current_selection().is_empty());

        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Browsing);
    }

    #[test]
    fn test_unvisited_page_has_empty_selection() {
        let app = loaded_app();
        assert!(app.selection().get(page(7)).is_empty());
    }

    #[test]
    fn test_toggle_row_under_cursor() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Char(' ')));
        assert_eq!(ids(app.current_selection()), vec![2]);

        app.update(key(KeyCode::Char(' ')));
        assert!(app.current_selection().is_empty());
    }

    #[test]
    fn test_toggle_all_rows() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('a')));
        assert_eq!(ids(app.current_selection()), (1..13).collect::<Vec<_>>());

        app.update(key(KeyCode::Char('a')));
        assert!(app.current_selection().is_empty());
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char(' ')));

        app.update(key(KeyCode::Right));
        assert_eq!(app.page(), page(2));
        assert!(app.buffer().is_empty());
        assert!(app.current_selection().is_empty());
        complete_page(&mut app, records(13..25, 120));

        app.update(key(KeyCode::Left));
        complete_page(&mut app, records(1..13, 120));
        assert_eq!(ids(app.current_selection()), vec![1]);
    }

    #[test]
    fn test_navigation_clamped_to_last_page() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, records(1..13, 30));

        app.update(key(KeyCode::End));
        assert_eq!(app.page(), page(3));
        complete_page(&mut app, records(25..31, 30));

        app.update(key(KeyCode::Right));
        assert_eq!(app.page(), page(3));
        assert!(app.take_pending_fetches().is_empty());
    }

    #[test]
    fn test_navigation_with_zero_total_stays_on_first_page() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, ArtworkPage::empty());

        app.update(key(KeyCode::Right));
        assert_eq!(app.page(), PageNumber::FIRST);
        assert!(app.take_pending_fetches().is_empty());
    }

    #[test]
    fn test_navigation_before_first_load_is_not_clamped() {
        let mut app = App::new(page(5), KeyBindings::default());
        app.take_pending_fetches();

        app.update(key(KeyCode::Char('h')));
        assert_eq!(app.page(), page(4));

        // Last page and page links wait for the page count.
        app.update(key(KeyCode::End));
        app.update(key(KeyCode::Char('1')));
        assert_eq!(app.page(), page(4));
        assert_eq!(app.take_pending_fetches().len(), 1);
    }

    #[test]
    fn test_page_link_navigation() {
        let mut app = loaded_app();
        // Links on page 1 of 10 are 1..=5; the fourth is page 4.
        app.update(key(KeyCode::Char('4')));
        assert_eq!(app.page(), page(4));
    }

    #[test]
    fn test_stale_page_result_dropped() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Right));
        let first = app.take_pending_fetches();
        app.update(key(KeyCode::Right));
        complete_page(&mut app, records(25..37, 120));
        assert_eq!(app.page(), page(3));

        // The page 2 response arrives late.
        if let FetchRequest::Page { page, generation } = first[0] {
            app.handle_api_message(ApiMessage::PageFetched {
                page,
                generation,
                result: records(13..25, 120),
            });
        }
        assert_eq!(app.buffer()[0].id, 25);
    }

    #[test]
    fn test_failed_fetch_leaves_selection_untouched() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('a')));

        app.update(key(KeyCode::Right));
        complete_page(&mut app, ArtworkPage::empty());
        assert_eq!(app.total(), 0);
        assert!(app.buffer().is_empty());
        assert_eq!(app.selection().get(PageNumber::FIRST).len(), 12);
    }

    #[test]
    fn test_select_first_n_within_page() {
        let mut app = loaded_app();
        open_and_submit(&mut app, "5");

        assert!(!app.is_select_count_visible());
        assert_eq!(ids(app.current_selection()), vec![1, 2, 3, 4, 5]);
        assert!(app.take_pending_fetches().is_empty());
    }

    #[test]
    fn test_select_first_n_spills_into_next_page() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, records(1..9, 8));
        open_and_submit(&mut app, "10");

        assert_eq!(ids(app.current_selection()), (1..9).collect::<Vec<_>>());
        let pending = app.take_pending_fetches();
        let FetchRequest::Spill(request) = pending[0] else {
            panic!("expected spill fetch");
        };
        assert_eq!(request.page, page(2));
        assert_eq!(request.remaining, 2);

        app.handle_api_message(ApiMessage::SpillFetched {
            request,
            result: records(100..112, 8),
        });
        assert_eq!(ids(app.selection().get(page(2))), vec![100, 101]);
        // The active page is unchanged.
        assert_eq!(app.page(), PageNumber::FIRST);
    }

    #[test]
    fn test_superseded_spill_discarded() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, records(1..9, 8));

        open_and_submit(&mut app, "10");
        let first = app.take_pending_fetches();
        open_and_submit(&mut app, "9");
        let second = app.take_pending_fetches();

        let (FetchRequest::Spill(old), FetchRequest::Spill(new)) = (first[0], second[0]) else {
            panic!("expected spill fetches");
        };
        app.handle_api_message(ApiMessage::SpillFetched {
            request: new,
            result: records(100..112, 8),
        });
        app.handle_api_message(ApiMessage::SpillFetched {
            request: old,
            result: records(100..112, 8),
        });
        assert_eq!(ids(app.selection().get(page(2))), vec![100]);
    }

    #[test]
    fn test_spills_from_different_pages_both_land() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        complete_page(&mut app, records(1..9, 120));
        open_and_submit(&mut app, "10");
        let FetchRequest::Spill(to_page_2) = app.take_pending_fetches()[0] else {
            panic!("expected spill fetch");
        };

        app.update(key(KeyCode::Char('5')));
        assert_eq!(app.page(), page(5));
        complete_page(&mut app, records(50..58, 120));
        open_and_submit(&mut app, "10");
        let FetchRequest::Spill(to_page_6) = app.take_pending_fetches()[0] else {
            panic!("expected spill fetch");
        };

        app.handle_api_message(ApiMessage::SpillFetched {
            request: to_page_6,
            result: records(60..72, 120),
        });
        app.handle_api_message(ApiMessage::SpillFetched {
            request: to_page_2,
            result: records(100..112, 120),
        });

        assert_eq!(ids(app.selection().get(PageNumber::FIRST)), (1..9).collect::<Vec<_>>());
        assert_eq!(ids(app.selection().get(page(2))), vec![100, 101]);
        assert_eq!(ids(app.selection().get(page(6))), vec![60, 61]);
    }

    #[test]
    fn test_invalid_count_keeps_popup_open() {
        let mut app = loaded_app();
        open_and_submit(&mut app, "0");

        assert!(app.is_select_count_visible());
        assert!(app.current_selection().is_empty());
        assert!(app
            .notifications()
            .iter()
            .any(|n| n.message.contains("positive")));

        app.update(key(KeyCode::Esc));
        assert!(!app.is_select_count_visible());
    }

    #[test]
    fn test_select_count_rejected_while_loading() {
        let mut app = App::new(PageNumber::FIRST, KeyBindings::default());
        app.update(key(KeyCode::Char('n')));
        assert!(!app.is_select_count_visible());
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_render_loaded_table() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char(' ')));

        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Artwork 1"));
        assert!(text.contains("Page 1 of 10"));
        assert!(text.contains("1 selected on this page"));
    }
}
