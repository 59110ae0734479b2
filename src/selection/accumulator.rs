//! Cross-page selection accumulation.
//!
//! The accumulator owns the [`SelectionMap`] and implements the two ways a
//! selection changes:
//!
//! - a full replace of one page's selection, used for row and page toggles;
//! - the bulk "select first N" operation, which appends from the current page
//!   buffer and, if the buffer is too short, spills into exactly one following
//!   page.
//!
//! A spill needs a fetch of the next page, so [`select_first_n`] only returns
//! a [`SpillRequest`]; the caller performs the fetch and hands the records
//! back through [`apply_spill`]. Each spill carries a generation and only the
//! most recently issued spill into a given page is applied; spills into
//! different pages never invalidate each other.
//!
//! [`select_first_n`]: SelectionAccumulator::select_first_n
//! [`apply_spill`]: SelectionAccumulator::apply_spill

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use tracing::debug;

use super::map::SelectionMap;
use crate::api::{Artwork, PageNumber};

/// A request to fill the remainder of a bulk selection from the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpillRequest {
    /// The page to fetch and select from.
    pub page: PageNumber,
    /// How many records to take from the start of that page.
    pub remaining: usize,
    /// Generation used to discard superseded spills.
    pub generation: u64,
}

/// What a bulk selection did on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    /// The page the selection was applied to.
    pub page: PageNumber,
    /// Number of records appended to that page's selection.
    pub appended: usize,
    /// Follow-up fetch needed to complete the selection, if any.
    pub spill: Option<SpillRequest>,
}

/// Result of applying a spill fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpillOutcome {
    /// The spill page's selection was replaced.
    Applied {
        /// The page written.
        page: PageNumber,
        /// Number of records now selected on it.
        selected: usize,
    },
    /// A newer spill was issued since this one; nothing was written.
    Stale,
}

/// Maintains the per-page selection and the bulk selection operation.
#[derive(Debug, Default)]
pub struct SelectionAccumulator {
    map: SelectionMap,
    /// Source of spill generations, shared by all pages.
    next_generation: u64,
    /// Generation of the most recent spill issued into each page.
    latest_spill: BTreeMap<PageNumber, u64>,
}

impl SelectionAccumulator {
    /// Create an accumulator with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the underlying selection map.
    pub fn map(&self) -> &SelectionMap {
        &self.map
    }

    /// Get the selection for a page.
    pub fn selection(&self, page: PageNumber) -> &[Artwork] {
        self.map.get(page)
    }

    /// Overwrite the selection for a page.
    ///
    /// The rows are trusted to come from a fetch of `page`.
    pub fn set_selection(&mut self, page: PageNumber, rows: Vec<Artwork>) {
        debug!(page = %page, count = rows.len(), "Replacing page selection");
        self.map.replace(page, rows);
    }

    /// Toggle one row on a page.
    ///
    /// Selecting appends the row; deselecting drops every row with its id.
    pub fn toggle_row(&mut self, page: PageNumber, row: &Artwork) {
        let current = self.map.get(page);
        let rows = if current.iter().any(|a| a.id == row.id) {
            current.iter().filter(|a| a.id != row.id).cloned().collect()
        } else {
            let mut rows = current.to_vec();
            rows.push(row.clone());
            rows
        };
        self.set_selection(page, rows);
    }

    /// Toggle every buffered row on a page.
    ///
    /// If all buffered rows are already selected the page becomes empty,
    /// otherwise its selection becomes the whole buffer.
    pub fn toggle_all(&mut self, page: PageNumber, buffer: &[Artwork]) {
        if buffer.is_empty() {
            return;
        }
        let all_selected = buffer.iter().all(|row| self.map.is_selected(page, row.id));
        let rows = if all_selected {
            Vec::new()
        } else {
            buffer.to_vec()
        };
        self.set_selection(page, rows);
    }

    /// Select the first `n` records starting from the current page.
    ///
    /// Records are taken from the full `buffer`, whatever their current
    /// selection state, and appended to the page's existing selection. If the
    /// buffer holds fewer than `n` records all of them are appended and a
    /// [`SpillRequest`] for the next page is returned for the shortfall.
    pub fn select_first_n(
        &mut self,
        current: PageNumber,
        buffer: &[Artwork],
        n: NonZeroUsize,
    ) -> SelectOutcome {
        let n = n.get();
        let taken = n.min(buffer.len());
        self.map.append(current, buffer[..taken].iter().cloned());

        let spill = if buffer.len() < n {
            self.next_generation += 1;
            let target = current.next();
            self.latest_spill.insert(target, self.next_generation);
            Some(SpillRequest {
                page: target,
                remaining: n - buffer.len(),
                generation: self.next_generation,
            })
        } else {
            None
        };

        debug!(
            page = %current,
            requested = n,
            appended = taken,
            spill = ?spill,
            "Applied bulk selection"
        );

        SelectOutcome {
            page: current,
            appended: taken,
            spill,
        }
    }

    /// Complete a spill with the records fetched for its page.
    ///
    /// The first `remaining` records replace whatever was selected on that
    /// page before. A spill superseded by a newer spill into the same page
    /// is discarded.
    pub fn apply_spill(&mut self, request: SpillRequest, fetched: &[Artwork]) -> SpillOutcome {
        let latest = self.latest_spill_generation(request.page);
        if latest != Some(request.generation) {
            debug!(
                page = %request.page,
                generation = request.generation,
                latest = ?latest,
                "Discarding superseded spill"
            );
            return SpillOutcome::Stale;
        }

        let rows: Vec<Artwork> = fetched.iter().take(request.remaining).cloned().collect();
        let selected = rows.len();
        self.map.replace(request.page, rows);

        SpillOutcome::Applied {
            page: request.page,
            selected,
        }
    }

    /// The generation of the most recent spill issued into `page`.
    pub fn latest_spill_generation(&self, page: PageNumber) -> Option<u64> {
        self.latest_spill.get(&page).copied()
    }
}
