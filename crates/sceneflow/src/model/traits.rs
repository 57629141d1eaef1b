//! Core traits for the screenplay list models.
//!
//! This module defines the indexed-list contract shared by [`Screenplay`]
//! and [`ScreenplayAdapter`], and the structural signals every list model
//! emits.
//!
//! [`Screenplay`]: super::Screenplay
//! [`ScreenplayAdapter`]: super::ScreenplayAdapter

use std::sync::Arc;

use sceneflow_core::Signal;

use super::element::ScreenplayElement;
use super::projector::{ElementData, ElementRole, FieldProjector};

/// An ordered, flat list of screenplay elements.
///
/// Rows are zero-based positions in the list. Out-of-range rows are never an
/// error: `element_at` yields `None` and `data` yields [`ElementData::None`].
pub trait ElementListModel: Send + Sync {
    /// Number of rows currently in the list.
    fn row_count(&self) -> usize;

    /// The element at `row`, if any.
    fn element_at(&self, row: usize) -> Option<Arc<ScreenplayElement>>;

    /// Projects a single field of the element at `row`.
    fn data(&self, row: usize, role: ElementRole) -> ElementData {
        FieldProjector::project(self.element_at(row).as_ref(), row, role)
    }

    /// Structural change signals for this list.
    fn signals(&self) -> &ModelSignals;
}

/// Signals emitted by list models around structural changes.
///
/// Every structural change is announced in two phases: an *about-to* signal
/// while the old rows are still in place, and a completion signal once the
/// new rows are visible. Row arguments are inclusive `(first, last)` ranges.
pub struct ModelSignals {
    /// Emitted just before rows are inserted.
    /// Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed.
    /// Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted before the model is reset.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about_to_be_inserted and inserted signals.
    pub fn emit_rows_inserted<F, R>(&self, first: usize, last: usize, insert_fn: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.rows_about_to_be_inserted.emit((first, last));
        let result = insert_fn();
        self.rows_inserted.emit((first, last));
        result
    }

    /// Emits signals for row removal.
    ///
    /// Calls the provided function between the about_to_be_removed and removed signals.
    pub fn emit_rows_removed<F, R>(&self, first: usize, last: usize, remove_fn: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.rows_about_to_be_removed.emit((first, last));
        let result = remove_fn();
        self.rows_removed.emit((first, last));
        result
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset signals.
    pub fn emit_reset<F, R>(&self, reset_fn: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.model_about_to_reset.emit(());
        let result = reset_fn();
        self.model_reset.emit(());
        result
    }

    /// Disconnects every observer from every signal.
    pub fn disconnect_all(&self) {
        self.rows_about_to_be_inserted.disconnect_all();
        self.rows_inserted.disconnect_all();
        self.rows_about_to_be_removed.disconnect_all();
        self.rows_removed.disconnect_all();
        self.model_about_to_reset.disconnect_all();
        self.model_reset.disconnect_all();
    }
}
