//! The screenplay element registry.
//!
//! A [`Screenplay`] is the authoritative ordered collection of
//! [`ScreenplayElement`]s. Besides the elements it owns descriptive metadata
//! and the authoritative *current element index* (`-1` meaning no element is
//! current).
//!
//! Structural edits are announced through [`ModelSignals`] in two phases and
//! followed by `element_count_changed`. The current index is kept on the same
//! element across inserts and removals before it, and collapses to `-1` when
//! its element is removed. The index is already updated when the completion
//! signal fires; `current_element_index_changed` follows after it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sceneflow::model::{Scene, Screenplay, ScreenplayElement};
//!
//! let screenplay = Screenplay::new();
//! for title in ["Opening", "Chase", "Finale"] {
//!     let element = ScreenplayElement::for_scene(Arc::new(Scene::new(title)));
//!     screenplay.add_element(element).unwrap();
//! }
//!
//! screenplay.set_current_element_index(2);
//! screenplay.remove_element_at(0).unwrap();
//! assert_eq!(screenplay.current_element_index(), 1);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use sceneflow_core::logging::targets;
use sceneflow_core::{Property, Signal};

use super::element::{ElementType, ScreenplayElement};
use super::traits::{ElementListModel, ModelSignals};
use crate::error::{Error, Result};

/// Descriptive metadata of a screenplay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenplayMetadata {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub version: String,
}

/// The authoritative ordered collection of screenplay elements.
///
/// Always handled as `Arc<Screenplay>`; elements keep a weak back-reference
/// to it.
pub struct Screenplay {
    self_ref: Weak<Screenplay>,
    elements: RwLock<Vec<Arc<ScreenplayElement>>>,
    current_element_index: Property<i32>,
    has_non_standard_scenes: Property<bool>,
    title: Property<String>,
    subtitle: Property<String>,
    author: Property<String>,
    version: Property<String>,

    /// Two-phase structural change signals.
    pub signals: ModelSignals,
    /// Emitted with the new count after every structural change.
    pub element_count_changed: Signal<usize>,
    /// Emitted with the new authoritative current element index.
    pub current_element_index_changed: Signal<i32>,
    /// Emitted when the title changes.
    pub title_changed: Signal<String>,
    /// Emitted when the subtitle changes.
    pub subtitle_changed: Signal<String>,
    /// Emitted when the author changes.
    pub author_changed: Signal<String>,
    /// Emitted when the version changes.
    pub version_changed: Signal<String>,
    /// Emitted once after any metadata field changed.
    pub metadata_changed: Signal<()>,
    /// Emitted when [`has_non_standard_scenes`](Self::has_non_standard_scenes) flips.
    pub has_non_standard_scenes_changed: Signal<bool>,
    /// Emitted from `Drop`, while the screenplay can no longer be upgraded.
    pub about_to_destroy: Signal<()>,
}

impl Screenplay {
    /// Create an empty screenplay with empty metadata.
    pub fn new() -> Arc<Self> {
        Self::with_metadata(ScreenplayMetadata::default())
    }

    /// Create an empty screenplay with the given metadata.
    pub fn with_metadata(metadata: ScreenplayMetadata) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            elements: RwLock::new(Vec::new()),
            current_element_index: Property::new(-1),
            has_non_standard_scenes: Property::new(false),
            title: Property::new(metadata.title),
            subtitle: Property::new(metadata.subtitle),
            author: Property::new(metadata.author),
            version: Property::new(metadata.version),
            signals: ModelSignals::new(),
            element_count_changed: Signal::new(),
            current_element_index_changed: Signal::new(),
            title_changed: Signal::new(),
            subtitle_changed: Signal::new(),
            author_changed: Signal::new(),
            version_changed: Signal::new(),
            metadata_changed: Signal::new(),
            has_non_standard_scenes_changed: Signal::new(),
            about_to_destroy: Signal::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// The title.
    pub fn title(&self) -> String {
        self.title.get()
    }

    /// The subtitle.
    pub fn subtitle(&self) -> String {
        self.subtitle.get()
    }

    /// The author.
    pub fn author(&self) -> String {
        self.author.get()
    }

    /// The version.
    pub fn version(&self) -> String {
        self.version.get()
    }

    /// Set the title.
    pub fn set_title(&self, title: impl Into<String>) {
        if Self::store(&self.title, &self.title_changed, title.into()) {
            self.metadata_changed.emit(());
        }
    }

    /// Set the subtitle.
    pub fn set_subtitle(&self, subtitle: impl Into<String>) {
        if Self::store(&self.subtitle, &self.subtitle_changed, subtitle.into()) {
            self.metadata_changed.emit(());
        }
    }

    /// Set the author.
    pub fn set_author(&self, author: impl Into<String>) {
        if Self::store(&self.author, &self.author_changed, author.into()) {
            self.metadata_changed.emit(());
        }
    }

    /// Set the version.
    pub fn set_version(&self, version: impl Into<String>) {
        if Self::store(&self.version, &self.version_changed, version.into()) {
            self.metadata_changed.emit(());
        }
    }

    /// Snapshot of all metadata fields.
    pub fn metadata(&self) -> ScreenplayMetadata {
        ScreenplayMetadata {
            title: self.title(),
            subtitle: self.subtitle(),
            author: self.author(),
            version: self.version(),
        }
    }

    /// Replace all metadata fields, emitting `metadata_changed` at most once.
    pub fn set_metadata(&self, metadata: ScreenplayMetadata) {
        let mut changed = Self::store(&self.title, &self.title_changed, metadata.title);
        changed |= Self::store(&self.subtitle, &self.subtitle_changed, metadata.subtitle);
        changed |= Self::store(&self.author, &self.author_changed, metadata.author);
        changed |= Self::store(&self.version, &self.version_changed, metadata.version);
        if changed {
            self.metadata_changed.emit(());
        }
    }

    fn store(field: &Property<String>, signal: &Signal<String>, value: String) -> bool {
        if field.set(value.clone()) {
            signal.emit(value);
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Elements
    // -------------------------------------------------------------------------

    /// Number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.read().len()
    }

    /// The element at `row`, if any.
    pub fn element_at(&self, row: usize) -> Option<Arc<ScreenplayElement>> {
        self.elements.read().get(row).cloned()
    }

    /// Position of `element` in this screenplay.
    pub fn index_of_element(&self, element: &Arc<ScreenplayElement>) -> Option<usize> {
        self.elements
            .read()
            .iter()
            .position(|e| Arc::ptr_eq(e, element))
    }

    /// Snapshot of the element sequence.
    pub fn elements(&self) -> Vec<Arc<ScreenplayElement>> {
        self.elements.read().clone()
    }

    /// Append an element.
    pub fn add_element(&self, element: Arc<ScreenplayElement>) -> Result<()> {
        self.insert_element_at(self.element_count(), element)
    }

    /// Insert an element at `row`, shifting later elements down.
    ///
    /// `row` may equal the element count to append.
    pub fn insert_element_at(&self, row: usize, element: Arc<ScreenplayElement>) -> Result<()> {
        let len = self.element_count();
        if row > len {
            return Err(Error::row_out_of_range(row, len));
        }
        element.attach(&self.self_ref)?;

        let index_moved = self.signals.emit_rows_inserted(row, row, || {
            self.elements.write().insert(row, element);
            let current = self.current_element_index.get();
            current >= row as i32 && self.current_element_index.set(current + 1)
        });

        tracing::trace!(target: targets::MODEL, row, "element inserted");
        self.finish_structure_change(index_moved);
        Ok(())
    }

    /// Remove and return the element at `row`.
    pub fn remove_element_at(&self, row: usize) -> Result<Arc<ScreenplayElement>> {
        let len = self.element_count();
        if row >= len {
            return Err(Error::row_out_of_range(row, len));
        }

        let (removed, index_moved) = self.signals.emit_rows_removed(row, row, || {
            let removed = self.elements.write().remove(row);
            let current = self.current_element_index.get();
            let moved = if current == row as i32 {
                self.current_element_index.set(-1)
            } else if current > row as i32 {
                self.current_element_index.set(current - 1)
            } else {
                false
            };
            (removed, moved)
        });
        removed.detach();

        tracing::trace!(target: targets::MODEL, row, "element removed");
        self.finish_structure_change(index_moved);
        Ok(removed)
    }

    /// Remove a specific element.
    pub fn remove_element(&self, element: &Arc<ScreenplayElement>) -> Result<()> {
        let row = self.index_of_element(element).ok_or(Error::ElementNotFound)?;
        self.remove_element_at(row).map(|_| ())
    }

    /// Remove every element. Signalled as a reset.
    pub fn clear_elements(&self) {
        if self.element_count() == 0 {
            return;
        }

        let (removed, index_moved) = self.signals.emit_reset(|| {
            let removed = std::mem::take(&mut *self.elements.write());
            (removed, self.current_element_index.set(-1))
        });
        for element in &removed {
            element.detach();
        }

        tracing::trace!(target: targets::MODEL, count = removed.len(), "elements cleared");
        self.finish_structure_change(index_moved);
    }

    /// Move the element at `from` to position `to`. Signalled as a reset.
    ///
    /// The current element index follows the element it addressed.
    pub fn move_element(&self, from: usize, to: usize) -> Result<()> {
        let len = self.element_count();
        if from >= len {
            return Err(Error::row_out_of_range(from, len));
        }
        if to >= len {
            return Err(Error::row_out_of_range(to, len));
        }
        if from == to {
            return Ok(());
        }

        let index_moved = self.signals.emit_reset(|| {
            let mut elements = self.elements.write();
            let current = usize::try_from(self.current_element_index.get())
                .ok()
                .map(|row| elements[row].clone());
            let element = elements.remove(from);
            elements.insert(to, element);
            let new_index = current
                .and_then(|current| elements.iter().position(|e| Arc::ptr_eq(e, &current)))
                .map_or(-1, |row| row as i32);
            drop(elements);
            self.current_element_index.set(new_index)
        });

        tracing::trace!(target: targets::MODEL, from, to, "element moved");
        self.finish_structure_change(index_moved);
        Ok(())
    }

    /// Place `element` without announcing it.
    ///
    /// Only for collections nobody observes yet; the element must be fresh.
    pub(crate) fn adopt(&self, element: Arc<ScreenplayElement>) {
        match element.attach(&self.self_ref) {
            Ok(()) => self.elements.write().push(element),
            Err(err) => tracing::warn!(target: targets::MODEL, %err, "element not adopted"),
        }
        self.has_non_standard_scenes
            .set_silent(self.compute_non_standard_scenes());
    }

    fn finish_structure_change(&self, index_moved: bool) {
        self.element_count_changed.emit(self.element_count());
        if index_moved {
            self.current_element_index_changed
                .emit(self.current_element_index.get());
        }
        self.refresh_non_standard_scenes();
    }

    // -------------------------------------------------------------------------
    // Current element
    // -------------------------------------------------------------------------

    /// The authoritative current element index, `-1` when none.
    pub fn current_element_index(&self) -> i32 {
        self.current_element_index.get()
    }

    /// Set the current element index.
    ///
    /// The value is clamped into `[-1, element_count - 1]`. Nothing is emitted
    /// when the clamped value equals the current one.
    pub fn set_current_element_index(&self, index: i32) {
        let count = self.element_count() as i32;
        let index = if count > 0 { index.clamp(-1, count - 1) } else { -1 };
        if self.current_element_index.set(index) {
            self.current_element_index_changed.emit(index);
        }
    }

    /// The element at the current index.
    pub fn current_element(&self) -> Option<Arc<ScreenplayElement>> {
        usize::try_from(self.current_element_index())
            .ok()
            .and_then(|row| self.element_at(row))
    }

    // -------------------------------------------------------------------------
    // Scene queries
    // -------------------------------------------------------------------------

    /// Whether any element wraps a non-standard scene.
    pub fn has_non_standard_scenes(&self) -> bool {
        self.has_non_standard_scenes.get()
    }

    fn compute_non_standard_scenes(&self) -> bool {
        self.elements
            .read()
            .iter()
            .any(|e| e.is_non_standard_scene())
    }

    fn refresh_non_standard_scenes(&self) {
        let value = self.compute_non_standard_scenes();
        if self.has_non_standard_scenes.set(value) {
            self.has_non_standard_scenes_changed.emit(value);
        }
    }

    /// Index of the nearest scene element before the current one.
    ///
    /// Falls back to the current index, or `0` when there is none.
    pub fn previous_scene_element_index(&self) -> i32 {
        let current = self.current_element_index();
        let elements = self.elements.read();
        let end = usize::try_from(current).unwrap_or(0).min(elements.len());
        elements[..end]
            .iter()
            .rposition(|e| e.element_type() == ElementType::Scene)
            .map_or(current.max(0), |row| row as i32)
    }

    /// Index of the nearest scene element after the current one.
    ///
    /// Falls back to the current index, or `0` when there is none.
    pub fn next_scene_element_index(&self) -> i32 {
        let current = self.current_element_index();
        let elements = self.elements.read();
        let start = usize::try_from(current + 1).unwrap_or(0).min(elements.len());
        elements[start..]
            .iter()
            .position(|e| e.element_type() == ElementType::Scene)
            .map_or(current.max(0), |offset| (start + offset) as i32)
    }
}

impl ElementListModel for Screenplay {
    fn row_count(&self) -> usize {
        self.element_count()
    }

    fn element_at(&self, row: usize) -> Option<Arc<ScreenplayElement>> {
        Screenplay::element_at(self, row)
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

impl Drop for Screenplay {
    fn drop(&mut self) {
        tracing::trace!(target: targets::MODEL, "screenplay destroyed");
        self.about_to_destroy.emit(());
    }
}

impl fmt::Debug for Screenplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screenplay")
            .field("title", &self.title())
            .field("element_count", &self.element_count())
            .field("current_element_index", &self.current_element_index())
            .finish()
    }
}

static_assertions::assert_impl_all!(Screenplay: Send, Sync);
