//! The screenplay list adapter.
//!
//! [`ScreenplayAdapter`] presents either a whole [`Screenplay`] or a single
//! [`Scene`] through one indexed-list contract. A bare scene is wrapped in a
//! one-element screenplay synthesized by [`SyntheticScreenplay`], which the
//! adapter owns until the next [`set_source`](ScreenplayAdapter::set_source)
//! call, when it is handed to a [`DeferredQueue`] for reclamation.
//!
//! # Current index
//!
//! The adapter keeps a cached current index in `[-1, row_count - 1]` and the
//! element it addresses. When backed by a borrowed screenplay the index is
//! synchronized in both directions with the screenplay's authoritative
//! current element index. Both edges are no-op guarded, so the wiring cannot
//! loop.
//!
//! Structural changes are handled by clearing and restoring: the about-to
//! phase of an insert, remove or reset silently drops the index to `-1`, and
//! the completion phase restores it from the screenplay. Change signals fire
//! once, and only when the restored index or element differs from the one
//! before the edit. The transient `-1` never reaches the screenplay. The
//! adapter re-emits the backing screenplay's structural signals on its own
//! [`ModelSignals`] after handling them, so its observers always see the
//! updated index.
//!
//! # Reclamation
//!
//! A superseded synthesized screenplay is not dropped inside the notification
//! turn that replaced it. An adapter with its own queue drains it when the
//! outermost [`set_source`](ScreenplayAdapter::set_source) call returns. A
//! queue shared through [`ScreenplayAdapterBuilder::reclaimer`] is drained by
//! whoever owns it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sceneflow::model::{
//!     AdapterSource, ElementListModel, Scene, Screenplay, ScreenplayAdapter, ScreenplayElement,
//! };
//!
//! let screenplay = Screenplay::new();
//! for title in ["Opening", "Chase", "Finale"] {
//!     let element = ScreenplayElement::for_scene(Arc::new(Scene::new(title)));
//!     screenplay.add_element(element).unwrap();
//! }
//! screenplay.set_current_element_index(1);
//!
//! let adapter = ScreenplayAdapter::new();
//! adapter.set_source(Some(AdapterSource::from(screenplay.clone())));
//! assert_eq!(adapter.row_count(), 3);
//! assert_eq!(adapter.current_index(), 1);
//!
//! adapter.set_current_index(2);
//! assert_eq!(screenplay.current_element_index(), 2);
//!
//! let scene = Arc::new(Scene::new("Standalone"));
//! adapter.set_source(Some(AdapterSource::from(scene.clone())));
//! assert_eq!(adapter.row_count(), 1);
//! assert!(Arc::ptr_eq(adapter.at(0).get("scene").as_scene().unwrap(), &scene));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use sceneflow_core::logging::{PerfSpan, span_names, targets};
use sceneflow_core::{ConnectionGuard, DeferredQueue, Signal, connect_guarded};

use super::element::ScreenplayElement;
use super::projector::{ElementData, ElementRole, FieldProjector};
use super::scene::Scene;
use super::screenplay::Screenplay;
use super::synthetic::{MasterScreenplay, NoMaster, SyntheticScreenplay};
use super::traits::{ElementListModel, ModelSignals};
use crate::config::AdapterConfig;

/// What an adapter can be pointed at.
#[derive(Debug, Clone)]
pub enum AdapterSource {
    /// A full screenplay, borrowed.
    Screenplay(Arc<Screenplay>),
    /// A bare scene, wrapped in a synthesized one-element screenplay.
    Scene(Arc<Scene>),
}

impl From<Arc<Screenplay>> for AdapterSource {
    fn from(screenplay: Arc<Screenplay>) -> Self {
        AdapterSource::Screenplay(screenplay)
    }
}

impl From<Arc<Scene>> for AdapterSource {
    fn from(scene: Arc<Scene>) -> Self {
        AdapterSource::Scene(scene)
    }
}

/// The source as remembered by the adapter.
enum SourceRef {
    Screenplay(Weak<Screenplay>),
    Scene(Weak<Scene>),
}

/// The collection rows are read from.
enum Backing {
    Detached,
    Borrowed(Weak<Screenplay>),
    Synthesized(Arc<Screenplay>),
}

impl Backing {
    fn screenplay(&self) -> Option<Arc<Screenplay>> {
        match self {
            Backing::Detached => None,
            Backing::Borrowed(weak) => weak.upgrade(),
            Backing::Synthesized(screenplay) => Some(screenplay.clone()),
        }
    }
}

struct AdapterState {
    source: Option<SourceRef>,
    backing: Backing,
    current_index: i32,
    current_element: Weak<ScreenplayElement>,
    suspended: Option<Suspended>,
}

/// Selection and row count captured when a structural change begins.
struct Suspended {
    index: i32,
    element: Weak<ScreenplayElement>,
    rows: usize,
}

/// Builder for creating adapters with custom configuration.
#[derive(Default)]
pub struct ScreenplayAdapterBuilder {
    config: AdapterConfig,
    master: Option<Arc<dyn MasterScreenplay>>,
    reclaimer: Option<Arc<DeferredQueue>>,
}

impl ScreenplayAdapterBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable copying metadata from the master screenplay.
    pub fn copy_master_metadata(mut self, copy: bool) -> Self {
        self.config.copy_master_metadata = copy;
        self
    }

    /// Set the provider of the master screenplay.
    pub fn master(mut self, master: Arc<dyn MasterScreenplay>) -> Self {
        self.master = Some(master);
        self
    }

    /// Share a reclamation queue instead of creating one.
    pub fn reclaimer(mut self, queue: Arc<DeferredQueue>) -> Self {
        self.reclaimer = Some(queue);
        self
    }

    /// Build a detached adapter.
    pub fn build(self) -> Arc<ScreenplayAdapter> {
        let owns_reclaimer = self.reclaimer.is_none();
        let reclaimer = self.reclaimer.unwrap_or_else(|| {
            Arc::new(DeferredQueue::with_batch_size(self.config.reclaim_batch_size))
        });
        let master = self.master.unwrap_or_else(|| Arc::new(NoMaster));
        let config = self.config;

        Arc::new_cyclic(|self_ref| ScreenplayAdapter {
            self_ref: self_ref.clone(),
            state: Mutex::new(AdapterState {
                source: None,
                backing: Backing::Detached,
                current_index: -1,
                current_element: Weak::new(),
                suspended: None,
            }),
            wiring: Mutex::new(Vec::new()),
            source_depth: AtomicUsize::new(0),
            config,
            master,
            reclaimer,
            owns_reclaimer,
            signals: ModelSignals::new(),
            source_changed: Signal::new(),
            current_index_changed: Signal::new(),
            current_element_changed: Signal::new(),
            element_count_changed: Signal::new(),
            metadata_changed: Signal::new(),
            has_non_standard_scenes_changed: Signal::new(),
        })
    }
}

/// A list view over a screenplay or a single scene.
pub struct ScreenplayAdapter {
    self_ref: Weak<ScreenplayAdapter>,
    state: Mutex<AdapterState>,
    wiring: Mutex<Vec<ConnectionGuard>>,
    source_depth: AtomicUsize,
    config: AdapterConfig,
    master: Arc<dyn MasterScreenplay>,
    reclaimer: Arc<DeferredQueue>,
    owns_reclaimer: bool,

    signals: ModelSignals,
    /// Emitted once per [`set_source`](Self::set_source) call, and when a
    /// borrowed screenplay is destroyed.
    pub source_changed: Signal<()>,
    /// Emitted with the new current index.
    pub current_index_changed: Signal<i32>,
    /// Emitted with the new current element.
    pub current_element_changed: Signal<Option<Arc<ScreenplayElement>>>,
    /// Emitted with the new row count whenever it changes.
    pub element_count_changed: Signal<usize>,
    /// Forwarded from the backing screenplay.
    pub metadata_changed: Signal<()>,
    /// Forwarded from the backing screenplay.
    pub has_non_standard_scenes_changed: Signal<bool>,
}

impl ScreenplayAdapter {
    /// Create a detached adapter with default configuration and no master.
    pub fn new() -> Arc<Self> {
        ScreenplayAdapterBuilder::new().build()
    }

    /// Create a builder.
    pub fn builder() -> ScreenplayAdapterBuilder {
        ScreenplayAdapterBuilder::new()
    }

    /// The adapter's configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The queue superseded synthesized screenplays are handed to.
    pub fn reclaimer(&self) -> &Arc<DeferredQueue> {
        &self.reclaimer
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Point the adapter at a screenplay, a scene, or nothing.
    ///
    /// A scene gets a freshly synthesized one-element screenplay on every
    /// call, even when it is the current source. `source_changed` fires
    /// exactly once, after the new backing screenplay is wired.
    pub fn set_source(&self, source: Option<AdapterSource>) {
        self.source_depth.fetch_add(1, Ordering::AcqRel);
        self.replace_source(source);
        if self.source_depth.fetch_sub(1, Ordering::AcqRel) == 1 && self.owns_reclaimer {
            let reclaimed = self.reclaimer.process_batch();
            if reclaimed > 0 {
                tracing::trace!(target: targets::ADAPTER, reclaimed, "reclaimed superseded screenplays");
            }
        }
    }

    fn replace_source(&self, source: Option<AdapterSource>) {
        let _span = PerfSpan::new(span_names::SET_SOURCE);
        let rows_before = self.row_count();

        let old_wiring = std::mem::take(&mut *self.wiring.lock());
        drop(old_wiring);

        self.clear_current_index();

        let (source_ref, backing) = match source {
            None => (None, Backing::Detached),
            Some(AdapterSource::Screenplay(screenplay)) => {
                let weak = Arc::downgrade(&screenplay);
                (
                    Some(SourceRef::Screenplay(weak.clone())),
                    Backing::Borrowed(weak),
                )
            }
            Some(AdapterSource::Scene(scene)) => {
                let master = if self.config.copy_master_metadata {
                    self.master.master()
                } else {
                    None
                };
                let synthesized = SyntheticScreenplay::wrap(scene.clone(), master.as_deref());
                (
                    Some(SourceRef::Scene(Arc::downgrade(&scene))),
                    Backing::Synthesized(synthesized),
                )
            }
        };
        tracing::debug!(
            target: targets::ADAPTER,
            source = source_kind(source_ref.as_ref()),
            "setting source"
        );

        self.signals.model_about_to_reset.emit(());
        let previous = {
            let mut state = self.state.lock();
            state.source = source_ref;
            state.current_index = -1;
            state.current_element = Weak::new();
            state.suspended = None;
            std::mem::replace(&mut state.backing, backing)
        };
        self.retire(previous);
        self.wire();
        self.signals.model_reset.emit(());

        self.emit_row_count(rows_before);
        self.source_changed.emit(());

        if let Some(screenplay) = self.borrowed_screenplay() {
            self.apply_current_index(screenplay.current_element_index());
        }
    }

    /// Type-erased variant of [`set_source`](Self::set_source).
    ///
    /// Values that are neither a [`Screenplay`] nor a [`Scene`] leave the
    /// adapter fully cleared.
    pub fn set_source_any(&self, source: Option<Arc<dyn Any + Send + Sync>>) {
        let resolved = source.and_then(|any| {
            let any = match any.downcast::<Screenplay>() {
                Ok(screenplay) => return Some(AdapterSource::Screenplay(screenplay)),
                Err(any) => any,
            };
            match any.downcast::<Scene>() {
                Ok(scene) => Some(AdapterSource::Scene(scene)),
                Err(_) => {
                    tracing::warn!(
                        target: targets::ADAPTER,
                        "source is neither a screenplay nor a scene, clearing"
                    );
                    None
                }
            }
        });
        self.set_source(resolved);
    }

    /// The current source, if it is still alive.
    pub fn source(&self) -> Option<AdapterSource> {
        match self.state.lock().source.as_ref()? {
            SourceRef::Screenplay(weak) => weak.upgrade().map(AdapterSource::Screenplay),
            SourceRef::Scene(weak) => weak.upgrade().map(AdapterSource::Scene),
        }
    }

    /// Whether the source is a bare scene.
    pub fn is_source_scene(&self) -> bool {
        matches!(self.state.lock().source, Some(SourceRef::Scene(_)))
    }

    /// Whether the source is a screenplay.
    pub fn is_source_screenplay(&self) -> bool {
        matches!(self.state.lock().source, Some(SourceRef::Screenplay(_)))
    }

    /// The screenplay rows are read from: the source screenplay, or the one
    /// synthesized for a scene.
    pub fn screenplay(&self) -> Option<Arc<Screenplay>> {
        self.state.lock().backing.screenplay()
    }

    fn borrowed_screenplay(&self) -> Option<Arc<Screenplay>> {
        match &self.state.lock().backing {
            Backing::Borrowed(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// Hand a superseded backing screenplay over for reclamation.
    fn retire(&self, backing: Backing) {
        if let Backing::Synthesized(screenplay) = backing {
            if Arc::strong_count(&screenplay) == 1 {
                tracing::trace!(target: targets::ADAPTER, "deferring synthesized screenplay drop");
                self.reclaimer.defer_drop(screenplay);
            } else {
                tracing::trace!(target: targets::ADAPTER, "releasing shared synthesized screenplay");
            }
        }
    }

    fn wire(&self) {
        let (screenplay, borrowed) = {
            let state = self.state.lock();
            let borrowed = matches!(state.backing, Backing::Borrowed(_));
            (state.backing.screenplay(), borrowed)
        };
        let Some(screenplay) = screenplay else {
            return;
        };

        let mut guards = vec![
            self.route(
                &screenplay,
                |s| &s.signals.rows_about_to_be_inserted,
                Self::on_rows_about_to_be_inserted,
            ),
            self.route(
                &screenplay,
                |s| &s.signals.rows_inserted,
                Self::on_rows_inserted,
            ),
            self.route(
                &screenplay,
                |s| &s.signals.rows_about_to_be_removed,
                Self::on_rows_about_to_be_removed,
            ),
            self.route(
                &screenplay,
                |s| &s.signals.rows_removed,
                Self::on_rows_removed,
            ),
            self.route(
                &screenplay,
                |s| &s.signals.model_about_to_reset,
                Self::on_model_about_to_reset,
            ),
            self.route(
                &screenplay,
                |s| &s.signals.model_reset,
                Self::on_model_reset,
            ),
            self.route(
                &screenplay,
                |s| &s.metadata_changed,
                |adapter, _| adapter.metadata_changed.emit(()),
            ),
            self.route(
                &screenplay,
                |s| &s.has_non_standard_scenes_changed,
                |adapter, value| adapter.has_non_standard_scenes_changed.emit(*value),
            ),
        ];
        if borrowed {
            guards.push(self.route(
                &screenplay,
                |s| &s.current_element_index_changed,
                |adapter, index| {
                    adapter.apply_current_index(*index);
                },
            ));
            guards.push(self.route(
                &screenplay,
                |s| &s.about_to_destroy,
                Self::on_source_destroyed,
            ));
        }

        *self.wiring.lock() = guards;
    }

    /// Connect `signal` of `screenplay` to `handler`, holding the adapter weakly.
    fn route<Args: 'static>(
        &self,
        screenplay: &Arc<Screenplay>,
        signal: fn(&Screenplay) -> &Signal<Args>,
        handler: fn(&ScreenplayAdapter, &Args),
    ) -> ConnectionGuard {
        let adapter = self.self_ref.clone();
        connect_guarded(screenplay, signal, move |args| {
            if let Some(adapter) = adapter.upgrade() {
                handler(&adapter, args);
            }
        })
    }

    // -------------------------------------------------------------------------
    // Structural changes
    // -------------------------------------------------------------------------

    fn on_rows_about_to_be_inserted(&self, range: &(usize, usize)) {
        self.suspend_current_index();
        self.signals.rows_about_to_be_inserted.emit(*range);
    }

    fn on_rows_inserted(&self, range: &(usize, usize)) {
        let rows_before = self.resume_current_index();
        self.signals.rows_inserted.emit(*range);
        self.emit_row_count(rows_before);
    }

    fn on_rows_about_to_be_removed(&self, range: &(usize, usize)) {
        self.suspend_current_index();
        self.signals.rows_about_to_be_removed.emit(*range);
    }

    fn on_rows_removed(&self, range: &(usize, usize)) {
        let rows_before = self.resume_current_index();
        self.signals.rows_removed.emit(*range);
        self.emit_row_count(rows_before);
    }

    fn on_model_about_to_reset(&self, _: &()) {
        self.suspend_current_index();
        self.signals.model_about_to_reset.emit(());
    }

    fn on_model_reset(&self, _: &()) {
        let rows_before = self.resume_current_index();
        self.signals.model_reset.emit(());
        self.emit_row_count(rows_before);
    }

    fn emit_row_count(&self, rows_before: usize) {
        let rows = self.row_count();
        if rows != rows_before {
            self.element_count_changed.emit(rows);
        }
    }

    fn on_source_destroyed(&self, _: &()) {
        tracing::debug!(target: targets::ADAPTER, "borrowed screenplay destroyed, detaching");
        let old_wiring = std::mem::take(&mut *self.wiring.lock());
        drop(old_wiring);

        self.clear_current_index();
        self.signals.model_about_to_reset.emit(());
        {
            let mut state = self.state.lock();
            state.source = None;
            state.backing = Backing::Detached;
            state.suspended = None;
        }
        self.signals.model_reset.emit(());
        self.element_count_changed.emit(0);
        self.source_changed.emit(());
    }

    // -------------------------------------------------------------------------
    // Current index
    // -------------------------------------------------------------------------

    /// The cached current index, `-1` when none.
    pub fn current_index(&self) -> i32 {
        self.state.lock().current_index
    }

    /// Set the current index.
    ///
    /// The value is clamped into `[-1, row_count - 1]`. Nothing happens when
    /// the clamped value equals the current one. A borrowed screenplay
    /// receives the new value as its current element index.
    pub fn set_current_index(&self, index: i32) {
        if !self.apply_current_index(index) {
            return;
        }
        if let Some(screenplay) = self.borrowed_screenplay() {
            screenplay.set_current_element_index(self.current_index());
        }
    }

    /// The element at the current index.
    pub fn current_element(&self) -> Option<Arc<ScreenplayElement>> {
        self.state.lock().current_element.upgrade()
    }

    /// The scene of the current element.
    pub fn current_scene(&self) -> Option<Arc<Scene>> {
        self.current_element()
            .and_then(|element| element.scene().cloned())
    }

    fn clear_current_index(&self) {
        self.apply_current_index(-1);
    }

    /// Clear the cached index without notifying, remembering the selection
    /// and row count from before the structural change.
    fn suspend_current_index(&self) {
        let rows = self.row_count();
        let mut state = self.state.lock();
        if state.suspended.is_none() {
            let index = std::mem::replace(&mut state.current_index, -1);
            let element = std::mem::take(&mut state.current_element);
            state.suspended = Some(Suspended {
                index,
                element,
                rows,
            });
        }
    }

    /// Restore the index after a structural change and notify if the
    /// selection differs from before it. Returns the row count before the
    /// change.
    fn resume_current_index(&self) -> usize {
        let _span = PerfSpan::new(span_names::STRUCTURE);
        let before = {
            let mut state = self.state.lock();
            state.suspended.take()
        };
        let before = match before {
            Some(before) => before,
            None => Suspended {
                index: self.current_index(),
                element: self.state.lock().current_element.clone(),
                rows: self.row_count(),
            },
        };

        let screenplay = self.screenplay();
        let target = match (self.borrowed_screenplay(), before.element.upgrade()) {
            (Some(borrowed), _) => borrowed.current_element_index(),
            (None, Some(element)) => screenplay
                .as_ref()
                .and_then(|s| s.index_of_element(&element))
                .map_or(-1, |row| row as i32),
            (None, None) => -1,
        };
        let (index, element) = resolve(screenplay.as_ref(), target);

        let weak = element.as_ref().map(Arc::downgrade).unwrap_or_default();
        let element_changed = !before.element.ptr_eq(&weak);
        {
            let mut state = self.state.lock();
            state.current_index = index;
            state.current_element = weak;
        }

        if index != before.index {
            tracing::trace!(target: targets::ADAPTER, index, "current index restored");
            self.current_index_changed.emit(index);
        }
        if element_changed {
            self.current_element_changed.emit(element);
        }
        before.rows
    }

    /// Update the cached index without writing back. Returns whether it changed.
    fn apply_current_index(&self, index: i32) -> bool {
        let screenplay = self.screenplay();
        let (index, element) = resolve(screenplay.as_ref(), index);

        let element_changed = {
            let mut state = self.state.lock();
            if state.current_index == index {
                return false;
            }
            state.current_index = index;
            let weak = element.as_ref().map(Arc::downgrade).unwrap_or_default();
            let changed = !state.current_element.ptr_eq(&weak);
            state.current_element = weak;
            changed
        };

        tracing::trace!(target: targets::ADAPTER, index, "current index changed");
        self.current_index_changed.emit(index);
        if element_changed {
            self.current_element_changed.emit(element);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Every field of `row` as a map, or `ElementData::None` when the row
    /// does not exist.
    pub fn at(&self, row: i32) -> ElementData {
        self.data_by_name(row, ElementRole::ModelData.name())
    }

    /// A single field of `row` addressed by role name.
    pub fn data_by_name(&self, row: i32, name: &str) -> ElementData {
        let Ok(row) = usize::try_from(row) else {
            return ElementData::None;
        };
        FieldProjector::project_by_name(self.element_at(row).as_ref(), row, name)
    }

    // -------------------------------------------------------------------------
    // Screenplay delegation
    // -------------------------------------------------------------------------

    /// Whether the backing screenplay has non-standard scenes.
    pub fn has_non_standard_scenes(&self) -> bool {
        self.screenplay()
            .is_some_and(|screenplay| screenplay.has_non_standard_scenes())
    }

    /// See [`Screenplay::previous_scene_element_index`]. `0` unless the
    /// source is a screenplay.
    pub fn previous_scene_element_index(&self) -> i32 {
        self.borrowed_screenplay()
            .map_or(0, |screenplay| screenplay.previous_scene_element_index())
    }

    /// See [`Screenplay::next_scene_element_index`]. `0` unless the source
    /// is a screenplay.
    pub fn next_scene_element_index(&self) -> i32 {
        self.borrowed_screenplay()
            .map_or(0, |screenplay| screenplay.next_scene_element_index())
    }
}

impl ElementListModel for ScreenplayAdapter {
    fn row_count(&self) -> usize {
        self.screenplay().map_or(0, |screenplay| screenplay.element_count())
    }

    fn element_at(&self, row: usize) -> Option<Arc<ScreenplayElement>> {
        self.screenplay()?.element_at(row)
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

impl Drop for ScreenplayAdapter {
    fn drop(&mut self) {
        let wiring = std::mem::take(self.wiring.get_mut());
        drop(wiring);
        let backing = std::mem::replace(&mut self.state.get_mut().backing, Backing::Detached);
        self.retire(backing);
    }
}

impl fmt::Debug for ScreenplayAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ScreenplayAdapter")
            .field("source", &source_kind(state.source.as_ref()))
            .field("current_index", &state.current_index)
            .finish()
    }
}

/// Clamp `index` into the rows of `screenplay` and look up its element.
fn resolve(
    screenplay: Option<&Arc<Screenplay>>,
    index: i32,
) -> (i32, Option<Arc<ScreenplayElement>>) {
    let rows = screenplay.map_or(0, |s| s.element_count()) as i32;
    let index = if rows > 0 { index.clamp(-1, rows - 1) } else { -1 };
    let element = usize::try_from(index)
        .ok()
        .and_then(|row| screenplay?.element_at(row));
    (index, element)
}

fn source_kind(source: Option<&SourceRef>) -> &'static str {
    match source {
        None => "none",
        Some(SourceRef::Screenplay(_)) => "screenplay",
        Some(SourceRef::Scene(_)) => "scene",
    }
}

static_assertions::assert_impl_all!(ScreenplayAdapter: Send, Sync);
static_assertions::assert_impl_all!(AdapterSource: Send, Sync);
