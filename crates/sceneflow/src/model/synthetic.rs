//! One-element screenplays synthesized around a bare scene.
//!
//! When a view is pointed at a single [`Scene`] instead of a whole
//! screenplay, the adapter wraps the scene in a fresh [`Screenplay`] holding
//! exactly one element. Descriptive metadata may be copied once from a
//! *master* screenplay; the copy is a snapshot, never a live link.
//!
//! Which screenplay is the master is decided by the embedding application
//! and handed in as a [`MasterScreenplay`] provider.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use sceneflow_core::logging::targets;

use super::element::ScreenplayElement;
use super::scene::Scene;
use super::screenplay::Screenplay;

/// Supplies the designated master screenplay, if one exists.
pub trait MasterScreenplay: Send + Sync {
    /// The current master screenplay.
    fn master(&self) -> Option<Arc<Screenplay>>;
}

/// No master screenplay; synthesized collections keep empty metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMaster;

impl MasterScreenplay for NoMaster {
    fn master(&self) -> Option<Arc<Screenplay>> {
        None
    }
}

impl MasterScreenplay for Arc<Screenplay> {
    fn master(&self) -> Option<Arc<Screenplay>> {
        Some(self.clone())
    }
}

impl MasterScreenplay for Weak<Screenplay> {
    fn master(&self) -> Option<Arc<Screenplay>> {
        self.upgrade()
    }
}

/// A replaceable master designation, e.g. the screenplay of the document
/// that is currently open.
///
/// Holds the master weakly.
#[derive(Debug, Default)]
pub struct MasterSlot {
    master: RwLock<Weak<Screenplay>>,
}

impl MasterSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate `screenplay` as the master.
    pub fn set(&self, screenplay: &Arc<Screenplay>) {
        *self.master.write() = Arc::downgrade(screenplay);
    }

    /// Remove the designation.
    pub fn clear(&self) {
        *self.master.write() = Weak::new();
    }
}

impl MasterScreenplay for MasterSlot {
    fn master(&self) -> Option<Arc<Screenplay>> {
        self.master.read().upgrade()
    }
}

/// Factory for one-element screenplays.
pub struct SyntheticScreenplay;

impl SyntheticScreenplay {
    /// Wrap `scene` in a new screenplay owned by the caller.
    ///
    /// The result contains exactly one element referencing `scene`. When
    /// `master` is given its title, subtitle, author and version are copied.
    pub fn wrap(scene: Arc<Scene>, master: Option<&Screenplay>) -> Arc<Screenplay> {
        let metadata = master.map(Screenplay::metadata).unwrap_or_default();
        let screenplay = Screenplay::with_metadata(metadata);
        screenplay.adopt(ScreenplayElement::for_scene(scene));

        tracing::debug!(
            target: targets::MODEL,
            with_master = master.is_some(),
            "synthesized screenplay for scene"
        );
        screenplay
    }
}
