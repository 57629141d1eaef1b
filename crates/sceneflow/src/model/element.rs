//! Screenplay elements.
//!
//! An element is one row of a screenplay. It references either a [`Scene`]
//! or a structural break marker, and knows the screenplay it belongs to
//! through a non-owning back-reference.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::scene::Scene;
use super::screenplay::Screenplay;
use crate::error::{Error, Result};

/// Process-unique identifier of a [`ScreenplayElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Get the raw u64 value of this element ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_element_id() -> ElementId {
    ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Whether an element carries content or marks a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// A content element wrapping a scene.
    Scene,
    /// A structural break marker.
    Break,
}

/// Subtype of a break element. Content elements report [`BreakType::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    /// Not a break.
    #[default]
    None,
    /// End of an act.
    Act,
    /// End of an episode.
    Episode,
    /// An interval.
    Interval,
}

enum Payload {
    Scene(Arc<Scene>),
    Break(BreakType),
}

/// A single row of a screenplay.
pub struct ScreenplayElement {
    id: ElementId,
    payload: Payload,
    screenplay: RwLock<Weak<Screenplay>>,
}

impl ScreenplayElement {
    /// Create a content element wrapping `scene`.
    pub fn for_scene(scene: Arc<Scene>) -> Arc<Self> {
        Arc::new(Self::with_payload(Payload::Scene(scene)))
    }

    /// Create a break marker.
    pub fn for_break(break_type: BreakType) -> Arc<Self> {
        Arc::new(Self::with_payload(Payload::Break(break_type)))
    }

    fn with_payload(payload: Payload) -> Self {
        Self {
            id: next_element_id(),
            payload,
            screenplay: RwLock::new(Weak::new()),
        }
    }

    /// The element's own identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The identifier exposed to views: the scene's id for content elements,
    /// the element's own id for breaks.
    pub fn scene_id(&self) -> String {
        match &self.payload {
            Payload::Scene(scene) => scene.id().to_string(),
            Payload::Break(_) => self.id.to_string(),
        }
    }

    /// Content or break.
    pub fn element_type(&self) -> ElementType {
        match self.payload {
            Payload::Scene(_) => ElementType::Scene,
            Payload::Break(_) => ElementType::Break,
        }
    }

    /// The break subtype, [`BreakType::None`] for content elements.
    pub fn break_type(&self) -> BreakType {
        match self.payload {
            Payload::Scene(_) => BreakType::None,
            Payload::Break(break_type) => break_type,
        }
    }

    /// The wrapped scene, if this is a content element.
    pub fn scene(&self) -> Option<&Arc<Scene>> {
        match &self.payload {
            Payload::Scene(scene) => Some(scene),
            Payload::Break(_) => None,
        }
    }

    /// Whether this element wraps a scene that is not a standard scene.
    pub fn is_non_standard_scene(&self) -> bool {
        self.scene().is_some_and(|scene| !scene.kind().is_standard())
    }

    /// The screenplay this element currently belongs to.
    pub fn screenplay(&self) -> Option<Arc<Screenplay>> {
        self.screenplay.read().upgrade()
    }

    /// Record `owner` as this element's screenplay.
    ///
    /// Fails if the element already belongs to a live screenplay.
    pub(crate) fn attach(&self, owner: &Weak<Screenplay>) -> Result<()> {
        let mut screenplay = self.screenplay.write();
        if screenplay.strong_count() > 0 {
            return Err(Error::ElementOwned);
        }
        *screenplay = owner.clone();
        Ok(())
    }

    /// Clear the back-reference after removal.
    pub(crate) fn detach(&self) {
        *self.screenplay.write() = Weak::new();
    }
}

impl fmt::Debug for ScreenplayElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ScreenplayElement");
        s.field("id", &self.id)
            .field("element_type", &self.element_type());
        match &self.payload {
            Payload::Scene(scene) => s.field("scene", &scene.id()),
            Payload::Break(break_type) => s.field("break_type", break_type),
        };
        s.finish()
    }
}

static_assertions::assert_impl_all!(ScreenplayElement: Send, Sync);
