//! Scenes, the leaf payload of a screenplay.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sceneflow_core::{Property, Signal};

/// Stable identifier of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(Uuid);

impl SceneId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of content a scene holds.
///
/// Anything other than [`SceneKind::Standard`] counts as a non-standard scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// A regular dialogue and action scene.
    #[default]
    Standard,
    /// A musical number.
    Song,
    /// An action or stunt sequence.
    Action,
}

impl SceneKind {
    /// Whether this is a standard scene.
    pub fn is_standard(self) -> bool {
        self == SceneKind::Standard
    }
}

/// The smallest addressable unit of screenplay content.
///
/// A scene can stand alone or be referenced by elements of any number of
/// screenplays. It is shared as `Arc<Scene>`.
pub struct Scene {
    id: SceneId,
    kind: SceneKind,
    title: Property<String>,
    /// Emitted with the new title when it changes.
    pub title_changed: Signal<String>,
}

impl Scene {
    /// Create a standard scene with a fresh identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(SceneId::new(), title)
    }

    /// Create a standard scene with an explicit identifier.
    pub fn with_id(id: SceneId, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: SceneKind::Standard,
            title: Property::new(title.into()),
            title_changed: Signal::new(),
        }
    }

    /// Set the scene kind. Used while constructing a scene.
    pub fn with_kind(mut self, kind: SceneKind) -> Self {
        self.kind = kind;
        self
    }

    /// The scene's identifier.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// The scene's kind.
    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    /// The scene's title.
    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Set the title, emitting `title_changed` if it differs.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        if self.title.set(title.clone()) {
            self.title_changed.emit(title);
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Scene: Send, Sync);
