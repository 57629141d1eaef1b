//! The screenplay model.
//!
//! # Core Types
//!
//! - [`Scene`]: the leaf payload, shared between screenplays
//! - [`ScreenplayElement`]: one row, wrapping a scene or marking a break
//! - [`Screenplay`]: the authoritative ordered element registry
//! - [`ElementListModel`]: the indexed-list contract views read through
//! - [`ModelSignals`]: two-phase structural change signals
//!
//! # Adapting
//!
//! - [`ScreenplayAdapter`]: one list over either a screenplay or a bare scene
//! - [`SyntheticScreenplay`]: wraps a bare scene in a one-element screenplay
//! - [`FieldProjector`]: maps rows to named fields

mod adapter;
mod element;
mod projector;
mod scene;
mod screenplay;
mod synthetic;
mod traits;

pub use adapter::{AdapterSource, ScreenplayAdapter, ScreenplayAdapterBuilder};
pub use element::{BreakType, ElementId, ElementType, ScreenplayElement};
pub use projector::{ElementData, ElementRole, FieldProjector};
pub use scene::{Scene, SceneId, SceneKind};
pub use screenplay::{Screenplay, ScreenplayMetadata};
pub use synthetic::{MasterScreenplay, MasterSlot, NoMaster, SyntheticScreenplay};
pub use traits::{ElementListModel, ModelSignals};
