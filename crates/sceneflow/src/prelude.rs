//! Prelude module for sceneflow.
//!
//! ```ignore
//! use sceneflow::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionGuard`, `Property`)
//! - The screenplay model (`Scene`, `ScreenplayElement`, `Screenplay`)
//! - The adapter and its configuration (`ScreenplayAdapter`, `AdapterConfig`)
//! - Row access (`ElementListModel`, `ElementRole`, `ElementData`)

pub use crate::property::Property;
pub use crate::signal::{ConnectionGuard, ConnectionId, Signal};
pub use crate::{AdapterConfig, DeferredQueue, Error, Result};

pub use crate::model::{
    AdapterSource, BreakType, ElementData, ElementListModel, ElementRole, ElementType,
    MasterScreenplay, MasterSlot, NoMaster, Scene, SceneId, SceneKind, Screenplay,
    ScreenplayAdapter, ScreenplayElement, ScreenplayMetadata,
};
