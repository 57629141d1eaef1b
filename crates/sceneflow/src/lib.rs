//! sceneflow - screenplay list models with synchronized selection.
//!
//! This is the main crate. It re-exports the core plumbing from
//! `sceneflow-core` and adds the screenplay model:
//!
//! - [`model::Screenplay`]: the authoritative ordered element registry
//! - [`model::ScreenplayAdapter`]: one list contract over a screenplay or a
//!   bare scene, with a current index kept in sync with the screenplay
//! - [`model::FieldProjector`]: named field access for views
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sceneflow::prelude::*;
//!
//! let adapter = ScreenplayAdapter::new();
//! let scene = Arc::new(Scene::new("INT. STATION - NIGHT"));
//!
//! adapter.set_source(Some(scene.clone().into()));
//! assert!(adapter.is_source_scene());
//! assert_eq!(adapter.row_count(), 1);
//!
//! adapter.set_source(None);
//! assert_eq!(adapter.row_count(), 0);
//! ```

pub use sceneflow_core::*;

pub mod config;
mod error;
pub mod model;
pub mod prelude;

pub use config::AdapterConfig;
pub use error::{Error, Result};
