//! Field projection for screenplay rows.
//!
//! Views address the fields of a row through an [`ElementRole`]. The
//! [`FieldProjector`] maps an `(element, row, role)` triple to an
//! [`ElementData`] value; [`ElementRole::ModelData`] yields a map of every
//! other field at once.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sceneflow::model::{ElementData, ElementRole, FieldProjector, Scene, ScreenplayElement};
//!
//! let scene = Arc::new(Scene::new("EXT. HARBOUR - DAWN"));
//! let element = ScreenplayElement::for_scene(scene.clone());
//!
//! let row = FieldProjector::project(Some(&element), 4, ElementRole::RowNumber);
//! assert_eq!(row.as_int(), Some(4));
//!
//! let bundle = FieldProjector::project(Some(&element), 4, ElementRole::ModelData);
//! assert!(Arc::ptr_eq(bundle.get("scene").as_scene().unwrap(), &scene));
//! assert!(bundle.get("modelData").is_none());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::element::{BreakType, ElementType, ScreenplayElement};
use super::scene::Scene;

/// Named fields of a screenplay row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// Stable identifier: the scene id, or the element id for breaks.
    Id,
    /// The element itself.
    Element,
    /// [`ElementType`] of the element.
    ElementType,
    /// [`BreakType`] of the element.
    BreakType,
    /// The wrapped scene, empty for breaks.
    Scene,
    /// Every other field as a map keyed by role name.
    ModelData,
    /// The row the element was queried at.
    RowNumber,
}

impl ElementRole {
    /// All roles, in declaration order.
    pub const ALL: [ElementRole; 7] = [
        ElementRole::Id,
        ElementRole::Element,
        ElementRole::ElementType,
        ElementRole::BreakType,
        ElementRole::Scene,
        ElementRole::ModelData,
        ElementRole::RowNumber,
    ];

    /// The name views use for this role.
    pub fn name(self) -> &'static str {
        match self {
            ElementRole::Id => "id",
            ElementRole::Element => "screenplayElement",
            ElementRole::ElementType => "screenplayElementType",
            ElementRole::BreakType => "breakType",
            ElementRole::Scene => "scene",
            ElementRole::ModelData => "modelData",
            ElementRole::RowNumber => "rowNumber",
        }
    }

    /// Look a role up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }
}

/// A projected field value.
#[derive(Debug, Clone, Default)]
pub enum ElementData {
    /// No data.
    #[default]
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Element type.
    ElementType(ElementType),
    /// Break subtype.
    BreakType(BreakType),
    /// A screenplay element.
    Element(Arc<ScreenplayElement>),
    /// A scene.
    Scene(Arc<Scene>),
    /// A bundle of fields keyed by role name.
    Map(BTreeMap<&'static str, ElementData>),
}

static NONE: ElementData = ElementData::None;

impl ElementData {
    /// Returns `true` if this is `ElementData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, ElementData::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the data as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ElementData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ElementData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as an element type.
    pub fn as_element_type(&self) -> Option<ElementType> {
        match self {
            ElementData::ElementType(t) => Some(*t),
            _ => None,
        }
    }

    /// Attempts to get the data as a break type.
    pub fn as_break_type(&self) -> Option<BreakType> {
        match self {
            ElementData::BreakType(t) => Some(*t),
            _ => None,
        }
    }

    /// Attempts to get the data as an element.
    pub fn as_element(&self) -> Option<&Arc<ScreenplayElement>> {
        match self {
            ElementData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Attempts to get the data as a scene.
    pub fn as_scene(&self) -> Option<&Arc<Scene>> {
        match self {
            ElementData::Scene(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get the data as a field map.
    pub fn as_map(&self) -> Option<&BTreeMap<&'static str, ElementData>> {
        match self {
            ElementData::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Field `name` of a map; `None` for missing fields and non-map data.
    pub fn get(&self, name: &str) -> &ElementData {
        self.as_map()
            .and_then(|map| map.get(name))
            .unwrap_or(&NONE)
    }
}

impl PartialEq for ElementData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementData::None, ElementData::None) => true,
            (ElementData::String(a), ElementData::String(b)) => a == b,
            (ElementData::Int(a), ElementData::Int(b)) => a == b,
            (ElementData::ElementType(a), ElementData::ElementType(b)) => a == b,
            (ElementData::BreakType(a), ElementData::BreakType(b)) => a == b,
            (ElementData::Element(a), ElementData::Element(b)) => Arc::ptr_eq(a, b),
            (ElementData::Scene(a), ElementData::Scene(b)) => Arc::ptr_eq(a, b),
            (ElementData::Map(a), ElementData::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<String> for ElementData {
    fn from(value: String) -> Self {
        ElementData::String(value)
    }
}

impl From<i64> for ElementData {
    fn from(value: i64) -> Self {
        ElementData::Int(value)
    }
}

/// Maps screenplay rows to field values.
pub struct FieldProjector;

impl FieldProjector {
    /// Project one field of `element`, queried at `row`.
    ///
    /// A missing element yields `ElementData::None` for every role.
    pub fn project(
        element: Option<&Arc<ScreenplayElement>>,
        row: usize,
        role: ElementRole,
    ) -> ElementData {
        let Some(element) = element else {
            return ElementData::None;
        };

        match role {
            ElementRole::Id => ElementData::String(element.scene_id()),
            ElementRole::Element => ElementData::Element(element.clone()),
            ElementRole::ElementType => ElementData::ElementType(element.element_type()),
            ElementRole::BreakType => ElementData::BreakType(element.break_type()),
            ElementRole::Scene => element
                .scene()
                .map_or(ElementData::None, |scene| ElementData::Scene(scene.clone())),
            ElementRole::RowNumber => ElementData::Int(row as i64),
            ElementRole::ModelData => ElementData::Map(
                ElementRole::ALL
                    .into_iter()
                    .filter(|role| *role != ElementRole::ModelData)
                    .map(|role| (role.name(), Self::project(Some(element), row, role)))
                    .collect(),
            ),
        }
    }

    /// Project a field addressed by its role name. Unknown names yield
    /// `ElementData::None`.
    pub fn project_by_name(
        element: Option<&Arc<ScreenplayElement>>,
        row: usize,
        name: &str,
    ) -> ElementData {
        match ElementRole::from_name(name) {
            Some(role) => Self::project(element, row, role),
            None => ElementData::None,
        }
    }
}
