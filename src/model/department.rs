//! Department tree and its markup element mapping.

use serde::{Deserialize, Serialize};

use crate::error::{MarkupError, MarkupResult};
use crate::markup::Element;

pub const DEPARTMENT_LIST_TAG: &str = "departmentList";
pub const DEPARTMENT_TAG: &str = "department";
pub const NAME_ATTRIBUTE: &str = "name";

/// A department with an ordered list of child departments.
///
/// Children are owned exclusively, so the structure is always a finite
/// forest; there is no parent back-pointer to form a cycle with. Names carry
/// no uniqueness constraint, not even between siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub children: Vec<Department>,
}

impl Department {
    /// Create a leaf department.
    pub fn new(name: impl Into<String>) -> Self {
        Department { name: name.into(), children: Vec::new() }
    }

    /// Append a child department, builder style.
    pub fn child(mut self, child: Department) -> Self {
        self.children.push(child);
        self
    }
}

/// Map a department forest to its `departmentList` container element,
/// preserving order at every level.
pub fn forest_to_element(departments: &[Department]) -> Element {
    let mut element = Element::new(DEPARTMENT_LIST_TAG);
    for department in departments {
        element.push_child(department_to_element(department));
    }
    element
}

fn department_to_element(department: &Department) -> Element {
    let mut element =
        Element::new(DEPARTMENT_TAG).with_attribute(NAME_ATTRIBUTE, department.name.as_str());
    for child in &department.children {
        element.push_child(department_to_element(child));
    }
    element
}

/// Inverse of [`forest_to_element`]: rebuild the forest from a container
/// element's children.
///
/// Fails on a child that is not a `department` element or that lacks the
/// `name` attribute; a blob written by [`forest_to_element`] always maps back.
pub fn forest_from_element(element: &Element) -> MarkupResult<Vec<Department>> {
    element.children().iter().map(department_from_element).collect()
}

fn department_from_element(element: &Element) -> MarkupResult<Department> {
    if element.tag() != DEPARTMENT_TAG {
        return Err(MarkupError::UnexpectedElement { tag: element.tag().to_string() });
    }
    let name = element.attribute(NAME_ATTRIBUTE).ok_or_else(|| MarkupError::MissingAttribute {
        tag: element.tag().to_string(),
        attribute: NAME_ATTRIBUTE,
    })?;
    let children = element
        .children()
        .iter()
        .map(department_from_element)
        .collect::<MarkupResult<Vec<_>>>()?;
    Ok(Department { name: name.to_string(), children })
}
