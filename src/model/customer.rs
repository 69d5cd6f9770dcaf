//! Customer record: owns a department forest and persists it as one
//! markup-encoded LOB column.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use tracing::debug;

use crate::error::{MarkupResult, StoreResult};
use crate::markup::Element;
use crate::model::department::{self, Department};
use crate::store;

/// A customer and the department forest it owns.
///
/// `departments` is always a sequence; a customer without departments holds
/// an empty one, never an absent value. An id of `0` means "not yet assigned
/// by the store".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub departments: Vec<Department>,
}

impl Customer {
    /// Create a customer with no departments.
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Customer { id, name: name.into(), departments: Vec::new() }
    }

    /// Map the current department forest to its container element.
    pub fn departments_to_element(&self) -> Element {
        department::forest_to_element(&self.departments)
    }

    /// Replace the department forest with the one described by `element`.
    ///
    /// The replacement only happens once the whole element tree has mapped;
    /// on error the current forest is left untouched.
    pub fn read_departments(&mut self, element: &Element) -> MarkupResult<()> {
        self.departments = department::forest_from_element(element)?;
        Ok(())
    }

    /// Persist this customer as one row, the department forest serialized
    /// into the LOB column.
    ///
    /// Returns the effective id: `self.id` when nonzero, otherwise the id the
    /// backend assigned. Never `0` on success.
    pub async fn insert(&self, pool: &AnyPool) -> StoreResult<i64> {
        let markup = self.departments_to_element().to_markup();
        let id = store::insert_customer_row(pool, self.id, &self.name, &markup).await?;
        debug!(id, name = %self.name, "inserted customer");
        Ok(id)
    }

    /// Load the customer stored under `id` into a fresh record.
    ///
    /// Fails with [`crate::error::StoreError::NotFound`] when no row matches
    /// and with [`crate::error::StoreError::Markup`] when the stored blob
    /// does not parse or map back to a forest.
    pub async fn load(id: i64, pool: &AnyPool) -> StoreResult<Customer> {
        let row = store::select_customer_row(pool, id).await?;
        let element = Element::parse(&row.departments)?;
        let mut customer = Customer::new(row.name, id);
        customer.read_departments(&element)?;
        debug!(id, name = %customer.name, "loaded customer");
        Ok(customer)
    }
}
