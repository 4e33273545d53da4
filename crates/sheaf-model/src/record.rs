//! The record capability: persistence and validation delegated to items.

use std::collections::BTreeMap;

use crate::error::RecordError;

/// Attribute values assigned in bulk.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Persistence and validation operations implemented by the items of a
/// [`ModelCollection`](crate::ModelCollection).
///
/// Operations returning `Ok(false)` declined the change (usually a failed
/// validation); errors are reserved for storage failures.
pub trait Record {
    /// Assigns attribute values. With `safe_only`, only attributes that are
    /// safe in the current scenario are assigned.
    fn set_attributes(&mut self, attributes: &Attributes, safe_only: bool);

    /// Switches the validation scenario.
    fn set_scenario(&mut self, scenario: &str) {
        let _ = scenario;
    }

    /// Validates the record, returning `false` if it has errors.
    fn validate(&mut self) -> bool {
        true
    }

    /// Inserts or updates the record.
    fn save(&mut self, run_validation: bool, attributes: Option<&[&str]>) -> Result<bool, RecordError>;

    /// Inserts the record.
    fn insert(&mut self, run_validation: bool, attributes: Option<&[&str]>) -> Result<bool, RecordError>;

    /// Updates the record.
    fn update(&mut self, run_validation: bool, attributes: Option<&[&str]>) -> Result<bool, RecordError>;

    /// Deletes the record.
    fn delete(&mut self) -> Result<(), RecordError>;
}
