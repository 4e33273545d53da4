//! Sheaf Model - Lazily materialized collections of records.
//!
//! A [`ModelCollection`] wraps a [`LazySource`] (typically a database query),
//! fetches its models into a [`sheaf::Collection`] the first time they are
//! needed, and runs bulk record operations over them:
//!
//! - [`find_with`](ModelCollection::find_with) loads relations through the source
//! - [`fill_all`](ModelCollection::fill_all), [`update_all`](ModelCollection::update_all),
//!   [`insert_all`](ModelCollection::insert_all), [`save_all`](ModelCollection::save_all)
//!   and [`delete_all`](ModelCollection::delete_all) delegate to each item's [`Record`]
//! - [`validate_all`](ModelCollection::validate_all) validates every item
//! - [`to_array`](ModelCollection::to_array) and [`to_json`](ModelCollection::to_json)
//!   serialize the models
//!
//! Any source becomes a facade with [`Collect::collect_models`].

mod error;
mod facade;
mod record;
mod source;

// Re-export public API
pub use error::{ModelError, RecordError, Result, SourceError};
pub use facade::ModelCollection;
pub use record::{Attributes, Record};
pub use source::{Collect, LazySource};
