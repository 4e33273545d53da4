//! Sheaf - Immutable, chainable keyed collections.
//!
//! A [`Collection`] wraps an ordered key to value sequence and exposes
//! map/filter/reduce/sort/group/slice style operations. Every operation
//! returns a new collection; the receiver is never touched. It supports:
//!
//! - Integer and string keys with associative-array key casting
//! - Key-preserving and re-indexing transformations
//! - Stable multi-key sorting with mixed directions and comparators
//! - Natural-order string comparison
//! - Exact and coercive equality for search, removal and replacement
//! - Positional slicing and pagination
//!
//! # Quick Start
//!
//! ```rust
//! use sheaf::{Collection, Dir, Equality, Number, SortMode};
//! use serde_json::json;
//!
//! let customers = Collection::from(vec![
//!     json!({"id": 1, "name": "Ada", "age": 36}),
//!     json!({"id": 2, "name": "Linus", "age": 28}),
//!     json!({"id": 3, "name": "Grace", "age": 36}),
//! ]);
//!
//! let by_age = customers
//!     .sort_by(["age", "name"], Dir::Desc, SortMode::Regular)
//!     .unwrap();
//! assert_eq!(by_age[0]["name"], "Grace");
//!
//! let names = customers.remap("id", "name");
//! assert!(names.contains("Linus", Equality::Exact));
//!
//! assert_eq!(customers.sum("age"), Number::I64(100));
//! assert_eq!(customers.group_by("age", true)[36].count(), 2);
//! ```
//!
//! # Keys
//!
//! | Operation | Keys of the result |
//! |-----------|--------------------|
//! | `map`, `filter`, `remove`, `replace` | preserved |
//! | `sort`, `sort_by_key`, `sort_natural`, `reverse` | preserved, reordered |
//! | `slice`, `paginate` | preserved or re-indexed, by flag |
//! | `sort_by`, `values`, `keys` | re-indexed `0..n` |
//! | `merge` | integer keys renumbered, named keys kept |
//! | `remap`, `index_by`, `group_by`, `flip` | taken from the items |
//!
//! # Field Access
//!
//! Aggregation, sorting, grouping and re-keying read item fields through
//! [`FieldAccess`], selected with a [`Field`]: the item itself, a dotted path
//! or an accessor closure. Structs get an implementation with
//! `#[derive(Fields)]` from the `sheaf-macros` crate.

extern crate self as sheaf;

mod collection;
mod error;
mod field;
mod key;
mod natural;
mod ordering;
mod page;
mod value;

// Re-export public API
pub use collection::{compare_by_keys, Cells, Collection, Iter, Needle, PerKey, SortKey, SortSpec};
pub use error::{Result, SheafError};
pub use field::{resolve_path, Field, FieldAccess};
pub use key::Key;
pub use natural::natural_cmp;
pub use ordering::{coercive_eq, compare_regular, exact_eq, Dir, Equality, SortMode};
pub use page::{PageWindow, Pagination};
pub use value::{Number, Value};
