//! Proc macros for sheaf.
//!
//! # Derive Macros
//!
//! - [`Fields`] - Generate a `FieldAccess` implementation and field name
//!   constants from struct field annotations
//!
//! # Examples
//!
//! For working examples, see `sheaf/tests/derive.rs`.

mod fields;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `sheaf::FieldAccess` for a struct with named fields.
///
/// Only fields carrying a `#[field]` attribute are exposed, which lets
/// collections sum, sort, group and re-key items by those fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[field]` | Scalar field, read through its own `FieldAccess::value` |
/// | `#[field(nested)]` | Child reachable with dotted paths (`address.city`) |
/// | `#[field(value)]` | Also the struct's own scalar view (at most one field) |
/// | `#[field(skip)]` | Exclude this field |
/// | `#[field(rename = "...")]` | Use a custom field name |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Customer::NAME`, `Customer::AGE`)
/// 2. Implementation of `FieldAccess::field()` and `FieldAccess::nested()`,
///    plus `FieldAccess::value()` and `FieldAccess::is_scalar()` when a field is
///    marked `value`
///
/// # Example
///
/// ```ignore
/// use sheaf::{Collection, Dir, SortMode};
/// use sheaf_macros::Fields;
///
/// #[derive(Clone, Fields)]
/// struct Address {
///     #[field]
///     city: String,
/// }
///
/// #[derive(Clone, Fields)]
/// struct Customer {
///     #[field]
///     name: String,
///
///     #[field]
///     age: u8,
///
///     #[field(nested)]
///     address: Address,
///
///     #[field(skip)]
///     password_hash: String,
/// }
///
/// let customers = Collection::from(vec![/* ... */]);
/// let by_city = customers.group_by("address.city", false);
/// let oldest_first = customers.sort_by(Customer::AGE, Dir::Desc, SortMode::Regular)?;
/// ```
#[proc_macro_derive(Fields, attributes(field))]
pub fn fields_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::fields_derive_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
