//! Implementation of the `#[derive(Fields)]` macro.
//!
//! This module provides derive macro support for sheaf collections,
//! generating a `FieldAccess` implementation and field constants from struct
//! annotations.

mod attrs;
mod derive;

pub use derive::fields_derive_impl;
