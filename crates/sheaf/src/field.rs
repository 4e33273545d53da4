//! Field access capability and field selectors.
//!
//! [`FieldAccess`] is how the collection looks inside items: it is implemented
//! for scalars, strings, `Option`, JSON values and string-keyed maps, and can be
//! derived for structs with `#[derive(Fields)]` from the `sheaf-macros` crate.
//!
//! [`Field`] selects what to extract from an item: the item itself, a dotted
//! path resolved through [`FieldAccess`], or an arbitrary accessor closure.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::key::Key;
use crate::value::{Number, Value};

/// Trait for types whose fields can be read by the collection.
///
/// All methods default to "nothing here", so scalar types only implement
/// [`value`](FieldAccess::value) and [`is_scalar`](FieldAccess::is_scalar),
/// and records only implement [`field`](FieldAccess::field) (plus
/// [`nested`](FieldAccess::nested) for dotted paths).
///
/// # Manual Implementation
///
/// ```
/// use sheaf::{FieldAccess, Value};
///
/// struct Customer {
///     name: String,
///     age: u8,
/// }
///
/// impl FieldAccess for Customer {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::from(&self.name),
///             "age" => Value::from(self.age),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait FieldAccess {
    /// The item's own scalar view, used when no field is selected.
    fn value(&self) -> Value<'_> {
        Value::Null
    }

    /// Whether [`value`](FieldAccess::value) stands for the whole item.
    ///
    /// Records and containers are not scalars: searching by value never
    /// matches them, even when the needle is null or falsy.
    fn is_scalar(&self) -> bool {
        false
    }

    /// Returns the value of a scalar field, or `Null` when absent.
    fn field(&self, name: &str) -> Value<'_> {
        let _ = name;
        Value::Null
    }

    /// Returns a child item for dotted-path traversal.
    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        let _ = name;
        None
    }
}

/// Resolves a path of field names against an item.
///
/// An empty path yields the item's own value. Every segment but the last
/// walks through [`FieldAccess::nested`]; a missing link yields `Null`.
pub fn resolve_path<'a, T>(item: &'a T, path: &[String]) -> Value<'a>
where
    T: FieldAccess + ?Sized,
{
    let Some((last, parents)) = path.split_last() else {
        return item.value();
    };
    let Some((first, rest)) = parents.split_first() else {
        return item.field(last);
    };

    let mut current = match item.nested(first) {
        Some(child) => child,
        None => return Value::Null,
    };
    for segment in rest {
        current = match current.nested(segment) {
            Some(child) => child,
            None => return Value::Null,
        };
    }
    current.field(last)
}

type Accessor<V> = Arc<dyn Fn(&V) -> Value<'static> + Send + Sync>;

/// Selects the value to extract from an item.
///
/// Built from a string (`"address.city"`), a list of segments, `None`
/// (the item itself) or a closure:
///
/// ```
/// use sheaf::{Field, Value};
///
/// let by_path: Field<serde_json::Value> = "address.city".into();
/// let itself: Field<i64> = Field::Itself;
/// let computed: Field<i64> = Field::with(|n: &i64| Value::from(n * 2));
/// # let _ = (by_path, itself, computed);
/// ```
pub enum Field<V: ?Sized> {
    /// The item's own value.
    Itself,
    /// Path of field names resolved through [`FieldAccess`].
    Path(Vec<String>),
    /// Computed value.
    Accessor(Accessor<V>),
}

impl<V: ?Sized> Field<V> {
    /// Selects a path from its segments.
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Path(segments.into_iter().map(Into::into).collect())
    }

    /// Selects a computed value.
    pub fn with<F>(accessor: F) -> Self
    where
        F: Fn(&V) -> Value<'static> + Send + Sync + 'static,
    {
        Field::Accessor(Arc::new(accessor))
    }
}

impl<V: FieldAccess + ?Sized> Field<V> {
    /// Extracts the selected value from an item.
    pub fn resolve<'a>(&self, item: &'a V) -> Value<'a> {
        match self {
            Field::Itself => item.value(),
            Field::Path(path) => resolve_path(item, path),
            Field::Accessor(accessor) => accessor(item),
        }
    }
}

impl<V: ?Sized> Clone for Field<V> {
    fn clone(&self) -> Self {
        match self {
            Field::Itself => Field::Itself,
            Field::Path(path) => Field::Path(path.clone()),
            Field::Accessor(accessor) => Field::Accessor(Arc::clone(accessor)),
        }
    }
}

impl<V: ?Sized> fmt::Debug for Field<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Itself => f.write_str("Itself"),
            Field::Path(path) => f.debug_tuple("Path").field(&path.join(".")).finish(),
            Field::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

impl<V: ?Sized> From<&str> for Field<V> {
    fn from(path: &str) -> Self {
        Field::path(path.split('.'))
    }
}

impl<V: ?Sized> From<String> for Field<V> {
    fn from(path: String) -> Self {
        Field::from(path.as_str())
    }
}

impl<V: ?Sized> From<Option<&str>> for Field<V> {
    fn from(path: Option<&str>) -> Self {
        path.map_or(Field::Itself, Field::from)
    }
}

impl<V: ?Sized> From<Vec<String>> for Field<V> {
    fn from(segments: Vec<String>) -> Self {
        Field::Path(segments)
    }
}

// ============================================================================
// Scalar implementations
// ============================================================================

macro_rules! scalar_field_access {
    ($($t:ty),*) => {
        $(
            impl FieldAccess for $t {
                fn value(&self) -> Value<'_> {
                    Value::from(*self)
                }

                fn is_scalar(&self) -> bool {
                    true
                }
            }
        )*
    };
}

scalar_field_access!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

impl FieldAccess for str {
    fn value(&self) -> Value<'_> {
        Value::from(self)
    }

    fn is_scalar(&self) -> bool {
        true
    }
}

impl FieldAccess for String {
    fn value(&self) -> Value<'_> {
        Value::from(self)
    }

    fn is_scalar(&self) -> bool {
        true
    }
}

impl FieldAccess for Number {
    fn value(&self) -> Value<'_> {
        Value::Number(*self)
    }

    fn is_scalar(&self) -> bool {
        true
    }
}

impl FieldAccess for Key {
    fn value(&self) -> Value<'_> {
        self.to_value()
    }

    fn is_scalar(&self) -> bool {
        true
    }
}

impl FieldAccess for Value<'_> {
    fn value(&self) -> Value<'_> {
        self.reborrow()
    }

    fn is_scalar(&self) -> bool {
        true
    }
}

impl<T: FieldAccess> FieldAccess for Option<T> {
    fn value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, FieldAccess::value)
    }

    fn is_scalar(&self) -> bool {
        self.as_ref().map_or(true, FieldAccess::is_scalar)
    }

    fn field(&self, name: &str) -> Value<'_> {
        self.as_ref().map_or(Value::Null, |v| v.field(name))
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        self.as_ref().and_then(|v| v.nested(name))
    }
}

macro_rules! delegate_field_access {
    ($($wrapper:ident),*) => {
        $(
            impl<T: FieldAccess + ?Sized> FieldAccess for $wrapper<T> {
                fn value(&self) -> Value<'_> {
                    (**self).value()
                }

                fn is_scalar(&self) -> bool {
                    (**self).is_scalar()
                }

                fn field(&self, name: &str) -> Value<'_> {
                    (**self).field(name)
                }

                fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
                    (**self).nested(name)
                }
            }
        )*
    };
}

delegate_field_access!(Box, Rc, Arc);

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }

    fn is_scalar(&self) -> bool {
        (**self).is_scalar()
    }

    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        (**self).nested(name)
    }
}

// ============================================================================
// Maps and JSON
// ============================================================================

impl<T: FieldAccess> FieldAccess for BTreeMap<String, T> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::Null, FieldAccess::value)
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        self.get(name).map(|v| v as &dyn FieldAccess)
    }
}

impl<T: FieldAccess, S: std::hash::BuildHasher> FieldAccess for HashMap<String, T, S> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::Null, FieldAccess::value)
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        self.get(name).map(|v| v as &dyn FieldAccess)
    }
}

impl FieldAccess for serde_json::Value {
    fn value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => json_number(n),
            serde_json::Value::String(s) => Value::from(s),
            // Containers have no scalar view.
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::Null,
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(
            self,
            serde_json::Value::Array(_) | serde_json::Value::Object(_)
        )
    }

    fn field(&self, name: &str) -> Value<'_> {
        json_child(self, name).map_or(Value::Null, FieldAccess::value)
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        json_child(self, name).map(|v| v as &dyn FieldAccess)
    }
}

fn json_child<'a>(value: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map.get(name),
        serde_json::Value::Array(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn json_number(n: &serde_json::Number) -> Value<'static> {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::U64(u))
    } else {
        n.as_f64().map_or(Value::Null, |f| Value::Number(Number::F64(f)))
    }
}
