//! The model collection facade.

use std::fmt;

use once_cell::sync::OnceCell;
use serde::Serialize;
use sheaf::{Collection, Key, SheafError};
use tracing::{debug, trace};

use crate::error::{ModelError, RecordError, Result};
use crate::record::{Attributes, Record};
use crate::source::LazySource;

type BoxedSource<V> = Box<dyn LazySource<V> + Send + Sync>;

/// A [`Collection`] of models, materialized from a [`LazySource`] on first
/// use and then memoized.
///
/// Concurrent first access through `&self` fetches exactly once. Bulk record
/// operations delegate to each item's [`Record`] implementation and stop at
/// the first storage failure.
///
/// # Example
///
/// ```
/// use sheaf_model::{Collect, LazySource, ModelCollection, SourceError};
///
/// struct Ages;
///
/// impl LazySource<u32> for Ages {
///     fn fetch_all(&self) -> Result<Vec<u32>, SourceError> {
///         Ok(vec![30, 12])
///     }
/// }
///
/// let ages = Ages.collect_models();
/// assert!(!ages.is_materialized());
/// assert_eq!(ages.collection()?.sum(sheaf::Field::Itself).to_string(), "42");
///
/// let detached: ModelCollection<u32> = ModelCollection::new();
/// assert!(detached.collection().is_err());
/// # Ok::<(), sheaf_model::ModelError>(())
/// ```
pub struct ModelCollection<V> {
    source: Option<BoxedSource<V>>,
    models: OnceCell<Collection<V>>,
}

impl<V> ModelCollection<V> {
    /// Creates a facade with neither models nor a source.
    ///
    /// Materializing it fails with [`ModelError::InvalidSourceState`].
    pub fn new() -> Self {
        ModelCollection {
            source: None,
            models: OnceCell::new(),
        }
    }

    /// Creates a facade that fetches from `source` on first use.
    pub fn from_source<S>(source: S) -> Self
    where
        S: LazySource<V> + Send + Sync + 'static,
    {
        ModelCollection {
            source: Some(Box::new(source)),
            models: OnceCell::new(),
        }
    }

    /// Creates a facade over models that are already loaded.
    pub fn from_models(models: impl Into<Collection<V>>) -> Self {
        ModelCollection {
            source: None,
            models: OnceCell::with_value(models.into()),
        }
    }

    /// The source this collection was created from, if any.
    pub fn source(&self) -> Option<&(dyn LazySource<V> + Send + Sync)> {
        self.source.as_deref()
    }

    /// Returns `true` once the models have been fetched.
    pub fn is_materialized(&self) -> bool {
        self.models.get().is_some()
    }

    /// The models, fetching them on first call.
    pub fn collection(&self) -> Result<&Collection<V>> {
        self.models
            .get_or_try_init(|| materialize(self.source.as_deref()))
    }

    /// Number of models, fetching them on first call.
    pub fn count(&self) -> Result<usize> {
        Ok(self.collection()?.count())
    }

    /// Unwraps the models, fetching them if that has not happened yet.
    pub fn into_collection(self) -> Result<Collection<V>> {
        let ModelCollection { source, models } = self;
        match models.into_inner() {
            Some(models) => Ok(models),
            None => materialize(source.as_deref()),
        }
    }

    /// Eagerly loads the named relations into the models.
    ///
    /// Needs the source the models came from.
    pub fn find_with(&mut self, relations: &[&str]) -> Result<&mut Self> {
        let Some(source) = self.source.as_deref() else {
            return Err(ModelError::InvalidSourceState(
                "collection was not created from a source, so relations cannot be loaded",
            ));
        };
        if self.models.get().is_none() {
            self.models = OnceCell::with_value(materialize(Some(source))?);
        }
        if let Some(models) = self.models.get_mut() {
            let mut targets: Vec<&mut V> = models.cells().values_mut().collect();
            debug!(?relations, models = targets.len(), "loading relations");
            source
                .load_relations(relations, &mut targets)
                .map_err(ModelError::Source)?;
        }
        Ok(self)
    }

    fn collection_mut(&mut self) -> Result<&mut Collection<V>> {
        self.collection()?;
        self.models
            .get_mut()
            .ok_or(ModelError::InvalidSourceState("models were not materialized"))
    }
}

impl<V> Default for ModelCollection<V> {
    fn default() -> Self {
        ModelCollection::new()
    }
}

impl<V> From<Collection<V>> for ModelCollection<V> {
    fn from(models: Collection<V>) -> Self {
        ModelCollection::from_models(models)
    }
}

impl<V: fmt::Debug> fmt::Debug for ModelCollection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCollection")
            .field("has_source", &self.source.is_some())
            .field("models", &self.models.get())
            .finish()
    }
}

fn materialize<V>(source: Option<&(dyn LazySource<V> + Send + Sync)>) -> Result<Collection<V>> {
    let source = source.ok_or(ModelError::InvalidSourceState(
        "collection was not created from a source",
    ))?;
    let models = source.fetch_all().map_err(ModelError::Source)?;
    debug!(count = models.len(), "materialized model collection");
    Ok(Collection::from_values(models))
}

impl<V: Record> ModelCollection<V> {
    fn each_record<F>(&mut self, operation: &'static str, mut f: F) -> Result<&mut Self>
    where
        F: FnMut(&mut V) -> std::result::Result<(), RecordError>,
    {
        let models = self.collection_mut()?;
        for (key, model) in models.cells().iter_mut() {
            trace!(%key, operation, "record operation");
            f(model).map_err(|source| ModelError::Record {
                key: key.clone(),
                operation,
                source,
            })?;
        }
        Ok(self)
    }

    fn count_accepted<F>(&mut self, operation: &'static str, mut write: F) -> Result<usize>
    where
        F: FnMut(&mut V) -> std::result::Result<bool, RecordError>,
    {
        let mut accepted = 0;
        self.each_record(operation, |model| {
            if write(model)? {
                accepted += 1;
            }
            Ok(())
        })?;
        Ok(accepted)
    }

    /// Deletes every model.
    pub fn delete_all(&mut self) -> Result<()> {
        self.each_record("delete", |model| model.delete())?;
        Ok(())
    }

    /// Switches every model to `scenario`.
    pub fn with_scenario(&mut self, scenario: &str) -> Result<&mut Self> {
        self.each_record("set scenario", |model| {
            model.set_scenario(scenario);
            Ok(())
        })
    }

    /// Assigns `attributes` to every model, then updates just those attributes.
    ///
    /// Returns how many models were written; a model whose update was
    /// declined (for example by failed validation) is not counted.
    pub fn update_all(
        &mut self,
        attributes: &Attributes,
        safe_only: bool,
        run_validation: bool,
    ) -> Result<usize> {
        let names: Vec<&str> = attributes.keys().map(String::as_str).collect();
        self.count_accepted("update", |model| {
            model.set_attributes(attributes, safe_only);
            model.update(run_validation, Some(names.as_slice()))
        })
    }

    /// Assigns `attributes` to every model, then inserts it.
    ///
    /// Returns how many models were written.
    pub fn insert_all(
        &mut self,
        attributes: &Attributes,
        safe_only: bool,
        run_validation: bool,
    ) -> Result<usize> {
        let names: Vec<&str> = attributes.keys().map(String::as_str).collect();
        self.count_accepted("insert", |model| {
            model.set_attributes(attributes, safe_only);
            model.insert(run_validation, Some(names.as_slice()))
        })
    }

    /// Assigns `attributes` to every model without saving.
    pub fn fill_all(&mut self, attributes: &Attributes, safe_only: bool) -> Result<&mut Self> {
        self.each_record("fill", |model| {
            model.set_attributes(attributes, safe_only);
            Ok(())
        })
    }

    /// Saves every model.
    ///
    /// Returns how many models were written.
    pub fn save_all(
        &mut self,
        run_validation: bool,
        attributes: Option<&[&str]>,
    ) -> Result<usize> {
        self.count_accepted("save", |model| model.save(run_validation, attributes))
    }

    /// Validates every model, returning `true` only if all pass.
    ///
    /// Every model is validated, even after a failure.
    pub fn validate_all(&mut self) -> Result<bool> {
        let mut valid = true;
        self.each_record("validate", |model| {
            valid &= model.validate();
            Ok(())
        })?;
        Ok(valid)
    }
}

impl<V: Serialize> ModelCollection<V> {
    /// Serializes every model to JSON, keeping keys.
    ///
    /// A non-empty `fields` list keeps only those fields of object models.
    pub fn to_array(&self, fields: &[&str]) -> Result<Collection<serde_json::Value>> {
        self.collection()?
            .iter()
            .map(|(key, model)| -> Result<(Key, serde_json::Value)> {
                let value = serde_json::to_value(model).map_err(SheafError::from)?;
                Ok((key.clone(), pick_fields(value, fields)))
            })
            .collect()
    }

    /// Encodes the models as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.to_array(&[])?.to_json()?)
    }
}

fn pick_fields(value: serde_json::Value, fields: &[&str]) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if !fields.is_empty() => {
            map.retain(|name, _| fields.contains(&name.as_str()));
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counted {
        calls: Arc<AtomicUsize>,
    }

    impl LazySource<i32> for Counted {
        fn fetch_all(&self) -> std::result::Result<Vec<i32>, crate::SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![3, 4])
        }
    }

    struct Broken;

    impl LazySource<i32> for Broken {
        fn fetch_all(&self) -> std::result::Result<Vec<i32>, crate::SourceError> {
            Err("connection refused".into())
        }
    }

    #[test]
    fn fetches_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let models = ModelCollection::from_source(Counted {
            calls: Arc::clone(&calls),
        });
        assert!(!models.is_materialized());
        assert_eq!(models.count().unwrap(), 2);
        assert_eq!(models.collection().unwrap().to_vec(), vec![3, 4]);
        assert!(models.is_materialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_first_access_fetches_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let models = ModelCollection::from_source(Counted {
            calls: Arc::clone(&calls),
        });
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert_eq!(models.count().unwrap(), 2));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_source() {
        let models: ModelCollection<i32> = ModelCollection::new();
        assert!(matches!(
            models.collection(),
            Err(ModelError::InvalidSourceState(_))
        ));
        assert!(models.source().is_none());

        let mut loaded = ModelCollection::from_models(vec![1]);
        assert_eq!(loaded.count().unwrap(), 1);
        assert!(matches!(
            loaded.find_with(&["orders"]),
            Err(ModelError::InvalidSourceState(_))
        ));
    }

    #[test]
    fn source_failure_is_reported() {
        let models = ModelCollection::from_source(Broken);
        let err = models.collection().unwrap_err();
        assert_eq!(err.to_string(), "source failed: connection refused");
        assert!(!models.is_materialized());
    }

    #[test]
    fn into_collection_fetches_when_needed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let models = ModelCollection::from_source(Counted { calls });
        assert_eq!(models.into_collection().unwrap().count(), 2);
    }

    #[test]
    fn encoding_keeps_declared_field_order() {
        #[derive(Serialize)]
        struct Row {
            zeta: u8,
            alpha: u8,
        }

        let models = ModelCollection::from_models(vec![Row { zeta: 1, alpha: 2 }]);
        assert_eq!(models.to_json().unwrap(), r#"[{"zeta":1,"alpha":2}]"#);
        let picked = models.to_array(&["alpha", "zeta"]).unwrap();
        assert_eq!(picked.to_json().unwrap(), r#"[{"zeta":1,"alpha":2}]"#);
    }

    #[test]
    fn field_picking() {
        let value = json!({"id": 1, "name": "a", "age": 3});
        assert_eq!(pick_fields(value.clone(), &[]), value);
        assert_eq!(pick_fields(value, &["id", "age"]), json!({"id": 1, "age": 3}));
        assert_eq!(pick_fields(json!(5), &["id"]), json!(5));
    }
}
