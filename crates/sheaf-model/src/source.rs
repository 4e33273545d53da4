//! Lazy sources of models.

use crate::error::SourceError;
use crate::facade::ModelCollection;

/// A query that can produce models, pulled at most once per facade.
///
/// # Example
///
/// ```
/// use sheaf_model::{Collect, LazySource, SourceError};
///
/// struct Numbers;
///
/// impl LazySource<i64> for Numbers {
///     fn fetch_all(&self) -> Result<Vec<i64>, SourceError> {
///         Ok(vec![1, 2, 3])
///     }
/// }
///
/// let numbers = Numbers.collect_models();
/// assert_eq!(numbers.count().unwrap(), 3);
/// ```
pub trait LazySource<V> {
    /// Fetches every model the query matches.
    fn fetch_all(&self) -> Result<Vec<V>, SourceError>;

    /// Eagerly loads the named relations into already fetched models.
    ///
    /// The default loads nothing.
    fn load_relations(&self, relations: &[&str], models: &mut [&mut V]) -> Result<(), SourceError> {
        let _ = (relations, models);
        Ok(())
    }
}

/// Turns a source into a lazily materialized [`ModelCollection`].
pub trait Collect<V>: Sized {
    /// Wraps the source without fetching anything yet.
    fn collect_models(self) -> ModelCollection<V>;
}

impl<V, S> Collect<V> for S
where
    S: LazySource<V> + Send + Sync + 'static,
{
    fn collect_models(self) -> ModelCollection<V> {
        ModelCollection::from_source(self)
    }
}
