//! Positional windows: `slice` and `paginate`.

use super::Collection;
use crate::page::PageWindow;

impl<V: Clone> Collection<V> {
    /// Takes a positional window of entries.
    ///
    /// - a negative `offset` counts from the end
    /// - `limit` of `None` runs to the end, a negative limit stops that many
    ///   entries before the end
    /// - without `preserve_keys` the result is re-indexed `0..n`
    ///
    /// ```
    /// use sheaf::{Collection, Key};
    ///
    /// let c = Collection::from(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(c.slice(3, None, true), Collection::from([(3, 4), (4, 5)]));
    /// assert_eq!(c.slice(-2, Some(1), false).to_items(), vec![(Key::Int(0), 4)]);
    /// ```
    pub fn slice(&self, offset: isize, limit: Option<isize>, preserve_keys: bool) -> Collection<V> {
        let (start, end) = window(self.entries.len(), offset, limit);
        let picked = &self.entries[start..end];
        if preserve_keys {
            Collection::from_unique_entries(picked.to_vec())
        } else {
            Collection::from_values(picked.iter().map(|(_, v)| v.clone()))
        }
    }

    /// Slices out the page described by `page`.
    pub fn paginate(&self, page: impl PageWindow, preserve_keys: bool) -> Collection<V> {
        let limit = page.limit();
        self.slice(page.offset(), (limit > 0).then_some(limit), preserve_keys)
    }
}

/// Resolves offset/limit into a `start..end` range within `len`.
fn window(len: usize, offset: isize, limit: Option<isize>) -> (usize, usize) {
    let start = if offset < 0 {
        len.saturating_sub(offset.unsigned_abs())
    } else {
        offset.unsigned_abs().min(len)
    };
    let remaining = len - start;
    let take = match limit {
        None => remaining,
        Some(n) if n < 0 => remaining.saturating_sub(n.unsigned_abs()),
        Some(n) => n.unsigned_abs().min(remaining),
    };
    (start, start + take)
}
