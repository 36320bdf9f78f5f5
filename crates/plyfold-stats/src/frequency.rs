//! Frequency tables with a stable ordering
//!
//! Counting categorical values is the workhorse of the descriptive
//! analytics: outcome balance, opening-prefix frequency, distinct-prefix
//! counts. Ordering is deterministic so reports are reproducible: counts
//! descending, then key ascending.

use std::collections::BTreeMap;

/// Counts of distinct values, ordered most common first.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
    total: usize,
}

impl<K> FrequencyTable<K>
where
    K: Ord,
{
    /// Counts the given values.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyfold_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::from_values([3, 1, 3, 2, 3, 1]);
    /// assert_eq!(table.entries(), &[(3, 3), (1, 2), (2, 1)]);
    /// assert_eq!(table.total(), 6);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut counts: BTreeMap<K, usize> = BTreeMap::new();
        let mut total = 0;
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
            total += 1;
        }

        // BTreeMap iteration is key-ascending, and the sort is stable, so
        // equal counts keep the key order.
        let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self { entries, total }
    }

    /// Entries ordered by descending count, ties by ascending key.
    #[must_use]
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    /// The `limit` most common entries.
    #[must_use]
    pub fn top(&self, limit: usize) -> &[(K, usize)] {
        &self.entries[..self.entries.len().min(limit)]
    }

    /// Number of distinct values seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The share of the total held by one value.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn proportion_of(&self, key: &K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, c)| *c);
        count as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let table: FrequencyTable<u32> = FrequencyTable::from_values([]);
        assert!(table.entries().is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.proportion_of(&1), 0.0);
    }

    #[test]
    fn ties_break_by_key_order() {
        let table = FrequencyTable::from_values(["b", "a", "c", "a", "b", "c"]);
        assert_eq!(table.entries(), &[("a", 2), ("b", 2), ("c", 2)]);
    }

    #[test]
    fn top_clamps_to_available_entries() {
        let table = FrequencyTable::from_values([1, 2]);
        assert_eq!(table.top(10).len(), 2);
        assert_eq!(table.top(1), &[(1, 1)]);
    }

    #[test]
    fn proportions_sum_to_one() {
        let table = FrequencyTable::from_values(["x", "x", "y", "z"]);
        assert!((table.proportion_of(&"x") - 0.5).abs() < 1e-12);
        let sum: f64 = ["x", "y", "z"]
            .iter()
            .map(|k| table.proportion_of(k))
            .sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
