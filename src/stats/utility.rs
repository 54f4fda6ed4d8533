use std::hash::Hash;

use indexmap::IndexMap;

/// Counts occurrences of each value, keyed in order of first appearance.
fn tally<T, I>(values: I) -> IndexMap<T, usize>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut counts = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Returns the most frequent value. Among values tied for the highest count,
/// the one seen first wins. Returns `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (value, count) in tally(values) {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Counts occurrences of each value, most frequent first. Equal counts keep
/// the order in which the values were first seen.
pub fn value_counts<T, I>(values: I) -> IndexMap<T, usize>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut counts = tally(values);
    // stable sort
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}
