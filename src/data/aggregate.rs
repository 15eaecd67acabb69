use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

use super::model::{AccidentRecord, CategoricalField, NumericField};

// ---------------------------------------------------------------------------
// One-dimensional counts
// ---------------------------------------------------------------------------

/// Count records per key, ordered by key.
pub fn count_by<'a, K: Ord>(
    rows: &[&'a AccidentRecord],
    key: impl Fn(&'a AccidentRecord) -> K,
) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for &r in rows {
        *counts.entry(key(r)).or_insert(0) += 1;
    }
    counts
}

pub fn count_categorical(
    rows: &[&AccidentRecord],
    field: CategoricalField,
) -> BTreeMap<String, usize> {
    count_by(rows, |r| r.category(field).to_string())
}

/// Records without a value for `field` are not counted.
pub fn count_numeric(rows: &[&AccidentRecord], field: NumericField) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for v in rows.iter().filter_map(|r| r.numeric(field)) {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Entries ordered by count, largest first; ties keep key order.
pub fn by_count_desc<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.iter().map(|(k, &n)| (k.clone(), n)).collect();
    // Stable sort keeps the BTreeMap key order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

// ---------------------------------------------------------------------------
// Two-dimensional counts
// ---------------------------------------------------------------------------

/// Counts per (primary, secondary) pair. Pairs never observed are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CrossTab<P: Ord, S: Ord> {
    cells: BTreeMap<P, BTreeMap<S, usize>>,
}

impl<P: Ord, S: Ord> Default for CrossTab<P, S> {
    fn default() -> Self {
        CrossTab {
            cells: BTreeMap::new(),
        }
    }
}

impl<P: Ord, S: Ord> CrossTab<P, S> {
    pub fn get(&self, primary: &P, secondary: &S) -> usize {
        self.cells
            .get(primary)
            .and_then(|row| row.get(secondary))
            .copied()
            .unwrap_or(0)
    }

    pub fn primaries(&self) -> impl Iterator<Item = &P> {
        self.cells.keys()
    }

    /// Union of the secondary keys of every row.
    pub fn secondaries(&self) -> BTreeSet<&S> {
        self.cells.values().flat_map(|row| row.keys()).collect()
    }

    pub fn total(&self) -> usize {
        self.cells.values().flat_map(|row| row.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub fn cross_count_by<'a, P: Ord, S: Ord>(
    rows: &[&'a AccidentRecord],
    primary: impl Fn(&'a AccidentRecord) -> P,
    secondary: impl Fn(&'a AccidentRecord) -> S,
) -> CrossTab<P, S> {
    let mut tab = CrossTab::default();
    for &r in rows {
        *tab.cells
            .entry(primary(r))
            .or_default()
            .entry(secondary(r))
            .or_insert(0) += 1;
    }
    tab
}

/// E.g. atmosphere × severity for a stacked bar chart.
pub fn cross_count(
    rows: &[&AccidentRecord],
    primary: CategoricalField,
    secondary: CategoricalField,
) -> CrossTab<String, String> {
    cross_count_by(
        rows,
        |r| r.category(primary).to_string(),
        |r| r.category(secondary).to_string(),
    )
}

// ---------------------------------------------------------------------------
// Age groups
// ---------------------------------------------------------------------------

/// Five-year age bucket `[lower, lower + 5)`, labeled `"lower-(lower+4)"`.
/// The last bucket (`100-104`) also takes every older age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeGroup(u32);

impl AgeGroup {
    pub const WIDTH: u32 = 5;
    pub const TERMINAL_LOWER: u32 = 100;

    pub fn of(age: u32) -> Self {
        AgeGroup((age / Self::WIDTH * Self::WIDTH).min(Self::TERMINAL_LOWER))
    }

    /// Every bucket from `0-4` to the terminal one, in order.
    pub fn all() -> impl Iterator<Item = AgeGroup> {
        (0..=Self::TERMINAL_LOWER)
            .step_by(Self::WIDTH as usize)
            .map(AgeGroup)
    }

    pub fn lower(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower(), self.lower() + Self::WIDTH - 1)
    }
}

impl Serialize for AgeGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Observed buckets only; see [`AgeGroup::all`] for a zero-filled axis.
/// Records without an age are skipped.
pub fn count_by_age_group(rows: &[&AccidentRecord]) -> BTreeMap<AgeGroup, usize> {
    let mut counts = BTreeMap::new();
    for group in rows.iter().filter_map(|r| r.age.map(AgeGroup::of)) {
        *counts.entry(group).or_insert(0) += 1;
    }
    counts
}
