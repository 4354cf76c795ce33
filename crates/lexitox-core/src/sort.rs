//! Frequency-descending sorts over word entries.
//!
//! Three interchangeable algorithms sit behind [`sort_entries`]. They agree
//! on entries with distinct frequencies but not on the relative order of
//! ties:
//!
//! - [`SortAlgorithm::Bubble`] and [`SortAlgorithm::Merge`] are stable.
//! - [`SortAlgorithm::Quick`] uses a Lomuto partition around the last
//!   element and is not stable. Its worst case is O(n²), hit by inputs that
//!   are already ordered by frequency or that share a single frequency.
//!   The partition scheme is kept as-is so output order stays reproducible.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frequency::WordEntry;

/// Sorting algorithm used to rank word entries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortAlgorithm {
    /// Adjacent-swap bubble sort (stable, O(n²)).
    Bubble,
    /// Lomuto quick sort (unstable, O(n log n) average).
    #[default]
    Quick,
    /// Top-down merge sort (stable, O(n log n)).
    Merge,
}

impl SortAlgorithm {
    /// Every algorithm, in comparison order.
    pub const ALL: [Self; 3] = [Self::Bubble, Self::Quick, Self::Merge];

    /// Lowercase name of the algorithm.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }
}

impl std::fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort `entries` in place by frequency, highest first.
#[tracing::instrument(skip(entries), fields(len = entries.len()))]
pub fn sort_entries(entries: &mut [WordEntry], algorithm: SortAlgorithm) {
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(entries),
        SortAlgorithm::Quick => quick_sort(entries),
        SortAlgorithm::Merge => merge_sort(entries),
    }
}

/// Return a sorted copy of `entries`.
pub fn sorted(entries: &[WordEntry], algorithm: SortAlgorithm) -> Vec<WordEntry> {
    let mut copy = entries.to_vec();
    sort_entries(&mut copy, algorithm);
    copy
}

/// Whether two sorted arrays hold the same word and frequency at every index.
pub fn same_order(a: &[WordEntry], b: &[WordEntry]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.word == y.word && x.frequency == y.frequency)
}

/// Pairwise agreement of the three algorithms on one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortComparison {
    /// Number of entries sorted.
    pub entries: usize,
    /// Bubble and quick produced identical arrays.
    pub bubble_vs_quick: bool,
    /// Bubble and merge produced identical arrays.
    pub bubble_vs_merge: bool,
    /// Quick and merge produced identical arrays.
    pub quick_vs_merge: bool,
}

impl SortComparison {
    /// Whether all three algorithms agreed.
    pub const fn all_identical(&self) -> bool {
        self.bubble_vs_quick && self.bubble_vs_merge && self.quick_vs_merge
    }
}

/// Sort copies of `entries` with every algorithm and compare the outputs.
///
/// Returns `None` for fewer than two entries, where there is nothing to compare.
#[tracing::instrument(skip(entries), fields(len = entries.len()))]
pub fn compare_algorithms(entries: &[WordEntry]) -> Option<SortComparison> {
    if entries.len() < 2 {
        return None;
    }

    let bubble = sorted(entries, SortAlgorithm::Bubble);
    let quick = sorted(entries, SortAlgorithm::Quick);
    let merge = sorted(entries, SortAlgorithm::Merge);

    let comparison = SortComparison {
        entries: entries.len(),
        bubble_vs_quick: same_order(&bubble, &quick),
        bubble_vs_merge: same_order(&bubble, &merge),
        quick_vs_merge: same_order(&quick, &merge),
    };
    tracing::debug!(?comparison, "compared sort algorithms");
    Some(comparison)
}

fn bubble_sort(entries: &mut [WordEntry]) {
    let n = entries.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if entries[j].frequency < entries[j + 1].frequency {
                entries.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Lomuto partition: everything with `frequency >= pivot` moves left.
fn partition(entries: &mut [WordEntry]) -> usize {
    let high = entries.len() - 1;
    let pivot = entries[high].frequency;
    let mut store = 0;

    for j in 0..high {
        if entries[j].frequency >= pivot {
            entries.swap(store, j);
            store += 1;
        }
    }
    entries.swap(store, high);
    store
}

fn quick_sort(mut entries: &mut [WordEntry]) {
    // Recurse into the smaller side and loop on the larger to bound stack
    // depth. The partitions are disjoint, so the result is unchanged.
    while entries.len() > 1 {
        let pivot = partition(entries);
        let (left, rest) = std::mem::take(&mut entries).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort(left);
            entries = right;
        } else {
            quick_sort(right);
            entries = left;
        }
    }
}

fn merge_sort(entries: &mut [WordEntry]) {
    if entries.len() < 2 {
        return;
    }
    let mid = entries.len().div_ceil(2);
    merge_sort(&mut entries[..mid]);
    merge_sort(&mut entries[mid..]);
    merge(entries, mid);
}

/// Merge the sorted runs `[..mid]` and `[mid..]`; ties take the left run.
fn merge(entries: &mut [WordEntry], mid: usize) {
    let left: Vec<WordEntry> = entries[..mid].iter_mut().map(std::mem::take).collect();
    let right: Vec<WordEntry> = entries[mid..].iter_mut().map(std::mem::take).collect();

    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    for slot in entries.iter_mut() {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.frequency >= r.frequency,
            (Some(_), None) => true,
            (None, _) => false,
        };
        let next = if take_left { left.next() } else { right.next() };
        if let Some(entry) = next {
            *slot = entry;
        }
    }
}
