//! Single-column tri-state sorting.
//!
//! Clicking a sortable header cycles its sort state through
//! `ascending → descending → neutral → ascending …`. Only one column is active
//! at a time. When sorting is computed locally, rows are reordered with a
//! stable sort over their extracted field values.
//!
//! # Ordering
//!
//! - Missing fields and nulls sort below every present value.
//! - If all present values of the column share one
//!   [`ValueClass`](crate::domain::ValueClass), they are
//!   compared by that class's natural order.
//! - If the column mixes classes, every present value is compared by its
//!   string form.
//!
//! Either way the comparison is a total order, so sorting always terminates
//! and equal values keep their input order in both directions.

use crate::domain::{CellValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Current sort of a table; both fields are `None` in the neutral state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    /// The neutral state: no column sorted, natural row order.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            key: None,
            direction: None,
        }
    }

    /// Returns `true` if no column is sorted.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.direction.is_none()
    }

    /// Returns the direction `key` is sorted in, if it is the active column.
    #[must_use]
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match (&self.key, self.direction) {
            (Some(active), Some(direction)) if active == key => Some(direction),
            _ => None,
        }
    }

    /// Advances the cycle for `key` and returns the direction to report to a
    /// sort delegate.
    ///
    /// The transition into the neutral state is reported as
    /// [`SortDirection::Ascending`], the start of the next cycle, so delegates
    /// always receive a concrete direction.
    pub fn cycle(&mut self, key: &str) -> SortDirection {
        let current = self.direction_for(key);
        match current {
            None => {
                self.key = Some(key.to_string());
                self.direction = Some(SortDirection::Ascending);
                SortDirection::Ascending
            }
            Some(SortDirection::Ascending) => {
                self.direction = Some(SortDirection::Descending);
                SortDirection::Descending
            }
            Some(SortDirection::Descending) => {
                *self = Self::neutral();
                SortDirection::Ascending
            }
        }
    }
}

/// How present values of one column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Natural,
    AsStrings,
}

fn comparison_for(values: &[Option<CellValue>]) -> Comparison {
    let mut classes = values.iter().flatten().filter_map(CellValue::class);
    let Some(first) = classes.next() else {
        return Comparison::Natural;
    };
    if classes.all(|class| class == first) {
        Comparison::Natural
    } else {
        Comparison::AsStrings
    }
}

/// Compares two extracted field values; missing and null sort lowest.
fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>, comparison: Comparison) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match comparison {
            Comparison::Natural => a.natural_cmp(b),
            Comparison::AsStrings => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// Stably reorders `indices` (positions into `rows`) by the field `key`.
///
/// `rows` is never modified. Equal values keep their relative order for both
/// directions: descending reverses the comparison, not the sequence.
pub fn sort_indices<R: Record>(
    rows: &[R],
    indices: &mut [usize],
    key: &str,
    direction: SortDirection,
) {
    let _span = tracing::debug_span!("sort_indices", key, %direction, row_count = indices.len()).entered();

    let values: Vec<Option<CellValue>> = indices.iter().map(|&i| rows[i].field(key)).collect();
    let comparison = comparison_for(&values);
    if comparison == Comparison::AsStrings {
        tracing::debug!(key, "mixed value classes, comparing string forms");
    }

    let mut order: Vec<usize> = (0..indices.len()).collect();
    order.sort_by(|&a, &b| {
        let ordering = compare_cells(values[a].as_ref(), values[b].as_ref(), comparison);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let sorted: Vec<usize> = order.iter().map(|&o| indices[o]).collect();
    indices.copy_from_slice(&sorted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn ids(rows: &[Value], indices: &[usize]) -> Vec<i64> {
        indices
            .iter()
            .map(|&i| rows[i]["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_cycle_three_way() {
        let mut state = SortState::default();
        assert_eq!(state.cycle("name"), SortDirection::Ascending);
        assert_eq!(state.direction_for("name"), Some(SortDirection::Ascending));
        assert_eq!(state.cycle("name"), SortDirection::Descending);
        assert_eq!(state.direction_for("name"), Some(SortDirection::Descending));
        assert_eq!(state.cycle("name"), SortDirection::Ascending);
        assert!(state.is_neutral());
        assert_eq!(state.key, None);
        assert_eq!(state.cycle("name"), SortDirection::Ascending);
        assert_eq!(state.direction_for("name"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_cycle_switching_columns_restarts_ascending() {
        let mut state = SortState::default();
        state.cycle("name");
        state.cycle("name");
        assert_eq!(state.cycle("age"), SortDirection::Ascending);
        assert_eq!(state.direction_for("age"), Some(SortDirection::Ascending));
        assert_eq!(state.direction_for("name"), None);
    }

    #[rstest]
    #[case(SortDirection::Ascending, vec![2, 3, 1])]
    #[case(SortDirection::Descending, vec![1, 2, 3])]
    fn test_sort_is_stable(#[case] direction: SortDirection, #[case] expected: Vec<i64>) {
        let rows = vec![
            json!({"id": 1, "name": "Bea"}),
            json!({"id": 2, "name": "Al"}),
            json!({"id": 3, "name": "Al"}),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&rows, &mut indices, "name", direction);
        assert_eq!(ids(&rows, &indices), expected);
    }

    #[rstest]
    #[case(SortDirection::Ascending, vec![3, 4, 2, 1])]
    #[case(SortDirection::Descending, vec![1, 2, 3, 4])]
    fn test_missing_and_null_sort_lowest(
        #[case] direction: SortDirection,
        #[case] expected: Vec<i64>,
    ) {
        let rows = vec![
            json!({"id": 1, "age": 40}),
            json!({"id": 2, "age": 5}),
            json!({"id": 3}),
            json!({"id": 4, "age": null}),
        ];
        let mut indices = vec![0, 1, 2, 3];
        sort_indices(&rows, &mut indices, "age", direction);
        assert_eq!(ids(&rows, &indices), expected);
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let rows = vec![
            json!({"id": 1, "n": 10}),
            json!({"id": 2, "n": 9.5}),
            json!({"id": 3, "n": -1}),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&rows, &mut indices, "n", SortDirection::Ascending);
        assert_eq!(ids(&rows, &indices), vec![3, 2, 1]);
    }

    #[test]
    fn test_mixed_classes_compare_as_strings() {
        let rows = vec![
            json!({"id": 1, "v": 9}),
            json!({"id": 2, "v": "10"}),
            json!({"id": 3, "v": true}),
            json!({"id": 4, "v": 10}),
        ];
        let mut indices = vec![0, 1, 2, 3];
        sort_indices(&rows, &mut indices, "v", SortDirection::Ascending);
        // "10" == "10" keeps input order, then "9", then "true"
        assert_eq!(ids(&rows, &indices), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_does_not_touch_rows() {
        let rows = vec![json!({"id": 1, "v": "b"}), json!({"id": 2, "v": "a"})];
        let before = rows.clone();
        let mut indices = vec![0, 1];
        sort_indices(&rows, &mut indices, "v", SortDirection::Ascending);
        assert_eq!(rows, before);
        assert_eq!(indices, vec![1, 0]);
    }

    #[test]
    fn test_large_ids_sort_in_order_with_floats() {
        let values = [json!(9_007_199_254_740_993_i64), json!(9_007_199_254_740_992.0), json!(9_007_199_254_740_992_i64)];
        let rows: Vec<Value> = (0..60).map(|i| json!({"id": values[i % 3].clone()})).collect();
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&rows, &mut indices, "id", SortDirection::Ascending);

        let above = 9_007_199_254_740_993_i64;
        let first_above = indices.iter().position(|&i| rows[i]["id"].as_i64() == Some(above)).unwrap();
        assert_eq!(first_above, 40);
        assert!(indices[first_above..].iter().all(|&i| rows[i]["id"].as_i64() == Some(above)));
        // The int 2^53 and the float 2^53 are equal, so they keep input order.
        assert!(indices[..first_above].windows(2).all(|w| w[0] < w[1]));
    }
}
