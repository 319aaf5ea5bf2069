//! Per-column filter state and local filter matching.
//!
//! Filter state maps a column key to the raw text the user entered for it. An
//! empty value means "no filter on that column". When filtering is computed
//! locally, a row is visible only if it matches every active filter (logical
//! AND). How a single filter matches depends on the column's [`FilterKind`].

use super::column::FilterKind;
use crate::domain::{CellValue, Record};
use chrono::{DateTime, NaiveDate};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeMap;

/// Active filters keyed by column key, in key order.
pub type FilterMap = BTreeMap<String, String>;

/// Filter values entered for a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: FilterMap,
}

impl FilterState {
    /// Merges `{key: value}` into the state. An empty value clears `key`.
    ///
    /// Returns `true` if the state changed.
    pub fn merge(&mut self, key: &str, value: &str) -> bool {
        if value.is_empty() {
            self.values.remove(key).is_some()
        } else if self.values.get(key).map(String::as_str) == Some(value) {
            false
        } else {
            self.values.insert(key.to_string(), value.to_string());
            true
        }
    }

    /// Removes every filter. Returns `true` if anything was active.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.values.is_empty();
        self.values.clear();
        had_any
    }

    /// Returns `true` if at least one filter has a non-empty value.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.values.values().any(|value| !value.is_empty())
    }

    /// Returns the filter value entered for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The complete filter map, as forwarded to a filter delegate.
    #[must_use]
    pub const fn values(&self) -> &FilterMap {
        &self.values
    }
}

/// One active filter prepared for matching.
struct CompiledFilter<'a> {
    key: &'a str,
    kind: &'a FilterKind,
    needle: String,
    number: Option<f64>,
    date: Option<NaiveDate>,
}

/// A set of active filters ready to be tested against rows.
///
/// Built once per recomputation so filter values are lowercased and parsed a
/// single time rather than once per row.
pub struct RowFilter<'a> {
    filters: Vec<CompiledFilter<'a>>,
    matcher: SkimMatcherV2,
}

impl<'a> RowFilter<'a> {
    /// Prepares `state` for matching. `kind_of` resolves a column key to its
    /// filter kind; keys without a column use [`FilterKind::Text`].
    pub fn new<F>(state: &'a FilterState, kind_of: F) -> Self
    where
        F: Fn(&str) -> Option<&'a FilterKind>,
    {
        static TEXT: FilterKind = FilterKind::Text;

        let filters = state
            .values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                let kind = kind_of(key).unwrap_or(&TEXT);
                CompiledFilter {
                    key,
                    kind,
                    needle: value.to_lowercase(),
                    number: value.trim().parse::<f64>().ok(),
                    date: NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok(),
                }
            })
            .collect();

        Self {
            filters,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Returns `true` if no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns `true` if `row` satisfies every active filter.
    pub fn matches<R: Record>(&self, row: &R) -> bool {
        self.filters.iter().all(|filter| {
            let Some(cell) = row.field(filter.key).filter(|v| !v.is_null()) else {
                return false;
            };
            self.matches_cell(filter, &cell)
        })
    }

    fn matches_cell(&self, filter: &CompiledFilter<'_>, cell: &CellValue) -> bool {
        match filter.kind {
            FilterKind::Text => cell.to_string().to_lowercase().contains(&filter.needle),
            FilterKind::Select { .. } => cell.to_string().to_lowercase() == filter.needle,
            FilterKind::Number => match (filter.number, cell_number(cell)) {
                (Some(wanted), Some(value)) => wanted == value,
                _ => false,
            },
            FilterKind::Date => match (filter.date, cell_date(cell)) {
                (Some(wanted), Some(day)) => wanted == day,
                _ => false,
            },
            FilterKind::Fuzzy => self
                .matcher
                .fuzzy_match(&cell.to_string().to_lowercase(), &filter.needle)
                .is_some(),
        }
    }
}

fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Text(text) => text.trim().parse().ok(),
        other => other.as_f64(),
    }
}

/// Reads a calendar day from a cell: RFC 3339 or `YYYY-MM-DD` text, or unix
/// seconds.
fn cell_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(text) => {
            let text = text.trim();
            DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.date_naive())
                .ok()
                .or_else(|| {
                    text.get(..10)
                        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
                })
        }
        CellValue::Int(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.date_naive()),
        _ => None,
    }
}
