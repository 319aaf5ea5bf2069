//! Event handling and state transition logic.
//!
//! Events arrive from the host (user input, resizes, fresh data). The handler
//! applies each one to the table and returns whether the view must be
//! re-rendered together with the side effects the table's callbacks queued.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::{handle_event, AppState, Event};
//! use datatable::{Config, Theme};
//! use serde_json::json;
//!
//! let mut state = AppState::new(&Config::default(), Theme::default(), vec![json!({"name": "Al"})])?;
//! let (rerender, actions) = handle_event(&mut state, &Event::Sort("name".to_string()))?;
//! assert!(rerender);
//! assert!(actions.is_empty());
//! # Ok::<(), datatable::TableError>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::Result;
use serde_json::Value;

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A sortable column header was activated.
    Sort(String),
    /// A filter input changed; an empty value clears the filter.
    Filter { key: String, value: String },
    /// The "clear filters" control was activated.
    ClearFilters,
    /// The header checkbox changed.
    SelectAll(bool),
    /// A row checkbox changed.
    SelectRow { position: usize, checked: bool },
    /// A row body was clicked.
    ClickRow(usize),
    /// A row's overflow-menu trigger was clicked.
    ToggleActions(usize),
    /// The `action`-th visible action of a row was clicked.
    InvokeAction { position: usize, action: usize },
    /// A click landed outside any open action menu.
    ClickOutside,
    /// The viewport width changed.
    Resize(u32),
    /// A page was chosen in the pagination bar.
    PageChange(usize),
    /// A page size was chosen in the pagination bar.
    LimitChange(usize),
    /// The host supplied new rows.
    SetRows(Vec<Value>),
    /// The host started or finished loading.
    SetLoading(bool),
}

/// Processes an event and returns `(rerender, actions)`.
///
/// `rerender` is `true` when the view model changed. `actions` are the side
/// effects queued by the table's callbacks while handling the event, oldest
/// first.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for events that touch I/O.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let table = &mut state.table;
    let rerender = match event {
        Event::Sort(key) => table.apply_sort(key),
        Event::Filter { key, value } => {
            table.apply_filter(key, value);
            true
        }
        Event::ClearFilters => {
            table.clear_filters();
            true
        }
        Event::SelectAll(checked) => {
            table.select_all(*checked);
            true
        }
        Event::SelectRow { position, checked } => {
            if *position >= table.visible_len() {
                tracing::warn!(position, visible = table.visible_len(), "select on a row that is not visible");
                return Ok((false, vec![]));
            }
            table.select_row(*position, *checked);
            true
        }
        Event::ClickRow(position) => {
            let menu_was_open = table.action_menu().open_row().is_some();
            table.click_row(*position);
            menu_was_open
        }
        Event::ToggleActions(position) => table.toggle_action_menu(*position),
        Event::InvokeAction { position, action } => {
            let invoked = table.invoke_action(*position, *action);
            if !invoked {
                tracing::warn!(position, action, "no such action on this row");
            }
            invoked
        }
        Event::ClickOutside => table.dismiss_action_menu(),
        Event::Resize(width) => table.set_viewport_width(*width),
        Event::PageChange(page) => {
            let valid = table
                .pagination()
                .map_or(false, |p| (1..=p.total_pages()).contains(page));
            if valid {
                table.change_page(*page);
            } else {
                tracing::warn!(page, "page change ignored");
            }
            false
        }
        Event::LimitChange(limit) => {
            if state.page_sizes.contains(limit) {
                table.change_limit(*limit);
            } else {
                tracing::warn!(limit, sizes = ?state.page_sizes, "page size not offered");
            }
            false
        }
        Event::SetRows(rows) => {
            tracing::debug!(rows = rows.len(), "rows replaced");
            table.set_rows(rows.clone());
            true
        }
        Event::SetLoading(loading) => {
            table.set_loading(*loading);
            true
        }
    };

    let actions = state.drain_actions();
    tracing::debug!(rerender, actions = actions.len(), "event handled");
    Ok((rerender, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::table::SortDirection;
    use crate::ui::Theme;
    use rstest::rstest;
    use serde_json::json;

    fn state(config: &Config) -> AppState {
        let rows = vec![
            json!({"id": 1, "name": "Bea"}),
            json!({"id": 2, "name": "Al"}),
            json!({"id": 3, "name": "Al"}),
        ];
        AppState::new(config, Theme::default(), rows).unwrap()
    }

    fn ids(state: &AppState) -> Vec<i64> {
        state
            .table
            .visible_rows()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_sort_events_cycle() {
        let mut state = state(&Config::default());
        let sort = Event::Sort("name".to_string());

        assert_eq!(handle_event(&mut state, &sort).unwrap(), (true, vec![]));
        assert_eq!(ids(&state), vec![2, 3, 1]);
        handle_event(&mut state, &sort).unwrap();
        assert_eq!(ids(&state), vec![1, 2, 3]);
        handle_event(&mut state, &sort).unwrap();
        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert!(state.table.sort_state().is_neutral());
    }

    #[test]
    fn test_delegated_events_produce_actions() {
        let config = Config {
            delegate_sort: true,
            delegate_filter: true,
            ..Config::default()
        };
        let mut state = state(&config);

        let (_, actions) = handle_event(&mut state, &Event::Sort("name".to_string())).unwrap();
        assert_eq!(
            actions,
            vec![Action::SortRequested {
                key: "name".to_string(),
                direction: SortDirection::Ascending
            }]
        );

        let (_, actions) = handle_event(
            &mut state,
            &Event::Filter {
                key: "name".to_string(),
                value: "al".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(&actions[..], [Action::FilterRequested(map)] if map["name"] == "al"));
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn test_row_click_reports_row() {
        let mut state = state(&Config::default());
        let (rerender, actions) = handle_event(&mut state, &Event::ClickRow(1)).unwrap();
        assert!(!rerender);
        assert_eq!(
            actions,
            vec![Action::RowClicked {
                position: 1,
                row: json!({"id": 2, "name": "Al"})
            }]
        );
    }

    #[rstest]
    #[case(Event::SelectRow { position: 9, checked: true })]
    #[case(Event::ClickOutside)]
    #[case(Event::ToggleActions(0))]
    #[case(Event::InvokeAction { position: 0, action: 0 })]
    #[case(Event::Resize(900))]
    fn test_noop_events_do_not_rerender(#[case] event: Event) {
        let mut state = state(&Config {
            selectable: true,
            ..Config::default()
        });
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    #[test]
    fn test_pagination_events_are_validated() {
        let mut state = state(&Config::default());
        state.set_pagination(1, 10, 25);

        let (_, actions) = handle_event(&mut state, &Event::PageChange(4)).unwrap();
        assert!(actions.is_empty());
        let (_, actions) = handle_event(&mut state, &Event::LimitChange(7)).unwrap();
        assert!(actions.is_empty());

        let (rerender, actions) = handle_event(&mut state, &Event::PageChange(3)).unwrap();
        assert!(!rerender);
        assert_eq!(actions, vec![Action::PageRequested(3)]);
        let (_, actions) = handle_event(&mut state, &Event::LimitChange(25)).unwrap();
        assert_eq!(actions, vec![Action::LimitRequested(25)]);
    }

    #[test]
    fn test_set_rows_and_loading() {
        let mut state = state(&Config::default());
        handle_event(&mut state, &Event::SetLoading(true)).unwrap();
        assert!(state.table.is_loading());

        let (rerender, _) =
            handle_event(&mut state, &Event::SetRows(vec![json!({"id": 9, "name": "Zoe"})])).unwrap();
        assert!(rerender);
        assert_eq!(ids(&state), vec![9]);
    }
}
