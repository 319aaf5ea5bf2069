//! Line-oriented command scripts.
//!
//! The `datatable` binary replays a script of commands against a table, one
//! command per line. Blank lines and lines starting with `#` are skipped.
//!
//! | Command                   | Event                              |
//! |---------------------------|------------------------------------|
//! | `sort <key>`              | [`Event::Sort`]                    |
//! | `filter <key> [value…]`   | [`Event::Filter`] (no value clears)|
//! | `clear-filters`           | [`Event::ClearFilters`]            |
//! | `select-all` / `deselect-all` | [`Event::SelectAll`]           |
//! | `select <n>` / `deselect <n>` | [`Event::SelectRow`]           |
//! | `click <n>`               | [`Event::ClickRow`]                |
//! | `menu <n>`                | [`Event::ToggleActions`]           |
//! | `action <n> <i>`          | [`Event::InvokeAction`]            |
//! | `dismiss`                 | [`Event::ClickOutside`]            |
//! | `resize <width>`          | [`Event::Resize`]                  |
//! | `page <n>` / `limit <n>`  | [`Event::PageChange`] / [`Event::LimitChange`] |
//! | `loading on\|off`         | [`Event::SetLoading`]              |
//! | `rows <json array>`       | [`Event::SetRows`]                 |
//!
//! Row positions `<n>` are 0-based positions in the visible sequence; pages
//! are 1-based.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::script::parse_script;
//! use datatable::Event;
//!
//! let script = parse_script("# demo\nsort name\nfilter name al\n")?;
//! assert_eq!(script.len(), 2);
//! assert_eq!(script[0].event, Event::Sort("name".to_string()));
//! assert_eq!(script[1].line, 3);
//! # Ok::<(), datatable::TableError>(())
//! ```

use super::Event;
use crate::domain::{rows_from_json, Result, TableError};

/// One parsed command with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    /// The command text, trimmed.
    pub source: String,
    pub event: Event,
}

/// Parses a whole script.
///
/// # Errors
///
/// Returns [`TableError::Script`] for the first line that is not a valid
/// command.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let source = raw.trim();
            if source.is_empty() || source.starts_with('#') {
                return None;
            }
            Some(parse_command(index + 1, source).map(|event| ScriptLine {
                line: index + 1,
                source: source.to_string(),
                event,
            }))
        })
        .collect()
}

/// Parses one non-empty command line.
///
/// # Errors
///
/// Returns [`TableError::Script`] naming `line` when the command is unknown
/// or its arguments are missing or malformed.
pub fn parse_command(line: usize, source: &str) -> Result<Event> {
    let error = |message: String| TableError::Script { line, message };
    let (command, rest) = source
        .split_once(char::is_whitespace)
        .map_or((source, ""), |(c, r)| (c, r.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let number = |index: usize, what: &str| -> Result<usize> {
        let raw = args
            .get(index)
            .ok_or_else(|| error(format!("`{command}` expects {what}")))?;
        raw.parse()
            .map_err(|_| error(format!("`{command}`: {what} must be a non-negative number, got `{raw}`")))
    };
    let key = || -> Result<String> {
        args.first()
            .map(ToString::to_string)
            .ok_or_else(|| error(format!("`{command}` expects a column key")))
    };

    let event = match command {
        "sort" => Event::Sort(key()?),
        "filter" => {
            let key = key()?;
            let value = rest[key.len()..].trim().to_string();
            Event::Filter { key, value }
        }
        "clear-filters" => Event::ClearFilters,
        "select-all" => Event::SelectAll(true),
        "deselect-all" => Event::SelectAll(false),
        "select" => Event::SelectRow {
            position: number(0, "a row position")?,
            checked: true,
        },
        "deselect" => Event::SelectRow {
            position: number(0, "a row position")?,
            checked: false,
        },
        "click" => Event::ClickRow(number(0, "a row position")?),
        "menu" => Event::ToggleActions(number(0, "a row position")?),
        "action" => Event::InvokeAction {
            position: number(0, "a row position")?,
            action: number(1, "an action index")?,
        },
        "dismiss" => Event::ClickOutside,
        "resize" => {
            let width = number(0, "a width")?;
            Event::Resize(u32::try_from(width).map_err(|_| error(format!("width {width} is too large")))?)
        }
        "page" => Event::PageChange(number(0, "a page number")?),
        "limit" => Event::LimitChange(number(0, "a page size")?),
        "loading" => match args.first().copied() {
            Some("on" | "true") => Event::SetLoading(true),
            Some("off" | "false") => Event::SetLoading(false),
            _ => return Err(error("`loading` expects `on` or `off`".to_string())),
        },
        "rows" => Event::SetRows(rows_from_json(rest).map_err(|e| error(e.to_string()))?),
        other => return Err(error(format!("unknown command `{other}`"))),
    };

    tracing::trace!(line, ?event, "command parsed");
    Ok(event)
}
