//! Command-line front end.
//!
//! Loads rows from a JSON file, builds a table from configuration, then
//! replays a command script against it, printing the rendered table whenever
//! it changes. Side effects reported by the table are printed as `»` lines;
//! delegated sort, filter and paging requests are answered by an in-memory
//! host, which feeds the resulting page back into the table.
//!
//! ```text
//! datatable --rows people.json --script demo.txt --width 1200
//! echo "sort name" | datatable --rows people.json --no-color
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to trace every recomputation.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use datatable::app::{parse_script, MemoryHost};
use datatable::domain::rows_from_json;
use datatable::ui::helpers::strip_ansi;
use datatable::ui::render_to_string;
use datatable::{handle_event, Action, AppState, Config, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "datatable")]
#[command(about = "Render JSON rows as an interactive table driven by a command script", long_about = None)]
struct Args {
    /// JSON file holding an array of row objects
    #[arg(long, value_name = "FILE")]
    rows: PathBuf,

    /// Command script to replay (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial viewport width in logical pixels
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Select rows by this field instead of by position
    #[arg(long, value_name = "KEY")]
    select_by: Option<String>,

    /// Show selection checkboxes
    #[arg(long)]
    selectable: bool,

    /// Let the host sort instead of the table
    #[arg(long)]
    delegate_sort: bool,

    /// Let the host filter instead of the table
    #[arg(long)]
    delegate_filter: bool,

    /// Serve rows in pages of this size
    #[arg(long, value_name = "ROWS")]
    page_size: Option<usize>,

    /// Print plain text without ANSI colors
    #[arg(long)]
    no_color: bool,
}

impl Args {
    /// Loads the configuration file, then applies command-line overrides.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if self.select_by.is_some() {
            config.select_by.clone_from(&self.select_by);
        }
        if self.page_size.is_some() {
            config.page_size = self.page_size;
        }
        config.selectable |= self.selectable;
        config.delegate_sort |= self.delegate_sort;
        config.delegate_filter |= self.delegate_filter;
        config.validate()?;
        Ok(config)
    }
}

struct Session {
    state: AppState,
    host: MemoryHost,
    color: bool,
}

impl Session {
    fn print_table(&self) {
        let output = render_to_string(&self.state.compute_viewmodel(), &self.state.theme);
        if self.color {
            print!("{output}");
        } else {
            print!("{}", strip_ansi(&output));
        }
    }

    /// Reports actions and lets the host answer delegated requests until no
    /// more actions come back. Returns `true` if fresh rows were supplied.
    fn settle(&mut self, mut actions: Vec<Action>) -> Result<bool> {
        let mut reloaded = false;
        while !actions.is_empty() {
            let mut reload = false;
            for action in &actions {
                report(action);
                reload |= self.host.apply(action);
            }
            actions = if reload {
                reloaded = true;
                self.host.sync(&mut self.state)?.1
            } else {
                Vec::new()
            };
        }
        Ok(reloaded)
    }
}

fn report(action: &Action) {
    let line = match action {
        Action::SortRequested { key, direction } => format!("sort requested: {key} {direction}"),
        Action::FilterRequested(filters) => format!("filter requested: {filters:?}"),
        Action::SelectionChanged(rows) => format!("selection changed: {}", serde_json::Value::from(rows.clone())),
        Action::RowClicked { position, row } => format!("row {position} clicked: {row}"),
        Action::ActionInvoked { label, row } => format!("{label} invoked: {row}"),
        Action::PageRequested(page) => format!("page {page} requested"),
        Action::LimitRequested(limit) => format!("page size {limit} requested"),
    };
    println!("» {line}");
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    datatable::observability::init_tracing(&config);

    let _span = tracing::debug_span!("run", rows = %args.rows.display()).entered();
    let rows = rows_from_json(&fs::read_to_string(&args.rows)?)?;
    tracing::info!(rows = rows.len(), "rows loaded");

    let script_text = match &args.script {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let script = parse_script(&script_text)?;

    let host = MemoryHost::new(rows, &config);
    // Columns are inferred from the rows the table is built with.
    let (first_page, _) = host.query();
    let mut session = Session {
        state: datatable::initialize(&config, first_page)?,
        host,
        color: !args.no_color,
    };
    if config.page_size.is_some() {
        let (_, actions) = session.host.sync(&mut session.state)?;
        session.settle(actions)?;
    }
    session.print_table();

    for command in &script {
        println!("$ {}", command.source);
        let (rerender, actions) = handle_event(&mut session.state, &command.event)?;
        let reloaded = session.settle(actions)?;
        if rerender || reloaded {
            session.print_table();
        }
    }

    tracing::info!(commands = script.len(), "script finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("datatable: {e}");
            ExitCode::FAILURE
        }
    }
}
