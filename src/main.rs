//! datagrid - browse JSON records in a terminal data grid.
//!
//! Loads a records file, optionally a grid definition describing the
//! columns, and either opens the interactive grid or prints the current page
//! as tab-separated values with `--dump`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use datagrid::app::App;
use datagrid::config::{Config, GridFile, Settings, MAX_PAGE_SIZE};
use datagrid::data::load_records;
use datagrid::error::{self, AppError};
use datagrid::events::{EventHandler, InteractionScope, KeyBindings};
use datagrid::grid::{ColumnSchema, GridConfig, Record, TableController};
use datagrid::logging::{self, LogTarget};
use datagrid::ui::{init_theme, ListView, Theme};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "datagrid", version, about)]
struct Cli {
    /// JSON array or JSON Lines file holding the records.
    #[arg(required_unless_present = "init_config")]
    records: Option<PathBuf>,

    /// Grid definition (TOML) describing columns and feature flags.
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Rows per page.
    #[arg(short = 'n', long, value_name = "N", value_parser = parse_page_size)]
    page_size: Option<usize>,

    /// Initial search text.
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Initial sort column key.
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Show every row on one page.
    #[arg(long)]
    no_pagination: bool,

    /// Print the current page as tab-separated values and exit.
    #[arg(long)]
    dump: bool,

    /// Write a default settings file and exit.
    #[arg(long, conflicts_with_all = ["records", "dump"])]
    init_config: bool,
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(format!("page size must be between 1 and {}", MAX_PAGE_SIZE));
    }
    Ok(size)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => {
                    eprintln!("Error: {}", app_error.user_message());
                    if let Some(action) = app_error.suggested_action() {
                        eprintln!("{}", action);
                    }
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.init_config {
        let path = Config::default().save().map_err(AppError::from)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let target = if cli.dump {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(target).context("initialize logging")?;

    let (settings, settings_error) = match Config::load() {
        Ok(config) => (config.settings, None),
        Err(e) => {
            warn!(error = %e, "Could not load settings, using defaults");
            (Settings::default(), Some(AppError::from(e)))
        }
    };

    let Some(records_path) = cli.records.as_deref() else {
        bail!("no records file given");
    };
    let records = load_records(records_path).map_err(AppError::from)?;
    let grid = build_grid(&cli, records, &settings)?;

    let result = if cli.dump {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_tsv(&grid, &mut out).context("write rows")
    } else {
        init_theme(Theme::by_name(&settings.theme));
        let title = records_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| records_path.display().to_string());
        let scope = InteractionScope::new();
        let record_count = grid.records().len();
        let list = ListView::new(grid, KeyBindings::new(settings.vim_mode), scope.clone());
        let mut app = App::new(title, list);
        app.notify_info(format!("Loaded {} records", record_count));
        if let Some(error) = settings_error {
            app.handle_error(&error);
        }
        run_tui(&mut app, EventHandler::with_tick_rate(scope, settings.tick_rate_ms))
    };

    logging::shutdown();
    result
}

/// Build the grid from the records, the optional grid file and the flags.
///
/// Page size comes from `--page-size`, then the grid file, then the settings.
fn build_grid(
    cli: &Cli,
    records: Vec<Record>,
    settings: &Settings,
) -> error::Result<TableController> {
    let (schema, mut config) = match &cli.schema {
        Some(path) => load_grid_file(path)?,
        None => {
            let schema = records.first().map(ColumnSchema::infer).unwrap_or_default();
            let config = GridConfig {
                filterable: true,
                page_size: settings.default_page_size,
                ..GridConfig::default()
            };
            (schema, config)
        }
    };
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if cli.no_pagination {
        config.pagination = false;
    }

    let mut grid = TableController::new(records, schema, config);
    if let Some(search) = &cli.search {
        grid.set_search_term(search.as_str());
    }
    if let Some(sort) = &cli.sort {
        if grid.schema().get(sort).is_none() {
            return Err(AppError::other(format!("Unknown sort column '{}'", sort)));
        }
        grid.set_sort(sort);
        if cli.desc {
            grid.set_sort(sort);
        }
    }
    info!(
        rows = grid.view().total_rows,
        pages = grid.view().total_pages,
        "Grid ready"
    );
    Ok(grid)
}

fn load_grid_file(path: &Path) -> error::Result<(ColumnSchema, GridConfig)> {
    let file = GridFile::load(path)?;
    let schema = file.schema()?;
    Ok((schema, file.grid))
}

/// Write the header and the current page as tab-separated values.
fn write_tsv<W: Write>(grid: &TableController, out: &mut W) -> io::Result<()> {
    let clean = |text: &str| text.replace(['\t', '\n', '\r'], " ");

    let header: Vec<String> = grid.columns().iter().map(|c| clean(c.title())).collect();
    writeln!(out, "{}", header.join("\t"))?;
    for row in &grid.view().rows {
        let cells: Vec<String> = grid
            .cells(row)
            .iter()
            .map(|cell| clean(cell.label()))
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    out.flush()
}

/// Run the interactive grid until the user quits.
///
/// The terminal is restored even when drawing or reading input fails.
fn run_tui(app: &mut App, mut events: EventHandler) -> anyhow::Result<()> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("could not enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;

    let result = event_loop(&mut terminal, app, &mut events);

    let released = events.release();
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    released.context("disable mouse capture")?;
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame)).context("draw")?;
        let event = events.next().context("read input")?;
        app.update(event);
    }
    Ok(())
}
