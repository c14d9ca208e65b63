//! HotelBits console - CLI entry point
//!
//! `hotelbits tui` opens the dashboard. The other subcommands inspect and
//! edit the same settings file without a terminal UI.

mod commands;

use clap::{Parser, Subcommand};
use commands::Context;
use hotelbits_console::config::{
    default, error::ConfigError, loader::ConfigLoader, schema::Config, xdg,
};
use hotelbits_console::logging;
use hotelbits_console::preferences::{Density, ThemePreference};
use hotelbits_console::tui::app::App;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use widget_board::{BoardManager, BoardOptions, Catalog, SystemClock};

/// HotelBits operations console
#[derive(Parser)]
#[command(name = "hotelbits")]
#[command(version, about = "HotelBits operations console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the hotelbits CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal dashboard
    Tui {
        /// Settings file to use instead of the configured one
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Inspect or edit the board layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
        /// Settings file to use instead of the configured one
        #[arg(long, global = true)]
        store: Option<PathBuf>,
    },

    /// List catalog widgets (`*` marks widgets on the board)
    Widgets {
        /// Only widgets whose title contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
        /// Settings file to use instead of the configured one
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
        /// Settings file to use instead of the configured one
        #[arg(long, global = true)]
        store: Option<PathBuf>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the layout the dashboard would load
    Show {
        /// Viewport width in pixels used when no layout is stored
        #[arg(long)]
        width: Option<u32>,
        /// Print the stored JSON form instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Append a widget with its default size
    Add {
        /// Catalog id
        id: String,
        /// Viewport width in pixels used when no layout is stored
        #[arg(long)]
        width: Option<u32>,
    },
    /// Remove every placement of a widget
    Remove {
        /// Catalog id
        id: String,
    },
    /// Forget the stored layout and go back to the default
    Reset,
}

/// Actions for the `prefs` subcommand.
#[derive(Subcommand)]
enum PrefsAction {
    /// Print the stored preferences and resolved mode
    Show,
    /// Set the theme
    Theme {
        #[arg(value_enum)]
        value: ThemePreference,
    },
    /// Set the density
    Density {
        #[arg(value_enum)]
        value: Density,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        // config commands must work even when the file is broken
        Commands::Config { action } => run_config_command(action),
        command => match load_config() {
            Ok(config) => run_command(command, config),
            Err(e) => {
                eprintln!("Config error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Loads the config file (or defaults) and checks every duration field.
fn load_config() -> Result<Config, ConfigError> {
    let config = ConfigLoader::load_default()?;
    config.validate()?;
    Ok(config)
}

fn run_config_command(action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => load_config().map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_command(command: Commands, config: Config) -> ExitCode {
    let mut out = io::stdout();
    let result = match command {
        Commands::Tui { store } => return run_tui(Context::new(config, store)),
        Commands::Config { action } => return run_config_command(action),
        Commands::Layout { action, store } => {
            logging::init_stderr(config.logging.level);
            let ctx = Context::new(config, store);
            match action {
                LayoutAction::Show { width, json } => commands::layout_show(
                    &ctx,
                    width.unwrap_or_else(commands::detect_viewport_width),
                    json,
                    &mut out,
                ),
                LayoutAction::Add { id, width } => commands::layout_add(
                    &ctx,
                    &id,
                    width.unwrap_or_else(commands::detect_viewport_width),
                    &mut out,
                ),
                LayoutAction::Remove { id } => commands::layout_remove(&ctx, &id, &mut out),
                LayoutAction::Reset => commands::layout_reset(&ctx, &mut out),
            }
        }
        Commands::Widgets { filter, store } => {
            logging::init_stderr(config.logging.level);
            let ctx = Context::new(config, store);
            commands::list_widgets(&ctx, filter.as_deref(), &mut out)
        }
        Commands::Prefs { action, store } => {
            logging::init_stderr(config.logging.level);
            let ctx = Context::new(config, store);
            match action {
                PrefsAction::Show => commands::prefs_show(&ctx, &mut out),
                PrefsAction::Theme { value } => commands::prefs_set_theme(&ctx, value, &mut out),
                PrefsAction::Density { value } => {
                    commands::prefs_set_density(&ctx, value, &mut out)
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Durations and board options the dashboard needs, parsed up front.
struct TuiSettings {
    options: BoardOptions,
    resize_debounce: Duration,
    tick_rate: Duration,
    profile_delay: Duration,
}

impl TuiSettings {
    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            options: config.board.board_options()?,
            resize_debounce: config.board.resize_debounce()?,
            tick_rate: config.tui.tick_rate()?,
            profile_delay: config.tui.profile_delay()?,
        })
    }
}

/// Mounts the board from the settings file and runs the dashboard until quit.
fn run_tui(ctx: Context) -> ExitCode {
    let settings = match TuiSettings::from_config(&ctx.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // stdout and stderr belong to the terminal UI
    let log_path = ctx.config.logging.file_path();
    if let Err(e) = logging::init_file(ctx.config.logging.level, &log_path) {
        eprintln!("Warning: logging disabled ({}): {e}", log_path.display());
    }

    let width = commands::detect_viewport_width();
    tracing::info!(
        "starting console with store {} at {width}px",
        ctx.store_path.display()
    );
    let board = BoardManager::mount(
        ctx.store(),
        SystemClock,
        Catalog::builtin(),
        width,
        settings.options,
    );

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = App::new(board, SystemClock, settings.resize_debounce);
    if let Err(e) = rt.block_on(app.run(settings.tick_rate, settings.profile_delay)) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod cli_tests;
