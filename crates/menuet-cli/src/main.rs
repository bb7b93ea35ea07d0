use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use menuet_core::{MenuetStore, OverwriteGate, TipMode, resolve_startup};
use menuet_infrastructure::FileStorage;

mod commands;

#[derive(Parser)]
#[command(name = "menuet")]
#[command(about = "Menuet - shared menu, consumed items, and tip splitting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the shared menu
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Track what the table consumes
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Show or change the tip configuration
    Tip {
        #[command(subcommand)]
        action: TipAction,
    },
    /// Manage named menu snapshots
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Compute the bill total
    Total {
        /// Round the total to the nearest unit instead of always up
        #[arg(long)]
        no_round_up: bool,
        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List the available menu
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add an item to the menu
    Add { name: String, price: f64 },
    /// Remove an item (and any matching order line)
    Remove { name: String },
    /// Print the menu as a shareable payload
    Share,
    /// Adopt a shared payload as the menu
    Import {
        payload: String,
        /// Discard the current session without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List the order lines
    List {
        #[arg(long)]
        json: bool,
    },
    /// Append a fresh line with amount 1, even if one already exists
    Add {
        name: String,
        price: Option<f64>,
    },
    /// Add one to a line's amount, creating the line if needed
    Plus {
        name: String,
        price: Option<f64>,
    },
    /// Take one from a line's amount, removing the line at amount 1
    Minus { name: String },
    /// Remove a line outright
    Remove { name: String },
    /// Empty the order
    Clear,
}

#[derive(Subcommand)]
enum TipAction {
    /// Show the current tip configuration
    Show,
    /// Set the tip value
    Set { value: f64 },
    /// Set how the tip value is interpreted
    Mode { mode: TipModeArg },
    /// Set the unit the total is rounded to
    Round { unit: f64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum TipModeArg {
    Percent,
    Fixed,
}

impl From<TipModeArg> for TipMode {
    fn from(mode: TipModeArg) -> Self {
        match mode {
            TipModeArg::Percent => TipMode::Percent,
            TipModeArg::Fixed => TipMode::Fixed,
        }
    }
}

#[derive(Subcommand)]
enum SavedAction {
    /// List saved menu names
    List,
    /// Snapshot the current menu under a name
    Save { name: String },
    /// Replace the menu with a snapshot and clear the order
    Load { name: String },
    /// Delete a snapshot
    Delete { name: String },
}

/// Gate that always keeps the inbound payload. Used with `--force` and for
/// startups with no inbound payload, where it is never consulted.
struct AcceptGate;

impl OverwriteGate for AcceptGate {
    fn confirm_discard_session(&self) -> bool {
        true
    }
}

/// Gate that asks on the terminal before discarding a session.
struct PromptGate;

impl OverwriteGate for PromptGate {
    fn confirm_discard_session(&self) -> bool {
        eprint!("Discard the current session's menu and orders? [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = FileStorage::open_default()?;
    let mut store = MenuetStore::new(storage);

    match cli.command {
        // Import is the one command that carries an inbound payload into
        // startup resolution; everything else resolves from persisted state.
        Commands::Menu {
            action: MenuAction::Import { payload, force },
        } => {
            if force {
                resolve_startup(&mut store, Some(&payload), &AcceptGate)?;
            } else {
                resolve_startup(&mut store, Some(&payload), &PromptGate)?;
            }
            println!("Menu now has {} item(s).", store.available().len());
            Ok(())
        }
        command => {
            resolve_startup(&mut store, None, &AcceptGate)?;
            dispatch(&mut store, command)
        }
    }
}

fn dispatch(store: &mut MenuetStore<FileStorage>, command: Commands) -> Result<()> {
    match command {
        Commands::Menu { action } => match action {
            MenuAction::List { json } => commands::menu::list(store, json),
            MenuAction::Add { name, price } => commands::menu::add(store, &name, price),
            MenuAction::Remove { name } => commands::menu::remove(store, &name),
            MenuAction::Share => commands::menu::share(store),
            MenuAction::Import { .. } => unreachable!("import is handled before dispatch"),
        },
        Commands::Order { action } => match action {
            OrderAction::List { json } => commands::order::list(store, json),
            OrderAction::Add { name, price } => commands::order::add(store, &name, price),
            OrderAction::Plus { name, price } => commands::order::plus(store, &name, price),
            OrderAction::Minus { name } => commands::order::minus(store, &name),
            OrderAction::Remove { name } => commands::order::remove(store, &name),
            OrderAction::Clear => commands::order::clear(store),
        },
        Commands::Tip { action } => match action {
            TipAction::Show => commands::tip::show(store),
            TipAction::Set { value } => commands::tip::set(store, value),
            TipAction::Mode { mode } => commands::tip::mode(store, mode.into()),
            TipAction::Round { unit } => commands::tip::round(store, unit),
        },
        Commands::Saved { action } => match action {
            SavedAction::List => commands::saved::list(store),
            SavedAction::Save { name } => commands::saved::save(store, &name),
            SavedAction::Load { name } => commands::saved::load(store, &name),
            SavedAction::Delete { name } => commands::saved::delete(store, &name),
        },
        Commands::Total { no_round_up, json } => commands::total::run(store, !no_round_up, json),
    }
}
