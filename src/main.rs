#![forbid(unsafe_code)]

mod constants;
mod drag;
mod engine;
mod rows;
mod store;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use drag::{DropEvent, DropOutcome};
use engine::ReorderEngine;
use rows::Slot;
use store::{FileStore, MemoryStore, OrderStore};

/// Reorder icons across the bar and the shelf, and keep that order.
#[derive(Parser)]
#[command(name = "icon-shelf", version, about)]
struct Cli {
    /// Path to the order file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run against an in-memory store, leaving no file behind
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print both lists and the reorder signal
    Show,
    /// Overwrite one slot's stored order with the given keys
    Seed {
        slot: Slot,
        keys: Vec<String>,
    },
    /// Probe whether a drag can start on a row, printing its carried key
    Drag {
        slot: Slot,
        index: usize,
    },
    /// Deliver one drop gesture to the engine
    Drop {
        /// Key of the dragged item
        #[arg(long)]
        source: String,
        /// List the drop landed in
        #[arg(long = "into")]
        target: Slot,
        /// Row position the drop landed on (omit for an empty-space drop)
        #[arg(long = "at")]
        index: Option<usize>,
    },
    /// Clear both stored orders
    Reset {
        /// Confirm; reset refuses to run without it
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => TraceLevel::INFO,
        1 => TraceLevel::DEBUG,
        _ => TraceLevel::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.ephemeral {
        run(MemoryStore::new(), cli.command)
    } else {
        let path = cli.config.unwrap_or_else(FileStore::default_path);
        info!(path = %path.display(), "Using order file");
        run(FileStore::open(path), cli.command)
    }
}

fn run<S: OrderStore>(mut store: S, command: Command) -> Result<()> {
    match command {
        Command::Show => {
            let mut engine = ReorderEngine::new(store);
            engine.initialize();
            print_lists(&engine);
        }
        Command::Seed { slot, keys } => {
            store.save(slot, &keys)?;
            store.toggle_reorder_signal()?;
            info!(slot = %slot, count = keys.len(), "Seeded order");
        }
        Command::Drag { slot, index } => {
            let mut engine = ReorderEngine::new(store);
            engine.initialize();
            match engine.begin_drag(slot, index) {
                Some(source) => println!("dragging: {}", source.key),
                None => println!("not draggable"),
            }
        }
        Command::Drop { source, target, index } => {
            let mut engine = ReorderEngine::new(store);
            engine.initialize();
            let event = DropEvent {
                source_key: source,
                target_slot: target,
                target_index: index,
            };
            match engine.resolve_drop(&event)? {
                DropOutcome::Accepted => {
                    println!("accepted");
                    print_lists(&engine);
                }
                DropOutcome::Rejected(reason) => println!("rejected: {reason}"),
            }
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("reset clears both stored orders and cannot be undone; pass --yes to confirm");
            }
            let mut engine = ReorderEngine::new(store);
            engine.reset()?;
            println!("cleared");
        }
    }
    Ok(())
}

fn print_lists<S: OrderStore>(engine: &ReorderEngine<S>) {
    for slot in [Slot::Primary, Slot::Secondary] {
        println!("{slot}:");
        for row in engine.rows(slot) {
            println!("  {}", row.title());
        }
    }
    println!("reorder signal: {}", engine.store().reorder_signal());
}
