//! `errands`: a shared errand board on the command line.
//!
//! Reads the board from a JSON snapshot, applies one command, and warns
//! about overlapping errands before writing the snapshot back.

mod config;
mod snapshot;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use errand_engine::{
    AnnotatedErrand, ConflictEntry, ConflictReport, ErrandDraft, JoinOutcome, Mutation, User,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Shared errand board with scheduling conflict warnings.
#[derive(Parser)]
#[command(name = "errands", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Errand snapshot file (overrides `data_file` from the config).
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show what a new errand would overlap, without saving it.
    Check {
        #[command(flatten)]
        owner: OwnerArgs,
        #[command(flatten)]
        fields: ErrandArgs,
    },

    /// Add an errand.
    Add {
        #[command(flatten)]
        owner: OwnerArgs,
        #[command(flatten)]
        fields: ErrandArgs,
    },

    /// Replace the fields of one of your errands.
    Edit {
        id: u64,
        /// Acting user id.
        #[arg(long)]
        user: u64,
        #[command(flatten)]
        fields: ErrandArgs,
    },

    /// Delete one of your errands.
    Delete {
        id: u64,
        /// Acting user id.
        #[arg(long)]
        user: u64,
    },

    /// Join someone's errand.
    Join {
        id: u64,
        /// Acting user id.
        #[arg(long)]
        user: u64,
    },

    /// List the errands overlapping an existing errand.
    Conflicts { id: u64 },

    /// List a user's errands with their overlaps.
    Dashboard {
        /// User whose errands to show.
        #[arg(long)]
        user: u64,
    },
}

#[derive(Args)]
struct OwnerArgs {
    /// Owner's user id.
    #[arg(long)]
    user: u64,
    /// Owner's display name.
    #[arg(long)]
    user_name: String,
}

#[derive(Args)]
struct ErrandArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    location: String,
    /// Start time, HH:MM.
    #[arg(long)]
    start: String,
    /// End time, HH:MM.
    #[arg(long)]
    end: String,
    #[arg(long, allow_negative_numbers = true)]
    priority: Option<i64>,
}

impl From<ErrandArgs> for ErrandDraft {
    fn from(args: ErrandArgs) -> Self {
        Self {
            name: args.name,
            location: args.location,
            start_time: args.start,
            end_time: args.end,
            priority: args.priority,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let data_file = cli.data.clone().unwrap_or_else(|| config.data_file.clone());
    let mut board = snapshot::load(&data_file, config.default_priority)?;

    match cli.command {
        Command::Check { owner, fields } => {
            let user = User::new(owner.user, owner.user_name);
            let checked = board.check(&user, &fields.into())?;
            print_mutation(&checked, cli.json, None)
        }
        Command::Add { owner, fields } => {
            let user = User::new(owner.user, owner.user_name);
            let added = board.add(&user, &fields.into())?;
            snapshot::save(&data_file, board)?;
            print_mutation(&added, cli.json, Some("Errand added successfully!"))
        }
        Command::Edit { id, user, fields } => {
            let edited = board.edit(id, user, &fields.into())?;
            snapshot::save(&data_file, board)?;
            print_mutation(&edited, cli.json, Some("Errand updated successfully!"))
        }
        Command::Delete { id, user } => {
            let removed = board.delete(id, user)?;
            snapshot::save(&data_file, board)?;
            if cli.json {
                print_json(&removed)
            } else {
                println!("Errand deleted successfully.");
                Ok(())
            }
        }
        Command::Join { id, user } => {
            let outcome = board.join(id, user)?;
            let errand = board.get(id)?;
            let message = match outcome {
                JoinOutcome::Joined => {
                    format!("You joined {}'s errand: {}", errand.owner_name, errand.name)
                }
                JoinOutcome::AlreadyJoined => "You are already part of this errand.".to_string(),
            };
            if outcome == JoinOutcome::Joined {
                snapshot::save(&data_file, board)?;
            }
            if cli.json {
                print_json(&outcome)
            } else {
                println!("{message}");
                Ok(())
            }
        }
        Command::Conflicts { id } => {
            let report = board.conflicts(id)?;
            if cli.json {
                print_json(&report)
            } else {
                print_report(&report);
                Ok(())
            }
        }
        Command::Dashboard { user } => {
            let dashboard = board.dashboard(user);
            if cli.json {
                print_json(&dashboard)
            } else {
                print_dashboard(&dashboard);
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(report: &ConflictReport) {
    if report.is_empty() {
        println!("No conflicts.");
    } else {
        print!("{report}");
    }
}

fn print_mutation(mutation: &Mutation, json: bool, done: Option<&str>) -> Result<()> {
    if json {
        return print_json(mutation);
    }
    print_report(&mutation.report);
    if let Some(done) = done {
        println!("{done} (id {})", mutation.errand.id);
    }
    Ok(())
}

fn print_dashboard(dashboard: &[AnnotatedErrand<'_>]) {
    if dashboard.is_empty() {
        println!("No errands.");
        return;
    }
    for entry in dashboard {
        let e = entry.errand;
        println!(
            "#{} {} ({}) at {} [priority {}]",
            e.id, e.name, e.interval, e.location, e.priority
        );
        for other in &entry.overlaps {
            println!("    {}", ConflictEntry::from(*other));
        }
    }
}
