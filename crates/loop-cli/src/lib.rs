//! Loop CLI
//!
//! Command definitions and handlers behind the `loop` binary. Handlers
//! return their output as a string; the binary prints it.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod render;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use loop_core::{assistant, LoopConfig, SimulationStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Build the `loop` command
#[must_use]
pub fn command() -> Command {
    Command::new("loop")
        .version(loop_core::VERSION)
        .about("Loop operations simulation: inspect state, activate scenarios, ask ChatOps")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Random seed for metric noise and spikes"),
        )
        .subcommand(
            Command::new("state")
                .about("Print the current state")
                .arg(json_flag()),
        )
        .subcommand(Command::new("logs").about("List trigger logs and the scenario each activates"))
        .subcommand(
            Command::new("activate")
                .about("Activate scenarios in order, starting from baseline")
                .arg(
                    Arg::new("trigger")
                        .required(true)
                        .num_args(1..)
                        .help("Trigger log ids, e.g. log-104"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("ask")
                .about("Ask the ChatOps assistant")
                .arg(
                    Arg::new("text")
                        .required(true)
                        .num_args(1..)
                        .help("Question"),
                )
                .arg(
                    Arg::new("trigger")
                        .long("trigger")
                        .action(ArgAction::Append)
                        .help("Activate this trigger before answering (repeatable)"),
                ),
        )
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// Configuration from `--config`, with `--seed` applied on top
///
/// # Errors
/// Fails if the config file cannot be read or parsed
pub fn load_config(matches: &ArgMatches) -> Result<LoopConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LoopConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    Ok(config)
}

/// Install the global `tracing` subscriber, logging to stderr
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the selected subcommand against a fresh store
///
/// # Errors
/// Fails on a malformed scenario patch set or JSON encoding failure
pub fn run(matches: &ArgMatches, config: LoopConfig) -> Result<String> {
    let mut store = SimulationStore::new(config);

    match matches.subcommand() {
        Some(("state", args)) => {
            if args.get_flag("json") {
                Ok(serde_json::to_string_pretty(&store.snapshot())?)
            } else {
                Ok(render::summary(&store.state()))
            }
        }
        Some(("logs", _)) => Ok(render::logs(&store.state(), store.catalog())),
        Some(("activate", args)) => {
            let mut outcomes = Vec::new();
            for trigger in strings(args, "trigger") {
                outcomes.push(
                    store
                        .activate(&trigger)
                        .with_context(|| format!("activating {trigger}"))?,
                );
            }

            if args.get_flag("json") {
                let report = serde_json::json!({
                    "activations": outcomes,
                    "state": store.snapshot(),
                });
                return Ok(serde_json::to_string_pretty(&report)?);
            }

            let mut out: String = outcomes
                .iter()
                .map(|o| render::outcome(o) + "\n")
                .collect();
            out.push('\n');
            out.push_str(&render::summary(&store.state()));
            Ok(out)
        }
        Some(("ask", args)) => {
            for trigger in strings(args, "trigger") {
                store
                    .activate(&trigger)
                    .with_context(|| format!("activating {trigger}"))?;
            }
            let question = strings(args, "text").join(" ");
            Ok(assistant::respond(&store.state(), &question))
        }
        _ => anyhow::bail!("no subcommand given"),
    }
}

fn strings(args: &ArgMatches, id: &str) -> Vec<String> {
    args.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
