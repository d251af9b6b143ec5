//! intent-sync - Entry Point
//!
//! Parses the command line, loads the project configuration and runs one
//! workflow. Updates go out one at a time on a single async runtime.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use intent_sync::api::AgentClient;
use intent_sync::collect::FileCollector;
use intent_sync::core::error::{Result, SyncError};
use intent_sync::core::ProjectConfig;
use intent_sync::project;
use intent_sync::sync::{failure_count, EntityUpdater, IntentUpdater, UpdateOutcome};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Sync intent definitions with a conversational-agent platform
#[derive(Parser, Debug)]
#[command(name = "intent-sync", version)]
struct Args {
    /// Project root containing intents/, responses/ and entities/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the project layout with sample files
    Init,
    /// Create or update objects on the platform
    Update {
        #[command(subcommand)]
        target: UpdateTarget,
    },
    /// Print the expanded training phrases of one intent
    Expand {
        /// Intent name (file stem in intents/)
        intent: String,
    },
}

#[derive(Subcommand, Debug)]
enum UpdateTarget {
    /// Update intents; all of them when no names are given
    Intents { names: Vec<String> },
    /// Update entities; all of them when no names are given
    Entities { names: Vec<String> },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("intent_sync=info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Init => {
            for path in project::init(&args.root)? {
                println!("created {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Expand { intent } => {
            let config = ProjectConfig::load_file(&args.root)?;
            let files = FileCollector::new(&config).intent_files(&[intent.as_str()])?;
            let Some(file) = files.first() else {
                return Err(SyncError::ConfigError(format!("no intent file named '{}'", intent)));
            };
            for utterance in file.expanded_utterances() {
                println!("{}", utterance);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Update { target } => {
            let config = ProjectConfig::load(&args.root)?;
            let client = AgentClient::from_config(&config.api)?;
            let rt = Runtime::new()?;

            let outcomes = match target {
                UpdateTarget::Intents { names } => {
                    rt.block_on(IntentUpdater::new(&config, &client).update_all(&names))?
                }
                UpdateTarget::Entities { names } => {
                    rt.block_on(EntityUpdater::new(&config, &client).update_all(&names))?
                }
            };
            print_outcomes(&outcomes);

            if failure_count(&outcomes) > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn print_outcomes(outcomes: &[UpdateOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(_) => println!("updated {}", outcome.name),
            Err(e) => println!("FAILED  {}: {}", outcome.name, e),
        }
    }
    println!(
        "{} updated, {} failed",
        outcomes.len() - failure_count(outcomes),
        failure_count(outcomes)
    );
}
