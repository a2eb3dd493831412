use clap::Parser;
use cost_tracker::args::{Args, Command};
use cost_tracker::form::TerminalPrompter;
use cost_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let mut prompter = TerminalPrompter;

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.clone()).await?.print(),

        Command::List => commands::list(Config::load(home).await?).await?.print(),

        Command::Add(add_args) => {
            commands::add(Config::load(home).await?, add_args.clone(), &mut prompter)
                .await?
                .print()
        }

        Command::Edit(edit_args) => {
            commands::edit(Config::load(home).await?, edit_args.clone(), &mut prompter)
                .await?
                .print()
        }

        Command::Delete(delete_args) => commands::delete(
            Config::load(home).await?,
            delete_args.clone(),
            &mut prompter,
        )
        .await?
        .print(),

        Command::Clear(clear_args) => {
            commands::clear(Config::load(home).await?, clear_args.clone(), &mut prompter)
                .await?
                .print()
        }

        Command::Summary => commands::summary(Config::load(home).await?).await?.print(),

        Command::Save(path_args) => commands::save(Config::load(home).await?, path_args.clone())
            .await?
            .print(),

        Command::Load(path_args) => commands::load(Config::load(home).await?, path_args.clone())
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
