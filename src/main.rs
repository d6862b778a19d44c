use clap::Parser;
use spendwise::args::{Args, Command};
use spendwise::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().spendwise_home().path();
    let json = args.common().json();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.import(), init_args.currency())
                .await?
                .print(json)
        }

        Command::Categories(categories_args) => {
            let config = load_config(home).await?;
            commands::categories(config, categories_args.clone())
                .await?
                .print(json)
        }

        Command::Groups(report_args) => {
            let config = load_config(home).await?;
            commands::groups(config, report_args.clone())
                .await?
                .print(json)
        }

        Command::Stats(report_args) => {
            let config = load_config(home).await?;
            commands::stats(config, report_args.clone())
                .await?
                .print(json)
        }

        Command::List(list_args) => {
            let config = load_config(home).await?;
            commands::list(config, list_args.clone()).await?.print(json)
        }

        Command::Insert(new) => {
            let config = load_config(home).await?;
            commands::insert_transaction(config, *new.clone())
                .await?
                .print(json)
        }

        Command::Update(update_args) => {
            let config = load_config(home).await?;
            commands::update_transaction(config, update_args.clone())
                .await?
                .print(json)
        }

        Command::Delete(delete_args) => {
            let config = load_config(home).await?;
            commands::delete_transactions(config, delete_args.clone())
                .await?
                .print(json)
        }
    };
    Ok(())
}

async fn load_config(home: &std::path::Path) -> Result<Config> {
    Config::load(home)
        .await
        .map_err(|e| spendwise::Error::new(spendwise::ErrorType::Config, e))
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
