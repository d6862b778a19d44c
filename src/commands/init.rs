use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::load::{read_transactions, write_transactions};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file with default settings and `currency`
/// - Creates the transactions file, filled from `import` when it is given
///
/// # Arguments
/// - `spendwise_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/spendwise`
/// - `import` - A JSON or CSV file of transactions to start with. It is read before anything is
///   created so that a bad file leaves nothing behind.
/// - `currency` - The symbol shown in front of amounts.
///
/// # Errors
/// - Returns an error if `import` cannot be read, the home directory already has a config, or any
///   file operations fail.
pub async fn init(
    spendwise_home: &Path,
    import: Option<&Path>,
    currency: Option<&str>,
) -> Result<Out<()>> {
    let imported = match import {
        Some(path) => Some(
            read_transactions(path)
                .await
                .with_context(|| format!("Unable to import '{}'", path.display()))
                .pub_result(ErrorType::Data)?,
        ),
        None => None,
    };

    let config = Config::create(spendwise_home, currency)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;

    let message = match imported {
        Some(transactions) => {
            write_transactions(&config.transactions_path(), &transactions)
                .await
                .pub_result(ErrorType::Data)?;
            let count = transactions.len();
            format!(
                "Successfully created the spendwise directory at '{}' and imported {count} \
                transaction{}",
                config.root().display(),
                plural(count)
            )
        }
        None => format!(
            "Successfully created the spendwise directory at '{}'",
            config.root().display()
        ),
    };
    Ok(message.into())
}
