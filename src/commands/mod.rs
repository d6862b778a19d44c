//! Command handlers for the spendwise CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod report;
mod transactions;

use crate::error::{ErrorType, IntoResult};
use crate::load::{read_transactions, write_transactions};
use crate::store::MemoryStore;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error, info};

pub use init::init;
pub use report::{categories, groups, stats};
pub use transactions::{delete_transactions, insert_transaction, list, update_transaction};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data along with a human readable rendering of it.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// The structured data rendered as a table for the terminal.
    #[serde(skip)]
    text: Option<String>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
            text: None,
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            text: None,
        }
    }

    /// Attach a rendering of `structure` that is printed to stdout.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Get the rendered table, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Print the message to `info!`. With `json` the structured data (if it exists) is printed to
    /// stdout as JSON. Otherwise the text rendering is printed to stdout and the JSON goes to
    /// `debug!`.
    pub fn print(&self, json: bool) {
        info!("{}", self.message);
        let Some(structure) = self.structure() else {
            return;
        };
        let serialized = match serde_json::to_string_pretty(structure) {
            Ok(s) => s,
            Err(e) => {
                error!("Unable to serialize the command output: {e}");
                return;
            }
        };
        if json {
            println!("{serialized}");
        } else {
            if let Some(text) = self.text() {
                println!("{text}");
            }
            debug!("Command output:\n\n{serialized}\n\n");
        }
    }
}

/// Loads the transactions file named by `config` into a `MemoryStore`.
async fn open_store(config: &Config) -> Result<MemoryStore> {
    let transactions = read_transactions(&config.transactions_path())
        .await
        .pub_result(ErrorType::Data)?;
    Ok(MemoryStore::new(transactions))
}

/// Writes the contents of `store` back to the transactions file.
async fn save_store(config: &Config, store: MemoryStore) -> Result<()> {
    write_transactions(&config.transactions_path(), &store.into_inner())
        .await
        .pub_result(ErrorType::Data)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
