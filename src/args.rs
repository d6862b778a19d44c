//! These structs provide the CLI interface for the spendwise CLI.

use crate::model::{NewTransaction, SpendGroup, TransactionFilter, TransactionUpdates};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// spendwise: A command-line tool for understanding where your money goes.
///
/// Spendwise keeps your bank transactions in a local JSON or CSV file and reports on your
/// spending: totals per category, and the split between EMI payments, regular spends and
/// irregular spends.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/spendwise, pass --spendwise-home if you want it somewhere else. If you already have
    /// transactions in a JSON or CSV file, pass it as --import and they will be copied in.
    Init(InitArgs),
    /// Show eligible spending totalled per category.
    Categories(CategoriesArgs),
    /// Show eligible spending split into EMI, Regular Spends and Irregular Spends.
    Groups(ReportArgs),
    /// Show total income, total expense and the balance.
    Stats(ReportArgs),
    /// List transactions one page at a time.
    List(ListArgs),
    /// Add a transaction.
    Insert(Box<NewTransaction>),
    /// Change fields of an existing transaction.
    Update(UpdateArgs),
    /// Remove one or more transactions.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate's EnvFilter for
    /// instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where spendwise data and configuration is held. Defaults to ~/spendwise
    #[arg(long, env = "SPENDWISE_HOME", default_value_t = default_spendwise_home())]
    spendwise_home: DisplayPath,

    /// Print the command's structured output as JSON on stdout instead of a table.
    #[arg(long, global = true)]
    json: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, spendwise_home: PathBuf, json: bool) -> Self {
        Self {
            log_level,
            spendwise_home: spendwise_home.into(),
            json,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn spendwise_home(&self) -> &DisplayPath {
        &self.spendwise_home
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// (Not shown): Args for the `spendwise init` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct InitArgs {
    /// A JSON or CSV file of transactions to start with. A `.csv` extension selects CSV.
    #[arg(long)]
    import: Option<PathBuf>,

    /// The currency symbol shown in front of amounts. Defaults to ₹
    #[arg(long)]
    currency: Option<String>,
}

impl InitArgs {
    pub fn new(import: Option<PathBuf>, currency: Option<String>) -> Self {
        Self { import, currency }
    }

    pub fn import(&self) -> Option<&Path> {
        self.import.as_deref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// (Not shown): Args for the `spendwise categories` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct CategoriesArgs {
    /// Only include spends in this group. Can be given more than once. All groups are included
    /// when not given.
    #[arg(long = "group", value_enum)]
    groups: Vec<SpendGroup>,

    /// Keep categories in the order they are first seen instead of largest total first.
    #[arg(long)]
    no_sort: bool,

    #[command(flatten)]
    filter: TransactionFilter,
}

impl CategoriesArgs {
    pub fn new(groups: Vec<SpendGroup>, no_sort: bool, filter: TransactionFilter) -> Self {
        Self {
            groups,
            no_sort,
            filter,
        }
    }

    pub fn groups(&self) -> &[SpendGroup] {
        &self.groups
    }

    pub fn sort(&self) -> bool {
        !self.no_sort
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }
}

/// (Not shown): Args for the `spendwise groups` and `spendwise stats` commands.
#[derive(Debug, Default, Parser, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    filter: TransactionFilter,
}

impl ReportArgs {
    pub fn new(filter: TransactionFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }
}

/// (Not shown): Args for the `spendwise list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// The page to show, starting from 1.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page. Defaults to the page_size in config.json.
    #[arg(long)]
    page_size: Option<usize>,

    #[command(flatten)]
    filter: TransactionFilter,
}

impl ListArgs {
    pub fn new(page: usize, page_size: Option<usize>, filter: TransactionFilter) -> Self {
        Self {
            page,
            page_size,
            filter,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }
}

/// (Not shown): Args for the `spendwise update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The ID of the transaction to change.
    #[arg(long)]
    id: String,

    #[command(flatten)]
    updates: TransactionUpdates,
}

impl UpdateArgs {
    pub fn new(id: impl Into<String>, updates: TransactionUpdates) -> Self {
        Self {
            id: id.into(),
            updates,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn updates(&self) -> &TransactionUpdates {
        &self.updates
    }
}

/// (Not shown): Args for the `spendwise delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of a transaction to remove. Can be given more than once.
    #[arg(long = "id", required = true)]
    ids: Vec<String>,
}

impl DeleteArgs {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

fn default_spendwise_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("spendwise"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --spendwise-home or SPENDWISE_HOME instead of relying on the \
                default spendwise home directory.",
            );
            PathBuf::from("spendwise")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
