use clap::{Args, Parser, Subcommand};
use resdir::model::{EntityKind, NeedCategory, ServiceCategory};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resdir")]
#[command(about = "Searchable directory of service-providing organizations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory holding the catalog and config
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (full entry details)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the directory
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Add an entry to the catalog
    #[command(alias = "a")]
    Add(AddArgs),

    /// Show catalog statistics
    Stats,

    /// Create an empty catalog and default config
    Init,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Filter by service category (e.g. transportation)
    #[arg(short, long)]
    pub service: Option<ServiceCategory>,

    /// Filter by need category (e.g. mobility_impairment)
    #[arg(short, long)]
    pub need: Option<NeedCategory>,

    /// Filter by entity kind (organization or program)
    #[arg(short, long)]
    pub kind: Option<EntityKind>,

    /// Keyword matched against names and descriptions
    #[arg(short = 'w', long)]
    pub keyword: Option<String>,

    /// Pin an entity id to the top of the results (repeatable)
    #[arg(long, value_name = "ID")]
    pub pin: Vec<String>,

    /// Dismiss an entity id from the results (repeatable)
    #[arg(long, value_name = "ID")]
    pub hide: Vec<String>,

    /// Locate and mark an entity via a deep-link query string,
    /// e.g. "org=<id>"
    #[arg(long, value_name = "QUERY")]
    pub locate: Option<String>,

    /// Write the results as a plain-text document (filename defaults to
    /// the configured export file)
    #[arg(long, value_name = "FILE")]
    pub export: Option<Option<PathBuf>>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entity name
    #[arg(long)]
    pub name: String,

    /// Short description of the services offered
    #[arg(long)]
    pub description: String,

    /// Service category (e.g. transportation)
    #[arg(long)]
    pub service: ServiceCategory,

    /// Need category (e.g. mobility_impairment)
    #[arg(long)]
    pub need: NeedCategory,

    /// Entity kind
    #[arg(long, default_value = "organization")]
    pub kind: EntityKind,

    /// Zip code of the service location
    #[arg(long)]
    pub zip: String,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}
