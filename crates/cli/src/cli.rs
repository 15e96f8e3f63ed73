use clap::{Parser, Subcommand, ValueEnum};
use yurucamp_core::pagination::CARD_PAGE_SIZE;

#[derive(Debug, Parser)]
#[command(name = "yurucamp")]
#[command(about = "Browse Yurucamp community lists and run event gacha")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one page of a filtered list
    List(ListArgs),

    /// List regions usable with --region
    Regions,

    /// List categories usable with --category
    Categories,

    /// Pick a random participant of an event
    Gacha {
        /// Event id
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Activities,
    Camps,
    Events,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Which list to browse
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Free-text search within the fetched results
    #[arg(short, long)]
    pub query: Option<String>,

    /// Region id (filtered by the backend)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Category id (filtered by the backend)
    #[arg(short, long)]
    pub category: Option<String>,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page
    #[arg(long, default_value_t = CARD_PAGE_SIZE)]
    pub page_size: usize,
}
