use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tally", about = concat!("[=] tally v", env!("CARGO_PKG_VERSION"), " - one todo list, every terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different list file
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the list, grouped and sorted
    List(ListArgs),
    /// Add an item ("Group: text", "!"/"!!" prefix for priority)
    Add(AddArgs),
    /// Toggle an item's done flag
    Done(DoneArgs),
    /// Delete an item
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Include completed items
    #[arg(long)]
    pub all: bool,
    /// Filter by case-insensitive regex over group and text
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text; words are joined with spaces
    #[arg(required = true, trailing_var_arg = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Item id, or any unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Item id, or any unique prefix of it
    pub id: String,
}
