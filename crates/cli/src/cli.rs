use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "expense_cli", about = "Track personal expenses from the terminal")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the service base URL (e.g. http://127.0.0.1:5000).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the API prefix (`/api` by default).
    #[arg(long, global = true)]
    pub api_prefix: Option<String>,
    /// Log level written to stderr.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List expenses, newest first.
    List {
        /// Only show one category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a single expense.
    Show { id: String },
    /// Record a new expense.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: String,
        /// `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change some fields of an expense.
    Edit {
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete an expense.
    Delete { id: String },
    /// Print the sum of all expenses.
    Total,
    /// Print the accepted categories.
    Categories,
}

#[derive(Debug, Default, clap::Args)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}
