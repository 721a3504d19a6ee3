//! Applies or rolls back the tracker schema outside the server.
//!
//! The server runs pending migrations at start-up; this binary is for
//! inspecting and resetting a database by hand.

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Manage the expense tracker schema")]
struct Args {
    /// SQLite file, created when missing. Same default as the server.
    #[arg(long, default_value = "expenses.db")]
    sqlite: String,
    /// Full database URL; takes precedence over `--sqlite`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Apply pending migrations (all by default).
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations.
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table and apply all migrations again.
    Fresh,
    /// Print which migrations are applied.
    Status,
}

impl Args {
    fn url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite:{}?mode=rwc", self.sqlite),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Up { steps: None });

    let db = sea_orm::Database::connect(args.url()).await?;

    match command {
        Command::Up { steps } => Migrator::up(&db, steps).await?,
        Command::Down { steps } => Migrator::down(&db, Some(steps)).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_server_database_and_up() {
        let args = Args::try_parse_from(["migration"]).unwrap();
        assert_eq!(args.sqlite, "expenses.db");
        assert!(args.command.is_none());

        let local = Args {
            database_url: None,
            ..args
        };
        assert_eq!(local.url(), "sqlite:expenses.db?mode=rwc");
    }

    #[test]
    fn url_wins_over_sqlite_path() {
        let args = Args::try_parse_from([
            "migration",
            "--sqlite",
            "other.db",
            "--database-url",
            "sqlite::memory:",
            "status",
        ])
        .unwrap();
        assert_eq!(args.url(), "sqlite::memory:");
        assert_eq!(args.command, Some(Command::Status));
    }

    #[test]
    fn down_rolls_back_one_step_by_default() {
        let args = Args::try_parse_from(["migration", "down"]).unwrap();
        assert_eq!(args.command, Some(Command::Down { steps: 1 }));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(Args::try_parse_from(["migration", "sideways"]).is_err());
    }
}
