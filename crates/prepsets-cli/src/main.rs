use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod clipboard;
mod commands;
mod logging;
mod render;

use app::GlobalArgs;
use commands::show::ShowArgs;

#[derive(Parser)]
#[command(name = "prepsets")]
#[command(about = "prepsets - browse interview question sets from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Defaults to `browse`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse interactively
    Browse,
    /// List the available topics
    Topics {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current page of the saved session
    Show(ShowArgs),
    /// Star or unstar a question by its row number
    Star { number: usize },
    /// Mark or unmark a question as reviewed by its row number
    Review { number: usize },
    /// Clear every reviewed mark of the selected topic
    ResetReviewed {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Copy a question and its answer
    Copy { number: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => commands::browse::run(&cli.global).await?,
        Commands::Topics { json } => commands::topics::list(&cli.global, json).await?,
        Commands::Show(args) => commands::show::run(&cli.global, args).await?,
        Commands::Star { number } => commands::marks::star(&cli.global, number).await?,
        Commands::Review { number } => commands::marks::review(&cli.global, number).await?,
        Commands::ResetReviewed { yes } => {
            commands::marks::reset_reviewed(&cli.global, yes).await?
        }
        Commands::Copy { number } => commands::marks::copy(&cli.global, number).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "prepsets",
            "show",
            "--topic",
            "2",
            "--query",
            "closure",
            "--sets-dir",
            "/tmp/sets",
        ])
        .unwrap();

        assert_eq!(cli.global.sets_dir.as_deref(), Some(std::path::Path::new("/tmp/sets")));
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.topic, Some(2));
                assert_eq!(args.query.as_deref(), Some("closure"));
                assert!(!args.starred);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_starred_conflicts_with_all() {
        assert!(Cli::try_parse_from(["prepsets", "show", "--starred", "--all"]).is_err());
    }
}
