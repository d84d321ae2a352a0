//! Command-line interface for the retriever.

use std::future::Future;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::browser::NoBrowser;
use crate::config::{RetrieverConfig, DEFAULT_MAX_CHARS};
use crate::error::Result;
use crate::identifier::parse_law_reference;
use crate::search::SearchMode;
use crate::service::Retriever;
use crate::version::normalize_date;

/// Slov-Lex Retriever - Fetch Slovak legislation as effective on a date.
#[derive(Parser)]
#[command(name = "slovlex-retriever")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Never start a browser when the direct download fails
    #[arg(long, global = true)]
    pub no_browser: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show basic information about a law.
    Info {
        /// Law number (e.g., 595)
        number: String,

        /// Year of promulgation (e.g., 2003)
        year: String,
    },

    /// Print the full text of a law as effective on a date.
    Text {
        /// Law reference (e.g., 595/2003 or /SK/ZZ/2003/595)
        law: String,

        /// Effective date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Maximum number of characters of law text
        #[arg(short, long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,
    },

    /// Print one section of a law as effective on a date.
    Section {
        /// Law reference (e.g., 595/2003 or /SK/ZZ/2003/595)
        law: String,

        /// Section number (e.g., 3 or §3)
        section: String,

        /// Effective date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Search laws by keyword.
    Search {
        /// Search phrase
        query: String,

        /// Search mode
        #[arg(short, long, value_enum, default_value_t = SearchMode::Autocomplete)]
        mode: SearchMode,

        /// Maximum number of results (1-25, default: 10)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = RetrieverConfig::from_env()?;

    let retriever = if cli.no_browser {
        Retriever::new(config, Arc::new(NoBrowser))?
    } else {
        Retriever::from_config(config)?
    };

    match cli.command {
        Commands::Info { number, year } => info_command(&retriever, &number, &year).await,
        Commands::Text {
            law,
            date,
            max_chars,
        } => text_command(&retriever, &law, date.as_deref(), max_chars).await,
        Commands::Section { law, section, date } => {
            section_command(&retriever, &law, &section, date.as_deref()).await
        }
        Commands::Search { query, mode, limit } => {
            search_command(&retriever, &query, mode, limit).await
        }
    }
}

async fn info_command(retriever: &Retriever, number: &str, year: &str) -> Result<()> {
    let metadata = with_spinner("Looking up law...", retriever.law_info(number, year)).await?;
    println!("{metadata}");
    Ok(())
}

async fn text_command(
    retriever: &Retriever,
    law: &str,
    date: Option<&str>,
    max_chars: usize,
) -> Result<()> {
    // Validate inputs before making HTTP requests
    parse_law_reference(law)?;
    let effective_date = normalize_date(date)?;

    announce(law, &effective_date);
    let text = with_spinner(
        "Downloading law text...",
        retriever.law_text(law, Some(&effective_date), max_chars),
    )
    .await?;

    println!("{text}");
    if text.rendered.truncated {
        eprintln!(
            "{} output truncated to {max_chars} characters (use --max-chars)",
            style("Note:").yellow().bold()
        );
    }
    Ok(())
}

async fn section_command(
    retriever: &Retriever,
    law: &str,
    section: &str,
    date: Option<&str>,
) -> Result<()> {
    parse_law_reference(law)?;
    let effective_date = normalize_date(date)?;

    announce(law, &effective_date);
    let text = with_spinner(
        "Downloading section...",
        retriever.law_section(law, section, Some(&effective_date)),
    )
    .await?;

    if text.is_found() {
        println!("{text}");
    } else {
        eprintln!("{}", style(&text).yellow());
    }
    Ok(())
}

async fn search_command(
    retriever: &Retriever,
    query: &str,
    mode: SearchMode,
    limit: Option<usize>,
) -> Result<()> {
    let hits = with_spinner(
        "Searching...",
        retriever.search(query, mode, limit),
    )
    .await?;
    println!("{hits}");
    Ok(())
}

fn announce(law: &str, date: &str) {
    eprintln!(
        "{} {} as of {}",
        style("Retrieving").bold(),
        style(law).cyan(),
        style(date).green()
    );
}

/// Await `task` behind a spinner on stderr.
async fn with_spinner<T>(message: &'static str, task: impl Future<Output = Result<T>>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = task.await;
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_text() {
        let cli = Cli::parse_from(["slovlex-retriever", "text", "595/2003"]);

        let Commands::Text {
            law,
            date,
            max_chars,
        } = cli.command
        else {
            panic!("expected text command");
        };
        assert_eq!(law, "595/2003");
        assert!(date.is_none());
        assert_eq!(max_chars, DEFAULT_MAX_CHARS);
        assert!(!cli.no_browser);
    }

    #[test]
    fn test_cli_parse_section_with_date() {
        let cli = Cli::parse_from([
            "slovlex-retriever",
            "section",
            "595/2003",
            "§3",
            "--date",
            "2023-12-31",
            "--no-browser",
        ]);

        let Commands::Section { law, section, date } = cli.command else {
            panic!("expected section command");
        };
        assert_eq!(law, "595/2003");
        assert_eq!(section, "§3");
        assert_eq!(date, Some("2023-12-31".to_string()));
        assert!(cli.no_browser);
    }

    #[test]
    fn test_cli_parse_search_fulltext() {
        let cli = Cli::parse_from([
            "slovlex-retriever",
            "search",
            "daň",
            "--mode",
            "fulltext",
            "--limit",
            "5",
        ]);

        let Commands::Search { query, mode, limit } = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(query, "daň");
        assert_eq!(mode, SearchMode::Fulltext);
        assert_eq!(limit, Some(5));
    }

    #[test]
    fn test_cli_parse_info() {
        let cli = Cli::parse_from(["slovlex-retriever", "info", "595", "2003"]);

        let Commands::Info { number, year } = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(number, "595");
        assert_eq!(year, "2003");
    }
}
