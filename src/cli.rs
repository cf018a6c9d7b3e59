// CLI module - command-line argument parsing and handlers
//
// - (no subcommand): run the TUI, or a headless listing with --no-tui
// - list: print one page of the table to stdout
// - config --show / --path / --reset: configuration management

use crate::config::{Config, VERSION};
use crate::table::{ColumnId, SortDirection, SortState};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// shopview - browse a product catalog in the terminal
#[derive(Parser)]
#[command(name = "shopview")]
#[command(version = VERSION)]
#[command(about = "Sortable, filterable product table for the terminal", long_about = None)]
pub struct Cli {
    /// Print the first page and exit instead of starting the TUI
    #[arg(long, global = true)]
    pub no_tui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of products and exit
    List(ListArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Options for the headless listing
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page to print (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Sort column with optional direction, e.g. `price:desc`
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortState>,

    /// Only rows whose title contains this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Load a random window of the catalog
    #[arg(long)]
    pub random: bool,
}

/// Parse `column[:asc|desc]` into a sort; direction defaults to ascending
pub fn parse_sort(s: &str) -> Result<SortState, String> {
    let (key, direction) = match s.split_once(':') {
        Some((key, dir)) => (
            key,
            SortDirection::from_key(dir)
                .ok_or_else(|| format!("unknown sort direction '{}' (use asc or desc)", dir))?,
        ),
        None => (s, SortDirection::Ascending),
    };

    let column = ColumnId::from_key(key)
        .filter(|c| c.is_sortable())
        .ok_or_else(|| {
            let keys: Vec<&str> = ColumnId::sortable().map(|c| c.key()).collect();
            format!("cannot sort by '{}' (sortable: {})", key, keys.join(", "))
        })?;

    Ok(SortState { column, direction })
}

/// Handle config commands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> anyhow::Result<bool> {
    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: shopview config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("Error: Could not determine config path"),
    }
}

fn handle_config_show() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!("# enable_tui = {}", config.enable_tui);

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> anyhow::Result<()> {
    if let Some(path) = Config::config_path().filter(|p| p.exists()) {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = Config::default().save()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_with_and_without_direction() {
        let sort = parse_sort("price:desc").unwrap();
        assert_eq!(sort.column, ColumnId::Price);
        assert_eq!(sort.direction, SortDirection::Descending);

        let sort = parse_sort("title").unwrap();
        assert_eq!(sort.column, ColumnId::Title);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_parse_sort_rejects_unsortable_and_bad_direction() {
        assert!(parse_sort("description").is_err());
        assert!(parse_sort("bogus").is_err());
        assert!(parse_sort("price:sideways").is_err());
    }

    #[test]
    fn test_list_args_parse() {
        let cli = Cli::try_parse_from([
            "shopview", "list", "--page", "2", "--page-size", "20", "--sort", "rating:desc",
            "--filter", "phone", "--random",
        ])
        .unwrap();

        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list subcommand");
        };
        assert_eq!(args.page, 2);
        assert_eq!(args.page_size, Some(20));
        assert_eq!(args.sort.map(|s| s.column), Some(ColumnId::Rating));
        assert_eq!(args.filter.as_deref(), Some("phone"));
        assert!(args.random);
    }

    #[test]
    fn test_no_tui_flag() {
        let cli = Cli::try_parse_from(["shopview", "--no-tui"]).unwrap();
        assert!(cli.no_tui);
        assert!(cli.command.is_none());
    }
}
