//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;
use crate::domain::PersonId;

/// Build, browse and persist genealogical trees
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Data file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the family tree
    Show {
        /// Root person id (default: config `root`)
        #[arg(short, long)]
        root: Option<PersonId>,
        /// Rendering style (default: config `style`)
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// List people by generation below a root
    Generations {
        /// Root person id (default: config `root`)
        #[arg(short, long)]
        root: Option<PersonId>,
    },

    /// Show one person and their children
    Get {
        /// Person id
        id: PersonId,
    },

    /// List people who are nobody's child
    Roots,

    /// Add a person and save
    Add {
        /// Full name
        name: String,
        /// Birth year
        #[arg(short, long, allow_negative_numbers = true)]
        born: i32,
        /// Death year (omit if living)
        #[arg(long, allow_negative_numbers = true)]
        died: Option<i32>,
        /// Parent id to link under (repeatable)
        #[arg(short, long = "parent")]
        parents: Vec<PersonId>,
    },

    /// Link an existing child under an existing parent and save
    Link {
        /// Parent id
        parent: PersonId,
        /// Child id
        child: PersonId,
    },

    /// Change a person's details and save
    Edit {
        /// Person id
        id: PersonId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New birth year
        #[arg(long, allow_negative_numbers = true)]
        born: Option<i32>,
        /// New death year
        #[arg(long, allow_negative_numbers = true, conflicts_with = "living")]
        died: Option<i32>,
        /// Clear the death year
        #[arg(long)]
        living: bool,
    },

    /// Discard saved data and restore the default tree
    Reset,

    /// Menu-driven session (default)
    Interactive,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of ./.famtree.toml
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_accepts_repeated_parents_and_negative_years() {
        let cli = Cli::try_parse_from([
            "famtree", "add", "Ur-Nammu", "--born", "-2150", "-p", "0", "-p", "1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                name,
                born,
                died,
                parents,
            }) => {
                assert_eq!(name, "Ur-Nammu");
                assert_eq!(born, -2150);
                assert_eq!(died, None);
                assert_eq!(parents, vec![0, 1]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debug_flag_counts() {
        let cli = Cli::try_parse_from(["famtree", "-ddd", "roots"]).unwrap();
        assert_eq!(cli.debug, 3);
    }
}
