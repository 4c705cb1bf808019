/*!
 * Configuration handling for filetools
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;

use crate::copier::CopyOptions;
use crate::ensure;
use crate::error::Result;
use crate::types::Action;

/// Command-line arguments for filetools
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filetools",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten-copy, empty-file audit and folder-structure reports for source trees",
    long_about = "Scans a folder while skipping build output, caches, binaries and other noise, then copies its files flat into one folder, lists its empty files, or renders its folder tree."
)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Print the outcome as JSON instead of a table
    #[clap(long, global = true)]
    pub json: bool,

    /// Log every skipped entry
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[clap(short, long, global = true)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Actions offered on the command line
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy every eligible file into one destination folder
    Copy {
        /// Folder to copy from
        source: PathBuf,

        /// Folder to copy into (created when missing)
        dest: PathBuf,

        /// Keep bare file names instead of encoding the relative path
        #[clap(long)]
        flat_names: bool,

        /// Copy zero-length files too
        #[clap(long)]
        include_empty: bool,
    },

    /// Write empty_files_log.txt listing zero-length files
    CheckEmpty {
        /// Folder to check
        source: PathBuf,

        /// Folder for the log (defaults to the executable's folder)
        #[clap(long)]
        dest: Option<PathBuf>,
    },

    /// Write folder_structure.txt with the filtered folder tree
    Structure {
        /// Folder to scan
        source: PathBuf,

        /// Folder for the report (defaults to the executable's folder)
        #[clap(long)]
        dest: Option<PathBuf>,
    },
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Action to run
    pub action: Action,

    /// Folder to read
    pub source: PathBuf,

    /// Destination folder (required for copy, optional otherwise)
    pub dest: Option<PathBuf>,

    /// Copy behaviour
    pub copy_options: CopyOptions,

    /// Print the outcome as JSON
    pub json: bool,

    /// Maximum log level
    pub log_level: Level,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        ensure!(
            !(args.verbose && args.quiet),
            InvalidArgument,
            "--verbose and --quiet cannot be combined"
        );

        let log_level = if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            Level::WARN
        };

        let Some(command) = args.command else {
            crate::bail!(InvalidArgument, "no action given, expected copy, check-empty or structure");
        };

        let (action, source, dest, copy_options) = match command {
            Command::Copy {
                source,
                dest,
                flat_names,
                include_empty,
            } => (
                Action::Copy,
                source,
                Some(dest),
                CopyOptions {
                    use_relative_naming: !flat_names,
                    skip_empty: !include_empty,
                },
            ),
            Command::CheckEmpty { source, dest } => {
                (Action::CheckEmpty, source, dest, CopyOptions::default())
            }
            Command::Structure { source, dest } => {
                (Action::Structure, source, dest, CopyOptions::default())
            }
        };

        Ok(Self {
            action,
            source,
            dest,
            copy_options,
            json: args.json,
            log_level,
        })
    }

    /// Whether the terminal should show a progress spinner
    pub fn show_progress(&self) -> bool {
        !self.json && self.log_level != Level::ERROR && self.action == Action::Copy
    }
}
