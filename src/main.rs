// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use mixalign::app_config::{Config, LogLevel};
use mixalign::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a .mix file or corpus directory and report ill-formed documents
    Check {
        /// Transcript file or corpus directory
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Print per-record timestamps for one transcript
    Times {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,

        /// Print frame numbers instead of seconds
        #[arg(short = 'f', long)]
        frames: bool,
    },

    /// Print time-aligned phone labels for one transcript
    Phones {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,

        /// Leave closure/burst plosive pairs unmerged
        #[arg(long)]
        no_merge: bool,

        /// Keep zero-duration intervals
        #[arg(long)]
        no_prune: bool,
    },

    /// Print time-aligned word labels for one transcript
    Words {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,
    },

    /// Aggregate the corrected-pronunciation dictionary over a corpus
    Dict {
        /// Transcript file or corpus directory
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Show canonical-vs-spoken pronunciation differences
    Compare {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,

        /// Print all aligned entries, not only differing ones
        #[arg(short, long)]
        all: bool,
    },

    /// Print the free-text line of one transcript
    Text {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,
    },

    /// Print the derived phoneme string of one transcript
    Phonemes {
        /// Transcript file
        #[arg(value_name = "MIX_FILE")]
        file: PathBuf,
    },

    /// Generate shell completions for mixalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// mixalign - time-aligned labels from Waxholm .mix transcripts
///
/// Parses the legacy FR frame-record annotation format and derives
/// time-aligned phone and word labels, pronunciation dictionaries, and
/// canonical-vs-spoken comparisons for downstream alignment tooling.
#[derive(Parser, Debug)]
#[command(name = "mixalign")]
#[command(version = "0.3.0")]
#[command(about = "Mix transcript parser and label deriver")]
#[command(long_about = "mixalign parses legacy Mix speech-corpus transcripts and derives \
time-aligned phone and word labels.

EXAMPLES:
    mixalign check corpus/                  # Report ill-formed documents
    mixalign times fp2038.1.08.smp.mix      # Per-record times in seconds
    mixalign phones --no-prune file.mix     # Merged phone tier, unpruned
    mixalign dict corpus/                   # Corpus-wide pronunciation dictionary
    mixalign compare file.mix               # Canonical vs spoken pronunciations
    mixalign completions bash > mixalign.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "mixalign", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::from_file_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Check { input_path } => {
            let report = controller.run_check(&input_path)?;
            println!(
                "{} documents, {} ok, {} skipped",
                report.total,
                report.ok,
                report.skipped()
            );
            for path in &report.ill_formed {
                println!("ill-formed: {}", path.display());
            }
            for (path, error) in &report.failed {
                println!("failed: {}: {}", path.display(), error);
            }
            Ok(())
        }
        Commands::Times { file, frames } => controller.run_times(&file, frames),
        Commands::Phones {
            file,
            no_merge,
            no_prune,
        } => controller.run_phones(&file, !no_merge, !no_prune),
        Commands::Words { file } => controller.run_words(&file),
        Commands::Dict { input_path } => {
            let dictionary = controller.run_dict(&input_path)?;
            for (word, prons) in dictionary {
                for pron in prons {
                    println!("{}\t{}", word, pron);
                }
            }
            Ok(())
        }
        Commands::Compare { file, all } => controller.run_compare(&file, all),
        Commands::Text { file } => controller.run_text(&file),
        Commands::Phonemes { file } => controller.run_phoneme_string(&file),
        Commands::Completions { .. } => unreachable!(),
    }
}
