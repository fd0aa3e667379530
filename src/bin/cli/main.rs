//! CLI tool for editing Qt resource collection files.

mod commands;
mod exit_codes;
mod output;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;
use qrcedit::GroupKey;

/// Qt resource file (.qrc) editor
#[derive(Parser)]
#[command(name = "qrcedit")]
#[command(author, version, about = "Qt resource file (.qrc) editor", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Only print errors and warnings (JSON output is always printed)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Do not keep the previous file as <file>.bak when saving
    #[arg(long, global = true)]
    no_backup: bool,
}

/// Selects a prefix group.
#[derive(Args, Clone)]
pub struct GroupArgs {
    /// Resource prefix
    #[arg(short = 'p', long, default_value = "/")]
    prefix: String,

    /// Language tag (empty for none)
    #[arg(short = 'l', long, default_value = "")]
    lang: String,
}

impl GroupArgs {
    fn key(&self) -> GroupKey {
        GroupKey::new(self.prefix.as_str(), self.lang.as_str())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty resource file
    New {
        /// Resource file to create
        manifest: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// List prefixes and files (alias: l)
    #[command(alias = "l")]
    List {
        /// Resource file
        manifest: PathBuf,

        /// Show qrc:// URLs instead of :/ paths
        #[arg(long)]
        urls: bool,
    },

    /// Show summary information (alias: i)
    #[command(alias = "i")]
    Info {
        /// Resource file
        manifest: PathBuf,
    },

    /// Report entries whose source file is missing (alias: t)
    #[command(alias = "t")]
    Check {
        /// Resource file
        manifest: PathBuf,
    },

    /// Add files to a prefix (alias: a)
    #[command(alias = "a")]
    Add {
        /// Resource file
        manifest: PathBuf,

        /// Files to add, absolute or relative to the current directory
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        group: GroupArgs,
    },

    /// Add an empty prefix; without --prefix, picks /new/prefixN
    AddPrefix {
        /// Resource file
        manifest: PathBuf,

        /// Resource prefix
        #[arg(short = 'p', long)]
        prefix: Option<String>,

        /// Language tag
        #[arg(short = 'l', long, requires = "prefix")]
        lang: Option<String>,
    },

    /// Remove files, or the whole prefix when no file is named (alias: d)
    #[command(alias = "d")]
    Remove {
        /// Resource file
        manifest: PathBuf,

        /// Paths or aliases of the entries to remove
        names: Vec<String>,

        #[command(flatten)]
        group: GroupArgs,
    },

    /// Change the prefix or language of a group
    RenamePrefix {
        /// Resource file
        manifest: PathBuf,

        #[command(flatten)]
        group: GroupArgs,

        /// New prefix (defaults to the current one)
        #[arg(long)]
        to_prefix: Option<String>,

        /// New language tag (defaults to the current one)
        #[arg(long)]
        to_lang: Option<String>,
    },

    /// Change an entry's alias or compression
    Set {
        /// Resource file
        manifest: PathBuf,

        /// Path or alias of the entry
        name: String,

        #[command(flatten)]
        group: GroupArgs,

        /// New alias
        #[arg(long, conflicts_with = "no_alias")]
        alias: Option<String>,

        /// Remove the alias
        #[arg(long)]
        no_alias: bool,

        /// Compression algorithm
        #[arg(long, value_enum)]
        algo: Option<Algorithm>,

        /// Compression level (zstd 0-19, zlib 1-9)
        #[arg(long, conflicts_with = "default_level")]
        level: Option<u32>,

        /// Use the algorithm's default level
        #[arg(long)]
        default_level: bool,

        /// Compression threshold in percent
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Rewrite a resource file in canonical form
    Format {
        /// Resource file
        manifest: PathBuf,
    },

    /// Save a copy elsewhere, adjusting file paths to the new location
    SaveAs {
        /// Resource file
        manifest: PathBuf,

        /// Destination
        destination: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Best,
    None,
    Zstd,
    Zlib,
}

impl From<Algorithm> for qrcedit::CompressionAlgorithm {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Best => qrcedit::CompressionAlgorithm::Best,
            Algorithm::None => qrcedit::CompressionAlgorithm::None,
            Algorithm::Zstd => qrcedit::CompressionAlgorithm::Zstd,
            Algorithm::Zlib => qrcedit::CompressionAlgorithm::Zlib,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
        backup: !cli.no_backup,
    };

    let exit_code = match cli.command {
        Commands::New { manifest, force } => commands::new(&ctx, &manifest, force),

        Commands::List { manifest, urls } => commands::list(&ctx, &manifest, urls),

        Commands::Info { manifest } => commands::info(&ctx, &manifest),

        Commands::Check { manifest } => commands::check(&ctx, &manifest),

        Commands::Add {
            manifest,
            files,
            group,
        } => commands::add(&ctx, &manifest, &files, group.key()),

        Commands::AddPrefix {
            manifest,
            prefix,
            lang,
        } => commands::add_prefix(
            &ctx,
            &manifest,
            prefix.map(|p| GroupKey::new(p, lang.unwrap_or_default())),
        ),

        Commands::Remove {
            manifest,
            names,
            group,
        } => commands::remove(&ctx, &manifest, group.key(), &names),

        Commands::RenamePrefix {
            manifest,
            group,
            to_prefix,
            to_lang,
        } => {
            let to = GroupKey::new(
                to_prefix.unwrap_or_else(|| group.prefix.clone()),
                to_lang.unwrap_or_else(|| group.lang.clone()),
            );
            commands::rename_prefix(&ctx, &manifest, group.key(), to)
        }

        Commands::Set {
            manifest,
            name,
            group,
            alias,
            no_alias,
            algo,
            level,
            default_level,
            threshold,
        } => commands::set(
            &ctx,
            &manifest,
            &commands::SetConfig {
                key: group.key(),
                name,
                alias,
                no_alias,
                algorithm: algo.map(Into::into),
                level,
                default_level,
                threshold,
            },
        ),

        Commands::Format { manifest } => commands::format(&ctx, &manifest),

        Commands::SaveAs {
            manifest,
            destination,
        } => commands::save_as(&ctx, &manifest, &destination),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
