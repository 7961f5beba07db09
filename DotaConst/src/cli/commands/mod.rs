use clap::Subcommand;
use std::path::PathBuf;

use crate::config::MANIFEST_FILE;
use crate::pipeline::Job;

pub mod build;
pub mod tooltip;
pub mod vdf;

#[derive(Subcommand)]
pub enum Commands {
    /// Build the constants documents
    Build {
        /// Manifest file (defaults apply when it does not exist)
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,

        /// Local mirror of the game data (overrides [sources] data_dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Directory of herodata responses (overrides [sources] herodata_dir)
        #[arg(long)]
        herodata_dir: Option<PathBuf>,

        /// Output directory (overrides [build] output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Upstream language name, e.g. english or schinese
        #[arg(short, long)]
        language: Option<String>,

        /// Output file suffix, e.g. "_cn"
        #[arg(long)]
        suffix: Option<String>,

        /// Maximum number of jobs running at once
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Only build these documents (repeatable; ignores [jobs])
        #[arg(short, long = "job", value_parser = parse_job)]
        jobs: Vec<Job>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert between VDF (KeyValues) and JSON
    Vdf {
        /// Source file; `.json` input is written as VDF
        #[arg(short, long)]
        source: PathBuf,

        /// Destination file (stdout if omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Unwrap the single root block and lowercase its keys
        #[arg(long)]
        root: bool,
    },

    /// Resolve one ability's or item's tooltip for inspection
    Tooltip {
        /// Localization resource (abilities_<language>.json)
        #[arg(long)]
        strings: PathBuf,

        /// Script document (npc_abilities.json or items.json)
        #[arg(long)]
        scripts: PathBuf,

        /// Ability or item name, e.g. antimage_mana_break
        #[arg(short, long)]
        key: String,

        /// Resolve as an item (split description into sections)
        #[arg(long)]
        item: bool,
    },
}

fn parse_job(s: &str) -> Result<Job, String> {
    s.parse::<Job>().map_err(|e| e.to_string())
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Build {
                manifest,
                data_dir,
                herodata_dir,
                output_dir,
                language,
                suffix,
                concurrency,
                jobs,
                quiet,
            } => build::execute(
                manifest,
                &build::BuildOverrides {
                    data_dir: data_dir.clone(),
                    herodata_dir: herodata_dir.clone(),
                    output_dir: output_dir.clone(),
                    language: language.clone(),
                    suffix: suffix.clone(),
                    concurrency: *concurrency,
                },
                jobs,
                *quiet,
            ),

            Commands::Vdf {
                source,
                destination,
                root,
            } => vdf::execute(source, destination.as_deref(), *root),

            Commands::Tooltip {
                strings,
                scripts,
                key,
                item,
            } => tooltip::execute(strings, scripts, key, *item),
        }
    }
}
