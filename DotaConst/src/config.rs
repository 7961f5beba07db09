//! Build manifest types for dotaconst.toml

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "dotaconst.toml";

fn default_language() -> String {
    "schinese".to_string()
}

fn default_suffix() -> String {
    "_cn".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_concurrency() -> usize {
    10
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_herodata_dir() -> PathBuf {
    PathBuf::from("data/herodata")
}

fn default_true() -> bool {
    true
}

/// The full build manifest (dotaconst.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub jobs: JobToggles,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Upstream language name (`schinese`, `english`, ...)
    #[serde(default = "default_language")]
    pub language: String,
    /// Appended to every output file stem
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Maximum number of jobs running at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            suffix: default_suffix(),
            output_dir: default_output_dir(),
            concurrency: default_concurrency(),
        }
    }
}

/// Where the local mirror of the upstream feeds lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Mirror of the game's `dota/` directory (`resource/`, `scripts/npc/`)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory of per-hero `herodata` responses
    #[serde(default = "default_herodata_dir")]
    pub herodata_dir: PathBuf,
    /// JSON object of per-hero-id fields merged over generated heroes
    #[serde(default)]
    pub hero_overrides: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            herodata_dir: default_herodata_dir(),
            hero_overrides: None,
        }
    }
}

/// Per-job on/off switches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct JobToggles {
    #[serde(default = "default_true")]
    pub items: bool,
    #[serde(default = "default_true")]
    pub abilities: bool,
    #[serde(default = "default_true")]
    pub heroes: bool,
    #[serde(default = "default_true")]
    pub hero_names: bool,
    #[serde(default = "default_true")]
    pub hero_lore: bool,
    #[serde(default = "default_true")]
    pub aghs: bool,
}

impl Default for JobToggles {
    fn default() -> Self {
        Self {
            items: true,
            abilities: true,
            heroes: true,
            hero_names: true,
            hero_lore: true,
            aghs: true,
        }
    }
}

impl Manifest {
    /// Parse a manifest from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a manifest file, resolving its relative paths against the
    /// manifest's own directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            manifest.resolve_paths(base);
        }
        tracing::debug!("Loaded manifest from {}", path.display());
        Ok(manifest)
    }

    /// Load a manifest file if it exists, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!("No manifest at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Make every relative path relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.build.output_dir);
        resolve(&mut self.sources.data_dir);
        resolve(&mut self.sources.herodata_dir);
        if let Some(overrides) = self.sources.hero_overrides.as_mut() {
            resolve(overrides);
        }
    }
}
