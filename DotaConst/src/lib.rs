#![allow(non_snake_case)]
//! # DotaConst
//!
//! Builds localized Dota 2 constants documents from a local mirror of the
//! game's data feeds.
//!
//! ## Documents
//!
//! - `items`, `abilities` - resolved tooltips and formatted attributes
//! - `heroes`, `hero_names` - base stats keyed by id or internal name
//! - `hero_lore` - hero biographies
//! - `aghs` - Aghanim's Scepter and Shard upgrades
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotaconst::prelude::*;
//!
//! let manifest = Manifest::load_or_default(MANIFEST_FILE)?;
//! let jobs = Job::enabled_jobs(&manifest.jobs);
//! let result = pipeline::run(&manifest, &jobs, |_| {})?;
//! println!("{} built, {} failed", result.success_count, result.fail_count);
//! # Ok::<(), dotaconst::Error>(())
//! ```

pub use dotalex;

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod transform;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{BuildSettings, JobToggles, MANIFEST_FILE, Manifest, SourceSettings};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{self, BatchResult, Job, JobProgress};

    pub use crate::transform::{
        Aghs, Ability, Item, transform_abilities, transform_aghs, transform_hero_lore,
        transform_hero_names, transform_heroes, transform_items,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
