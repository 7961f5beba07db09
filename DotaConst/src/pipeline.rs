//! Parallel build pipeline
//!
//! Each [`Job`] loads the source documents it needs from the data directory,
//! runs its transform and writes `<output_dir>/<job><suffix>.json`. Jobs run
//! on a rayon pool bounded by the manifest's concurrency; a failing job is
//! counted and reported without stopping the others.

use crate::config::{JobToggles, Manifest};
use crate::error::{Error, Result};
use crate::sources::{
    self, ABILITIES_PATH, HEROES_PATH, ITEMS_PATH, NEUTRAL_ITEMS_PATH, find_json_documents,
    load_document, load_strings,
};
use crate::transform;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    Items,
    Abilities,
    Heroes,
    HeroNames,
    HeroLore,
    Aghs,
}

impl Job {
    pub const ALL: [Job; 6] = [
        Job::Items,
        Job::Abilities,
        Job::Heroes,
        Job::HeroNames,
        Job::HeroLore,
        Job::Aghs,
    ];

    /// Output file stem
    pub fn name(self) -> &'static str {
        match self {
            Job::Items => "items",
            Job::Abilities => "abilities",
            Job::Heroes => "heroes",
            Job::HeroNames => "hero_names",
            Job::HeroLore => "hero_lore",
            Job::Aghs => "aghs",
        }
    }

    /// Whether the manifest switches this job on
    pub fn enabled(self, toggles: &JobToggles) -> bool {
        match self {
            Job::Items => toggles.items,
            Job::Abilities => toggles.abilities,
            Job::Heroes => toggles.heroes,
            Job::HeroNames => toggles.hero_names,
            Job::HeroLore => toggles.hero_lore,
            Job::Aghs => toggles.aghs,
        }
    }

    /// Jobs the manifest switches on, in declaration order
    pub fn enabled_jobs(toggles: &JobToggles) -> Vec<Job> {
        Self::ALL
            .into_iter()
            .filter(|job| job.enabled(toggles))
            .collect()
    }

    /// Output path of this job under `manifest`
    pub fn output_path(self, manifest: &Manifest) -> PathBuf {
        manifest
            .build
            .output_dir
            .join(format!("{}{}.json", self.name(), manifest.build.suffix))
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Job {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|job| job.name() == s)
            .ok_or_else(|| Error::UnknownJob(s.to_string()))
    }
}

/// Progress of a pipeline run
#[derive(Debug, Clone, Copy)]
pub struct JobProgress {
    /// Jobs started so far, this one included
    pub current: usize,
    pub total: usize,
    pub job: Job,
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Number of jobs that wrote their document
    pub success_count: usize,
    /// Number of failed jobs
    pub fail_count: usize,
    /// Messages for each job, in job order
    pub results: Vec<String>,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        self.fail_count == 0
    }
}

/// Run `jobs` in parallel
///
/// Only building the thread pool can fail the run as a whole.
pub fn run<F>(manifest: &Manifest, jobs: &[Job], progress: F) -> Result<BatchResult>
where
    F: Fn(&JobProgress) + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(manifest.build.concurrency.max(1))
        .build()?;

    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = jobs.len();

    tracing::info!(
        "Building {total} documents into {}",
        manifest.build.output_dir.display()
    );

    let results: Vec<String> = pool.install(|| {
        jobs.par_iter()
            .map(|&job| {
                let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(&JobProgress {
                    current,
                    total,
                    job,
                });

                match run_job(job, manifest) {
                    Ok(path) => {
                        success_counter.fetch_add(1, Ordering::SeqCst);
                        tracing::info!("Wrote {}", path.display());
                        format!("Built: {}", path.display())
                    }
                    Err(e) => {
                        fail_counter.fetch_add(1, Ordering::SeqCst);
                        tracing::warn!("Job {job} failed: {e}");
                        format!("Failed {job}: {e}")
                    }
                }
            })
            .collect()
    });

    Ok(BatchResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    })
}

/// Load, transform and write a single document
pub fn run_job(job: Job, manifest: &Manifest) -> Result<PathBuf> {
    let data = &manifest.sources.data_dir;
    let language = &manifest.build.language;
    let output = job.output_path(manifest);

    match job {
        Job::Items => {
            let strings = load_strings(data.join(sources::abilities_strings_path(language)))?;
            let items = load_document(data.join(ITEMS_PATH))?;
            let neutrals = load_document(data.join(NEUTRAL_ITEMS_PATH))?;
            write_json(&output, &transform::transform_items(&strings, &items, &neutrals)?)?;
        }
        Job::Abilities => {
            let strings = load_strings(data.join(sources::abilities_strings_path(language)))?;
            let abilities = load_document(data.join(ABILITIES_PATH))?;
            write_json(&output, &transform::transform_abilities(&strings, &abilities)?)?;
        }
        Job::Heroes | Job::HeroNames => {
            let strings = load_strings(data.join(sources::dota_strings_path(language)))?;
            let heroes = load_document(data.join(HEROES_PATH))?;
            let overrides = hero_overrides(manifest)?;

            let document = if job == Job::Heroes {
                transform::transform_heroes(&strings, &heroes, overrides.as_ref())?
            } else {
                transform::transform_hero_names(&strings, &heroes, overrides.as_ref())?
            };
            write_json(&output, &document)?;
        }
        Job::HeroLore => {
            let lore = load_document(data.join(sources::hero_lore_path(language)))?;
            write_json(&output, &transform::transform_hero_lore(&lore)?)?;
        }
        Job::Aghs => {
            let responses = herodata_responses(&manifest.sources.herodata_dir)?;
            write_json(&output, &transform::transform_aghs(&responses))?;
        }
    }

    Ok(output)
}

fn hero_overrides(manifest: &Manifest) -> Result<Option<Value>> {
    manifest
        .sources
        .hero_overrides
        .as_ref()
        .map(load_document)
        .transpose()
}

/// Every readable `herodata` response, in file name order
fn herodata_responses(dir: &Path) -> Result<Vec<Value>> {
    if !dir.is_dir() {
        return Err(Error::MissingSource {
            path: dir.to_path_buf(),
        });
    }

    let mut responses = Vec::new();
    for path in find_json_documents(dir) {
        match load_document(&path) {
            Ok(response) => responses.push(response),
            Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
        }
    }
    Ok(responses)
}

/// Write `value` as pretty-printed JSON, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_names_roundtrip() {
        for job in Job::ALL {
            assert_eq!(job.name().parse::<Job>().unwrap(), job);
        }
        assert!(matches!("units".parse::<Job>(), Err(Error::UnknownJob(_))));
    }

    #[test]
    fn test_enabled_jobs() {
        let toggles = JobToggles {
            aghs: false,
            hero_lore: false,
            ..JobToggles::default()
        };

        assert_eq!(
            Job::enabled_jobs(&toggles),
            vec![Job::Items, Job::Abilities, Job::Heroes, Job::HeroNames]
        );
    }

    #[test]
    fn test_output_path() {
        let mut manifest = Manifest::default();
        manifest.build.output_dir = PathBuf::from("/out");
        assert_eq!(
            Job::HeroNames.output_path(&manifest),
            PathBuf::from("/out/hero_names_cn.json")
        );
    }

    #[test]
    fn test_missing_herodata_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            herodata_responses(&dir.path().join("herodata")),
            Err(Error::MissingSource { .. })
        ));
    }
}
