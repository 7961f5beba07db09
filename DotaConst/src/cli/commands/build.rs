//! CLI command for running the build pipeline

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, job_bar, print_done, print_step};
use crate::config::Manifest;
use crate::pipeline::{self, Job};

/// Command-line values that take precedence over the manifest
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub data_dir: Option<PathBuf>,
    pub herodata_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub language: Option<String>,
    pub suffix: Option<String>,
    pub concurrency: Option<usize>,
}

impl BuildOverrides {
    /// Apply every value that was given on the command line
    pub fn apply(&self, manifest: &mut Manifest) {
        if let Some(dir) = &self.data_dir {
            manifest.sources.data_dir.clone_from(dir);
        }
        if let Some(dir) = &self.herodata_dir {
            manifest.sources.herodata_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            manifest.build.output_dir.clone_from(dir);
        }
        if let Some(language) = &self.language {
            manifest.build.language.clone_from(language);
        }
        if let Some(suffix) = &self.suffix {
            manifest.build.suffix.clone_from(suffix);
        }
        if let Some(concurrency) = self.concurrency {
            manifest.build.concurrency = concurrency;
        }
    }
}

/// Build the documents named by `jobs`, or every enabled one
pub fn execute(
    manifest_path: &Path,
    overrides: &BuildOverrides,
    jobs: &[Job],
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, "Reading manifest...");
    }
    let mut manifest = Manifest::load_or_default(manifest_path)?;
    overrides.apply(&mut manifest);

    let jobs = if jobs.is_empty() {
        Job::enabled_jobs(&manifest.jobs)
    } else {
        jobs.to_vec()
    };

    if jobs.is_empty() {
        println!("No jobs enabled in: {}", manifest_path.display());
        return Ok(());
    }

    if !quiet {
        print_step(
            2,
            3,
            GEAR,
            &format!(
                "Building {} documents ({})...",
                jobs.len(),
                manifest.build.language
            ),
        );
    }

    let pb = job_bar(jobs.len() as u64, quiet);
    let result = pipeline::run(&manifest, &jobs, |progress| {
        pb.set_position(progress.current as u64);
        pb.set_message(progress.job.name());
    })?;
    pb.finish_and_clear();

    if !quiet {
        print_step(
            3,
            3,
            DISK,
            &format!("Wrote to {}", manifest.build.output_dir.display()),
        );
    }

    println!();
    println!("Build complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
        anyhow::bail!("{} of {} jobs failed", result.fail_count, jobs.len());
    }

    if !quiet {
        print_done(start.elapsed());
    }

    Ok(())
}
