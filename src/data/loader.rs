use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::model::Profile;
use super::raw::RawProfile;
use crate::config::DirectoryConfig;
use crate::error::{LoadError, RecordError};

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// A source file that did not make it into the collection.
#[derive(Debug)]
pub struct SkippedRecord {
    pub source: PathBuf,
    pub reason: RecordError,
}

/// Outcome of one load: the valid profiles in discovery order, plus every
/// file that was left out and why.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub profiles: Vec<Profile>,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every profile document under `config.profiles_dir`.
///
/// Files are visited sorted by name, so the result is stable across
/// platforms and repeated calls. A malformed, incomplete or duplicate record
/// is skipped with a warning; only an unreadable directory fails the call.
pub fn load_all_profiles(config: &DirectoryConfig) -> Result<LoadReport, LoadError> {
    let sources = discover_sources(config)?;

    let mut report = LoadReport::default();
    let mut seen_slugs: HashSet<String> = HashSet::new();

    for path in sources {
        match load_record(&path) {
            Ok(profile) => {
                if !seen_slugs.insert(profile.base.slug.clone()) {
                    let reason = RecordError::DuplicateSlug(profile.base.slug);
                    log::warn!("Skipping profile {}: {reason}", path.display());
                    report.skipped.push(SkippedRecord { source: path, reason });
                    continue;
                }
                report.profiles.push(profile);
            }
            Err(reason) => {
                log::warn!("Skipping profile {}: {reason}", path.display());
                report.skipped.push(SkippedRecord { source: path, reason });
            }
        }
    }

    log::info!(
        "Loaded {} profiles from {} ({} skipped)",
        report.profiles.len(),
        config.profiles_dir.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Load the collection and return the profile with `slug`, if any.
///
/// Reads the whole source set on every call; use
/// [`ProfileStore`](crate::store::ProfileStore) to serve repeated lookups
/// from memory.
pub fn load_profile_by_slug(
    config: &DirectoryConfig,
    slug: &str,
) -> Result<Option<Profile>, LoadError> {
    let report = load_all_profiles(config)?;
    Ok(report.profiles.into_iter().find(|p| p.base.slug == slug))
}

/// Parse and validate a single profile document.
pub fn load_record(path: &Path) -> Result<Profile, RecordError> {
    let text = std::fs::read_to_string(path)?;
    parse_record(&text)
}

/// Parse and validate a profile document held in memory. JSON is accepted
/// as well since it is a subset of YAML.
pub fn parse_record(text: &str) -> Result<Profile, RecordError> {
    let raw: RawProfile = serde_yaml::from_str(text)?;
    Ok(raw.validate()?)
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Profile files directly inside the configured directory, sorted by name.
fn discover_sources(config: &DirectoryConfig) -> Result<Vec<PathBuf>, LoadError> {
    let dir = &config.profiles_dir;

    // Surface a missing or unreadable root as a collection-level error before
    // walking, so it is never mistaken for an empty directory.
    std::fs::read_dir(dir).map_err(|source| LoadError::SourceUnavailable {
        path: dir.clone(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !config.is_profile_file(entry.path()) {
            continue;
        }
        sources.push(entry.into_path());
    }

    log::debug!("Discovered {} profile files in {}", sources.len(), dir.display());
    Ok(sources)
}
