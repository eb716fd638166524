use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DirectoryConfig;
use crate::data::loader::{load_all_profiles, SkippedRecord};
use crate::data::model::{Profile, ProfileCounts};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// ProfileStore – the loaded collection and its lifetime
// ---------------------------------------------------------------------------

struct Loaded {
    profiles: Arc<[Profile]>,
    by_slug: HashMap<String, usize>,
    skipped: Vec<SkippedRecord>,
}

/// Caches the loaded collection for the life of a session.
///
/// The first access loads from disk; later accesses and slug lookups are
/// served from memory. The cache is only dropped by [`ProfileStore::refresh`]
/// or [`ProfileStore::invalidate`]; edits to the source files are not seen
/// until then.
pub struct ProfileStore {
    config: DirectoryConfig,
    loaded: Option<Loaded>,
}

impl ProfileStore {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config,
            loaded: None,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The whole collection, loading it if nothing is cached.
    pub fn profiles(&mut self) -> Result<Arc<[Profile]>, LoadError> {
        Ok(Arc::clone(&self.ensure_loaded()?.profiles))
    }

    /// The profile with `slug`, or `None` when no profile has it.
    pub fn profile_by_slug(&mut self, slug: &str) -> Result<Option<Profile>, LoadError> {
        let loaded = self.ensure_loaded()?;
        Ok(loaded
            .by_slug
            .get(slug)
            .map(|&i| loaded.profiles[i].clone()))
    }

    pub fn counts(&mut self) -> Result<ProfileCounts, LoadError> {
        Ok(ProfileCounts::of(&self.ensure_loaded()?.profiles))
    }

    /// Records left out by the most recent load. Empty before any load.
    pub fn skipped(&self) -> &[SkippedRecord] {
        self.loaded
            .as_ref()
            .map(|l| l.skipped.as_slice())
            .unwrap_or_default()
    }

    /// Drop the cached collection; the next access reloads.
    pub fn invalidate(&mut self) {
        if self.loaded.take().is_some() {
            log::debug!("Profile cache invalidated");
        }
    }

    /// Reload from the source directory now. On failure nothing stays
    /// cached.
    pub fn refresh(&mut self) -> Result<Arc<[Profile]>, LoadError> {
        self.invalidate();
        self.profiles()
    }

    fn ensure_loaded(&mut self) -> Result<&Loaded, LoadError> {
        let loaded = match self.loaded.take() {
            Some(loaded) => {
                log::debug!("Serving {} profiles from cache", loaded.profiles.len());
                loaded
            }
            None => Self::load(&self.config)?,
        };
        Ok(&*self.loaded.insert(loaded))
    }

    fn load(config: &DirectoryConfig) -> Result<Loaded, LoadError> {
        let report = load_all_profiles(config)?;
        let by_slug = report
            .profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.base.slug.clone(), i))
            .collect();
        Ok(Loaded {
            profiles: report.profiles.into(),
            by_slug,
            skipped: report.skipped,
        })
    }
}
