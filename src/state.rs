use std::sync::Arc;

use crate::data::filter::{matching_indices, Language, SearchFilters, SortKey, TypeScope};
use crate::data::model::{Profile, ProfileCounts};
use crate::store::ProfileStore;

// ---------------------------------------------------------------------------
// Directory view state
// ---------------------------------------------------------------------------

/// Multi-select filter groups offered by the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Skills,
    Industry,
    Location,
    WorkStatus,
    Availability,
    CompanySize,
}

/// Everything the visible result depends on. The collection is compared by
/// identity, not content.
#[derive(Clone)]
struct ViewKey {
    profiles: Arc<[Profile]>,
    filters: SearchFilters,
    scope: TypeScope,
    sort: SortKey,
    language: Language,
}

impl PartialEq for ViewKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.profiles, &other.profiles)
            && self.filters == other.filters
            && self.scope == other.scope
            && self.sort == other.sort
            && self.language == other.language
    }
}

/// The directory page state, independent of rendering.
pub struct DirectoryState {
    profiles: Arc<[Profile]>,
    filters: SearchFilters,
    scope: TypeScope,
    sort: SortKey,
    language: Language,

    /// Indices into `profiles` passing the current query (cached).
    visible_indices: Vec<usize>,
    computed_for: Option<ViewKey>,
    recomputations: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            profiles: Arc::from(Vec::new()),
            filters: SearchFilters::default(),
            scope: TypeScope::default(),
            sort: SortKey::default(),
            language: Language::default(),
            visible_indices: Vec::new(),
            computed_for: None,
            recomputations: 0,
            status_message: None,
        }
    }
}

impl DirectoryState {
    /// Pull the collection from `store`, loading it if needed. A load error
    /// empties the view and becomes the status message.
    pub fn load_from(&mut self, store: &mut ProfileStore) {
        match store.profiles() {
            Ok(profiles) => self.set_profiles(profiles),
            Err(e) => {
                log::error!("Failed to load profiles: {e}");
                self.profiles = Arc::from(Vec::new());
                self.refilter();
                self.status_message = Some(format!("Failed to load profiles: {e}"));
            }
        }
    }

    /// Reload from disk through `store` and show the fresh collection.
    pub fn refresh_from(&mut self, store: &mut ProfileStore) {
        store.invalidate();
        self.load_from(store);
    }

    /// Ingest a newly loaded collection; filters are kept.
    pub fn set_profiles(&mut self, profiles: Arc<[Profile]>) {
        self.status_message = if profiles.is_empty() {
            Some("No profiles found. Make sure profile files exist in the profiles directory.".into())
        } else {
            None
        };
        self.profiles = profiles;
        self.refilter();
    }

    pub fn profiles(&self) -> &Arc<[Profile]> {
        &self.profiles
    }

    pub fn counts(&self) -> ProfileCounts {
        ProfileCounts::of(&self.profiles)
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn scope(&self) -> TypeScope {
        self.scope
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Profiles passing the current query, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Profile> + '_ {
        self.visible_indices.iter().map(|&i| &self.profiles[i])
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// How many times the visible set was actually recomputed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.refilter();
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
        self.refilter();
    }

    /// Add `value` to a filter group, or remove it if already selected.
    pub fn toggle_filter_value(&mut self, category: FilterCategory, value: &str) {
        let selected = match category {
            FilterCategory::Skills => &mut self.filters.skills,
            FilterCategory::Industry => &mut self.filters.industry,
            FilterCategory::Location => &mut self.filters.location,
            FilterCategory::WorkStatus => &mut self.filters.work_status,
            FilterCategory::Availability => &mut self.filters.availability,
            FilterCategory::CompanySize => &mut self.filters.company_size,
        };
        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
        } else {
            selected.push(value.to_string());
        }
        self.refilter();
    }

    pub fn set_experience_range(&mut self, min: u32, max: u32) {
        self.filters.experience = vec![min, max];
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    pub fn set_scope(&mut self, scope: TypeScope) {
        self.scope = scope;
        self.refilter();
    }

    pub fn set_sort(&mut self, sort_by: &str) {
        self.sort = SortKey::parse(sort_by);
        self.refilter();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.refilter();
    }

    /// Recompute `visible_indices` unless nothing it depends on changed.
    pub fn refilter(&mut self) {
        let key = ViewKey {
            profiles: Arc::clone(&self.profiles),
            filters: self.filters.clone(),
            scope: self.scope,
            sort: self.sort,
            language: self.language,
        };
        if self.computed_for.as_ref() == Some(&key) {
            return;
        }
        self.visible_indices = matching_indices(
            &self.profiles,
            &self.filters,
            self.scope,
            self.sort,
            self.language,
        );
        self.recomputations += 1;
        self.computed_for = Some(key);
    }
}
