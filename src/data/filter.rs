use std::cmp::{Ordering, Reverse};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use serde::{Deserialize, Serialize};

use super::model::{Profile, ProfileKind, ProfileType};

// ---------------------------------------------------------------------------
// Query inputs
// ---------------------------------------------------------------------------

/// Active search criteria. Every list is OR-combined internally and the
/// categories are AND-combined; an empty list places no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    /// Case-insensitive free text; blank matches everything.
    pub query: String,
    /// Substrings looked up in tags and services.
    pub skills: Vec<String>,
    /// Exact company industries.
    pub industry: Vec<String>,
    /// Substrings of the profile location ("Gaza City" also matches
    /// "Gaza City - Rimal").
    pub location: Vec<String>,
    /// Exact professional availability values.
    pub work_status: Vec<String>,
    /// Exact professional availability values.
    pub availability: Vec<String>,
    /// `[min, max]` years of experience, inclusive. A single value is a
    /// minimum.
    pub experience: Vec<u32>,
    /// Exact company sizes.
    pub company_size: Vec<String>,
}

impl SearchFilters {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.skills.is_empty()
            && self.industry.is_empty()
            && self.location.is_empty()
            && self.work_status.is_empty()
            && self.availability.is_empty()
            && self.experience.is_empty()
            && self.company_size.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Which variants are in view (the directory's tabs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeScope {
    #[default]
    All,
    Professional,
    Company,
}

impl TypeScope {
    pub fn admits(&self, profile: &Profile) -> bool {
        match self {
            TypeScope::All => true,
            TypeScope::Professional => profile.profile_type() == ProfileType::Professional,
            TypeScope::Company => profile.profile_type() == ProfileType::Company,
        }
    }
}

/// Display language; decides which name is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Keep the filtered order.
    #[default]
    Unsorted,
    /// Display name, ascending.
    Name,
    /// Years of experience, descending; profiles without a value last.
    Experience,
    /// Company size, largest first; professionals last.
    Size,
    /// Available, busy, unavailable; companies and unknown last.
    Availability,
}

impl SortKey {
    /// Parse the UI's sort selector. Blank or unknown values keep the
    /// filtered order.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" => SortKey::Unsorted,
            "name" => SortKey::Name,
            "experience" => SortKey::Experience,
            "size" => SortKey::Size,
            "availability" => SortKey::Availability,
            other => {
                log::debug!("Unknown sort key '{other}', keeping filtered order");
                SortKey::Unsorted
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether `profile` passes every active criterion in `filters`.
pub fn matches(profile: &Profile, filters: &SearchFilters) -> bool {
    matches_query(profile, &filters.query)
        && matches_location(profile, &filters.location)
        && matches_skills(profile, &filters.skills)
        && matches_industry(profile, &filters.industry)
        && matches_availability(profile, &filters.work_status)
        && matches_availability(profile, &filters.availability)
        && matches_experience(profile, &filters.experience)
        && matches_company_size(profile, &filters.company_size)
}

fn searchable_text(profile: &Profile) -> String {
    let base = &profile.base;
    let mut parts: Vec<&str> = vec![base.name.as_str()];
    parts.extend(base.name_arabic.as_deref());
    parts.push(profile.headline());
    parts.extend(base.about.as_deref());
    parts.extend(base.about_arabic.as_deref());
    parts.extend(base.services.iter().map(String::as_str));
    parts.extend(base.tags.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn matches_query(profile: &Profile, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    searchable_text(profile).contains(&query.to_lowercase())
}

fn matches_location(profile: &Profile, locations: &[String]) -> bool {
    locations.is_empty()
        || locations
            .iter()
            .any(|loc| profile.base.location.contains(loc.as_str()))
}

fn matches_skills(profile: &Profile, skills: &[String]) -> bool {
    if skills.is_empty() {
        return true;
    }
    let base = &profile.base;
    skills.iter().any(|skill| {
        let skill = skill.to_lowercase();
        base.tags
            .iter()
            .chain(base.services.iter())
            .any(|entry| entry.to_lowercase().contains(&skill))
    })
}

fn matches_industry(profile: &Profile, industries: &[String]) -> bool {
    if industries.is_empty() {
        return true;
    }
    match &profile.kind {
        ProfileKind::Company(c) => industries.iter().any(|i| *i == c.industry),
        ProfileKind::Professional(_) => false,
    }
}

fn matches_availability(profile: &Profile, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    match &profile.kind {
        ProfileKind::Professional(p) => p
            .availability
            .is_some_and(|a| wanted.iter().any(|w| w == a.as_str())),
        ProfileKind::Company(_) => false,
    }
}

fn matches_experience(profile: &Profile, range: &[u32]) -> bool {
    let Some(&min) = range.first() else {
        return true;
    };
    let max = range.get(1).copied().unwrap_or(u32::MAX);
    match &profile.kind {
        ProfileKind::Professional(p) => p
            .years_experience
            .is_some_and(|years| years >= min && years <= max),
        ProfileKind::Company(_) => false,
    }
}

fn matches_company_size(profile: &Profile, sizes: &[String]) -> bool {
    if sizes.is_empty() {
        return true;
    }
    match &profile.kind {
        ProfileKind::Company(c) => c
            .company_size
            .is_some_and(|s| sizes.iter().any(|w| w == s.as_str())),
        ProfileKind::Professional(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn display_name(profile: &Profile, language: Language) -> &str {
    match language {
        Language::Arabic => profile
            .base
            .name_arabic
            .as_deref()
            .unwrap_or(&profile.base.name),
        Language::English => &profile.base.name,
    }
}

/// Compares display names the way the active language orders them.
///
/// Uses the CLDR collation for the language, so `أ` and `ا` share a base
/// letter and `É` sorts with `E`. Raw text breaks collation ties, making the
/// order total.
pub struct NameCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    pub fn new(language: Language) -> Self {
        let locale = match language {
            Language::English => locale!("en"),
            Language::Arabic => locale!("ar"),
        };
        let collator = match Collator::try_new(locale.into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("No collation data for {language:?}, comparing case-folded text: {e}");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        primary.then_with(|| a.cmp(b))
    }
}

/// Stable sort of `indices` (positions in `profiles`) by `key`.
pub fn sort_indices(profiles: &[Profile], indices: &mut [usize], key: SortKey, language: Language) {
    match key {
        SortKey::Unsorted => {}
        SortKey::Name => {
            let collator = NameCollator::new(language);
            indices.sort_by(|&a, &b| {
                collator.compare(
                    display_name(&profiles[a], language),
                    display_name(&profiles[b], language),
                )
            })
        }
        SortKey::Experience => indices.sort_by_key(|&i| {
            Reverse(
                profiles[i]
                    .as_professional()
                    .and_then(|p| p.years_experience),
            )
        }),
        SortKey::Size => indices.sort_by_key(|&i| {
            profiles[i]
                .as_company()
                .and_then(|c| c.company_size)
                .map_or(u8::MAX, |s| s.rank())
        }),
        SortKey::Availability => indices.sort_by_key(|&i| {
            profiles[i]
                .as_professional()
                .and_then(|p| p.availability)
                .map_or(u8::MAX, |a| a.rank())
        }),
    }
}

// ---------------------------------------------------------------------------
// Entry-points
// ---------------------------------------------------------------------------

/// Positions in `profiles` that are in `scope` and pass `filters`, ordered
/// by `sort`.
pub fn matching_indices(
    profiles: &[Profile],
    filters: &SearchFilters,
    scope: TypeScope,
    sort: SortKey,
    language: Language,
) -> Vec<usize> {
    let mut indices: Vec<usize> = profiles
        .iter()
        .enumerate()
        .filter(|(_, p)| scope.admits(p) && matches(p, filters))
        .map(|(i, _)| i)
        .collect();
    sort_indices(profiles, &mut indices, sort, language);
    indices
}

/// Filter then sort, returning a new collection. `profiles` is untouched.
pub fn filter_and_sort(profiles: &[Profile], filters: &SearchFilters, sort_by: &str) -> Vec<Profile> {
    matching_indices(
        profiles,
        filters,
        TypeScope::All,
        SortKey::parse(sort_by),
        Language::English,
    )
    .into_iter()
    .map(|i| profiles[i].clone())
    .collect()
}
