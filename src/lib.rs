//! Profile loading, validation and search for the Gaza professionals
//! directory.
//!
//! Profiles are authored as one YAML (or JSON) document per person or
//! company. [`load_all_profiles`] turns a directory of them into a validated
//! collection, skipping bad records with a warning; [`filter_and_sort`]
//! derives the view the directory page shows. [`ProfileStore`] keeps the
//! collection in memory between lookups and [`DirectoryState`] memoizes the
//! current view for a UI.

pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod store;

pub use config::DirectoryConfig;
pub use data::filter::{filter_and_sort, matching_indices, Language, SearchFilters, SortKey, TypeScope};
pub use data::loader::{load_all_profiles, load_profile_by_slug, LoadReport, SkippedRecord};
pub use data::model::{
    profile_slugs, profiles_by_type, Availability, CompanyDetails, CompanySize, Contact,
    ProfessionalDetails, Profile, ProfileBase, ProfileCounts, ProfileKind, ProfileType,
};
pub use error::{ConfigError, LoadError, RecordError, ValidationError};
pub use state::{DirectoryState, FilterCategory};
pub use store::ProfileStore;
