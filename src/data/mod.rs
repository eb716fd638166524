//! Data layer: profile types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  profiles/*.yml | *.yaml | *.json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  discover files → parse → RawProfile
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   raw     │  validate → Profile (or skip with a warning)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  search / filter / sort → visible profiles
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
mod raw;
