use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Enumerated values
// ---------------------------------------------------------------------------

/// Discriminant of a profile, as written in the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Professional,
    Company,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Professional => "professional",
            ProfileType::Company => "company",
        }
    }
}

impl FromStr for ProfileType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(ProfileType::Professional),
            "company" => Ok(ProfileType::Company),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a professional is currently taking on work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Unavailable => "unavailable",
        }
    }

    /// Sort rank, most available first.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Availability::Available => 0,
            Availability::Busy => 1,
            Availability::Unavailable => 2,
        }
    }
}

impl FromStr for Availability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Availability::Available),
            "busy" => Ok(Availability::Busy),
            "unavailable" => Ok(Availability::Unavailable),
            other => Err(ValidationError::InvalidValue {
                field: "availability",
                value: other.to_string(),
            }),
        }
    }
}

/// Headcount bracket of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Startup => "startup",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
        }
    }

    /// Sort rank, largest first.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            CompanySize::Large => 0,
            CompanySize::Medium => 1,
            CompanySize::Small => 2,
            CompanySize::Startup => 3,
        }
    }
}

impl FromStr for CompanySize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(CompanySize::Startup),
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            other => Err(ValidationError::InvalidValue {
                field: "company_size",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

/// How to reach the person or company. `email` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Any further handles (e.g. `instagram`, `phone`).
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub role: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub size: u32,
    #[serde(default)]
    pub roles: Vec<String>,
}

// ---------------------------------------------------------------------------
// Profile – one validated directory entry
// ---------------------------------------------------------------------------

/// Fields every profile carries regardless of its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBase {
    /// Unique, URL-safe identifier; the lookup and routing key.
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_arabic: Option<String>,
    /// Free text, e.g. "Gaza City" or "Gaza City - Rimal".
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_arabic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfessionalDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_arabic: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technical_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyDetails {
    #[serde(default)]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technical_expertise: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notable_projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
}

/// Variant-specific part of a profile, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProfileKind {
    Professional(ProfessionalDetails),
    Company(CompanyDetails),
}

/// A validated professional or company entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub base: ProfileBase,
    #[serde(flatten)]
    pub kind: ProfileKind,
}

impl Profile {
    pub fn slug(&self) -> &str {
        &self.base.slug
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn profile_type(&self) -> ProfileType {
        match self.kind {
            ProfileKind::Professional(_) => ProfileType::Professional,
            ProfileKind::Company(_) => ProfileType::Company,
        }
    }

    pub fn as_professional(&self) -> Option<&ProfessionalDetails> {
        match &self.kind {
            ProfileKind::Professional(p) => Some(p),
            ProfileKind::Company(_) => None,
        }
    }

    pub fn as_company(&self) -> Option<&CompanyDetails> {
        match &self.kind {
            ProfileKind::Company(c) => Some(c),
            ProfileKind::Professional(_) => None,
        }
    }

    /// Professional title, or industry for companies: the line shown under
    /// the name on a card.
    pub fn headline(&self) -> &str {
        match &self.kind {
            ProfileKind::Professional(p) => &p.title,
            ProfileKind::Company(c) => &c.industry,
        }
    }
}

// ---------------------------------------------------------------------------
// Collection helpers
// ---------------------------------------------------------------------------

/// Number of loaded profiles per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileCounts {
    pub professionals: usize,
    pub companies: usize,
}

impl ProfileCounts {
    pub fn of(profiles: &[Profile]) -> Self {
        profiles
            .iter()
            .fold(Self::default(), |mut counts, p| {
                match p.kind {
                    ProfileKind::Professional(_) => counts.professionals += 1,
                    ProfileKind::Company(_) => counts.companies += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.professionals + self.companies
    }
}

/// Slugs of all profiles in collection order.
pub fn profile_slugs(profiles: &[Profile]) -> Vec<String> {
    profiles.iter().map(|p| p.base.slug.clone()).collect()
}

/// Profiles of a single variant, in collection order.
pub fn profiles_by_type(profiles: &[Profile], profile_type: ProfileType) -> Vec<Profile> {
    profiles
        .iter()
        .filter(|p| p.profile_type() == profile_type)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(slug: &str) -> ProfileBase {
        ProfileBase {
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            name_arabic: None,
            location: "Gaza City".to_string(),
            tags: Vec::new(),
            services: Vec::new(),
            contact: Contact {
                email: format!("{slug}@example.com"),
                ..Contact::default()
            },
            about: None,
            about_arabic: None,
        }
    }

    #[test]
    fn headline_reads_the_variant_field() {
        let dev = Profile {
            base: base("dev"),
            kind: ProfileKind::Professional(ProfessionalDetails {
                title: "Software Engineer".to_string(),
                ..ProfessionalDetails::default()
            }),
        };
        let shop = Profile {
            base: base("shop"),
            kind: ProfileKind::Company(CompanyDetails {
                industry: "Technology".to_string(),
                ..CompanyDetails::default()
            }),
        };
        assert_eq!(dev.headline(), "Software Engineer");
        assert_eq!(shop.headline(), "Technology");
        assert!(dev.as_company().is_none());
        assert!(shop.as_professional().is_none());
    }

    #[test]
    fn counts_and_type_helpers() {
        let profiles = vec![
            Profile {
                base: base("a"),
                kind: ProfileKind::Professional(ProfessionalDetails::default()),
            },
            Profile {
                base: base("b"),
                kind: ProfileKind::Company(CompanyDetails::default()),
            },
            Profile {
                base: base("c"),
                kind: ProfileKind::Professional(ProfessionalDetails::default()),
            },
        ];
        let counts = ProfileCounts::of(&profiles);
        assert_eq!(counts.professionals, 2);
        assert_eq!(counts.companies, 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(profile_slugs(&profiles), vec!["a", "b", "c"]);

        let companies = profiles_by_type(&profiles, ProfileType::Company);
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].slug(), "b");
    }

    #[test]
    fn serializes_with_type_tag_next_to_base_fields() {
        let profile = Profile {
            base: base("acme"),
            kind: ProfileKind::Company(CompanyDetails {
                industry: "Technology".to_string(),
                company_size: Some(CompanySize::Small),
                ..CompanyDetails::default()
            }),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["type"], "company");
        assert_eq!(json["slug"], "acme");
        assert_eq!(json["company_size"], "small");
        assert_eq!(json["contact"]["email"], "acme@example.com");
    }

    #[test]
    fn enum_values_parse_from_wire_strings() {
        assert_eq!("busy".parse::<Availability>().unwrap(), Availability::Busy);
        assert_eq!("large".parse::<CompanySize>().unwrap(), CompanySize::Large);
        assert!("huge".parse::<CompanySize>().is_err());
        assert!(matches!(
            "agency".parse::<ProfileType>(),
            Err(ValidationError::UnknownType(t)) if t == "agency"
        ));
    }
}
