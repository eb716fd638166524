use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use super::model::{
    Availability, Certification, CompanyDetails, CompanySize, Contact, ProfessionalDetails,
    Profile, ProfileBase, ProfileKind, ProfileType, Project, Team, WorkExperience,
};
use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// RawProfile – a parsed document before validation
// ---------------------------------------------------------------------------

/// Every key a profile document may carry, all optional. Fields of both
/// variants live side by side here; [`RawProfile::validate`] picks the ones
/// that belong to the declared `type`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawProfile {
    slug: Option<String>,
    name: Option<String>,
    name_arabic: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    location: Option<String>,
    tags: Option<Vec<String>>,
    services: Option<Vec<String>>,
    contact: Option<RawContact>,
    about: Option<String>,
    about_arabic: Option<String>,

    // professional
    title: Option<String>,
    title_arabic: Option<String>,
    technical_skills: Option<Vec<String>>,
    work_experience: Option<Vec<WorkExperience>>,
    projects: Option<Vec<Project>>,
    languages: Option<Vec<String>>,
    years_experience: Option<u32>,
    availability: Option<String>,

    // company
    industry: Option<String>,
    company_size: Option<String>,
    founded: Option<i32>,
    technical_expertise: Option<Vec<String>>,
    team: Option<Team>,
    notable_projects: Option<Vec<Project>>,

    // both
    certifications: Option<Vec<Certification>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawContact {
    email: Option<String>,
    website: Option<Value>,
    linkedin: Option<Value>,
    github: Option<Value>,
    behance: Option<Value>,
    twitter: Option<Value>,
    /// Handles are free-form: `whatsapp: 970599123456` is a YAML integer and
    /// `instagram:` with no value is null.
    #[serde(flatten)]
    other: BTreeMap<String, Value>,
}

/// Treat absent and blank strings alike.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Text form of a contact handle. Blank, null and nested values yield `None`.
fn handle(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => present(Some(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            log::debug!("Ignoring non-scalar contact handle: {other:?}");
            None
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    present(value).ok_or(ValidationError::MissingField(field))
}

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl RawProfile {
    /// Narrow the untyped record into a [`Profile`].
    ///
    /// Checks run in the order `slug`, `name`, `type`, `contact.email`, so the
    /// reported error is always the first missing requirement.
    pub(crate) fn validate(self) -> Result<Profile, ValidationError> {
        let slug = required(self.slug, "slug")?;
        let name = required(self.name, "name")?;
        let kind = required(self.kind, "type")?;
        let profile_type: ProfileType = kind.trim().parse()?;

        let contact = self.contact.unwrap_or_default();
        let email = required(contact.email, "contact.email")?;

        if !is_url_safe(&slug) {
            return Err(ValidationError::InvalidSlug(slug));
        }

        let base = ProfileBase {
            slug,
            name,
            name_arabic: present(self.name_arabic),
            location: self.location.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            services: self.services.unwrap_or_default(),
            contact: Contact {
                email,
                website: handle(contact.website),
                linkedin: handle(contact.linkedin),
                github: handle(contact.github),
                behance: handle(contact.behance),
                twitter: handle(contact.twitter),
                other: contact
                    .other
                    .into_iter()
                    .filter_map(|(key, value)| handle(Some(value)).map(|v| (key, v)))
                    .collect(),
            },
            about: present(self.about),
            about_arabic: present(self.about_arabic),
        };

        let kind = match profile_type {
            ProfileType::Professional => ProfileKind::Professional(ProfessionalDetails {
                title: self.title.unwrap_or_default(),
                title_arabic: present(self.title_arabic),
                technical_skills: self.technical_skills.unwrap_or_default(),
                work_experience: self.work_experience.unwrap_or_default(),
                certifications: self.certifications.unwrap_or_default(),
                projects: self.projects.unwrap_or_default(),
                languages: self.languages.unwrap_or_default(),
                years_experience: self.years_experience,
                availability: present(self.availability)
                    .map(|a| a.trim().parse::<Availability>())
                    .transpose()?,
            }),
            ProfileType::Company => ProfileKind::Company(CompanyDetails {
                industry: self.industry.unwrap_or_default(),
                company_size: present(self.company_size)
                    .map(|s| s.trim().parse::<CompanySize>())
                    .transpose()?,
                founded: self.founded,
                technical_expertise: self.technical_expertise.unwrap_or_default(),
                team: self.team,
                notable_projects: self.notable_projects.unwrap_or_default(),
                certifications: self.certifications.unwrap_or_default(),
            }),
        };

        Ok(Profile { base, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawProfile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn professional_defaults_lists() {
        let profile = raw(
            "slug: amir\nname: Amir\ntype: professional\ncontact:\n  email: amir@example.com\n",
        )
        .validate()
        .unwrap();
        assert!(profile.base.tags.is_empty());
        assert!(profile.base.services.is_empty());
        assert_eq!(profile.profile_type(), ProfileType::Professional);
        assert_eq!(profile.base.location, "");
    }

    #[test]
    fn company_ignores_professional_keys() {
        let profile = raw(
            r#"
slug: gaza-soft
name: Gaza Soft
type: company
industry: Technology
company_size: medium
title: Should be ignored
availability: not-a-value
contact:
  email: hello@gazasoft.ps
  instagram: "@gazasoft"
team:
  size: 12
  roles: [Backend, Design]
"#,
        )
        .validate()
        .unwrap();
        let company = profile.as_company().unwrap();
        assert_eq!(company.industry, "Technology");
        assert_eq!(company.company_size, Some(CompanySize::Medium));
        assert_eq!(company.team.as_ref().map(|t| t.size), Some(12));
        assert_eq!(
            profile.base.contact.other.get("instagram").map(String::as_str),
            Some("@gazasoft")
        );
    }

    #[test]
    fn numeric_and_empty_handles_keep_the_profile() {
        let profile = raw(
            r#"
slug: rami
name: Rami
type: professional
contact:
  email: rami@example.ps
  whatsapp: 970599123456
  instagram:
  telegram: ""
  verified: true
  github: 4242
  website:
"#,
        )
        .validate()
        .unwrap();
        let contact = &profile.base.contact;
        assert_eq!(
            contact.other.get("whatsapp").map(String::as_str),
            Some("970599123456")
        );
        assert_eq!(contact.other.get("verified").map(String::as_str), Some("true"));
        assert!(!contact.other.contains_key("instagram"));
        assert!(!contact.other.contains_key("telegram"));
        assert_eq!(contact.github.as_deref(), Some("4242"));
        assert_eq!(contact.website, None);
    }

    #[test]
    fn reports_first_missing_field() {
        let err = raw("name: X\ntype: company\n").validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("slug"));

        let err = raw("slug: x\nname: \"  \"\ntype: company\n")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name"));

        let err = raw("slug: x\nname: X\ncontact:\n  email: x@y.z\n")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("type"));

        let err = raw("slug: x\nname: X\ntype: company\ncontact:\n  website: x.ps\n")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("contact.email"));
    }

    #[test]
    fn rejects_unknown_type_and_bad_values() {
        let err = raw("slug: x\nname: X\ntype: agency\ncontact:\n  email: x@y.z\n")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownType("agency".into()));

        let err = raw(
            "slug: x\nname: X\ntype: professional\navailability: sometimes\ncontact:\n  email: x@y.z\n",
        )
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { field: "availability", .. }
        ));
    }

    #[test]
    fn rejects_slug_that_is_not_url_safe() {
        let err = raw("slug: a b/c\nname: X\ntype: company\ncontact:\n  email: x@y.z\n")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSlug("a b/c".into()));
    }
}
