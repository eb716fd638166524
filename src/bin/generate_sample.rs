//! Writes a deterministic set of sample profile documents and loads them
//! back, so the loader's warnings and the resulting collection can be
//! inspected.
//!
//! Usage: `generate_sample [OUTPUT_DIR]`. Without an argument the output goes
//! to `$DIRECTORY_PROFILES_DIR`, falling back to `sample_profiles`.

use std::path::Path;

use anyhow::{Context, Result};
use gaza_directory::{
    load_all_profiles, Availability, CompanyDetails, CompanySize, Contact, DirectoryConfig,
    ProfessionalDetails, Profile, ProfileBase, ProfileCounts, ProfileKind, SearchFilters,
};

/// Seeded xoshiro256** so every run writes the same sample set.
struct SampleRng {
    state: [u64; 4],
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for word in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *word = x;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let out = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= shifted;
        self.state[3] = self.state[3].rotate_left(45);
        out
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const LOCATIONS: [&str; 6] = [
    "Gaza City",
    "Khan Younis",
    "Rafah",
    "Deir el-Balah",
    "Jabalia",
    "Beit Hanoun",
];
const SKILLS: [&str; 8] = [
    "react", "node", "python", "design", "flutter", "rust", "translation", "marketing",
];
const AVAILABILITY: [Availability; 3] = [
    Availability::Available,
    Availability::Busy,
    Availability::Unavailable,
];

fn base(slug: &str, name: &str, name_arabic: &str, location: &str, tags: Vec<String>) -> ProfileBase {
    ProfileBase {
        slug: slug.to_string(),
        name: name.to_string(),
        name_arabic: Some(name_arabic.to_string()),
        location: location.to_string(),
        tags,
        services: Vec::new(),
        contact: Contact {
            email: format!("{slug}@example.ps"),
            ..Contact::default()
        },
        about: None,
        about_arabic: None,
    }
}

fn professionals(rng: &mut SampleRng) -> Vec<Profile> {
    let people = [
        ("amir-haddad", "Amir Haddad", "أمير حداد", "Frontend Engineer"),
        ("lina-saleh", "Lina Saleh", "لينا صالح", "Product Designer"),
        ("omar-nasser", "Omar Nasser", "عمر ناصر", "Backend Developer"),
        ("sara-khalil", "Sara Khalil", "سارة خليل", "Translator"),
    ];
    people
        .iter()
        .map(|&(slug, name, arabic, title)| {
            let tags = vec![rng.pick(&SKILLS).to_string(), rng.pick(&SKILLS).to_string()];
            Profile {
                base: base(slug, name, arabic, rng.pick(&LOCATIONS), tags),
                kind: ProfileKind::Professional(ProfessionalDetails {
                    title: title.to_string(),
                    years_experience: Some(1 + rng.below(12) as u32),
                    availability: Some(AVAILABILITY[rng.below(AVAILABILITY.len())]),
                    languages: vec!["Arabic".into(), "English".into()],
                    ..ProfessionalDetails::default()
                }),
            }
        })
        .collect()
}

fn companies(rng: &mut SampleRng) -> Vec<Profile> {
    let firms = [
        ("gaza-sky-soft", "Gaza Sky Soft", "غزة سكاي سوفت", "Technology", CompanySize::Medium),
        ("olive-studio", "Olive Studio", "استوديو الزيتون", "Design", CompanySize::Startup),
    ];
    firms
        .iter()
        .map(|&(slug, name, arabic, industry, size)| {
            let mut base = base(slug, name, arabic, rng.pick(&LOCATIONS), Vec::new());
            base.services = vec![rng.pick(&SKILLS).to_string()];
            Profile {
                base,
                kind: ProfileKind::Company(CompanyDetails {
                    industry: industry.to_string(),
                    company_size: Some(size),
                    founded: Some(2010 + rng.below(12) as i32),
                    ..CompanyDetails::default()
                }),
            }
        })
        .collect()
}

/// Documents the loader is expected to skip.
const BROKEN: [(&str, &str); 3] = [
    (
        "zz-missing-email.yml",
        "slug: no-email\nname: No Email\ntype: professional\ncontact:\n  website: example.ps\n",
    ),
    ("zz-malformed.yml", "slug: [unclosed\nname: Broken\n"),
    (
        "zz-duplicate.yml",
        "slug: amir-haddad\nname: Amir Again\ntype: professional\ncontact:\n  email: again@example.ps\n",
    ),
];

fn write_profiles(dir: &Path, profiles: &[Profile]) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for profile in profiles {
        let path = dir.join(format!("{}.yml", profile.slug()));
        let yaml = serde_yaml::to_string(profile)
            .with_context(|| format!("serializing {}", profile.slug()))?;
        std::fs::write(&path, yaml).with_context(|| format!("writing {}", path.display()))?;
    }
    for (file, text) in BROKEN {
        let path = dir.join(file);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(dir) => DirectoryConfig::with_profiles_dir(dir),
        None => DirectoryConfig::with_profiles_dir("sample_profiles").with_env_overrides(),
    };
    let output_dir = config.profiles_dir.clone();

    let mut rng = SampleRng::new(42);
    let mut profiles = professionals(&mut rng);
    profiles.extend(companies(&mut rng));
    write_profiles(&output_dir, &profiles)?;

    println!(
        "Wrote {} profiles and {} broken documents to {}",
        profiles.len(),
        BROKEN.len(),
        output_dir.display()
    );

    let report = load_all_profiles(&config).context("loading sample profiles back")?;
    let counts = ProfileCounts::of(&report.profiles);
    println!(
        "Loaded {} professionals and {} companies, skipped {}",
        counts.professionals,
        counts.companies,
        report.skipped_count()
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.source.display(), skipped.reason);
    }

    let gaza = gaza_directory::filter_and_sort(
        &report.profiles,
        &SearchFilters {
            location: vec!["Gaza City".into()],
            ..SearchFilters::default()
        },
        "name",
    );
    println!("In Gaza City: {}", serde_json::to_string_pretty(&gaza)?);
    Ok(())
}
