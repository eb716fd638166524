use std::path::Path;
use std::sync::Arc;

use gaza_directory::{DirectoryConfig, DirectoryState, ProfileStore, TypeScope};

fn write(dir: &Path, file: &str, text: &str) {
    std::fs::write(dir.join(file), text).unwrap();
}

fn profile_doc(slug: &str, name: &str) -> String {
    format!("slug: {slug}\nname: {name}\ntype: professional\ncontact:\n  email: {slug}@example.ps\n")
}

fn store_for(dir: &Path) -> ProfileStore {
    let _ = env_logger::builder().is_test(true).try_init();
    ProfileStore::new(DirectoryConfig::with_profiles_dir(dir))
}

#[test]
fn serves_from_cache_until_refresh() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "amir.yml", &profile_doc("amir", "Amir"));
    let mut store = store_for(dir.path());
    assert!(!store.is_loaded());

    let first = store.profiles().unwrap();
    assert!(store.is_loaded());
    assert_eq!(first.len(), 1);

    // New file is invisible while the cache is live.
    write(dir.path(), "zara.yml", &profile_doc("zara", "Zara"));
    let cached = store.profiles().unwrap();
    assert!(Arc::ptr_eq(&first, &cached));
    assert_eq!(store.profile_by_slug("zara").unwrap(), None);

    let refreshed = store.refresh().unwrap();
    assert_eq!(refreshed.len(), 2);
    assert_eq!(
        store.profile_by_slug("zara").unwrap().map(|p| p.name().to_string()),
        Some("Zara".to_string())
    );
}

#[test]
fn invalidate_forces_reload_on_next_access() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "amir.yml", &profile_doc("amir", "Amir"));
    let mut store = store_for(dir.path());
    store.profiles().unwrap();

    std::fs::remove_file(dir.path().join("amir.yml")).unwrap();
    assert!(store.profile_by_slug("amir").unwrap().is_some());

    store.invalidate();
    assert!(!store.is_loaded());
    assert_eq!(store.profile_by_slug("amir").unwrap(), None);
}

#[test]
fn failed_refresh_leaves_nothing_cached() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("profiles");
    std::fs::create_dir(&root).unwrap();
    write(&root, "amir.yml", &profile_doc("amir", "Amir"));
    let mut store = store_for(&root);
    store.profiles().unwrap();

    std::fs::remove_dir_all(&root).unwrap();
    assert!(store.refresh().is_err());
    assert!(!store.is_loaded());
    assert!(store.skipped().is_empty());
}

#[test]
fn skipped_records_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "amir.yml", &profile_doc("amir", "Amir"));
    write(dir.path(), "bad.yml", "slug: bad\nname: Bad\ntype: company\n");
    let mut store = store_for(dir.path());
    assert!(store.skipped().is_empty());

    assert_eq!(store.counts().unwrap().total(), 1);
    assert_eq!(store.skipped().len(), 1);
    assert!(store.skipped()[0].source.ends_with("bad.yml"));
}

#[test]
fn state_loads_through_store() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "zara.yml", &profile_doc("zara", "Zara"));
    write(
        dir.path(),
        "khan-tech.yml",
        "slug: khan-tech\nname: Khan Tech\ntype: company\nindustry: Technology\ncontact:\n  email: k@example.ps\n",
    );
    let mut store = store_for(dir.path());
    let mut state = DirectoryState::default();

    state.load_from(&mut store);
    assert!(state.status_message.is_none());
    assert_eq!(state.visible().count(), 2);

    state.set_scope(TypeScope::Professional);
    let slugs: Vec<&str> = state.visible().map(|p| p.slug()).collect();
    assert_eq!(slugs, vec!["zara"]);

    write(dir.path(), "amir.yml", &profile_doc("amir", "Amir"));
    state.refresh_from(&mut store);
    state.set_sort("name");
    let slugs: Vec<&str> = state.visible().map(|p| p.slug()).collect();
    assert_eq!(slugs, vec!["amir", "zara"]);
}

#[test]
fn state_reports_unreadable_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_for(&dir.path().join("missing"));
    let mut state = DirectoryState::default();

    state.load_from(&mut store);
    let message = state.status_message.as_deref().unwrap();
    assert!(message.contains("Failed to load profiles"));
    assert_eq!(state.visible().count(), 0);
}

#[test]
fn state_drops_profiles_when_refresh_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("profiles");
    std::fs::create_dir(&root).unwrap();
    write(&root, "amir.yml", &profile_doc("amir", "Amir"));
    let mut store = store_for(&root);
    let mut state = DirectoryState::default();

    state.load_from(&mut store);
    assert_eq!(state.visible().count(), 1);

    std::fs::remove_dir_all(&root).unwrap();
    state.refresh_from(&mut store);
    assert!(!store.is_loaded());
    assert_eq!(state.visible().count(), 0);
    assert!(state.profiles().is_empty());
    assert!(state
        .status_message
        .as_deref()
        .is_some_and(|m| m.contains("Failed to load profiles")));
}
