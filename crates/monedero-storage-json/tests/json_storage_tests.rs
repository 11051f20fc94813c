use monedero_core::{ProfileStore, StateStorage};
use monedero_domain::{PersistedState, Profile, ProfileData, Theme};
use monedero_storage_json::{JsonStateStorage, StoragePaths};
use std::fs;
use tempfile::tempdir;

fn paths(dir: &tempfile::TempDir) -> StoragePaths {
    StoragePaths {
        data_root: dir.path().join("data"),
        backup_root: dir.path().join("backups"),
    }
}

fn sample_state() -> PersistedState {
    let profile = Profile::new("España", "ES", "EUR", ProfileData::default());
    let active = profile.id;
    PersistedState {
        profiles: vec![profile],
        active_profile_id: Some(active),
        theme: Theme::Light,
    }
}

#[test]
fn save_and_load_round_trips_the_document() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStateStorage::new(paths(&dir)).expect("create storage");

    assert!(storage.load_state().expect("empty load").is_none());

    let state = sample_state();
    storage.save_state(&state).expect("save state");
    let loaded = storage.load_state().expect("load state").expect("present");
    assert_eq!(loaded, state);
    assert!(storage.state_path().exists());
}

#[test]
fn overwrites_keep_a_backup_of_the_previous_version() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStateStorage::new(paths(&dir)).expect("create storage");

    let mut state = sample_state();
    storage.save_state(&state).expect("first save");
    state.theme = Theme::Dark;
    storage.save_state(&state).expect("second save");

    let backups = storage.list_backups().expect("list backups");
    assert!(
        !backups.is_empty(),
        "overwriting must leave a backup behind"
    );
}

#[test]
fn explicit_backups_can_be_restored() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStateStorage::new(paths(&dir)).expect("create storage");

    let state = sample_state();
    storage.save_state(&state).expect("save");
    let info = storage
        .backup_state(&state, Some("before import"))
        .expect("create backup");
    assert!(info.id.contains("before-import"), "note lands in the name");

    let restored = storage.restore_backup(&info).expect("restore");
    assert_eq!(restored, state);
}

#[test]
fn retention_prunes_old_backups() {
    let dir = tempdir().expect("tempdir");
    let storage =
        JsonStateStorage::with_retention(paths(&dir), 2).expect("create storage");

    let state = sample_state();
    for index in 0..4 {
        storage
            .backup_state(&state, Some(&format!("copy {index}")))
            .expect("backup");
    }
    let backups = storage.list_backups().expect("list");
    assert!(backups.len() <= 2, "got {} backups", backups.len());
}

#[test]
fn profile_store_loads_documents_missing_newer_collections() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStateStorage::new(paths(&dir)).expect("create storage");

    // A document from before assets/liabilities/loans existed.
    let legacy = r#"{
        "profiles": [{
            "id": "0a5bd1b4-9d3c-4f53-8d77-9c2ce29edb1a",
            "name": "España",
            "country_code": "ES",
            "currency": "EUR",
            "data": { "transactions": [], "bank_accounts": [],
                      "categories": [], "fixed_expenses": [] }
        }],
        "active_profile_id": "0a5bd1b4-9d3c-4f53-8d77-9c2ce29edb1a",
        "theme": "dark"
    }"#;
    fs::create_dir_all(dir.path().join("data")).expect("mkdir");
    fs::write(storage.state_path(), legacy).expect("write legacy doc");

    let store = ProfileStore::load(Box::new(storage)).expect("store loads legacy doc");
    let profile = store.active_profile().expect("active profile resolves");
    assert!(profile.data.assets.is_empty());
    assert!(profile.data.liabilities.is_empty());
    assert!(profile.data.loans.is_empty());
}
