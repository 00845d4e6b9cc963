use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

use spacetraders_cache::storage::{CacheMap, CacheStore};

fn sample() -> CacheMap {
    let mut map = CacheMap::new();
    map.insert(
        "agent_info".to_string(),
        json!({"last_updated": "2025-01-01T00:00:00+00:00", "data": {"symbol": "AGENT"}}),
    );
    map.insert("waypoints_X1-AB12".to_string(), json!({"data": []}));
    map
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("data.json"));

    assert!(store.load().is_empty());
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    for content in ["{not json", "", "[1, 2, 3]", "\"just a string\""] {
        fs::write(&path, content).unwrap();
        assert!(CacheStore::new(&path).load().is_empty(), "content: {:?}", content);
    }
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("data.json"));

    let data = sample();
    store.save(&data);
    assert_eq!(store.load(), data);

    // Saving what was loaded changes nothing
    store.save(&store.load());
    assert_eq!(store.load(), data);
}

#[test]
fn test_save_creates_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cache").join("data.json");
    let store = CacheStore::new(&path);

    store.save(&sample());

    assert!(path.exists());
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(on_disk.is_object());
}

#[test]
fn test_save_leaves_no_temporary_files() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("data.json"));

    store.save(&sample());
    store.save(&CacheMap::new());

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["data.json".to_string()]);
    assert!(store.load().is_empty());
}

#[test]
fn test_save_failure_is_swallowed() {
    let dir = TempDir::new().unwrap();
    // A regular file where the parent directory should be
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let store = CacheStore::new(blocker.join("data.json"));

    store.save(&sample());

    assert!(store.load().is_empty());
}

#[test]
fn test_clear() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("data.json"));

    assert!(!store.clear().unwrap());
    store.save(&sample());
    assert!(store.clear().unwrap());
    assert!(!store.path().exists());
    assert!(store.load().is_empty());
}
